use super::*;

/// Tests creating a booking.
///
/// Verifies that new bookings start pending and unpaid, and that display names of
/// the referenced records are attached.
///
/// Expected: Ok(Booking) with pending statuses and resolved names
#[tokio::test]
async fn creates_pending_booking_with_details() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let repo = BookingRepository::new(db);

    let booking = repo
        .create(CreateBookingParams {
            owner_id: owner.id,
            business_id: business.id,
            service_id: service.id,
            pet_id: pet.id,
            appointment_date_time: Utc::now() + Duration::days(2),
            total_price: service.price,
            notes: Some("Nervous around clippers".to_string()),
        })
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment_status, PaymentStatus::Pending);
    assert!(booking.rating.is_none());

    let details = repo.with_details(vec![booking]).await?;
    assert_eq!(details[0].pet_name.as_deref(), Some(pet.name.as_str()));
    assert_eq!(details[0].service_name.as_deref(), Some(service.name.as_str()));
    assert_eq!(details[0].business_name.as_deref(), Some(business.name.as_str()));

    Ok(())
}

/// Tests cancelling a booking.
///
/// Expected: status cancelled with reason and timestamp recorded
#[tokio::test]
async fn records_cancellation_details() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let booking = factory::create_booking(db, owner.id, pet.id, business.id, service.id).await?;
    let repo = BookingRepository::new(db);

    let cancelled = repo
        .update_status(
            booking.id,
            StatusChange {
                status: BookingStatus::Cancelled,
                cancellation_reason: Some("Vet visit".to_string()),
                cancelled_at: Some(Utc::now()),
            },
        )
        .await?
        .unwrap();

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Vet visit"));
    assert!(cancelled.cancelled_at.is_some());

    let paid = repo
        .update_payment_status(booking.id, PaymentStatus::Refunded)
        .await?
        .unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Refunded);

    Ok(())
}
