use super::*;

/// Tests the admin statistics queries.
///
/// Verifies per-status counts and that revenue only sums paid bookings.
///
/// Expected: 2 pending, 1 completed, revenue 120
#[tokio::test]
async fn counts_statuses_and_paid_revenue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .total_price(40.0)
        .build()
        .await?;
    BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .total_price(75.0)
        .payment_status("paid")
        .build()
        .await?;
    BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .status("completed")
        .payment_status("paid")
        .total_price(45.0)
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let counts = repo.count_by_status().await?;

    assert_eq!(counts.get(&BookingStatus::Pending), Some(&2));
    assert_eq!(counts.get(&BookingStatus::Completed), Some(&1));
    assert_eq!(repo.paid_revenue().await?, 120.0);

    Ok(())
}
