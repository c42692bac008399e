use super::*;

/// Tests that reopening a cancelled booking clears its cancellation details.
///
/// Expected: details recorded on cancel, both `None` after confirming again
#[tokio::test]
async fn clears_cancellation_when_reopened() -> Result<(), DbErr> {
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
                cancellation_reason: Some("Pet is unwell".to_string()),
                cancelled_at: Some(Utc::now()),
            },
        )
        .await?
        .unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Pet is unwell"));

    let reopened = repo
        .update_status(
            booking.id,
            StatusChange {
                status: BookingStatus::Confirmed,
                cancellation_reason: None,
                cancelled_at: None,
            },
        )
        .await?
        .unwrap();
    assert_eq!(reopened.status, BookingStatus::Confirmed);
    assert!(reopened.cancelled_at.is_none());
    assert!(reopened.cancellation_reason.is_none());

    Ok(())
}
