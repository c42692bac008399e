use super::*;

/// Tests that a booking can be rated only once.
///
/// Expected: first rating stored, second attempt returns None
#[tokio::test]
async fn rates_booking_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let booking = BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .status("completed")
        .build()
        .await?;
    let repo = BookingRepository::new(db);

    let rated = repo
        .rate(booking.id, 5, Some("Great groom".to_string()))
        .await?
        .unwrap();
    assert_eq!(rated.rating, Some(5));
    assert!(rated.rated_at.is_some());

    assert!(repo.rate(booking.id, 1, None).await?.is_none());
    assert_eq!(repo.ratings_for_business(business.id).await?, vec![5]);

    Ok(())
}
