use super::*;

/// Tests the owner scope.
///
/// Expected: only bookings made by the owner
#[tokio::test]
async fn scopes_to_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let other = factory::create_user(db).await?;
    let other_pet = factory::create_pet(db, other.id).await?;
    factory::create_booking(db, owner.id, pet.id, business.id, service.id).await?;
    factory::create_booking(db, other.id, other_pet.id, business.id, service.id).await?;

    let repo = BookingRepository::new(db);
    let (bookings, total) = repo
        .get_paginated(
            BookingFilter {
                scope: BookingScope::Owner(owner.id),
                status: None,
                business_id: None,
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(bookings[0].owner_id, owner.id);

    Ok(())
}

/// Tests the business scope combined with a status filter.
///
/// Expected: only the confirmed booking at the owner's business
#[tokio::test]
async fn scopes_to_businesses_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, pet, _, business, service) = create_booking_dependencies(db).await?;
    let (_, other_business, other_service) =
        factory::helpers::create_service_with_dependencies(db).await?;
    BookingFactory::new(db, owner.id, pet.id, business.id, service.id)
        .status("confirmed")
        .build()
        .await?;
    factory::create_booking(db, owner.id, pet.id, business.id, service.id).await?;
    BookingFactory::new(db, owner.id, pet.id, other_business.id, other_service.id)
        .status("confirmed")
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let (bookings, total) = repo
        .get_paginated(
            BookingFilter {
                scope: BookingScope::Businesses(vec![business.id]),
                status: Some(BookingStatus::Confirmed),
                business_id: None,
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(bookings[0].business_id, business.id);
    assert_eq!(bookings[0].status, BookingStatus::Confirmed);

    Ok(())
}
