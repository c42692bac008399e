use super::*;

/// Tests creating a business.
///
/// Verifies that new businesses start active, unverified and unrated.
///
/// Expected: Ok(Business)
#[tokio::test]
async fn creates_unverified_business() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let repo = BusinessRepository::new(db);

    let business = repo
        .create(CreateBusinessParams {
            owner_id: owner.id,
            name: "Happy Paws".to_string(),
            description: None,
            categories: vec![ServiceCategory::Grooming, ServiceCategory::Walking],
            email: None,
            phone: None,
            website: None,
            address: AddressFieldsDto {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "US".to_string(),
            },
            latitude: Some(39.78),
            longitude: Some(-89.65),
            business_hours: Vec::new(),
        })
        .await?;

    assert!(business.is_active);
    assert!(!business.is_verified);
    assert_eq!(business.rating_count, 0);
    assert!(business.average_rating.is_none());
    assert_eq!(
        business.categories,
        vec![ServiceCategory::Grooming, ServiceCategory::Walking]
    );

    Ok(())
}

/// Tests verifying and rating a business.
///
/// Expected: Ok with updated verification flag and rating aggregates
#[tokio::test]
async fn sets_verification_and_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let business = factory::create_business(db, owner.id).await?;
    let repo = BusinessRepository::new(db);

    let verified = repo.set_verified(business.id, true).await?.unwrap();
    assert!(verified.is_verified);

    repo.set_rating(business.id, Some(4.5), 2).await?;
    let rated = repo.find_active_by_id(business.id).await?.unwrap();
    assert_eq!(rated.average_rating, Some(4.5));
    assert_eq!(rated.rating_count, 2);

    Ok(())
}

/// Tests updating and soft deleting a business.
///
/// Expected: update applies, deleted business no longer found
#[tokio::test]
async fn updates_then_deactivates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let business = factory::create_business(db, owner.id).await?;
    let repo = BusinessRepository::new(db);

    let updated = repo
        .update(
            business.id,
            UpdateBusinessParams {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.name, "Renamed");

    assert!(repo.deactivate(business.id).await?);
    assert!(repo.find_active_by_id(business.id).await?.is_none());
    assert_eq!(repo.find_owner_id(business.id).await?, Some(owner.id));

    Ok(())
}
