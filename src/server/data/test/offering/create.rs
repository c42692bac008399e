use super::*;

/// Tests creating, updating and deleting a service.
///
/// Expected: service created active, updated, then hidden but still found by id
#[tokio::test]
async fn creates_updates_and_deactivates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let business = factory::create_business(db, owner.id).await?;
    let repo = OfferingRepository::new(db);

    let offering = repo
        .create(CreateOfferingParams {
            business_id: business.id,
            name: "Nail trim".to_string(),
            description: None,
            category: ServiceCategory::Grooming,
            price: 15.0,
            duration_minutes: 20,
            availability: Vec::new(),
            requirements: vec!["Vaccinated".to_string()],
            max_pets: 1,
        })
        .await?;
    assert!(offering.is_active);
    assert_eq!(offering.requirements, vec!["Vaccinated".to_string()]);

    let updated = repo
        .update(
            offering.id,
            UpdateOfferingParams {
                price: Some(18.0),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.price, 18.0);
    assert_eq!(updated.name, "Nail trim");

    assert!(repo.deactivate(offering.id).await?);
    assert!(repo.find_active_by_id(offering.id).await?.is_none());
    assert!(repo
        .find_by_id(offering.id)
        .await?
        .is_some_and(|o| !o.is_active));

    Ok(())
}
