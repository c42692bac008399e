use super::as_user;
use crate::{
    model::{
        business::UpdateBusinessDto,
        offering::{CreateServiceDto, ServiceCategory},
    },
    server::{
        error::AppError,
        model::business::{BusinessFilter, GeoRadius},
        service::{
            business::BusinessService, offering::OfferingService,
            storage::memory::InMemoryStorage,
        },
        util::pagination::PageRequest,
    },
};
use test_utils::{builder::TestBuilder, factory, factory::business::BusinessFactory};

fn verify_dto(is_verified: bool) -> UpdateBusinessDto {
    UpdateBusinessDto {
        is_verified: Some(is_verified),
        ..Default::default()
    }
}

/// Tests the proximity search.
///
/// Verifies businesses outside the radius or without a location are dropped and the
/// rest are ordered nearest first with their distance.
///
/// Expected: the near business then the mid business
#[tokio::test]
async fn searches_by_radius() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = InMemoryStorage::new();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let mid = BusinessFactory::new(db, owner.id)
        .location(40.05, -89.65)
        .build()
        .await?;
    let near = BusinessFactory::new(db, owner.id)
        .location(39.79, -89.65)
        .build()
        .await?;
    BusinessFactory::new(db, owner.id)
        .location(41.88, -87.63)
        .build()
        .await?;
    BusinessFactory::new(db, owner.id).build().await?;

    let page = BusinessService::new(db, &storage)
        .search(
            BusinessFilter {
                near: Some(GeoRadius {
                    latitude: 39.78,
                    longitude: -89.65,
                    radius_km: 50.0,
                }),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    let ids: Vec<_> = page.items.iter().map(|m| m.business.id).collect();
    assert_eq!(ids, vec![near.id, mid.id]);
    assert!(page.items[0].distance_km.unwrap() < 2.0);

    Ok(())
}

/// Tests text, city and category filters.
///
/// Expected: only the matching business
#[tokio::test]
async fn filters_by_text_city_and_category() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = InMemoryStorage::new();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let target = BusinessFactory::new(db, owner.id)
        .name("Happy Paws Grooming")
        .city("Shelbyville")
        .categories(&["grooming", "boarding"])
        .build()
        .await?;
    BusinessFactory::new(db, owner.id)
        .name("Happy Tails")
        .city("Shelbyville")
        .categories(&["walking"])
        .build()
        .await?;

    let page = BusinessService::new(db, &storage)
        .search(
            BusinessFilter {
                city: Some("shelbyville".to_string()),
                category: Some(ServiceCategory::Boarding),
                search: Some("HAPPY".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].business.id, target.id);

    Ok(())
}

/// Tests that owners cannot verify their own business.
///
/// Expected: Forbidden for the owner, Ok for an admin
#[tokio::test]
async fn only_admin_changes_verification() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = InMemoryStorage::new();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let business = factory::create_business(db, owner.id).await?;
    let admin = as_user(factory::create_user_with_role(db, "admin").await?);
    let businesses = BusinessService::new(db, &storage);

    let denied = businesses
        .update(&as_user(owner), business.id, verify_dto(true))
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let verified = businesses
        .update(&admin, business.id, verify_dto(true))
        .await?;
    assert!(verified.is_verified);

    Ok(())
}

/// Tests service management on a business.
///
/// Verifies only the business owner may add services and that deleted services leave
/// the business listing.
///
/// Expected: Forbidden for a stranger; empty listing after delete
#[tokio::test]
async fn manages_services_of_own_business() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let storage = InMemoryStorage::new();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let stranger = as_user(factory::create_user_with_role(db, "business_owner").await?);
    let business = factory::create_business(db, owner.id).await?;
    let owner = as_user(owner);
    let offerings = OfferingService::new(db, &storage);
    let dto = || CreateServiceDto {
        business_id: business.id,
        name: "Nail trim".to_string(),
        description: None,
        category: ServiceCategory::Grooming,
        price: 15.0,
        duration_minutes: 15,
        availability: Vec::new(),
        requirements: Vec::new(),
        max_pets: None,
    };

    assert!(matches!(
        offerings.create(&stranger, dto()).await,
        Err(AppError::Forbidden(_))
    ));

    let offering = offerings.create(&owner, dto()).await?;
    assert_eq!(offering.max_pets, 1);

    let businesses = BusinessService::new(db, &storage);
    assert_eq!(businesses.get_services(business.id).await?.len(), 1);

    offerings.delete(&owner, offering.id).await?;
    assert!(businesses.get_services(business.id).await?.is_empty());
    assert!(matches!(
        offerings.get(offering.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
