use super::*;

/// Tests the public service listing.
///
/// Verifies category and price range filters and that results are ordered by price.
///
/// Expected: the two grooming services within range, cheapest first
#[tokio::test]
async fn filters_by_category_and_price() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let business = factory::create_business(db, owner.id).await?;
    for price in [80.0, 30.0, 200.0] {
        factory::offering::OfferingFactory::new(db, business.id)
            .category("grooming")
            .price(price)
            .build()
            .await?;
    }
    factory::offering::OfferingFactory::new(db, business.id)
        .category("walking")
        .price(40.0)
        .build()
        .await?;
    factory::offering::OfferingFactory::new(db, business.id)
        .category("grooming")
        .price(50.0)
        .is_active(false)
        .build()
        .await?;

    let repo = OfferingRepository::new(db);
    let (offerings, total) = repo
        .get_paginated(
            OfferingFilter {
                business_id: Some(business.id),
                category: Some(ServiceCategory::Grooming),
                min_price: Some(10.0),
                max_price: Some(100.0),
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(total, 2);
    let prices: Vec<f64> = offerings.iter().map(|o| o.price).collect();
    assert_eq!(prices, vec![30.0, 80.0]);

    Ok(())
}
