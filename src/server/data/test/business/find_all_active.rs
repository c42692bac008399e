use super::*;

/// Tests loading active businesses.
///
/// Verifies that deleted businesses are skipped and the verification filter applies.
///
/// Expected: 2 active businesses, 1 of them verified
#[tokio::test]
async fn skips_inactive_and_filters_verified() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    factory::business::BusinessFactory::new(db, owner.id)
        .is_verified(true)
        .build()
        .await?;
    factory::create_business(db, owner.id).await?;
    factory::business::BusinessFactory::new(db, owner.id)
        .is_active(false)
        .build()
        .await?;

    let repo = BusinessRepository::new(db);

    assert_eq!(repo.find_all_active(None).await?.len(), 2);

    let verified = repo.find_all_active(Some(true)).await?;
    assert_eq!(verified.len(), 1);
    assert!(verified[0].is_verified);

    assert_eq!(repo.count(false).await?, 3);
    assert_eq!(repo.count(true).await?, 1);

    Ok(())
}
