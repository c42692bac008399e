use super::*;

/// Tests the owner-scoped queries.
///
/// Verifies that the paginated listing returns only active businesses of the owner
/// while `ids_by_owner` also includes deleted ones.
///
/// Expected: 1 listed business, 2 ids
#[tokio::test]
async fn scopes_to_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user_with_role(db, "business_owner").await?;
    let other = factory::create_user_with_role(db, "business_owner").await?;
    let active = factory::create_business(db, owner.id).await?;
    let deleted = factory::business::BusinessFactory::new(db, owner.id)
        .is_active(false)
        .build()
        .await?;
    factory::create_business(db, other.id).await?;

    let repo = BusinessRepository::new(db);

    let (businesses, total) = repo
        .get_by_owner_paginated(owner.id, PageRequest::default())
        .await?;
    assert_eq!(total, 1);
    assert_eq!(businesses[0].id, active.id);

    let mut ids = repo.ids_by_owner(owner.id).await?;
    ids.sort();
    assert_eq!(ids, vec![active.id, deleted.id]);

    Ok(())
}
