use super::*;

/// Tests deleting the default address.
///
/// Verifies that the most recently created remaining address is promoted.
///
/// Expected: Ok(true), newest remaining address is default
#[tokio::test]
async fn promotes_newest_remaining_address() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);
    let first = repo.create(create_params(user.id, "Springfield", false)).await?;
    repo.create(create_params(user.id, "Shelbyville", false)).await?;
    let newest = repo.create(create_params(user.id, "Ogdenville", false)).await?;

    assert!(repo.delete(first.id, user.id).await?);

    assert_eq!(default_ids(&repo, user.id).await?, vec![newest.id]);
    assert_eq!(repo.list_by_user(user.id).await?.len(), 2);

    Ok(())
}

/// Tests deleting a non-default address.
///
/// Expected: default unchanged
#[tokio::test]
async fn keeps_default_when_deleting_other() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);
    let first = repo.create(create_params(user.id, "Springfield", false)).await?;
    let second = repo.create(create_params(user.id, "Shelbyville", false)).await?;

    assert!(repo.delete(second.id, user.id).await?);

    assert_eq!(default_ids(&repo, user.id).await?, vec![first.id]);

    Ok(())
}

/// Tests deleting the only address.
///
/// Expected: Ok(true), no addresses left
#[tokio::test]
async fn deletes_last_address() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);
    let only = repo.create(create_params(user.id, "Springfield", false)).await?;

    assert!(repo.delete(only.id, user.id).await?);
    assert!(repo.list_by_user(user.id).await?.is_empty());

    Ok(())
}
