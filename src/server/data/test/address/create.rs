use super::*;

/// Tests that the first address becomes the default.
///
/// Expected: first address default even though not requested
#[tokio::test]
async fn first_address_becomes_default() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);

    let first = repo.create(create_params(user.id, "Springfield", false)).await?;
    let second = repo.create(create_params(user.id, "Shelbyville", false)).await?;

    assert!(first.is_default);
    assert!(!second.is_default);
    assert_eq!(default_ids(&repo, user.id).await?, vec![first.id]);

    Ok(())
}

/// Tests creating a new default address.
///
/// Verifies that the previous default is cleared so exactly one default remains, and
/// that other users' defaults are untouched.
///
/// Expected: only the new address is default
#[tokio::test]
async fn new_default_replaces_previous() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);

    let other_default = repo.create(create_params(other.id, "Ogdenville", false)).await?;
    repo.create(create_params(user.id, "Springfield", false)).await?;
    let second = repo.create(create_params(user.id, "Shelbyville", true)).await?;

    assert_eq!(default_ids(&repo, user.id).await?, vec![second.id]);
    assert_eq!(default_ids(&repo, other.id).await?, vec![other_default.id]);

    // Default is listed first
    let listed = repo.list_by_user(user.id).await?;
    assert_eq!(listed[0].id, second.id);

    Ok(())
}

/// Tests that addresses are only visible to their owner.
///
/// Expected: None for another user
#[tokio::test]
async fn hides_addresses_of_other_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let address = factory::create_address(db, user.id).await?;
    let repo = AddressRepository::new(db);

    assert!(repo.find_for_user(address.id, other.id).await?.is_none());
    assert!(repo.find_for_user(address.id, user.id).await?.is_some());
    assert!(!repo.delete(address.id, other.id).await?);

    Ok(())
}
