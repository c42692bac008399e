use super::*;

/// Tests counting accounts per role.
///
/// Expected: Ok with 2 pet owners, 1 business owner and no admins
#[tokio::test]
async fn counts_each_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    factory::create_user_with_role(db, "business_owner").await?;

    let repo = UserRepository::new(db);
    let counts = repo.count_by_role().await?;

    assert_eq!(counts.get(&UserRole::PetOwner), Some(&2));
    assert_eq!(counts.get(&UserRole::BusinessOwner), Some(&1));
    assert_eq!(counts.get(&UserRole::Admin), None);

    Ok(())
}
