use super::*;

/// Tests detecting when an active admin exists.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_when_admin_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_with_role(db, "admin").await?;

    let repo = UserRepository::new(db);

    assert!(repo.admin_exists().await?);

    Ok(())
}

/// Tests that deactivated admins do not count.
///
/// Verifies that the bootstrap check ignores admins whose account was disabled,
/// so a fresh bootstrap admin can be created.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_inactive_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .role("admin")
        .is_active(false)
        .build()
        .await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);

    assert!(!repo.admin_exists().await?);

    Ok(())
}
