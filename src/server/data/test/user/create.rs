use super::*;

/// Tests creating a user.
///
/// Verifies that registration inserts the account together with an empty profile
/// carrying the default notification preferences.
///
/// Expected: Ok with user and profile rows
#[tokio::test]
async fn creates_user_with_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(create_params("ada@example.test")).await?;

    assert_eq!(user.email, "ada@example.test");
    assert_eq!(user.role, UserRole::PetOwner);
    assert!(user.is_active);
    assert!(user.last_login_at.is_none());

    let profile = entity::prelude::UserProfile::find()
        .filter(entity::user_profile::Column::UserId.eq(user.id))
        .one(db)
        .await?
        .unwrap();
    assert!(profile.email_notifications);
    assert!(!profile.sms_notifications);
    assert_eq!(profile.preferred_language, "en");

    Ok(())
}

/// Tests the unique email constraint.
///
/// Verifies that inserting a second account with the same email fails and leaves
/// no orphaned profile behind.
///
/// Expected: Err(DbErr), one profile row
#[tokio::test]
async fn fails_for_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(create_params("dup@example.test")).await?;

    let result = repo.create(create_params("dup@example.test")).await;

    assert!(result.is_err());
    let profiles = entity::prelude::UserProfile::find().count(db).await?;
    assert_eq!(profiles, 1);

    Ok(())
}

/// Tests the credential lookup used by login.
///
/// Verifies that the stored hash is returned alongside the user.
///
/// Expected: Ok(Some(UserCredentials))
#[tokio::test]
async fn finds_credentials_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(create_params("login@example.test")).await?;

    let credentials = repo
        .find_credentials_by_email("login@example.test")
        .await?
        .unwrap();

    assert_eq!(credentials.user.id, user.id);
    assert_eq!(credentials.password_hash, "hash");
    assert!(repo.email_exists("login@example.test").await?);
    assert!(repo
        .find_credentials_by_email("missing@example.test")
        .await?
        .is_none());

    Ok(())
}
