use super::*;

/// Tests revoking all sessions of a user.
///
/// Verifies that only the given user's token ids are removed.
///
/// Expected: Ok(2), one token left for the other user
#[tokio::test]
async fn deletes_all_tokens_of_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    let expires = Utc::now() + Duration::days(1);
    repo.create(user.id, "a".to_string(), expires).await?;
    repo.create(user.id, "b".to_string(), expires).await?;
    repo.create(other.id, "c".to_string(), expires).await?;

    let deleted = repo.delete_all_for_user(user.id).await?;

    assert_eq!(deleted, 2);
    assert_eq!(entity::prelude::RefreshToken::find().count(db).await?, 1);

    Ok(())
}

/// Tests pruning expired token ids.
///
/// Expected: Ok(1), unexpired token kept
#[tokio::test]
async fn deletes_only_expired_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "expired".to_string(), Utc::now() - Duration::hours(1))
        .await?;
    repo.create(user.id, "valid".to_string(), Utc::now() + Duration::hours(1))
        .await?;

    let deleted = repo.delete_expired_for_user(user.id).await?;

    assert_eq!(deleted, 1);
    assert!(repo.consume(user.id, "valid").await?);

    Ok(())
}
