use super::*;

/// Tests that a stored token id can be consumed once.
///
/// Verifies the rotation guarantee: the first consume succeeds and deletes the id,
/// so replaying the same token fails.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn consumes_token_only_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "jti-1".to_string(), Utc::now() + Duration::days(7))
        .await?;

    assert!(repo.consume(user.id, "jti-1").await?);
    assert!(!repo.consume(user.id, "jti-1").await?);

    Ok(())
}

/// Tests that expired token ids are rejected.
///
/// Expected: Ok(false)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "old".to_string(), Utc::now() - Duration::minutes(1))
        .await?;

    assert!(!repo.consume(user.id, "old").await?);

    Ok(())
}

/// Tests that a token id cannot be consumed for another user.
///
/// Expected: Ok(false), token still usable by its owner
#[tokio::test]
async fn rejects_token_of_other_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    repo.create(owner.id, "mine".to_string(), Utc::now() + Duration::days(1))
        .await?;

    assert!(!repo.consume(other.id, "mine").await?);
    assert!(repo.consume(owner.id, "mine").await?);

    Ok(())
}
