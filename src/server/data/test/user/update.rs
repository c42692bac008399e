use super::*;

/// Tests a partial account update.
///
/// Verifies that only provided fields change and that an empty phone clears the
/// stored number.
///
/// Expected: Ok(Some(User)) with updated first name and no phone
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let mut params = create_params("update@example.test");
    params.phone = Some("555-0100".to_string());
    let user = repo.create(params).await?;

    let updated = repo
        .update(
            user.id,
            UpdateUserParams {
                first_name: Some("Grace".to_string()),
                phone: Some(String::new()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name, "Grace");
    assert_eq!(updated.last_name, "Lovelace");
    assert!(updated.phone.is_none());

    Ok(())
}

/// Tests updating a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo.update(999, UpdateUserParams::default()).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests deactivating and changing the role of an account.
///
/// Expected: Ok(Some(User)) reflecting each change
#[tokio::test]
async fn sets_active_state_and_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    let deactivated = repo.set_active(user.id, false).await?.unwrap();
    assert!(!deactivated.is_active);

    let promoted = repo
        .set_role(user.id, UserRole::BusinessOwner)
        .await?
        .unwrap();
    assert_eq!(promoted.role, UserRole::BusinessOwner);

    Ok(())
}
