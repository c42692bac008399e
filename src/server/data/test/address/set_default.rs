use super::*;

/// Tests moving the default flag.
///
/// Expected: exactly one default, the chosen address
#[tokio::test]
async fn moves_default_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);
    repo.create(create_params(user.id, "Springfield", false)).await?;
    let second = repo.create(create_params(user.id, "Shelbyville", false)).await?;

    let updated = repo.set_default(second.id, user.id).await?.unwrap();

    assert!(updated.is_default);
    assert_eq!(default_ids(&repo, user.id).await?, vec![second.id]);

    Ok(())
}

/// Tests a partial update that also requests the default flag.
///
/// Expected: fields changed and the address becomes the only default
#[tokio::test]
async fn update_can_make_default() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = AddressRepository::new(db);
    repo.create(create_params(user.id, "Springfield", false)).await?;
    let work = repo.create(create_params(user.id, "Capital City", false)).await?;

    let updated = repo
        .update(
            work.id,
            user.id,
            UpdateAddressParams {
                label: Some(AddressLabel::Work),
                instructions: Some("Ring twice".to_string()),
                make_default: true,
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.label, AddressLabel::Work);
    assert_eq!(updated.instructions.as_deref(), Some("Ring twice"));
    assert_eq!(default_ids(&repo, user.id).await?, vec![work.id]);

    Ok(())
}
