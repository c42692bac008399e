use super::*;

/// Tests listing pets of one owner.
///
/// Verifies that other owners' pets and inactive pets are excluded.
///
/// Expected: Ok with the owner's 2 active pets
#[tokio::test]
async fn filters_by_owner_and_skips_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_pet(db, owner.id).await?;
    factory::create_pet(db, owner.id).await?;
    factory::pet::PetFactory::new(db, owner.id)
        .is_active(false)
        .build()
        .await?;
    factory::create_pet(db, other.id).await?;

    let repo = PetRepository::new(db);
    let (pets, total) = repo
        .get_paginated(
            PetFilter {
                owner_id: Some(owner.id),
                species: None,
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(total, 2);
    assert!(pets.iter().all(|p| p.owner_id == owner.id && p.is_active));

    Ok(())
}

/// Tests filtering pets by species.
///
/// Expected: Ok with only the cat
#[tokio::test]
async fn filters_by_species() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    factory::create_pet(db, owner.id).await?;
    factory::pet::PetFactory::new(db, owner.id)
        .name("Mittens")
        .species("cat")
        .build()
        .await?;

    let repo = PetRepository::new(db);
    let (pets, total) = repo
        .get_paginated(
            PetFilter {
                owner_id: None,
                species: Some(Species::Cat),
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(pets[0].name, "Mittens");

    Ok(())
}
