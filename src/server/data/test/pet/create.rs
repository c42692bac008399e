use super::*;

/// Tests creating a pet.
///
/// Verifies that the pet is stored active with its enums and health records intact.
///
/// Expected: Ok(Pet) readable by id
#[tokio::test]
async fn creates_active_pet() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let repo = PetRepository::new(db);

    let mut params = create_params(owner.id);
    params.vaccinations = vec![VaccinationDto {
        name: "Rabies".to_string(),
        administered_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        next_due_on: NaiveDate::from_ymd_opt(2026, 6, 1),
        veterinarian: None,
    }];
    let pet = repo.create(params).await?;

    assert!(pet.is_active);
    assert_eq!(pet.owner_id, owner.id);
    assert_eq!(pet.species, Species::Dog);
    assert_eq!(pet.gender, Gender::Male);
    assert_eq!(pet.vaccinations.len(), 1);

    let found = repo.find_active_by_id(pet.id).await?.unwrap();
    assert_eq!(found, pet);

    Ok(())
}

/// Tests a partial pet update.
///
/// Expected: Ok(Some(Pet)) with the new name and unchanged species
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let repo = PetRepository::new(db);
    let pet = repo.create(create_params(owner.id)).await?;

    let updated = repo
        .update(
            pet.id,
            UpdatePetParams {
                name: Some("Cookie".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Cookie");
    assert_eq!(updated.species, Species::Dog);
    assert_eq!(updated.breed.as_deref(), Some("Beagle"));

    Ok(())
}
