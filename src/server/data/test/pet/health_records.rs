use super::*;

/// Tests appending vaccination and medical records.
///
/// Verifies that each append keeps the existing entries.
///
/// Expected: Ok(Some(Pet)) with both records present
#[tokio::test]
async fn appends_records() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let pet = factory::create_pet(db, owner.id).await?;
    let repo = PetRepository::new(db);

    for name in ["Rabies", "Distemper"] {
        repo.add_vaccination(
            pet.id,
            VaccinationDto {
                name: name.to_string(),
                administered_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                next_due_on: None,
                veterinarian: Some("Dr. Herriot".to_string()),
            },
        )
        .await?;
    }
    let updated = repo
        .add_medical_record(
            pet.id,
            MedicalRecordDto {
                condition: "Allergy".to_string(),
                diagnosed_on: None,
                treatment: Some("Antihistamines".to_string()),
                notes: None,
            },
        )
        .await?
        .unwrap();

    let names: Vec<_> = updated.vaccinations.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Rabies", "Distemper"]);
    assert_eq!(updated.medical_history.len(), 1);

    Ok(())
}

/// Tests appending to a deleted pet.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_inactive_pet() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let pet = factory::pet::PetFactory::new(db, owner.id)
        .is_active(false)
        .build()
        .await?;
    let repo = PetRepository::new(db);

    let result = repo
        .add_medical_record(
            pet.id,
            MedicalRecordDto {
                condition: "Limp".to_string(),
                diagnosed_on: None,
                treatment: None,
                notes: None,
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
