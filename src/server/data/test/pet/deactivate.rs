use super::*;

/// Tests soft deleting a pet.
///
/// Verifies that a deactivated pet disappears from reads and cannot be deleted or
/// updated again.
///
/// Expected: Ok(true), then None and Ok(false)
#[tokio::test]
async fn hides_deactivated_pet() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_pet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let pet = factory::create_pet(db, owner.id).await?;
    let repo = PetRepository::new(db);

    assert!(repo.deactivate(pet.id).await?);

    assert!(repo.find_active_by_id(pet.id).await?.is_none());
    assert!(!repo.deactivate(pet.id).await?);
    assert!(repo
        .update(pet.id, UpdatePetParams::default())
        .await?
        .is_none());

    // Row is kept
    let row = entity::prelude::Pet::find_by_id(pet.id).one(db).await?;
    assert!(row.is_some_and(|p| !p.is_active));

    Ok(())
}
