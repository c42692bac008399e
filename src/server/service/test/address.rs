use crate::{
    model::address::{AddressLabel, CreateAddressDto, UpdateAddressDto},
    server::{error::AppError, service::address::AddressService},
};
use test_utils::{builder::TestBuilder, factory};

fn create_dto(label: AddressLabel, is_default: bool) -> CreateAddressDto {
    CreateAddressDto {
        label,
        custom_label: None,
        street: "742 Evergreen Terrace".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "US".to_string(),
        latitude: None,
        longitude: None,
        instructions: None,
        is_default,
    }
}

/// Tests that addresses are scoped to their owner.
///
/// Expected: NotFound for reads, updates and deletes by another user
#[tokio::test]
async fn hides_addresses_of_other_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let service = AddressService::new(db);
    let address = service
        .create(owner.id, create_dto(AddressLabel::Home, false))
        .await?;

    assert!(matches!(
        service.get(other.id, address.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service
            .update(other.id, address.id, UpdateAddressDto::default())
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(other.id, address.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(service.list(other.id).await?.is_empty());

    Ok(())
}

/// Tests default address handling.
///
/// Verifies the first address becomes the default, that a new default replaces the old
/// one and that deleting the default promotes a remaining address.
///
/// Expected: exactly one default at every step
#[tokio::test]
async fn keeps_a_single_default() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let service = AddressService::new(db);

    let home = service
        .create(user.id, create_dto(AddressLabel::Home, false))
        .await?;
    assert!(home.is_default);

    let work = service
        .create(user.id, create_dto(AddressLabel::Work, true))
        .await?;
    assert!(work.is_default);
    assert!(!service.get(user.id, home.id).await?.is_default);

    let home = service.set_default(user.id, home.id).await?;
    assert!(home.is_default);

    let addresses = service.list(user.id).await?;
    assert_eq!(addresses.iter().filter(|a| a.is_default).count(), 1);
    assert_eq!(addresses[0].id, home.id);

    service.delete(user.id, home.id).await?;
    assert!(service.get(user.id, work.id).await?.is_default);

    Ok(())
}
