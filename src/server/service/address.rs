use sea_orm::DatabaseConnection;

use crate::{
    model::address::{CreateAddressDto, UpdateAddressDto},
    server::{
        data::address::AddressRepository,
        error::AppError,
        model::address::{Address, CreateAddressParams, UpdateAddressParams},
    },
};

/// Saved addresses of the calling user.
///
/// Every lookup is scoped to the caller, so addresses of other users are reported as
/// missing rather than forbidden.
pub struct AddressService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AddressService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the user's addresses, default first.
    pub async fn list(&self, user_id: i32) -> Result<Vec<Address>, AppError> {
        Ok(AddressRepository::new(self.db).list_by_user(user_id).await?)
    }

    pub async fn get(&self, user_id: i32, id: i32) -> Result<Address, AppError> {
        AddressRepository::new(self.db)
            .find_for_user(id, user_id)
            .await?
            .ok_or_else(|| address_not_found(id))
    }

    /// Saves an address. The first address of a user always becomes the default.
    pub async fn create(&self, user_id: i32, dto: CreateAddressDto) -> Result<Address, AppError> {
        let params = CreateAddressParams::from_dto(user_id, dto)?;

        Ok(AddressRepository::new(self.db).create(params).await?)
    }

    /// Applies a partial update; `is_default: true` moves the default here.
    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        dto: UpdateAddressDto,
    ) -> Result<Address, AppError> {
        let params = UpdateAddressParams::from_dto(dto)?;

        AddressRepository::new(self.db)
            .update(id, user_id, params)
            .await?
            .ok_or_else(|| address_not_found(id))
    }

    pub async fn set_default(&self, user_id: i32, id: i32) -> Result<Address, AppError> {
        AddressRepository::new(self.db)
            .set_default(id, user_id)
            .await?
            .ok_or_else(|| address_not_found(id))
    }

    /// Deletes an address; deleting the default promotes the newest remaining one.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        if !AddressRepository::new(self.db).delete(id, user_id).await? {
            return Err(address_not_found(id));
        }

        Ok(())
    }
}

fn address_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Address {} not found", id))
}
