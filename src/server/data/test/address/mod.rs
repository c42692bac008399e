use crate::{
    model::address::AddressLabel,
    server::{
        data::address::AddressRepository,
        model::address::{CreateAddressParams, UpdateAddressParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod set_default;

fn create_params(user_id: i32, city: &str, is_default: bool) -> CreateAddressParams {
    CreateAddressParams {
        user_id,
        label: AddressLabel::Home,
        custom_label: None,
        street: "742 Evergreen Terrace".to_string(),
        city: city.to_string(),
        state: "IL".to_string(),
        zip_code: "62704".to_string(),
        country: "US".to_string(),
        latitude: None,
        longitude: None,
        instructions: None,
        is_default,
    }
}

/// Ids of the user's default addresses.
async fn default_ids(repo: &AddressRepository<'_>, user_id: i32) -> Result<Vec<i32>, DbErr> {
    Ok(repo
        .list_by_user(user_id)
        .await?
        .into_iter()
        .filter(|a| a.is_default)
        .map(|a| a.id)
        .collect())
}
