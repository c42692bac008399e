//! Saved address domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::address::{AddressDto, AddressLabel, CreateAddressDto, UpdateAddressDto},
    server::{
        error::validation::ValidationError,
        model::{business::validate_location, clean, parse_column},
        util::validate::Validator,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub label: AddressLabel,
    pub custom_label: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub instructions: Option<String>,
    /// Exactly one address per user carries this flag.
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    pub fn from_entity(entity: entity::address::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            label: parse_column("address.label", &entity.label)?,
            custom_label: entity.custom_label,
            street: entity.street,
            city: entity.city,
            state: entity.state,
            zip_code: entity.zip_code,
            country: entity.country,
            latitude: entity.latitude,
            longitude: entity.longitude,
            instructions: entity.instructions,
            is_default: entity.is_default,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> AddressDto {
        AddressDto {
            id: self.id,
            user_id: self.user_id,
            label: self.label,
            custom_label: self.custom_label,
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
            instructions: self.instructions,
            is_default: self.is_default,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAddressParams {
    pub user_id: i32,
    pub label: AddressLabel,
    pub custom_label: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub instructions: Option<String>,
    /// Requested flag; the first address becomes default regardless.
    pub is_default: bool,
}

impl CreateAddressParams {
    pub fn from_dto(user_id: i32, dto: CreateAddressDto) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.required(&dto.street, "street")
            .required(&dto.city, "city")
            .required(&dto.state, "state")
            .required(&dto.zip_code, "zip_code")
            .required(&dto.country, "country")
            .check(
                dto.label != AddressLabel::Other
                    || dto.custom_label.as_deref().is_some_and(|l| !l.trim().is_empty()),
                "custom_label",
                "A custom label is required when the label is 'other'",
            );
        validate_location(&mut v, dto.latitude, dto.longitude);
        v.finish()?;

        Ok(Self {
            user_id,
            label: dto.label,
            custom_label: clean(dto.custom_label),
            street: dto.street.trim().to_string(),
            city: dto.city.trim().to_string(),
            state: dto.state.trim().to_string(),
            zip_code: dto.zip_code.trim().to_string(),
            country: dto.country.trim().to_string(),
            latitude: dto.latitude,
            longitude: dto.longitude,
            instructions: clean(dto.instructions),
            is_default: dto.is_default,
        })
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAddressParams {
    pub label: Option<AddressLabel>,
    pub custom_label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub instructions: Option<String>,
    /// Only `true` has an effect: the address becomes the default.
    pub make_default: bool,
}

impl UpdateAddressParams {
    pub fn from_dto(dto: UpdateAddressDto) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.not_blank(dto.street.as_deref(), "street")
            .not_blank(dto.city.as_deref(), "city")
            .not_blank(dto.state.as_deref(), "state")
            .not_blank(dto.zip_code.as_deref(), "zip_code")
            .not_blank(dto.country.as_deref(), "country");
        validate_location(&mut v, dto.latitude, dto.longitude);
        v.finish()?;

        Ok(Self {
            label: dto.label,
            custom_label: dto.custom_label,
            street: dto.street.map(|s| s.trim().to_string()),
            city: dto.city.map(|s| s.trim().to_string()),
            state: dto.state.map(|s| s.trim().to_string()),
            zip_code: dto.zip_code.map(|s| s.trim().to_string()),
            country: dto.country.map(|s| s.trim().to_string()),
            latitude: dto.latitude,
            longitude: dto.longitude,
            instructions: dto.instructions,
            make_default: dto.is_default == Some(true),
        })
    }
}
