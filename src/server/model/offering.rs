//! Service (catalog offering) domain models and parameters.
//!
//! "Offering" names the bookable services a business sells, keeping them apart from the
//! layer-level `service` modules.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::offering::{
        AvailabilityDto, CreateServiceDto, PaginatedServicesDto, ServiceCategory, ServiceDto,
        UpdateServiceDto,
    },
    server::{
        error::validation::ValidationError,
        model::{clean, file::EntityImages, parse_column, parse_json},
        util::{
            pagination::Page,
            validate::{is_valid_time_of_day, Validator},
        },
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Offering {
    pub id: i32,
    pub business_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub price: f64,
    pub duration_minutes: i32,
    pub availability: Vec<AvailabilityDto>,
    pub requirements: Vec<String>,
    pub max_pets: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offering {
    pub fn from_entity(entity: entity::service::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            business_id: entity.business_id,
            name: entity.name,
            description: entity.description,
            category: parse_column("service.category", &entity.category)?,
            price: entity.price,
            duration_minutes: entity.duration_minutes,
            availability: parse_json("service.availability", entity.availability)?,
            requirements: parse_json("service.requirements", entity.requirements)?,
            max_pets: entity.max_pets,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self, images: EntityImages) -> ServiceDto {
        ServiceDto {
            id: self.id,
            business_id: self.business_id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            duration_minutes: self.duration_minutes,
            availability: self.availability,
            requirements: self.requirements,
            max_pets: self.max_pets,
            is_active: self.is_active,
            image_urls: images.gallery,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOfferingParams {
    pub business_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub price: f64,
    pub duration_minutes: i32,
    pub availability: Vec<AvailabilityDto>,
    pub requirements: Vec<String>,
    pub max_pets: i32,
}

impl CreateOfferingParams {
    pub fn from_dto(dto: CreateServiceDto) -> Result<Self, ValidationError> {
        let max_pets = dto.max_pets.unwrap_or(1);

        let mut v = Validator::new();
        v.required(&dto.name, "name");
        validate_numbers(&mut v, Some(dto.price), Some(dto.duration_minutes), Some(max_pets));
        validate_availability(&mut v, &dto.availability);
        v.finish()?;

        Ok(Self {
            business_id: dto.business_id,
            name: dto.name.trim().to_string(),
            description: clean(dto.description),
            category: dto.category,
            price: dto.price,
            duration_minutes: dto.duration_minutes,
            availability: dto.availability,
            requirements: clean_requirements(dto.requirements),
            max_pets,
        })
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOfferingParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ServiceCategory>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub availability: Option<Vec<AvailabilityDto>>,
    pub requirements: Option<Vec<String>>,
    pub max_pets: Option<i32>,
}

impl UpdateOfferingParams {
    pub fn from_dto(dto: UpdateServiceDto) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.not_blank(dto.name.as_deref(), "name");
        validate_numbers(&mut v, dto.price, dto.duration_minutes, dto.max_pets);
        if let Some(availability) = &dto.availability {
            validate_availability(&mut v, availability);
        }
        v.finish()?;

        Ok(Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            category: dto.category,
            price: dto.price,
            duration_minutes: dto.duration_minutes,
            availability: dto.availability,
            requirements: dto.requirements.map(clean_requirements),
            max_pets: dto.max_pets,
        })
    }
}

/// Public listing filters.
#[derive(Debug, Clone, Default)]
pub struct OfferingFilter {
    pub business_id: Option<i32>,
    pub category: Option<ServiceCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

fn validate_numbers(
    v: &mut Validator,
    price: Option<f64>,
    duration_minutes: Option<i32>,
    max_pets: Option<i32>,
) {
    v.check(
        price.is_none_or(|p| p >= 0.0 && p.is_finite()),
        "price",
        "Price must be zero or more",
    )
    .check(
        duration_minutes.is_none_or(|d| d > 0),
        "duration_minutes",
        "Duration must be greater than zero",
    )
    .check(
        max_pets.is_none_or(|m| m >= 1),
        "max_pets",
        "At least one pet must be allowed",
    );
}

fn validate_availability(v: &mut Validator, availability: &[AvailabilityDto]) {
    for window in availability {
        v.check(
            is_valid_time_of_day(&window.start_time)
                && is_valid_time_of_day(&window.end_time)
                && window.start_time < window.end_time,
            "availability",
            "Availability windows need HH:MM start and end times with start before end",
        );
    }
}

fn clean_requirements(requirements: Vec<String>) -> Vec<String> {
    requirements
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price_and_zero_duration() {
        let dto = CreateServiceDto {
            business_id: 1,
            name: "Full groom".to_string(),
            description: None,
            category: ServiceCategory::Grooming,
            price: -5.0,
            duration_minutes: 0,
            availability: Vec::new(),
            requirements: Vec::new(),
            max_pets: None,
        };

        let err = CreateOfferingParams::from_dto(dto).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["price", "duration_minutes"]);
    }
}

impl Page<Offering> {
    pub fn into_dto(self) -> PaginatedServicesDto {
        let page = self.map(|offering| offering.into_dto(EntityImages::default()));

        PaginatedServicesDto {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}
