//! Business domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::{
        business::{
            AddressFieldsDto, BusinessDto, BusinessHoursDto, CreateBusinessDto,
            PaginatedBusinessesDto, UpdateBusinessDto,
        },
        offering::ServiceCategory,
    },
    server::{
        error::validation::ValidationError,
        model::{clean, file::EntityImages, parse_json},
        util::{
            pagination::Page,
            validate::{
                is_valid_email, is_valid_latitude, is_valid_longitude, is_valid_time_of_day,
                Validator,
            },
        },
    },
};

/// A service provider listed on the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<ServiceCategory>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: AddressFieldsDto,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub business_hours: Vec<BusinessHoursDto>,
    pub is_verified: bool,
    pub is_active: bool,
    pub average_rating: Option<f64>,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    pub fn from_entity(entity: entity::business::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            description: entity.description,
            categories: parse_json("business.categories", entity.categories)?,
            email: entity.email,
            phone: entity.phone,
            website: entity.website,
            address: AddressFieldsDto {
                street: entity.street,
                city: entity.city,
                state: entity.state,
                zip_code: entity.zip_code,
                country: entity.country,
            },
            latitude: entity.latitude,
            longitude: entity.longitude,
            business_hours: parse_json("business.business_hours", entity.business_hours)?,
            is_verified: entity.is_verified,
            is_active: entity.is_active,
            average_rating: entity.average_rating,
            rating_count: entity.rating_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self, images: EntityImages, distance_km: Option<f64>) -> BusinessDto {
        BusinessDto {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            description: self.description,
            categories: self.categories,
            email: self.email,
            phone: self.phone,
            website: self.website,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            business_hours: self.business_hours,
            is_verified: self.is_verified,
            is_active: self.is_active,
            average_rating: self.average_rating,
            rating_count: self.rating_count,
            distance_km,
            logo_url: images.primary,
            gallery_urls: images.gallery,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A business paired with its distance from a search point.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessMatch {
    pub business: Business,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CreateBusinessParams {
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<ServiceCategory>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: AddressFieldsDto,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub business_hours: Vec<BusinessHoursDto>,
}

impl CreateBusinessParams {
    pub fn from_dto(owner_id: i32, dto: CreateBusinessDto) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.required(&dto.name, "name");
        validate_contact(&mut v, dto.email.as_deref());
        validate_address(&mut v, &dto.address);
        validate_location(&mut v, dto.latitude, dto.longitude);
        validate_hours(&mut v, &dto.business_hours);
        v.finish()?;

        Ok(Self {
            owner_id,
            name: dto.name.trim().to_string(),
            description: clean(dto.description),
            categories: dto.categories,
            email: clean(dto.email).map(|e| e.to_lowercase()),
            phone: clean(dto.phone),
            website: clean(dto.website),
            address: dto.address,
            latitude: dto.latitude,
            longitude: dto.longitude,
            business_hours: dto.business_hours,
        })
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateBusinessParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<ServiceCategory>>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<AddressFieldsDto>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub business_hours: Option<Vec<BusinessHoursDto>>,
    pub is_verified: Option<bool>,
}

impl UpdateBusinessParams {
    pub fn from_dto(dto: UpdateBusinessDto) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.not_blank(dto.name.as_deref(), "name");
        validate_contact(&mut v, dto.email.as_deref());
        if let Some(address) = &dto.address {
            validate_address(&mut v, address);
        }
        validate_location(&mut v, dto.latitude, dto.longitude);
        if let Some(hours) = &dto.business_hours {
            validate_hours(&mut v, hours);
        }
        v.finish()?;

        Ok(Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            categories: dto.categories,
            email: dto.email.map(|e| e.trim().to_lowercase()),
            phone: dto.phone,
            website: dto.website,
            address: dto.address,
            latitude: dto.latitude,
            longitude: dto.longitude,
            business_hours: dto.business_hours,
            is_verified: dto.is_verified,
        })
    }
}

/// Point and radius for proximity searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRadius {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Public listing filters.
#[derive(Debug, Clone, Default)]
pub struct BusinessFilter {
    /// Case-insensitive exact city match.
    pub city: Option<String>,
    pub category: Option<ServiceCategory>,
    pub verified: Option<bool>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    pub near: Option<GeoRadius>,
}

fn validate_contact(v: &mut Validator, email: Option<&str>) {
    v.check(
        email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .is_none_or(is_valid_email),
        "email",
        "Email must be a valid email address",
    );
}

fn validate_address(v: &mut Validator, address: &AddressFieldsDto) {
    v.required(&address.street, "address.street")
        .required(&address.city, "address.city")
        .required(&address.state, "address.state")
        .required(&address.zip_code, "address.zip_code")
        .required(&address.country, "address.country");
}

pub(crate) fn validate_location(v: &mut Validator, latitude: Option<f64>, longitude: Option<f64>) {
    v.check(
        latitude.is_some() == longitude.is_some(),
        "latitude",
        "Latitude and longitude must be given together",
    )
    .check(
        latitude.is_none_or(is_valid_latitude),
        "latitude",
        "Latitude must be between -90 and 90",
    )
    .check(
        longitude.is_none_or(is_valid_longitude),
        "longitude",
        "Longitude must be between -180 and 180",
    );
}

fn validate_hours(v: &mut Validator, hours: &[BusinessHoursDto]) {
    for entry in hours.iter().filter(|h| !h.is_closed) {
        let times_valid = matches!(
            (&entry.open, &entry.close),
            (Some(open), Some(close))
                if is_valid_time_of_day(open) && is_valid_time_of_day(close) && open < close
        );
        v.check(
            times_valid,
            "business_hours",
            "Open days need HH:MM open and close times with open before close",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::business::Weekday;

    fn create_dto() -> CreateBusinessDto {
        CreateBusinessDto {
            name: "Happy Paws".to_string(),
            description: None,
            categories: vec![ServiceCategory::Grooming],
            email: Some("Hello@HappyPaws.example".to_string()),
            phone: None,
            website: None,
            address: AddressFieldsDto {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "US".to_string(),
            },
            latitude: Some(39.78),
            longitude: Some(-89.65),
            business_hours: vec![BusinessHoursDto {
                day: Weekday::Monday,
                open: Some("09:00".to_string()),
                close: Some("17:00".to_string()),
                is_closed: false,
            }],
        }
    }

    #[test]
    fn accepts_valid_payload() {
        let params = CreateBusinessParams::from_dto(3, create_dto()).unwrap();

        assert_eq!(params.email.as_deref(), Some("hello@happypaws.example"));
    }

    #[test]
    fn rejects_half_location_and_inverted_hours() {
        let dto = CreateBusinessDto {
            longitude: None,
            business_hours: vec![BusinessHoursDto {
                day: Weekday::Tuesday,
                open: Some("18:00".to_string()),
                close: Some("08:00".to_string()),
                is_closed: false,
            }],
            ..create_dto()
        };

        let err = CreateBusinessParams::from_dto(3, dto).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["latitude", "business_hours"]);
    }
}

impl Page<BusinessMatch> {
    pub fn into_dto(self) -> PaginatedBusinessesDto {
        let page = self.map(|m| m.business.into_dto(EntityImages::default(), m.distance_km));

        PaginatedBusinessesDto {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

impl Page<Business> {
    pub fn into_dto(self) -> PaginatedBusinessesDto {
        self.map(|business| BusinessMatch {
            business,
            distance_km: None,
        })
        .into_dto()
    }
}
