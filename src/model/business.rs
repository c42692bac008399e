use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::offering::ServiceCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Opening hours for one weekday. Times are `HH:MM` in the business's local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessHoursDto {
    pub day: Weekday,
    pub open: Option<String>,
    pub close: Option<String>,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressFieldsDto {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BusinessDto {
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
    /// Great-circle distance from the search point, for radius searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub logo_url: Option<String>,
    pub gallery_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBusinessDto {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<ServiceCategory>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: AddressFieldsDto,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub business_hours: Vec<BusinessHoursDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBusinessDto {
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
    /// Only admins may change verification.
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedBusinessesDto {
    pub items: Vec<BusinessDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
