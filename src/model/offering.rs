use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::business::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Grooming,
    Boarding,
    Daycare,
    Veterinary,
    Training,
    Walking,
    Sitting,
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grooming => "grooming",
            Self::Boarding => "boarding",
            Self::Daycare => "daycare",
            Self::Veterinary => "veterinary",
            Self::Training => "training",
            Self::Walking => "walking",
            Self::Sitting => "sitting",
            Self::Other => "other",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "grooming" => Ok(Self::Grooming),
            "boarding" => Ok(Self::Boarding),
            "daycare" => Ok(Self::Daycare),
            "veterinary" => Ok(Self::Veterinary),
            "training" => Ok(Self::Training),
            "walking" => Ok(Self::Walking),
            "sitting" => Ok(Self::Sitting),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown service category '{}'", other)),
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly window in which a service can be booked. Times are `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceDto {
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
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateServiceDto {
    pub business_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub price: f64,
    pub duration_minutes: i32,
    #[serde(default)]
    pub availability: Vec<AvailabilityDto>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub max_pets: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateServiceDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ServiceCategory>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub availability: Option<Vec<AvailabilityDto>>,
    pub requirements: Option<Vec<String>>,
    pub max_pets: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedServicesDto {
    pub items: Vec<ServiceDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
