use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserCountsDto {
    pub total: u64,
    pub pet_owners: u64,
    pub business_owners: u64,
    pub admins: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingCountsDto {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub no_show: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlatformStatsDto {
    pub users: UserCountsDto,
    pub active_pets: u64,
    pub businesses: u64,
    pub verified_businesses: u64,
    pub active_services: u64,
    pub bookings: BookingCountsDto,
    /// Sum of `total_price` over paid bookings.
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserStatusDto {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRoleDto {
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyBusinessDto {
    pub is_verified: bool,
}
