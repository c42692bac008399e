//! Platform statistics for the admin dashboard.

use std::collections::HashMap;

use crate::model::{
    admin::{BookingCountsDto, PlatformStatsDto, UserCountsDto},
    booking::BookingStatus,
    user::UserRole,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformStats {
    pub users_by_role: HashMap<UserRole, u64>,
    pub active_pets: u64,
    pub businesses: u64,
    pub verified_businesses: u64,
    pub active_services: u64,
    pub bookings_by_status: HashMap<BookingStatus, u64>,
    pub revenue: f64,
}

impl PlatformStats {
    pub fn into_dto(self) -> PlatformStatsDto {
        let role = |r: UserRole| self.users_by_role.get(&r).copied().unwrap_or(0);
        let status = |s: BookingStatus| self.bookings_by_status.get(&s).copied().unwrap_or(0);

        PlatformStatsDto {
            users: UserCountsDto {
                total: self.users_by_role.values().sum(),
                pet_owners: role(UserRole::PetOwner),
                business_owners: role(UserRole::BusinessOwner),
                admins: role(UserRole::Admin),
            },
            active_pets: self.active_pets,
            businesses: self.businesses,
            verified_businesses: self.verified_businesses,
            active_services: self.active_services,
            bookings: BookingCountsDto {
                total: self.bookings_by_status.values().sum(),
                pending: status(BookingStatus::Pending),
                confirmed: status(BookingStatus::Confirmed),
                in_progress: status(BookingStatus::InProgress),
                completed: status(BookingStatus::Completed),
                cancelled: status(BookingStatus::Cancelled),
                no_show: status(BookingStatus::NoShow),
            },
            revenue: self.revenue,
        }
    }
}
