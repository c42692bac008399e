//! Booking domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::booking::{BookingDto, BookingStatus, PaginatedBookingsDto, PaymentStatus},
    server::{model::parse_column, util::pagination::Page},
};

/// Statuses that hold a time slot for the service.
pub const SLOT_HOLDING_STATUSES: [BookingStatus; 2] =
    [BookingStatus::Pending, BookingStatus::Confirmed];

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub owner_id: i32,
    pub business_id: i32,
    pub service_id: i32,
    pub pet_id: i32,
    pub appointment_date_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_price: f64,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub rated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_entity(entity: entity::booking::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            owner_id: entity.owner_id,
            business_id: entity.business_id,
            service_id: entity.service_id,
            pet_id: entity.pet_id,
            appointment_date_time: entity.appointment_date_time,
            status: parse_column("booking.status", &entity.status)?,
            payment_status: parse_column("booking.payment_status", &entity.payment_status)?,
            total_price: entity.total_price,
            notes: entity.notes,
            cancellation_reason: entity.cancellation_reason,
            cancelled_at: entity.cancelled_at,
            rating: entity.rating,
            review: entity.review,
            rated_at: entity.rated_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// A booking with the display names of the records it references.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub pet_name: Option<String>,
    pub service_name: Option<String>,
    pub business_name: Option<String>,
}

impl BookingDetails {
    pub fn into_dto(self) -> BookingDto {
        let b = self.booking;
        BookingDto {
            id: b.id,
            owner_id: b.owner_id,
            business_id: b.business_id,
            service_id: b.service_id,
            pet_id: b.pet_id,
            appointment_date_time: b.appointment_date_time,
            status: b.status,
            payment_status: b.payment_status,
            total_price: b.total_price,
            notes: b.notes,
            cancellation_reason: b.cancellation_reason,
            cancelled_at: b.cancelled_at,
            rating: b.rating,
            review: b.review,
            rated_at: b.rated_at,
            pet_name: self.pet_name,
            service_name: self.service_name,
            business_name: self.business_name,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Row values for a new booking, after all checks passed.
#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    pub owner_id: i32,
    pub business_id: i32,
    pub service_id: i32,
    pub pet_id: i32,
    pub appointment_date_time: DateTime<Utc>,
    pub total_price: f64,
    pub notes: Option<String>,
}

/// Which bookings a caller may list.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingScope {
    All,
    /// Bookings made by this pet owner.
    Owner(i32),
    /// Bookings at any of these businesses.
    Businesses(Vec<i32>),
}

#[derive(Debug, Clone)]
pub struct BookingFilter {
    pub scope: BookingScope,
    pub status: Option<BookingStatus>,
    pub business_id: Option<i32>,
}

/// Status change, with the cancellation details when cancelling.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Page<BookingDetails> {
    pub fn into_dto(self) -> PaginatedBookingsDto {
        let page = self.map(BookingDetails::into_dto);

        PaginatedBookingsDto {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}
