//! Booking factory for creating test booking entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test bookings with customizable fields.
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    business_id: i32,
    service_id: i32,
    pet_id: i32,
    appointment_date_time: DateTime<Utc>,
    status: String,
    payment_status: String,
    total_price: f64,
}

impl<'a> BookingFactory<'a> {
    /// Creates a new BookingFactory with default values.
    ///
    /// Defaults:
    /// - appointment_date_time: 1 day from now
    /// - status / payment_status: `"pending"`
    /// - total_price: `50.0`
    pub fn new(
        db: &'a DatabaseConnection,
        owner_id: i32,
        pet_id: i32,
        business_id: i32,
        service_id: i32,
    ) -> Self {
        Self {
            db,
            owner_id,
            business_id,
            service_id,
            pet_id,
            appointment_date_time: Utc::now() + Duration::days(1),
            status: "pending".to_string(),
            payment_status: "pending".to_string(),
            total_price: 50.0,
        }
    }

    pub fn appointment(mut self, appointment_date_time: DateTime<Utc>) -> Self {
        self.appointment_date_time = appointment_date_time;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn payment_status(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    pub fn total_price(mut self, total_price: f64) -> Self {
        self.total_price = total_price;
        self
    }

    /// Builds and inserts the booking entity into the database.
    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        entity::booking::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            business_id: ActiveValue::Set(self.business_id),
            service_id: ActiveValue::Set(self.service_id),
            pet_id: ActiveValue::Set(self.pet_id),
            appointment_date_time: ActiveValue::Set(self.appointment_date_time),
            status: ActiveValue::Set(self.status),
            payment_status: ActiveValue::Set(self.payment_status),
            total_price: ActiveValue::Set(self.total_price),
            notes: ActiveValue::Set(None),
            cancellation_reason: ActiveValue::Set(None),
            cancelled_at: ActiveValue::Set(None),
            rating: ActiveValue::Set(None),
            review: ActiveValue::Set(None),
            rated_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending booking for tomorrow.
pub async fn create_booking(
    db: &DatabaseConnection,
    owner_id: i32,
    pet_id: i32,
    business_id: i32,
    service_id: i32,
) -> Result<entity::booking::Model, DbErr> {
    BookingFactory::new(db, owner_id, pet_id, business_id, service_id)
        .build()
        .await
}
