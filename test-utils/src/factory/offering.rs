//! Service factory for creating the services a business offers.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test services with customizable fields.
pub struct OfferingFactory<'a> {
    db: &'a DatabaseConnection,
    business_id: i32,
    name: String,
    category: String,
    price: f64,
    duration_minutes: i32,
    is_active: bool,
}

impl<'a> OfferingFactory<'a> {
    /// Creates a new OfferingFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Service {id}"`
    /// - category: `"grooming"`
    /// - price: `50.0`
    /// - duration_minutes: `60`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection, business_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            business_id,
            name: format!("Service {}", id),
            category: "grooming".to_string(),
            price: 50.0,
            duration_minutes: 60,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the service entity into the database.
    pub async fn build(self) -> Result<entity::service::Model, DbErr> {
        let now = Utc::now();
        entity::service::ActiveModel {
            business_id: ActiveValue::Set(self.business_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            category: ActiveValue::Set(self.category),
            price: ActiveValue::Set(self.price),
            duration_minutes: ActiveValue::Set(self.duration_minutes),
            availability: ActiveValue::Set(serde_json::json!([])),
            requirements: ActiveValue::Set(serde_json::json!([])),
            max_pets: ActiveValue::Set(1),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active grooming service for the given business.
pub async fn create_offering(
    db: &DatabaseConnection,
    business_id: i32,
) -> Result<entity::service::Model, DbErr> {
    OfferingFactory::new(db, business_id).build().await
}
