//! Business factory for creating test business entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test businesses with customizable fields.
pub struct BusinessFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    city: String,
    categories: Vec<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    is_verified: bool,
    is_active: bool,
}

impl<'a> BusinessFactory<'a> {
    /// Creates a new BusinessFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Business {id}"`
    /// - city: `"Springfield"`
    /// - categories: `["grooming"]`
    /// - no geo point, unverified, active
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `owner_id` - Id of the owning user
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id,
            name: format!("Business {}", id),
            city: "Springfield".to_string(),
            categories: vec!["grooming".to_string()],
            latitude: None,
            longitude: None,
            is_verified: false,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn is_verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the business entity into the database.
    pub async fn build(self) -> Result<entity::business::Model, DbErr> {
        let now = Utc::now();
        entity::business::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            categories: ActiveValue::Set(serde_json::json!(self.categories)),
            email: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            website: ActiveValue::Set(None),
            street: ActiveValue::Set("1 Main Street".to_string()),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set("IL".to_string()),
            zip_code: ActiveValue::Set("62701".to_string()),
            country: ActiveValue::Set("US".to_string()),
            latitude: ActiveValue::Set(self.latitude),
            longitude: ActiveValue::Set(self.longitude),
            business_hours: ActiveValue::Set(serde_json::json!([])),
            is_verified: ActiveValue::Set(self.is_verified),
            is_active: ActiveValue::Set(self.is_active),
            average_rating: ActiveValue::Set(None),
            rating_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active, unverified business for the given owner.
pub async fn create_business(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::business::Model, DbErr> {
    BusinessFactory::new(db, owner_id).build().await
}
