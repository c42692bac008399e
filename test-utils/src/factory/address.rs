//! Address factory for creating saved user addresses.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test addresses with customizable fields.
///
/// The factory writes the row as-is: it does not clear other defaults, so tests can
/// set up states the repository itself would never produce.
pub struct AddressFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    label: String,
    city: String,
    is_default: bool,
}

impl<'a> AddressFactory<'a> {
    /// Creates a new AddressFactory with default values.
    ///
    /// Defaults:
    /// - label: `"home"`
    /// - city: `"Springfield"`
    /// - is_default: `false`
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            label: "home".to_string(),
            city: "Springfield".to_string(),
            is_default: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn is_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Builds and inserts the address entity into the database.
    pub async fn build(self) -> Result<entity::address::Model, DbErr> {
        let now = Utc::now();
        entity::address::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            label: ActiveValue::Set(self.label),
            custom_label: ActiveValue::Set(None),
            street: ActiveValue::Set("742 Evergreen Terrace".to_string()),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set("IL".to_string()),
            zip_code: ActiveValue::Set("62704".to_string()),
            country: ActiveValue::Set("US".to_string()),
            latitude: ActiveValue::Set(None),
            longitude: ActiveValue::Set(None),
            instructions: ActiveValue::Set(None),
            is_default: ActiveValue::Set(self.is_default),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a non-default home address for the given user.
pub async fn create_address(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::address::Model, DbErr> {
    AddressFactory::new(db, user_id).build().await
}
