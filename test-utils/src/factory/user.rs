//! User factory for creating test user entities.
//!
//! This module provides factory methods for creating user entities with sensible
//! defaults. The factory supports customization through a builder pattern and can
//! also create the matching profile row.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Placeholder stored when a test does not need a verifiable password.
pub const UNUSABLE_PASSWORD_HASH: &str = "!unusable";

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .email("owner@example.test")
///     .role("business_owner")
///     .with_profile()
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    is_active: bool,
    with_profile: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@example.test"` where id is auto-incremented
    /// - first_name / last_name: `"User"` / `"{id}"`
    /// - role: `"pet_owner"`
    /// - is_active: `true`
    /// - no profile row
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("user{}@example.test", id),
            password_hash: UNUSABLE_PASSWORD_HASH.to_string(),
            first_name: "User".to_string(),
            last_name: id.to_string(),
            role: "pet_owner".to_string(),
            is_active: true,
            with_profile: false,
        }
    }

    /// Sets the email for the user.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets a precomputed password hash for the user.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    /// Sets the first name for the user.
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Sets the role (`pet_owner`, `business_owner` or `admin`).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets whether the account is active.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Also inserts an empty profile row for the user.
    pub fn with_profile(mut self) -> Self {
        self.with_profile = true;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        let user = entity::user::ActiveModel {
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            phone: ActiveValue::Set(None),
            role: ActiveValue::Set(self.role),
            is_active: ActiveValue::Set(self.is_active),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        if self.with_profile {
            entity::user_profile::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                email_notifications: ActiveValue::Set(true),
                sms_notifications: ActiveValue::Set(false),
                push_notifications: ActiveValue::Set(true),
                preferred_language: ActiveValue::Set("en".to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(user)
    }
}

/// Creates a pet owner with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a user with the given role.
///
/// # Example
///
/// ```rust,ignore
/// let admin = create_user_with_role(&db, "admin").await?;
/// ```
pub async fn create_user_with_role(
    db: &DatabaseConnection,
    role: &str,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role(role).build().await
}
