//! User domain models and parameters.
//!
//! Provides domain models for marketplace accounts and their profiles, the parameter
//! types for registration and updates, and the filter used by the admin user listing.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::{
    model::{
        auth::RegisterDto,
        user::{
            PaginatedUsersDto, UpdateProfileDto, UpdateUserDto, UserDto, UserProfileDto, UserRole,
            UserWithProfileDto,
        },
    },
    server::{
        error::validation::ValidationError,
        model::{clean, parse_column},
        util::{
            pagination::Page,
            validate::{is_valid_email, Validator},
        },
    },
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Marketplace account without credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Lowercased email address.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    /// Deactivated accounts cannot authenticate.
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(DbErr::Custom)` - Stored role is not a known role
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            role: parse_column("user.role", &entity.role)?,
            is_active: entity.is_active,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role: self.role,
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether this user may act on a resource owned by `owner_id`.
    pub fn owns_or_admin(&self, owner_id: i32) -> bool {
        self.is_admin() || self.id == owner_id
    }
}

/// A user together with the stored password hash, used only for credential checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Per-user profile, created empty at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: i32,
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub push_notifications: bool,
    pub preferred_language: String,
    /// Storage path of the current profile picture.
    pub profile_picture_path: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_entity(entity: entity::user_profile::Model) -> Self {
        Self {
            user_id: entity.user_id,
            bio: entity.bio,
            date_of_birth: entity.date_of_birth,
            street: entity.street,
            city: entity.city,
            state: entity.state,
            zip_code: entity.zip_code,
            country: entity.country,
            emergency_contact_name: entity.emergency_contact_name,
            emergency_contact_phone: entity.emergency_contact_phone,
            email_notifications: entity.email_notifications,
            sms_notifications: entity.sms_notifications,
            push_notifications: entity.push_notifications,
            preferred_language: entity.preferred_language,
            profile_picture_path: entity.profile_picture_path,
            updated_at: entity.updated_at,
        }
    }

    /// Converts to a DTO with the resolved profile picture URL.
    pub fn into_dto(self, profile_picture_url: Option<String>) -> UserProfileDto {
        UserProfileDto {
            user_id: self.user_id,
            bio: self.bio,
            date_of_birth: self.date_of_birth,
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            email_notifications: self.email_notifications,
            sms_notifications: self.sms_notifications,
            push_notifications: self.push_notifications,
            preferred_language: self.preferred_language,
            profile_picture_url,
            updated_at: self.updated_at,
        }
    }
}

/// A user with their profile and resolved profile picture URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub user: User,
    pub profile: Option<UserProfile>,
    pub profile_picture_url: Option<String>,
}

impl UserAccount {
    pub fn into_dto(self) -> UserWithProfileDto {
        let url = self.profile_picture_url;
        UserWithProfileDto {
            user: self.user.into_dto(),
            profile: self.profile.map(|p| p.into_dto(url)),
        }
    }
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl RegisterParams {
    /// Validates a registration payload.
    ///
    /// Email is trimmed and lowercased; role defaults to `pet_owner` and may not be `admin`.
    pub fn from_dto(dto: RegisterDto) -> Result<Self, ValidationError> {
        let email = dto.email.trim().to_lowercase();
        let role = dto.role.unwrap_or(UserRole::PetOwner);

        let mut v = Validator::new();
        v.check(is_valid_email(&email), "email", "Email must be a valid email address")
            .check(
                dto.password.chars().count() >= MIN_PASSWORD_LENGTH,
                "password",
                "Password must be at least 8 characters",
            )
            .required(&dto.first_name, "first_name")
            .required(&dto.last_name, "last_name")
            .check(
                role != UserRole::Admin,
                "role",
                "Role must be pet_owner or business_owner",
            );
        v.finish()?;

        Ok(Self {
            email,
            password: dto.password,
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            phone: clean(dto.phone),
            role,
        })
    }
}

/// Parameters for inserting a user row with an already hashed password.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Partial update of account fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.not_blank(dto.first_name.as_deref(), "first_name")
            .not_blank(dto.last_name.as_deref(), "last_name");
        v.finish()?;

        Ok(Self {
            first_name: dto.first_name.map(|s| s.trim().to_string()),
            last_name: dto.last_name.map(|s| s.trim().to_string()),
            phone: dto.phone.map(|s| s.trim().to_string()),
        })
    }
}

/// Partial update of profile fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub preferred_language: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto, today: NaiveDate) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.check(
            dto.date_of_birth.is_none_or(|d| d <= today),
            "date_of_birth",
            "Date of birth cannot be in the future",
        )
        .check(
            dto.bio.as_ref().is_none_or(|b| b.chars().count() <= 500),
            "bio",
            "Bio must be at most 500 characters",
        )
        .not_blank(dto.preferred_language.as_deref(), "preferred_language");
        v.finish()?;

        Ok(Self {
            bio: dto.bio,
            date_of_birth: dto.date_of_birth,
            street: dto.street,
            city: dto.city,
            state: dto.state,
            zip_code: dto.zip_code,
            country: dto.country,
            emergency_contact_name: dto.emergency_contact_name,
            emergency_contact_phone: dto.emergency_contact_phone,
            email_notifications: dto.email_notifications,
            sms_notifications: dto.sms_notifications,
            push_notifications: dto.push_notifications,
            preferred_language: dto.preferred_language.map(|s| s.trim().to_string()),
        })
    }
}

/// Filters for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Substring matched against email, first and last name.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_dto() -> RegisterDto {
        RegisterDto {
            email: "  Owner@Example.COM ".to_string(),
            password: "correct-horse".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: None,
            role: None,
        }
    }

    #[test]
    fn normalizes_email_and_defaults_role() {
        let params = RegisterParams::from_dto(register_dto()).unwrap();

        assert_eq!(params.email, "owner@example.com");
        assert_eq!(params.role, UserRole::PetOwner);
    }

    #[test]
    fn rejects_admin_role_and_short_password() {
        let dto = RegisterDto {
            password: "short".to_string(),
            role: Some(UserRole::Admin),
            ..register_dto()
        };

        let err = RegisterParams::from_dto(dto).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["password", "role"]);
    }
}

impl Page<User> {
    pub fn into_dto(self) -> PaginatedUsersDto {
        let page = self.map(User::into_dto);

        PaginatedUsersDto {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}
