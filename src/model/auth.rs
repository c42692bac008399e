use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::{UserDto, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    /// Defaults to `pet_owner`; `admin` cannot be self-assigned.
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

/// Refresh request; the token may instead come from the `refresh_token` cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RefreshDto {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub user: UserDto,
    pub access_token: String,
    pub refresh_token: String,
}
