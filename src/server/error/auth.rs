use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    /// No access token in the `Authorization` header or the `access_token` cookie.
    #[error("No authentication token provided")]
    MissingToken,

    /// Token failed signature, expiry or kind checks.
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    /// Token subject does not match a stored user.
    #[error("User {0} referenced by token does not exist")]
    UserNotInDatabase(i32),

    /// Email/password pair did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Current password given to a password change was wrong.
    #[error("Current password is incorrect for user {0}")]
    IncorrectPassword(i32),

    /// Refresh token is unknown, revoked, or already rotated.
    #[error("Refresh token is not valid")]
    InvalidRefreshToken,

    /// The account was deactivated.
    #[error("Account {0} is deactivated")]
    AccountDisabled(i32),

    /// The user lacks the role required for the route.
    ///
    /// # Fields
    /// - User ID
    /// - Reason, logged but not returned to the client
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Registration with an email that already has an account.
    #[error("Email {0} is already registered")]
    EmailTaken(String),

    /// Signing a token failed.
    #[error("Failed to encode token: {0}")]
    TokenEncoding(#[from] jsonwebtoken::errors::Error),

    /// Hashing a password failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidToken` / `UserNotInDatabase` / `InvalidRefreshToken` → 401
/// - `InvalidCredentials` / `IncorrectPassword` → 401
/// - `AccountDisabled` / `AccessDenied` → 403
/// - `EmailTaken` → 409
/// - `TokenEncoding` / `PasswordHash` → 500 with generic message
///
/// Denials are logged at debug level; client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => {
                error_response(StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidToken(ref reason) => {
                tracing::debug!("Rejected token: {}", reason);
                error_response(StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
            Self::UserNotInDatabase(_) | Self::InvalidRefreshToken => {
                tracing::debug!("{}", self);
                error_response(StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            Self::IncorrectPassword(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Current password is incorrect")
            }
            Self::AccountDisabled(_) => {
                error_response(StatusCode::FORBIDDEN, "Account is deactivated")
            }
            Self::AccessDenied(_, _) => {
                tracing::debug!("{}", self);
                error_response(
                    StatusCode::FORBIDDEN,
                    "You do not have permission to perform this action",
                )
            }
            Self::EmailTaken(_) => {
                error_response(StatusCode::CONFLICT, "An account with this email already exists")
            }
            err @ (Self::TokenEncoding(_) | Self::PasswordHash(_)) => {
                InternalServerError(err).into_response()
            }
        }
    }
}
