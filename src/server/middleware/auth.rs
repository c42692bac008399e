use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserRole,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        middleware::cookie::{read_cookie, ACCESS_TOKEN_COOKIE},
        model::user::User,
        service::token::TokenService,
    },
};

/// Resolves the calling user from the request headers and checks their role.
///
/// The access token is read from the `Authorization: Bearer` header first and the
/// `access_token` cookie second.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        tokens: &'a TokenService,
        headers: &'a HeaderMap,
    ) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Authenticates the caller and requires one of the given roles.
    ///
    /// An empty role list accepts any authenticated, active user.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user holding an allowed role
    /// - `Err(AuthError::MissingToken)` - No token supplied (401)
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expired, or wrong token kind (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Token subject no longer exists (401)
    /// - `Err(AuthError::AccountDisabled)` - Account deactivated (403)
    /// - `Err(AuthError::AccessDenied)` - Role not allowed (403)
    pub async fn require(&self, roles: &[UserRole]) -> Result<User, AppError> {
        let Some(token) = self.token() else {
            return Err(AuthError::MissingToken.into());
        };

        let claims = self.tokens.verify_access(&token)?;
        let user_id = claims.user_id()?;

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        if !roles.is_empty() && !roles.contains(&user.role) {
            let allowed: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            return Err(AuthError::AccessDenied(
                user.id,
                format!(
                    "role {} is not one of [{}]",
                    user.role.as_str(),
                    allowed.join(", ")
                ),
            )
            .into());
        }

        Ok(user)
    }

    pub async fn require_authenticated(&self) -> Result<User, AppError> {
        self.require(&[]).await
    }

    pub async fn require_admin(&self) -> Result<User, AppError> {
        self.require(&[UserRole::Admin]).await
    }

    pub async fn require_pet_owner_or_admin(&self) -> Result<User, AppError> {
        self.require(&[UserRole::PetOwner, UserRole::Admin]).await
    }

    pub async fn require_business_owner_or_admin(&self) -> Result<User, AppError> {
        self.require(&[UserRole::BusinessOwner, UserRole::Admin]).await
    }

    fn token(&self) -> Option<String> {
        let bearer = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        match bearer {
            Some(token) => Some(token.to_string()),
            None => read_cookie(self.headers, ACCESS_TOKEN_COOKIE),
        }
    }
}
