use sea_orm::DatabaseConnection;

use crate::{
    model::auth::{ChangePasswordDto, LoginDto, RegisterDto},
    server::{
        data::{refresh_token::RefreshTokenRepository, user::UserRepository},
        error::{auth::AuthError, validation::ValidationError, AppError},
        model::user::{CreateUserParams, RegisterParams, User, MIN_PASSWORD_LENGTH},
        service::{
            password::{hash_password, verify_password},
            token::{TokenPair, TokenService},
        },
    },
};

/// An authenticated user with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Creates an account with an empty profile and signs it in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - New user with tokens
    /// - `Err(AppError::ValidationErr)` - Payload invalid
    /// - `Err(AppError::AuthErr(EmailTaken))` - Email already registered
    pub async fn register(&self, dto: RegisterDto) -> Result<AuthSession, AppError> {
        let params = RegisterParams::from_dto(dto)?;
        let user_repo = UserRepository::new(self.db);

        if user_repo.email_exists(&params.email).await? {
            return Err(AuthError::EmailTaken(params.email).into());
        }

        let password_hash = hash_password(&params.password)?;
        let user = user_repo
            .create(CreateUserParams {
                email: params.email,
                password_hash,
                first_name: params.first_name,
                last_name: params.last_name,
                phone: params.phone,
                role: params.role,
            })
            .await?;

        tracing::info!("Registered user {} as {}", user.id, user.role.as_str());

        self.start_session(user).await
    }

    /// Checks credentials and signs the user in.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, dto: LoginDto) -> Result<AuthSession, AppError> {
        let email = dto.email.trim().to_lowercase();
        let user_repo = UserRepository::new(self.db);

        let credentials = user_repo
            .find_credentials_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&dto.password, &credentials.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !credentials.user.is_active {
            return Err(AuthError::AccountDisabled(credentials.user.id).into());
        }

        user_repo.update_last_login(credentials.user.id).await?;

        self.start_session(credentials.user).await
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// The presented token id is consumed, so each refresh token works once.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - Rotated tokens
    /// - `Err(AppError::AuthErr)` - Token invalid, expired, already used, or user inactive
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError> {
        let claims = self.tokens.verify_refresh(refresh_token)?;
        let user_id = claims.user_id()?;

        if !RefreshTokenRepository::new(self.db)
            .consume(user_id, &claims.jti)
            .await?
        {
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;
        if !user.is_active {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        self.start_session(user).await
    }

    /// Revokes the presented refresh token if it is valid.
    ///
    /// Logging out never fails on a bad token; the cookies are cleared either way.
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AppError> {
        let Some(claims) = refresh_token.and_then(|t| self.tokens.verify_refresh(t).ok()) else {
            return Ok(());
        };

        RefreshTokenRepository::new(self.db)
            .delete(&claims.jti)
            .await?;

        Ok(())
    }

    /// Replaces the password and revokes every refresh token of the user.
    pub async fn change_password(
        &self,
        user: &User,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        if dto.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::field(
                "new_password",
                "Password must be at least 8 characters",
            )
            .into());
        }

        let user_repo = UserRepository::new(self.db);
        let current_hash = user_repo
            .find_password_hash(user.id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user.id))?;

        if !verify_password(&dto.current_password, &current_hash) {
            return Err(AuthError::IncorrectPassword(user.id).into());
        }

        user_repo
            .update_password_hash(user.id, hash_password(&dto.new_password)?)
            .await?;
        let revoked = RefreshTokenRepository::new(self.db)
            .delete_all_for_user(user.id)
            .await?;

        tracing::info!(
            "User {} changed password, revoked {} refresh token(s)",
            user.id,
            revoked
        );

        Ok(())
    }

    /// Issues a token pair and records the refresh token id.
    async fn start_session(&self, user: User) -> Result<AuthSession, AppError> {
        let tokens = self.tokens.issue_pair(&user)?;
        let refresh_repo = RefreshTokenRepository::new(self.db);

        refresh_repo.delete_expired_for_user(user.id).await?;
        refresh_repo
            .create(
                user.id,
                tokens.refresh.jti.clone(),
                tokens.refresh.expires_at,
            )
            .await?;

        tracing::debug!("Issued tokens for user {}", user.id);

        Ok(AuthSession { user, tokens })
    }
}
