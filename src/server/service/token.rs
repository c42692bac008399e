//! JWT issuing and verification.
//!
//! Access and refresh tokens are HS256 JWTs signed with separate secrets. Both carry a
//! `kind` claim so that a token of one kind is never accepted as the other, even if the
//! secrets were configured identically.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    model::user::UserRole,
    server::{
        config::Config, error::auth::AuthError, model::user::User,
        util::random::generate_random_code,
    },
};

const JTI_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a string, per the JWT `sub` convention.
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub kind: TokenKind,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i32, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidToken(format!("malformed subject '{}'", self.sub)))
    }
}

/// A signed token with the values that must be persisted or put into cookies.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_access_secret,
            &config.jwt_refresh_secret,
            Duration::minutes(config.access_token_ttl_minutes),
            Duration::days(config.refresh_token_ttl_days),
        )
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Signs a fresh access/refresh pair for the user.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Both tokens with their ids and expiry times
    /// - `Err(AuthError::TokenEncoding)` - Signing failed
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue(user, TokenKind::Access)?,
            refresh: self.issue(user, TokenKind::Refresh)?,
        })
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, TokenKind::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify(token, TokenKind::Refresh)
    }

    fn issue(&self, user: &User, kind: TokenKind) -> Result<IssuedToken, AuthError> {
        let (key, ttl) = match kind {
            TokenKind::Access => (&self.access_encoding, self.access_ttl),
            TokenKind::Refresh => (&self.refresh_encoding, self.refresh_ttl),
        };

        let now = Utc::now();
        let expires_at = now + ttl;
        let jti = generate_random_code(JTI_LENGTH);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            kind,
            jti: jti.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, key)?;

        Ok(IssuedToken {
            token,
            jti,
            expires_at,
        })
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, AuthError> {
        let key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.kind != kind {
            return Err(AuthError::InvalidToken(format!(
                "expected {:?} token, got {:?}",
                kind, claims.kind
            )));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            email: "owner@example.test".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: None,
            role: UserRole::PetOwner,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service() -> TokenService {
        TokenService::new("access", "refresh", Duration::minutes(15), Duration::days(7))
    }

    #[test]
    fn issues_verifiable_pair() {
        let tokens = service();
        let pair = tokens.issue_pair(&user()).unwrap();

        let access = tokens.verify_access(&pair.access.token).unwrap();
        let refresh = tokens.verify_refresh(&pair.refresh.token).unwrap();

        assert_eq!(access.user_id().unwrap(), 42);
        assert_eq!(access.role, UserRole::PetOwner);
        assert_eq!(refresh.jti, pair.refresh.jti);
        assert_ne!(pair.access.jti, pair.refresh.jti);
    }

    #[test]
    fn rejects_token_of_wrong_kind() {
        let tokens = TokenService::new("same", "same", Duration::minutes(15), Duration::days(7));
        let pair = tokens.issue_pair(&user()).unwrap();

        assert!(tokens.verify_access(&pair.refresh.token).is_err());
        assert!(tokens.verify_refresh(&pair.access.token).is_err());
    }

    #[test]
    fn rejects_expired_and_foreign_tokens() {
        let expired = TokenService::new("access", "refresh", Duration::minutes(-5), Duration::days(7));
        let pair = expired.issue_pair(&user()).unwrap();
        assert!(expired.verify_access(&pair.access.token).is_err());

        let other = TokenService::new("other", "other", Duration::minutes(15), Duration::days(7));
        let pair = other.issue_pair(&user()).unwrap();
        assert!(service().verify_access(&pair.access.token).is_err());
    }
}
