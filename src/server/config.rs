//! Environment-based application configuration.
//!
//! All settings are read once at startup, after `dotenvy` has loaded any `.env` file.
//! See `.env.example` for the full list of variables.

use std::{net::SocketAddr, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 15;
const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;
const DEFAULT_SIGNED_URL_TTL_SECONDS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,

    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    pub cookie_secure: bool,

    /// Project URL without trailing slash, e.g. `https://xyz.supabase.co`.
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub signed_url_ttl_seconds: u64,

    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,

    /// Bootstrap admin credentials, used only when no admin exists.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let supabase_url = required("SUPABASE_URL")?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: parsed_or("BIND_ADDRESS", || {
                SocketAddr::from(([0, 0, 0, 0], 3000))
            })?,
            jwt_access_secret: required("JWT_ACCESS_SECRET")?,
            jwt_refresh_secret: required("JWT_REFRESH_SECRET")?,
            access_token_ttl_minutes: parsed_or("ACCESS_TOKEN_TTL_MINUTES", || {
                DEFAULT_ACCESS_TOKEN_TTL_MINUTES
            })?,
            refresh_token_ttl_days: parsed_or("REFRESH_TOKEN_TTL_DAYS", || {
                DEFAULT_REFRESH_TOKEN_TTL_DAYS
            })?,
            cookie_secure: parsed_or("COOKIE_SECURE", || true)?,
            supabase_url: parse_base_url("SUPABASE_URL", supabase_url)?,
            supabase_service_key: required("SUPABASE_SERVICE_KEY")?,
            signed_url_ttl_seconds: parsed_or("SIGNED_URL_TTL_SECONDS", || {
                DEFAULT_SIGNED_URL_TTL_SECONDS
            })?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|origins| parse_list(&origins))
                .unwrap_or_default(),
            admin_email: optional("ADMIN_EMAIL"),
            admin_password: optional("ADMIN_PASSWORD"),
        })
    }
}

impl Default for Config {
    /// Settings for local development and tests; secrets are placeholders.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            jwt_access_secret: "development-access-secret".to_string(),
            jwt_refresh_secret: "development-refresh-secret".to_string(),
            access_token_ttl_minutes: DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            refresh_token_ttl_days: DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            cookie_secure: false,
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: String::new(),
            signed_url_ttl_seconds: DEFAULT_SIGNED_URL_TTL_SECONDS,
            cors_origins: Vec::new(),
            admin_email: None,
            admin_password: None,
        }
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_or<T: FromStr>(name: &str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(default()),
    }
}

/// Checks that `value` is an absolute http(s) URL and strips the trailing slash.
fn parse_base_url(name: &str, value: String) -> Result<String, ConfigError> {
    match url::Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
