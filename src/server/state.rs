//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Token service for signing and verifying JWTs
//! - Object storage backend for uploaded files
//! - Cookie settings and the signed URL lifetime

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    middleware::cookie::CookieSettings,
    service::{storage::ObjectStorage, token::TokenService},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `TokenService` holds only keys and lifetimes
/// - `Arc<dyn ObjectStorage>` is a reference-counted pointer
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool shared across all requests.
    pub db: DatabaseConnection,

    /// Issues and verifies access and refresh tokens.
    pub tokens: TokenService,

    /// Bucket backend for pet, business, user and service files.
    pub storage: Arc<dyn ObjectStorage>,

    /// Attributes of the auth cookies set on login and refresh.
    pub cookies: CookieSettings,

    /// Lifetime of signed URLs for private files, in seconds.
    pub signed_url_ttl: u64,
}

impl AppState {
    /// Creates a new application state from its dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `storage` - Object storage backend
    /// - `config` - Application configuration supplying token and cookie settings
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, storage: Arc<dyn ObjectStorage>, config: &Config) -> Self {
        Self {
            db,
            tokens: TokenService::from_config(config),
            storage,
            cookies: CookieSettings::new(config.cookie_secure),
            signed_url_ttl: config.signed_url_ttl_seconds,
        }
    }
}
