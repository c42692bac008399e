use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::server::{config::Config, error::AppError, service::admin::AdminService};

const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration
/// (PostgreSQL in production, SQLite for local runs), then runs all pending SeaORM
/// migrations so the schema is up to date before any request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// HTTP client for the object storage API.
///
/// Redirects are disabled so the service key is never forwarded to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(STORAGE_TIMEOUT)
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

    Ok(client)
}

/// Creates the bootstrap admin from `ADMIN_EMAIL`/`ADMIN_PASSWORD` when no admin exists.
pub async fn ensure_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    AdminService::new(db)
        .bootstrap_admin(config.admin_email.as_deref(), config.admin_password.as_deref())
        .await?;

    Ok(())
}
