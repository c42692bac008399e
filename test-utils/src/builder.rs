use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Pet};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Pet)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Vector of CREATE TABLE statements to execute during database setup.
    ///
    /// Each statement is generated from an entity model using SeaORM's schema builder.
    /// Statements are executed in the order they were added during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. The table will be created when `build()` is called. Tables should
    /// be added in dependency order (tables with foreign keys should be added after their
    /// referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the account tables: User, RefreshToken and UserProfile.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_user_tables(self) -> Self {
        self.with_table(User)
            .with_table(RefreshToken)
            .with_table(UserProfile)
    }

    /// Adds the account tables followed by Pet.
    pub fn with_pet_tables(self) -> Self {
        self.with_user_tables().with_table(Pet)
    }

    /// Adds the account tables followed by Business and Service.
    pub fn with_catalog_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Business)
            .with_table(Service)
    }

    /// Adds every table in dependency order.
    ///
    /// This convenience method adds:
    /// - User, RefreshToken, UserProfile
    /// - Pet
    /// - Business, Service
    /// - Booking
    /// - Address
    ///
    /// Use this when testing bookings or running requests through the full router.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_all_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_all_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Pet)
            .with_table(Business)
            .with_table(Service)
            .with_table(Booking)
            .with_table(Address)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements that were added via `with_table()`, in the order they were added.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
