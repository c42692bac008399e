//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take the ids of the rows they reference, so
//! parents must be created first; `helpers` wraps the common chains.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let owner = factory::create_user(&db).await?;
//!     let pet = factory::create_pet(&db, owner.id).await?;
//!
//!     // Create a bookable service with its business and owner
//!     let (business_owner, business, service) =
//!         factory::helpers::create_service_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .email("root@example.test")
//!     .role("admin")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users and their profiles
//! - `pet` - Pets owned by a user
//! - `business` - Businesses owned by a user
//! - `offering` - Services offered by a business
//! - `booking` - Bookings of a service for a pet
//! - `address` - Saved addresses of a user
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod address;
pub mod booking;
pub mod business;
pub mod helpers;
pub mod offering;
pub mod pet;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use address::create_address;
pub use booking::create_booking;
pub use business::create_business;
pub use offering::create_offering;
pub use pet::create_pet;
pub use user::{create_user, create_user_with_role};
