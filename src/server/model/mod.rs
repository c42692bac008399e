//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! They provide type-safe representations with business logic separated from database
//! and API concerns.

pub mod address;
pub mod admin;
pub mod booking;
pub mod business;
pub mod file;
pub mod offering;
pub mod pet;
pub mod user;

use std::str::FromStr;

use sea_orm::DbErr;
use serde::de::DeserializeOwned;

/// Parses a string column into its domain enum.
///
/// # Returns
/// - `Ok(T)` - Parsed value
/// - `Err(DbErr::Custom)` - Stored value is not a known variant
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DbErr>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

/// Deserializes a JSON column into its domain type.
pub(crate) fn parse_json<T: DeserializeOwned>(
    column: &str,
    value: serde_json::Value,
) -> Result<T, DbErr> {
    serde_json::from_value(value)
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

/// Serializes a domain value into a JSON column.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Array(Vec::new()))
}

/// Trims an optional string, mapping blank input to `None`.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
