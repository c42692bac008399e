//! HTTP request handlers.
//!
//! Each handler authenticates through `AuthGuard`, delegates to a service, and converts
//! the returned domain model into a DTO. Every handler carries a `#[utoipa::path]`
//! annotation that the router collects into the OpenAPI document.

pub mod address;
pub mod admin;
pub mod auth;
pub mod booking;
pub mod business;
pub mod file;
pub mod health;
pub mod offering;
pub mod pet;
pub mod user;

#[cfg(test)]
mod test;
