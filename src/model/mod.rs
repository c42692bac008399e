//! Data transfer objects shared with API consumers.
//!
//! Every request and response body of the REST API is defined here, together with the
//! string enums that appear on the wire. Server-side domain models convert into these
//! types with `into_dto()` at the controller boundary.

pub mod address;
pub mod admin;
pub mod api;
pub mod auth;
pub mod booking;
pub mod business;
pub mod file;
pub mod offering;
pub mod pet;
pub mod user;
