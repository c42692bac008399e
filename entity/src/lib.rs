//! SeaORM entities for the marketplace tables.

pub mod prelude;

pub mod address;
pub mod booking;
pub mod business;
pub mod pet;
pub mod refresh_token;
pub mod service;
pub mod user;
pub mod user_profile;
