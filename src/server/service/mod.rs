//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Authorization**: Ownership checks that need the loaded resource
//! - **Orchestration**: Coordinating multiple repository calls and object storage
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod address;
pub mod admin;
pub mod auth;
pub mod booking;
pub mod business;
pub mod file;
pub mod offering;
pub mod password;
pub mod pet;
pub mod storage;
pub mod token;
pub mod user;

#[cfg(test)]
mod test;
