//! Request guards and cookie helpers shared by the controllers.

pub mod auth;
pub mod cookie;
