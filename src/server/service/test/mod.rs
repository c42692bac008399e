use crate::server::model::user::User;

mod address;
mod booking;
mod business;

/// Converts a factory-built row into the domain user the services expect.
fn as_user(model: entity::user::Model) -> User {
    User::from_entity(model).unwrap()
}
