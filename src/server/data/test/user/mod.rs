use crate::{
    model::user::UserRole,
    server::{
        data::user::UserRepository,
        model::user::{CreateUserParams, UpdateUserParams, UserFilter},
        util::pagination::PageRequest,
    },
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod count_by_role;
mod create;
mod get_paginated;
mod update;

fn create_params(email: &str) -> CreateUserParams {
    CreateUserParams {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: None,
        role: UserRole::PetOwner,
    }
}
