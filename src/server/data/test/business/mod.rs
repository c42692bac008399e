use crate::{
    model::{business::AddressFieldsDto, offering::ServiceCategory},
    server::{
        data::business::BusinessRepository,
        model::business::{CreateBusinessParams, UpdateBusinessParams},
        util::pagination::PageRequest,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_all_active;
mod owner_queries;
