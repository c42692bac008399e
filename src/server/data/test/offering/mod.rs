use crate::{
    model::offering::ServiceCategory,
    server::{
        data::offering::OfferingRepository,
        model::offering::{CreateOfferingParams, OfferingFilter, UpdateOfferingParams},
        util::pagination::PageRequest,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
