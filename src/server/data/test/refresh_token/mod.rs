use crate::server::data::refresh_token::RefreshTokenRepository;
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod consume;
mod delete;
