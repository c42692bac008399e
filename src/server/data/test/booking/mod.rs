use crate::{
    model::booking::{BookingStatus, PaymentStatus},
    server::{
        data::booking::BookingRepository,
        model::booking::{BookingFilter, BookingScope, CreateBookingParams, StatusChange},
        util::pagination::PageRequest,
    },
};
use chrono::{Duration, DurationRound, Utc};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, helpers::create_booking_dependencies},
};

mod create;
mod get_paginated;
mod has_conflict;
mod rate;
mod statistics;
mod update_status;
