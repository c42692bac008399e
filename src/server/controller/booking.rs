use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        booking::{
            BookingDto, BookingStatus, CreateBookingDto, PaginatedBookingsDto, RateBookingDto,
            UpdateBookingStatusDto, UpdatePaymentStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::booking::BookingService,
        state::AppState,
        util::pagination::{default_limit, default_page, PageRequest},
    },
};

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "bookings";

#[derive(Deserialize)]
pub struct BookingListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub status: Option<BookingStatus>,
    pub business_id: Option<i32>,
}

/// Book a service for a pet.
///
/// The appointment must be in the future and the slot free: a pending or confirmed
/// booking of the same service at the same instant blocks it. The price is taken from
/// the service.
///
/// # Access Control
/// - `PetOwner` owning the pet, or `Admin`
///
/// # Returns
/// - `201 Created` - Pending booking
/// - `403 Forbidden` - Pet belongs to someone else
/// - `404 Not Found` - Pet, service or business missing
/// - `409 Conflict` - Slot already booked
/// - `422 Unprocessable Entity` - Appointment not in the future
#[utoipa::path(
    post,
    path = "/bookings",
    tag = BOOKING_TAG,
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Pet or service not found", body = ErrorDto),
        (status = 409, description = "Time slot already booked", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    let booking = BookingService::new(&state.db)
        .create(&user, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// List bookings visible to the caller, latest appointment first.
///
/// Pet owners see their own bookings, business owners the bookings of their
/// businesses, admins everything.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    get,
    path = "/bookings",
    tag = BOOKING_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("status" = Option<BookingStatus>, Query, description = "Booking status"),
        ("business_id" = Option<i32>, Query, description = "Booked business")
    ),
    responses(
        (status = 200, description = "Page of bookings", body = PaginatedBookingsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BookingListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let bookings = BookingService::new(&state.db)
        .get_paginated(
            &user,
            params.status,
            params.business_id,
            PageRequest::new(params.page, params.limit),
        )
        .await?;

    Ok((StatusCode::OK, Json(bookings.into_dto())))
}

/// Get a booking.
///
/// # Access Control
/// - Booking owner, owner of the booked business, or `Admin`
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a party to the booking", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto)
    ),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let booking = BookingService::new(&state.db).get(&user, id).await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Change the status of a booking.
///
/// # Access Control
/// - Owner of the booked business or `Admin`: any status
/// - Booking owner: `cancelled` only
#[utoipa::path(
    patch,
    path = "/bookings/{id}/status",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatusDto,
    responses(
        (status = 200, description = "Updated booking", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Status change not allowed", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto)
    ),
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let booking = BookingService::new(&state.db)
        .update_status(&user, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

#[utoipa::path(
    patch,
    path = "/bookings/{id}/payment",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdatePaymentStatusDto,
    responses(
        (status = 200, description = "Updated booking", body = BookingDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the business owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto)
    ),
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePaymentStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    let booking = BookingService::new(&state.db)
        .update_payment_status(&user, id, payload.payment_status)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Rate a completed booking.
///
/// A booking can be rated once; the business average is recomputed.
///
/// # Access Control
/// - Booking owner
///
/// # Returns
/// - `200 OK` - Rated booking
/// - `400 Bad Request` - Booking not completed
/// - `409 Conflict` - Already rated
/// - `422 Unprocessable Entity` - Rating outside 1 to 5
#[utoipa::path(
    post,
    path = "/bookings/{id}/rating",
    tag = BOOKING_TAG,
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = RateBookingDto,
    responses(
        (status = 200, description = "Rated booking", body = BookingDto),
        (status = 400, description = "Booking not completed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the booking owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Already rated", body = ErrorDto),
        (status = 422, description = "Invalid rating", body = ErrorDto)
    ),
)]
pub async fn rate_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<RateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let booking = BookingService::new(&state.db)
        .rate(&user, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}
