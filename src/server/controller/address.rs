use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        address::{AddressDto, CreateAddressDto, UpdateAddressDto},
        api::{ErrorDto, MessageDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::address::Address,
        service::address::AddressService, state::AppState,
    },
};

/// Tag for grouping address endpoints in OpenAPI documentation
pub static ADDRESS_TAG: &str = "addresses";

/// List the caller's saved addresses, default first.
///
/// # Access Control
/// - Any authenticated user; only their own addresses
#[utoipa::path(
    get,
    path = "/addresses",
    tag = ADDRESS_TAG,
    responses(
        (status = 200, description = "Saved addresses", body = Vec<AddressDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_addresses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let addresses = AddressService::new(&state.db).list(user.id).await?;
    let dtos: Vec<AddressDto> = addresses.into_iter().map(Address::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Save an address.
///
/// The first address always becomes the default; `is_default: true` moves the default.
#[utoipa::path(
    post,
    path = "/addresses",
    tag = ADDRESS_TAG,
    request_body = CreateAddressDto,
    responses(
        (status = 201, description = "Address saved", body = AddressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn create_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let address = AddressService::new(&state.db)
        .create(user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(address.into_dto())))
}

/// Get one of the caller's addresses.
///
/// Addresses of other users are reported as not found.
#[utoipa::path(
    get,
    path = "/addresses/{id}",
    tag = ADDRESS_TAG,
    params(
        ("id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Address", body = AddressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
)]
pub async fn get_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let address = AddressService::new(&state.db).get(user.id, id).await?;

    Ok((StatusCode::OK, Json(address.into_dto())))
}

#[utoipa::path(
    put,
    path = "/addresses/{id}",
    tag = ADDRESS_TAG,
    params(
        ("id" = i32, Path, description = "Address ID")
    ),
    request_body = UpdateAddressDto,
    responses(
        (status = 200, description = "Updated address", body = AddressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn update_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let address = AddressService::new(&state.db)
        .update(user.id, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(address.into_dto())))
}

#[utoipa::path(
    patch,
    path = "/addresses/{id}/default",
    tag = ADDRESS_TAG,
    params(
        ("id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "New default address", body = AddressDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
)]
pub async fn set_default_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let address = AddressService::new(&state.db)
        .set_default(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(address.into_dto())))
}

/// Delete an address.
///
/// Deleting the default promotes the newest remaining address.
#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    tag = ADDRESS_TAG,
    params(
        ("id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Address deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
)]
pub async fn delete_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    AddressService::new(&state.db).delete(user.id, id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::ok("Address deleted successfully")),
    ))
}
