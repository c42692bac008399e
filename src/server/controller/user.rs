use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{UpdateProfileDto, UpdateUserDto, UserDto, UserProfileDto, UserWithProfileDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "users";

/// Get the current user with their profile.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user and profile", body = UserWithProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let account = UserService::new(&state.db, state.storage.as_ref())
        .get_account(&user, user.id)
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// Update the name and phone of the current user.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    put,
    path = "/users/me",
    tag = USER_TAG,
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let updated = UserService::new(&state.db, state.storage.as_ref())
        .update(user.id, payload)
        .await?;

    Ok((StatusCode::OK, Json(updated.into_dto())))
}

/// Deactivate the current account.
///
/// The account is kept but can no longer sign in; every refresh token is revoked.
///
/// # Access Control
/// - Any authenticated user
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Account deactivated", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn delete_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    UserService::new(&state.db, state.storage.as_ref())
        .deactivate_self(&user)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::ok("Account deactivated successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/users/me/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Profile of the current user", body = UserProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Profile not found", body = ErrorDto)
    ),
)]
pub async fn get_my_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let profile = UserService::new(&state.db, state.storage.as_ref())
        .get_profile(user.id)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/users/me/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn update_my_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let profile = UserService::new(&state.db, state.storage.as_ref())
        .update_profile(user.id, payload)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Get a user by ID.
///
/// # Access Control
/// - The user themselves or an admin
///
/// # Returns
/// - `200 OK` - User and profile
/// - `403 Forbidden` - Caller is someone else
/// - `404 Not Found` - No such user
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and profile", body = UserWithProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed to view this user", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let account = UserService::new(&state.db, state.storage.as_ref())
        .get_account(&caller, id)
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}
