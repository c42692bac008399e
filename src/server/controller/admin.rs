use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        admin::{PlatformStatsDto, UpdateUserRoleDto, UpdateUserStatusDto, VerifyBusinessDto},
        api::ErrorDto,
        business::BusinessDto,
        user::{PaginatedUsersDto, UserDto, UserRole},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{file::EntityImages, user::UserFilter},
        service::admin::AdminService,
        state::AppState,
        util::pagination::{default_limit, default_page, PageRequest},
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
pub struct UserListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

/// Get platform statistics.
///
/// Returns user counts per role, active pets, businesses, active services, booking
/// counts per status, and revenue from paid bookings.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Platform statistics", body = PlatformStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_admin()
        .await?;

    let stats = AdminService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// List users, newest first.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("role" = Option<UserRole>, Query, description = "Filter by role"),
        ("is_active" = Option<bool>, Query, description = "Filter by active state"),
        ("search" = Option<String>, Query, description = "Matches email, first or last name")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_admin()
        .await?;

    let filter = UserFilter {
        role: params.role,
        is_active: params.is_active,
        search: params.search,
    };
    let users = AdminService::new(&state.db)
        .get_users(filter, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Activate or deactivate a user.
///
/// Deactivation revokes every refresh token of the user. Admins cannot deactivate
/// their own account.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Updated user
/// - `404 Not Found` - No such user
/// - `422 Unprocessable Entity` - Admin tried to deactivate themselves
#[utoipa::path(
    patch,
    path = "/admin/users/{id}/status",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 422, description = "Cannot deactivate own account", body = ErrorDto)
    ),
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_admin()
        .await?;

    let user = AdminService::new(&state.db)
        .set_user_status(&admin, id, payload.is_active)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    patch,
    path = "/admin/users/{id}/role",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRoleDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_admin()
        .await?;

    let user = AdminService::new(&state.db)
        .set_user_role(&admin, id, payload.role)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    patch,
    path = "/admin/businesses/{id}/verify",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "Business ID")
    ),
    request_body = VerifyBusinessDto,
    responses(
        (status = 200, description = "Updated business", body = BusinessDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Business not found", body = ErrorDto)
    ),
)]
pub async fn verify_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<VerifyBusinessDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_admin()
        .await?;

    let business = AdminService::new(&state.db)
        .verify_business(&admin, id, payload.is_verified)
        .await?;

    Ok((
        StatusCode::OK,
        Json(business.into_dto(EntityImages::default(), None)),
    ))
}
