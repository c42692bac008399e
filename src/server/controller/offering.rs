use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        offering::{
            CreateServiceDto, PaginatedServicesDto, ServiceCategory, ServiceDto, UpdateServiceDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{file::EntityImages, offering::OfferingFilter},
        service::offering::OfferingService,
        state::AppState,
        util::pagination::{default_limit, default_page, PageRequest},
    },
};

/// Tag for grouping service endpoints in OpenAPI documentation
pub static SERVICE_TAG: &str = "services";

#[derive(Deserialize)]
pub struct ServiceListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub business_id: Option<i32>,
    pub category: Option<ServiceCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Add a service to a business.
///
/// # Access Control
/// - Owner of `business_id` or `Admin`
///
/// # Returns
/// - `201 Created` - Service created
/// - `403 Forbidden` - Caller does not own the business
/// - `404 Not Found` - Business missing or deleted
/// - `422 Unprocessable Entity` - Invalid payload
#[utoipa::path(
    post,
    path = "/services",
    tag = SERVICE_TAG,
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created", body = ServiceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the business owner", body = ErrorDto),
        (status = 404, description = "Business not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn create_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateServiceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    let offering = OfferingService::new(&state.db, state.storage.as_ref())
        .create(&user, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(offering.into_dto(EntityImages::default())),
    ))
}

/// List active services, cheapest first.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/services",
    tag = SERVICE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("business_id" = Option<i32>, Query, description = "Offering business"),
        ("category" = Option<ServiceCategory>, Query, description = "Service category"),
        ("min_price" = Option<f64>, Query, description = "Minimum price, inclusive"),
        ("max_price" = Option<f64>, Query, description = "Maximum price, inclusive")
    ),
    responses(
        (status = 200, description = "Page of services", body = PaginatedServicesDto)
    ),
)]
pub async fn get_services(
    State(state): State<AppState>,
    Query(params): Query<ServiceListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = OfferingFilter {
        business_id: params.business_id,
        category: params.category,
        min_price: params.min_price,
        max_price: params.max_price,
    };

    let offerings = OfferingService::new(&state.db, state.storage.as_ref())
        .search(filter, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(offerings.into_dto())))
}

#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = SERVICE_TAG,
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service details with images", body = ServiceDto),
        (status = 404, description = "Service not found", body = ErrorDto)
    ),
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let offering = OfferingService::new(&state.db, state.storage.as_ref())
        .get(id)
        .await?;

    Ok((StatusCode::OK, Json(offering)))
}

/// Update a service.
///
/// # Access Control
/// - Owner of the offering business or `Admin`
#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = SERVICE_TAG,
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Updated service", body = ServiceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the business owner", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn update_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateServiceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    let offering = OfferingService::new(&state.db, state.storage.as_ref())
        .update(&user, id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(offering.into_dto(EntityImages::default())),
    ))
}

#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = SERVICE_TAG,
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the business owner", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto)
    ),
)]
pub async fn delete_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    OfferingService::new(&state.db, state.storage.as_ref())
        .delete(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::ok("Service deleted successfully")),
    ))
}
