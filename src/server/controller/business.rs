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
        business::{BusinessDto, CreateBusinessDto, PaginatedBusinessesDto, UpdateBusinessDto},
        offering::{ServiceCategory, ServiceDto},
    },
    server::{
        error::{validation::ValidationError, AppError},
        middleware::auth::AuthGuard,
        model::{
            business::{BusinessFilter, GeoRadius},
            file::EntityImages,
        },
        service::business::BusinessService,
        state::AppState,
        util::pagination::{default_limit, default_page, PageRequest},
    },
};

/// Tag for grouping business endpoints in OpenAPI documentation
pub static BUSINESS_TAG: &str = "businesses";

#[derive(Deserialize)]
pub struct BusinessSearchParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub city: Option<String>,
    pub category: Option<ServiceCategory>,
    pub verified: Option<bool>,
    pub search: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
}

impl BusinessSearchParams {
    /// Splits the query into a page request and a search filter.
    ///
    /// # Returns
    /// - `Err(ValidationError)` - Only part of `lat`, `lng` and `radius_km` was given, or
    ///   the radius is not positive
    fn into_filter(self) -> Result<(BusinessFilter, PageRequest), ValidationError> {
        let near = match (self.lat, self.lng, self.radius_km) {
            (None, None, None) => None,
            (Some(latitude), Some(longitude), Some(radius_km)) => {
                if radius_km <= 0.0 {
                    return Err(ValidationError::field(
                        "radius_km",
                        "Radius must be greater than zero",
                    ));
                }
                Some(GeoRadius {
                    latitude,
                    longitude,
                    radius_km,
                })
            }
            _ => {
                return Err(ValidationError::field(
                    "radius_km",
                    "lat, lng and radius_km must be given together",
                ))
            }
        };

        let filter = BusinessFilter {
            city: self.city,
            category: self.category,
            verified: self.verified,
            search: self.search,
            near,
        };

        Ok((filter, PageRequest::new(self.page, self.limit)))
    }
}

#[derive(Deserialize)]
pub struct MineParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Register a business.
///
/// The business starts unverified and is owned by the caller.
///
/// # Access Control
/// - `BusinessOwner` or `Admin`
#[utoipa::path(
    post,
    path = "/businesses",
    tag = BUSINESS_TAG,
    request_body = CreateBusinessDto,
    responses(
        (status = 201, description = "Business created", body = BusinessDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn create_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBusinessDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    let business = BusinessService::new(&state.db, state.storage.as_ref())
        .create(&user, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(business.into_dto(EntityImages::default(), None)),
    ))
}

/// Search active businesses.
///
/// With `lat`, `lng` and `radius_km` only businesses inside the radius are returned,
/// nearest first, each with its `distance_km`. Without them results are newest first.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - Page of businesses
/// - `422 Unprocessable Entity` - Incomplete proximity parameters
#[utoipa::path(
    get,
    path = "/businesses",
    tag = BUSINESS_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("city" = Option<String>, Query, description = "City, case-insensitive"),
        ("category" = Option<ServiceCategory>, Query, description = "Offered category"),
        ("verified" = Option<bool>, Query, description = "Verification state"),
        ("search" = Option<String>, Query, description = "Name substring, case-insensitive"),
        ("lat" = Option<f64>, Query, description = "Latitude of the search point"),
        ("lng" = Option<f64>, Query, description = "Longitude of the search point"),
        ("radius_km" = Option<f64>, Query, description = "Search radius in kilometres")
    ),
    responses(
        (status = 200, description = "Page of businesses", body = PaginatedBusinessesDto),
        (status = 422, description = "Invalid search parameters", body = ErrorDto)
    ),
)]
pub async fn search_businesses(
    State(state): State<AppState>,
    Query(params): Query<BusinessSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let (filter, page) = params.into_filter()?;

    let businesses = BusinessService::new(&state.db, state.storage.as_ref())
        .search(filter, page)
        .await?;

    Ok((StatusCode::OK, Json(businesses.into_dto())))
}

/// List the caller's businesses.
///
/// # Access Control
/// - `BusinessOwner` or `Admin`
#[utoipa::path(
    get,
    path = "/businesses/mine",
    tag = BUSINESS_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of own businesses", body = PaginatedBusinessesDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto)
    ),
)]
pub async fn get_my_businesses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<MineParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    let businesses = BusinessService::new(&state.db, state.storage.as_ref())
        .get_mine(&user, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(businesses.into_dto())))
}

/// Get a business with its logo and gallery.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/businesses/{id}",
    tag = BUSINESS_TAG,
    params(
        ("id" = i32, Path, description = "Business ID")
    ),
    responses(
        (status = 200, description = "Business details", body = BusinessDto),
        (status = 404, description = "Business not found", body = ErrorDto)
    ),
)]
pub async fn get_business(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let business = BusinessService::new(&state.db, state.storage.as_ref())
        .get(id)
        .await?;

    Ok((StatusCode::OK, Json(business)))
}

/// Update a business.
///
/// # Access Control
/// - Owner of the business or `Admin`; only admins may change `is_verified`
///
/// # Returns
/// - `200 OK` - Updated business
/// - `403 Forbidden` - Not the owner, or an owner changing verification
/// - `404 Not Found` - Business missing or deleted
#[utoipa::path(
    put,
    path = "/businesses/{id}",
    tag = BUSINESS_TAG,
    params(
        ("id" = i32, Path, description = "Business ID")
    ),
    request_body = UpdateBusinessDto,
    responses(
        (status = 200, description = "Updated business", body = BusinessDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed", body = ErrorDto),
        (status = 404, description = "Business not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn update_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBusinessDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    let business = BusinessService::new(&state.db, state.storage.as_ref())
        .update(&user, id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(business.into_dto(EntityImages::default(), None)),
    ))
}

#[utoipa::path(
    delete,
    path = "/businesses/{id}",
    tag = BUSINESS_TAG,
    params(
        ("id" = i32, Path, description = "Business ID")
    ),
    responses(
        (status = 200, description = "Business deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Business not found", body = ErrorDto)
    ),
)]
pub async fn delete_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_business_owner_or_admin()
        .await?;

    BusinessService::new(&state.db, state.storage.as_ref())
        .delete(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::ok("Business deleted successfully")),
    ))
}

/// List the active services of a business.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/businesses/{id}/services",
    tag = BUSINESS_TAG,
    params(
        ("id" = i32, Path, description = "Business ID")
    ),
    responses(
        (status = 200, description = "Services of the business", body = Vec<ServiceDto>),
        (status = 404, description = "Business not found", body = ErrorDto)
    ),
)]
pub async fn get_business_services(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let services = BusinessService::new(&state.db, state.storage.as_ref())
        .get_services(id)
        .await?;

    let dtos: Vec<ServiceDto> = services
        .into_iter()
        .map(|s| s.into_dto(EntityImages::default()))
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}
