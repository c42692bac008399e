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
        pet::{
            CreatePetDto, MedicalRecordDto, PaginatedPetsDto, PetDto, Species, UpdatePetDto,
            VaccinationDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{file::EntityImages, pet::PetFilter},
        service::pet::PetService,
        state::AppState,
        util::pagination::{default_limit, default_page, PageRequest},
    },
};

/// Tag for grouping pet endpoints in OpenAPI documentation
pub static PET_TAG: &str = "pets";

#[derive(Deserialize)]
pub struct PetListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub species: Option<Species>,
    /// Honoured for admins only.
    pub owner_id: Option<i32>,
}

/// Register a pet.
///
/// The caller becomes the owner; admins may set `owner_id` to register a pet for
/// another user.
///
/// # Access Control
/// - `PetOwner` or `Admin`
///
/// # Returns
/// - `201 Created` - Stored pet
/// - `403 Forbidden` - Caller is a business owner
/// - `422 Unprocessable Entity` - Invalid payload
#[utoipa::path(
    post,
    path = "/pets",
    tag = PET_TAG,
    request_body = CreatePetDto,
    responses(
        (status = 201, description = "Pet created", body = PetDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn create_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePetDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    let pet = PetService::new(&state.db, state.storage.as_ref())
        .create(&user, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(pet.into_dto(EntityImages::default())),
    ))
}

/// List pets.
///
/// Pet owners only ever see their own pets; admins see all and may filter by owner.
///
/// # Access Control
/// - `PetOwner` or `Admin`
#[utoipa::path(
    get,
    path = "/pets",
    tag = PET_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("species" = Option<Species>, Query, description = "Filter by species"),
        ("owner_id" = Option<i32>, Query, description = "Filter by owner (admin only)")
    ),
    responses(
        (status = 200, description = "Page of pets", body = PaginatedPetsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto)
    ),
)]
pub async fn get_pets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PetListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    let filter = PetFilter {
        owner_id: params.owner_id,
        species: params.species,
    };
    let pets = PetService::new(&state.db, state.storage.as_ref())
        .get_paginated(&user, filter, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(pets.into_dto())))
}

/// Get a pet with its image URLs.
///
/// # Access Control
/// - Owner of the pet or `Admin`
///
/// # Returns
/// - `200 OK` - Pet details
/// - `403 Forbidden` - Pet belongs to someone else
/// - `404 Not Found` - Pet missing or deleted
#[utoipa::path(
    get,
    path = "/pets/{id}",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet details", body = PetDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Pet not found", body = ErrorDto)
    ),
)]
pub async fn get_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let pet = PetService::new(&state.db, state.storage.as_ref())
        .get(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(pet)))
}

#[utoipa::path(
    put,
    path = "/pets/{id}",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet ID")
    ),
    request_body = UpdatePetDto,
    responses(
        (status = 200, description = "Updated pet", body = PetDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Pet not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn update_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePetDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    let pet = PetService::new(&state.db, state.storage.as_ref())
        .update(&user, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(pet.into_dto(EntityImages::default()))))
}

/// Soft delete a pet.
///
/// The pet is hidden from every read but its bookings keep referring to it.
///
/// # Access Control
/// - Owner of the pet or `Admin`
#[utoipa::path(
    delete,
    path = "/pets/{id}",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Pet not found", body = ErrorDto)
    ),
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    PetService::new(&state.db, state.storage.as_ref())
        .delete(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::ok("Pet deleted successfully"))))
}

/// Append a vaccination record.
///
/// # Access Control
/// - Owner of the pet or `Admin`
#[utoipa::path(
    post,
    path = "/pets/{id}/vaccinations",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet ID")
    ),
    request_body = VaccinationDto,
    responses(
        (status = 201, description = "Vaccination recorded", body = PetDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Pet not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn add_vaccination(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<VaccinationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    let pet = PetService::new(&state.db, state.storage.as_ref())
        .add_vaccination(&user, id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(pet.into_dto(EntityImages::default())),
    ))
}

/// Append a medical history entry.
///
/// # Access Control
/// - Owner of the pet or `Admin`
#[utoipa::path(
    post,
    path = "/pets/{id}/medical-history",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet ID")
    ),
    request_body = MedicalRecordDto,
    responses(
        (status = 201, description = "Record added", body = PetDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Pet not found", body = ErrorDto),
        (status = 422, description = "Invalid payload", body = ErrorDto)
    ),
)]
pub async fn add_medical_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<MedicalRecordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_pet_owner_or_admin()
        .await?;

    let pet = PetService::new(&state.db, state.storage.as_ref())
        .add_medical_record(&user, id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(pet.into_dto(EntityImages::default())),
    ))
}
