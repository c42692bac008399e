use std::str::FromStr;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        file::{
            EntityFilesDto, EntityType, FileCategory, FileUrlDto, UploadFilesForm,
            UploadResponseDto,
        },
    },
    server::{
        error::{file::FileError, AppError},
        middleware::auth::AuthGuard,
        model::file::{CategoryFiles, StoredFile, UploadedFile},
        service::file::FileService,
        state::AppState,
    },
};

/// Tag for grouping file endpoints in OpenAPI documentation
pub static FILE_TAG: &str = "files";

/// Multipart field carrying the uploaded files.
const FILE_FIELD: &str = "file";

/// Bounds for a caller-chosen signed URL lifetime, in seconds.
const MIN_URL_TTL: u64 = 60;
const MAX_URL_TTL: u64 = 7 * 24 * 3600;

#[derive(Deserialize)]
pub struct FileUrlParams {
    pub expires_in: Option<u64>,
}

/// Upload files to an entity.
///
/// Every file is validated against the limits of the entity type and category before
/// anything is stored; one bad file rejects the whole request. Profile pictures and
/// logos replace the previous file.
///
/// # Access Control
/// - Owner of the entity or `Admin`
///
/// # Arguments
/// - `entity_type` - `pet`, `business`, `user` or `service`
/// - `entity_id` - ID of the entity
/// - `category` - File category, e.g. `profile` or `gallery`
/// - `multipart` - One or more `file` parts
///
/// # Returns
/// - `201 Created` - Stored files with their URLs
/// - `400 Bad Request` - Unknown category, no files, too many files, or empty file
/// - `403 Forbidden` - Caller does not own the entity
/// - `404 Not Found` - Entity missing or deleted
/// - `413 Payload Too Large` - A file exceeds the size limit
/// - `415 Unsupported Media Type` - Type not allowed or extension mismatch
#[utoipa::path(
    post,
    path = "/api/files/{entity_type}/{entity_id}/{category}",
    tag = FILE_TAG,
    params(
        ("entity_type" = EntityType, Path, description = "Entity type"),
        ("entity_id" = i32, Path, description = "Entity ID"),
        ("category" = FileCategory, Path, description = "File category")
    ),
    request_body(content = UploadFilesForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Files stored", body = UploadResponseDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Entity not found", body = ErrorDto),
        (status = 413, description = "File too large", body = ErrorDto),
        (status = 415, description = "Unsupported file type", body = ErrorDto)
    ),
)]
pub async fn upload_files(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((entity_type, entity_id, category)): Path<(String, i32, String)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let entity_type: EntityType = parse_segment(&entity_type)?;
    let category: FileCategory = parse_segment(&category)?;
    let files = read_files(multipart).await?;

    let stored = file_service(&state)
        .upload(&user, entity_type, entity_id, category, files)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponseDto {
            success: true,
            files: stored.into_iter().map(StoredFile::into_dto).collect(),
        }),
    ))
}

/// List the files of an entity grouped by category.
///
/// # Access Control
/// - Any authenticated user sees image categories
/// - Documents are listed only for the owner or `Admin`
#[utoipa::path(
    get,
    path = "/api/files/{entity_type}/{entity_id}",
    tag = FILE_TAG,
    params(
        ("entity_type" = EntityType, Path, description = "Entity type"),
        ("entity_id" = i32, Path, description = "Entity ID")
    ),
    responses(
        (status = 200, description = "Files by category", body = EntityFilesDto),
        (status = 400, description = "Unknown entity type", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Entity not found", body = ErrorDto)
    ),
)]
pub async fn list_files(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((entity_type, entity_id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let entity_type: EntityType = parse_segment(&entity_type)?;
    let categories = file_service(&state)
        .list(&user, entity_type, entity_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(EntityFilesDto {
            entity_type,
            entity_id,
            categories: categories.into_iter().map(CategoryFiles::into_dto).collect(),
        }),
    ))
}

/// Delete one file of an entity.
///
/// # Access Control
/// - Owner of the entity or `Admin`
#[utoipa::path(
    delete,
    path = "/api/files/{entity_type}/{entity_id}/{category}/{file_name}",
    tag = FILE_TAG,
    params(
        ("entity_type" = EntityType, Path, description = "Entity type"),
        ("entity_id" = i32, Path, description = "Entity ID"),
        ("category" = FileCategory, Path, description = "File category"),
        ("file_name" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageDto),
        (status = 400, description = "Invalid reference", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Entity or file not found", body = ErrorDto)
    ),
)]
pub async fn delete_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((entity_type, entity_id, category, file_name)): Path<(String, i32, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let entity_type: EntityType = parse_segment(&entity_type)?;
    let category: FileCategory = parse_segment(&category)?;

    file_service(&state)
        .delete(&user, entity_type, entity_id, category, &file_name)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::ok("File deleted successfully")),
    ))
}

/// Get a URL for one file.
///
/// Documents get a signed URL valid for `expires_in` seconds (clamped to one minute
/// up to seven days); images get their public URL.
///
/// # Access Control
/// - Documents: owner of the entity or `Admin`
/// - Images: any authenticated user
#[utoipa::path(
    get,
    path = "/api/files/{entity_type}/{entity_id}/{category}/{file_name}/url",
    tag = FILE_TAG,
    params(
        ("entity_type" = EntityType, Path, description = "Entity type"),
        ("entity_id" = i32, Path, description = "Entity ID"),
        ("category" = FileCategory, Path, description = "File category"),
        ("file_name" = String, Path, description = "Stored file name"),
        ("expires_in" = Option<u64>, Query, description = "Signed URL lifetime in seconds")
    ),
    responses(
        (status = 200, description = "File URL", body = FileUrlDto),
        (status = 400, description = "Invalid reference", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Entity or file not found", body = ErrorDto)
    ),
)]
pub async fn get_file_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((entity_type, entity_id, category, file_name)): Path<(String, i32, String, String)>,
    Query(params): Query<FileUrlParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require_authenticated()
        .await?;

    let entity_type: EntityType = parse_segment(&entity_type)?;
    let category: FileCategory = parse_segment(&category)?;
    let ttl = params
        .expires_in
        .unwrap_or(state.signed_url_ttl)
        .clamp(MIN_URL_TTL, MAX_URL_TTL);

    let (url, expires_in) = FileService::new(&state.db, state.storage.as_ref())
        .with_signed_url_ttl(ttl)
        .file_url(&user, entity_type, entity_id, category, &file_name)
        .await?;

    Ok((StatusCode::OK, Json(FileUrlDto { url, expires_in })))
}

fn file_service(state: &AppState) -> FileService<'_> {
    FileService::new(&state.db, state.storage.as_ref()).with_signed_url_ttl(state.signed_url_ttl)
}

fn parse_segment<T: FromStr<Err = String>>(value: &str) -> Result<T, AppError> {
    value.parse().map_err(AppError::BadRequest)
}

/// Collects every `file` part of the body; other parts are ignored.
async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        files.push(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(files)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        FileError::RequestTooLarge.into()
    } else {
        FileError::MalformedUpload(err.body_text()).into()
    }
}
