//! Upload rules per entity type and file category.

use crate::{
    model::file::{EntityType, FileCategory},
    server::{error::file::FileError, model::file::UploadedFile},
};

const MB: usize = 1024 * 1024;

const JPEG: &str = "image/jpeg";
const PNG: &str = "image/png";
const WEBP: &str = "image/webp";
const GIF: &str = "image/gif";
const SVG: &str = "image/svg+xml";
const PDF: &str = "application/pdf";

/// Limits applied to one upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileConstraint {
    pub allowed_types: &'static [&'static str],
    pub max_bytes: usize,
    pub max_files: usize,
}

const fn rule(
    allowed_types: &'static [&'static str],
    max_mb: usize,
    max_files: usize,
) -> FileConstraint {
    FileConstraint {
        allowed_types,
        max_bytes: max_mb * MB,
        max_files,
    }
}

/// Constraint for a category of an entity type, or `None` if the pair is not allowed.
pub fn constraint_for(entity_type: EntityType, category: FileCategory) -> Option<FileConstraint> {
    use EntityType as E;
    use FileCategory as C;

    match (entity_type, category) {
        (E::Pet, C::Profile) => Some(rule(&[JPEG, PNG, WEBP], 5, 1)),
        (E::Pet, C::Additional) => Some(rule(&[JPEG, PNG, WEBP, GIF], 5, 10)),
        (E::Pet, C::Document) => Some(rule(&[PDF, JPEG, PNG], 10, 5)),
        (E::Business, C::Logo) => Some(rule(&[JPEG, PNG, WEBP, SVG], 2, 1)),
        (E::Business, C::Gallery) => Some(rule(&[JPEG, PNG, WEBP], 5, 20)),
        (E::Business, C::Document) => Some(rule(&[PDF, JPEG, PNG], 10, 10)),
        (E::User, C::Profile) => Some(rule(&[JPEG, PNG, WEBP], 2, 1)),
        (E::User, C::Document) => Some(rule(&[PDF, JPEG, PNG], 10, 5)),
        (E::Service, C::ServiceImage) => Some(rule(&[JPEG, PNG, WEBP], 5, 10)),
        _ => None,
    }
}

/// Every category an entity type accepts.
pub fn categories_for(entity_type: EntityType) -> Vec<FileCategory> {
    [
        FileCategory::Profile,
        FileCategory::Additional,
        FileCategory::Logo,
        FileCategory::Gallery,
        FileCategory::Document,
        FileCategory::ServiceImage,
    ]
    .into_iter()
    .filter(|category| constraint_for(entity_type, *category).is_some())
    .collect()
}

/// Categories whose newest file is the entity's primary image.
pub fn is_single_slot(category: FileCategory) -> bool {
    matches!(category, FileCategory::Profile | FileCategory::Logo)
}

/// Category holding an entity's primary image.
pub fn primary_category(entity_type: EntityType) -> Option<FileCategory> {
    match entity_type {
        EntityType::Pet | EntityType::User => Some(FileCategory::Profile),
        EntityType::Business => Some(FileCategory::Logo),
        EntityType::Service => None,
    }
}

/// Category holding an entity's gallery images.
pub fn gallery_category(entity_type: EntityType) -> Option<FileCategory> {
    match entity_type {
        EntityType::Pet => Some(FileCategory::Additional),
        EntityType::Business => Some(FileCategory::Gallery),
        EntityType::Service => Some(FileCategory::ServiceImage),
        EntityType::User => None,
    }
}

/// Documents live in a private bucket and are served through signed URLs.
pub fn is_private(category: FileCategory) -> bool {
    category == FileCategory::Document
}

pub fn bucket_for(entity_type: EntityType, category: FileCategory) -> &'static str {
    if is_private(category) {
        return "documents";
    }

    match entity_type {
        EntityType::Pet => "pet-images",
        EntityType::Business => "business-images",
        EntityType::User => "user-profiles",
        EntityType::Service => "service-images",
    }
}

/// Reduces a `Content-Type` header to its lowercase `type/subtype`, dropping parameters
/// such as `charset`.
pub fn normalize_content_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// File extensions accepted for a MIME type; the first one is used for stored names.
pub fn extensions_for(content_type: &str) -> &'static [&'static str] {
    match content_type {
        JPEG => &["jpg", "jpeg"],
        PNG => &["png"],
        WEBP => &["webp"],
        GIF => &["gif"],
        SVG => &["svg"],
        PDF => &["pdf"],
        _ => &[],
    }
}

/// Checks an entire upload request before anything is stored.
///
/// Checks run in order: category allowed, file count, then per file: non-empty,
/// size, MIME type, extension. The first failure rejects the whole request.
///
/// # Returns
/// - `Ok(FileConstraint)` - Every file passed
/// - `Err(FileError)` - The first violated rule
pub fn validate_upload(
    entity_type: EntityType,
    category: FileCategory,
    files: &[UploadedFile],
) -> Result<FileConstraint, FileError> {
    let constraint = constraint_for(entity_type, category).ok_or(FileError::UnsupportedCategory {
        entity_type,
        category,
    })?;

    if files.is_empty() {
        return Err(FileError::NoFiles);
    }
    if files.len() > constraint.max_files {
        return Err(FileError::TooManyFiles {
            max: constraint.max_files,
            received: files.len(),
        });
    }

    for file in files {
        validate_file(&constraint, file)?;
    }

    Ok(constraint)
}

fn validate_file(constraint: &FileConstraint, file: &UploadedFile) -> Result<(), FileError> {
    if file.bytes.is_empty() {
        return Err(FileError::EmptyFile {
            file_name: file.file_name.clone(),
        });
    }
    if file.bytes.len() > constraint.max_bytes {
        return Err(FileError::FileTooLarge {
            file_name: file.file_name.clone(),
            max_bytes: constraint.max_bytes,
        });
    }
    let content_type = normalize_content_type(&file.content_type);
    if !constraint.allowed_types.contains(&content_type.as_str()) {
        return Err(FileError::UnsupportedMediaType {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
        });
    }

    let extension = file
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !extensions_for(&content_type).contains(&extension.as_str()) {
        return Err(FileError::ExtensionMismatch {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
        });
    }

    Ok(())
}
