//! File attachment domain models.

use crate::model::file::{CategoryFilesDto, EntityType, FileCategory, FileDto};

/// Image URLs attached to an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityImages {
    /// Newest `profile` or `logo` image.
    pub primary: Option<String>,
    /// `additional`, `gallery` and `service-image` images, newest first.
    pub gallery: Vec<String>,
}

/// A file received in a multipart upload, before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, used only to check the extension.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The entity a file operation targets, with its resolved owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTarget {
    pub entity_type: EntityType,
    pub entity_id: i32,
    pub owner_id: i32,
}

/// A file as stored in a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub file_name: String,
    pub category: FileCategory,
    pub bucket: String,
    pub path: String,
    pub url: String,
    pub size: Option<u64>,
    pub content_type: Option<String>,
}

impl StoredFile {
    pub fn into_dto(self) -> FileDto {
        FileDto {
            file_name: self.file_name,
            category: self.category,
            bucket: self.bucket,
            path: self.path,
            url: self.url,
            size: self.size,
            content_type: self.content_type,
        }
    }
}

/// Files of one category of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFiles {
    pub category: FileCategory,
    pub files: Vec<StoredFile>,
}

impl CategoryFiles {
    pub fn into_dto(self) -> CategoryFilesDto {
        CategoryFilesDto {
            category: self.category,
            files: self.files.into_iter().map(StoredFile::into_dto).collect(),
        }
    }
}
