use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of entity a file is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Pet,
    Business,
    User,
    Service,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::Business => "business",
            Self::User => "user",
            Self::Service => "service",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pet" => Ok(Self::Pet),
            "business" => Ok(Self::Business),
            "user" => Ok(Self::User),
            "service" => Ok(Self::Service),
            other => Err(format!("unknown entity type '{}'", other)),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    Profile,
    Additional,
    Logo,
    Gallery,
    Document,
    ServiceImage,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Additional => "additional",
            Self::Logo => "logo",
            Self::Gallery => "gallery",
            Self::Document => "document",
            Self::ServiceImage => "service-image",
        }
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "profile" => Ok(Self::Profile),
            "additional" => Ok(Self::Additional),
            "logo" => Ok(Self::Logo),
            "gallery" => Ok(Self::Gallery),
            "document" => Ok(Self::Document),
            "service-image" => Ok(Self::ServiceImage),
            other => Err(format!("unknown file category '{}'", other)),
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FileDto {
    pub file_name: String,
    pub category: FileCategory,
    pub bucket: String,
    pub path: String,
    /// Public URL, or a signed URL for private buckets.
    pub url: String,
    pub size: Option<u64>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub success: bool,
    pub files: Vec<FileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryFilesDto {
    pub category: FileCategory,
    pub files: Vec<FileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityFilesDto {
    pub entity_type: EntityType,
    pub entity_id: i32,
    pub categories: Vec<CategoryFilesDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileUrlDto {
    pub url: String,
    /// Seconds until a signed URL expires; absent for public URLs.
    pub expires_in: Option<u64>,
}

/// OpenAPI description of the multipart upload body.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadFilesForm {
    /// One or more files, each sent as a `file` part.
    #[schema(value_type = Vec<String>, format = Binary)]
    pub file: Vec<Vec<u8>>,
}
