use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    model::file::{EntityType, FileCategory},
    server::error::error_response,
};

/// Rejections produced while validating uploads and file references.
#[derive(Error, Debug, PartialEq)]
pub enum FileError {
    #[error("Category '{category}' is not allowed for {entity_type}")]
    UnsupportedCategory {
        entity_type: EntityType,
        category: FileCategory,
    },

    #[error("No files were provided")]
    NoFiles,

    #[error("Too many files: at most {max} allowed, received {received}")]
    TooManyFiles { max: usize, received: usize },

    #[error("File '{file_name}' is empty")]
    EmptyFile { file_name: String },

    #[error("File '{file_name}' exceeds the maximum size of {max_bytes} bytes")]
    FileTooLarge { file_name: String, max_bytes: usize },

    #[error("File '{file_name}' has unsupported type '{content_type}'")]
    UnsupportedMediaType {
        file_name: String,
        content_type: String,
    },

    #[error("File '{file_name}' extension does not match its type '{content_type}'")]
    ExtensionMismatch {
        file_name: String,
        content_type: String,
    },

    #[error("Invalid file name '{0}'")]
    InvalidFileName(String),

    /// The multipart body could not be read.
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    /// The request body exceeded the upload size limit.
    #[error("Upload exceeds the request size limit")]
    RequestTooLarge,
}

impl FileError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::FileTooLarge { .. } | Self::RequestTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType { .. } | Self::ExtensionMismatch { .. } => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Converts file errors into HTTP responses.
///
/// - `FileTooLarge` / `RequestTooLarge` → 413 Payload Too Large
/// - `UnsupportedMediaType` / `ExtensionMismatch` → 415 Unsupported Media Type
/// - Everything else → 400 Bad Request
///
/// The message names the offending file so clients can point at it.
impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}
