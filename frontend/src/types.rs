//! Image ids, backend payloads and the frontend error type.
//!
//! Every request and response body the gallery exchanges with the backend
//! is declared here, next to the id type they all share.
//!
//! # Categories
//!
//! - **Identifiers** - canonical image ids
//! - **API Types** - Backend request/response structures
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Identifiers
// =============================================================================

/// Canonical image identifier.
///
/// The backend hands out integer ids, the URL and session storage carry
/// strings, and upload results may fall back to a filename stem. All of
/// them are normalized once here so that a single equality check matches
/// `7`, `"7"` and `" 007 "`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Normalize a raw identifier: trim it, and reduce all-digit values to
    /// their integer form.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<u64>() {
                return Self(n.to_string());
            }
        }
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for ImageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ImageId::new(s),
            RawId::Number(n) => ImageId::new(n.to_string()),
        })
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Replies that may carry an application-level `error` field
/// alongside a 2xx status.
pub trait ApiReply {
    fn error_message(&self) -> Option<&str>;
}

/// Body of an error-only reply (any endpoint, any status).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorReply {
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of the upload endpoint's `files` list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub url: String,
    /// May be absent; see [`crate::upload_result`] for the fallback.
    #[serde(default)]
    pub id: Option<ImageId>,
}

/// Response from `POST /upload`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `DELETE /delete_image/:id`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `POST /batch_delete`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BatchDeleteResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub deleted_count: Option<u32>,
    #[serde(default)]
    pub failed_count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `POST /download_urls`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DownloadUrlsResponse {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /batch_delete` and `POST /download_urls`.
#[derive(Clone, Debug, Serialize)]
pub struct IdsRequest<'a> {
    pub ids: &'a [ImageId],
}

/// One image of the gallery listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GalleryImage {
    pub id: ImageId,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    /// Pre-formatted by the backend, e.g. `"12.5KB"`.
    #[serde(default)]
    pub filesize: String,
    #[serde(default)]
    pub filetype: String,
    #[serde(default)]
    pub upload_date: String,
}

impl GalleryImage {
    /// Name shown to the user: the original name when known.
    pub fn display_name(&self) -> &str {
        if self.original_filename.is_empty() {
            &self.filename
        } else {
            &self.original_filename
        }
    }
}

fn first_page() -> u32 {
    1
}

/// Response from `GET /gallery?format=json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GalleryListing {
    #[serde(default)]
    pub images: Vec<GalleryImage>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_images: u64,
    #[serde(default)]
    pub error: Option<String>,
}

impl GalleryListing {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

macro_rules! impl_api_reply {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiReply for $ty {
                fn error_message(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )*
    };
}

impl_api_reply!(
    ErrorReply,
    UploadResponse,
    DeleteResponse,
    BatchDeleteResponse,
    DownloadUrlsResponse,
    GalleryListing,
);

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AppError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    /// Network failure or non-2xx status without a usable message.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with an `error` field.
    #[error("{0}")]
    Application(String),

    /// The response body could not be decoded.
    #[error("Unexpected response format: {0}")]
    Parse(String),

    /// A browser API call failed.
    #[error("Browser error: {0}")]
    Browser(String),
}

impl AppError {
    /// Validation errors are expected user mistakes and are not logged.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => AppError::Parse(e.to_string()),
            other => AppError::Transport(other.to_string()),
        }
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

/// Check an [`ApiReply`] for an application-level error.
pub fn check_reply<T: ApiReply>(reply: T) -> AppResult<T> {
    match reply.error_message() {
        Some(msg) => Err(AppError::Application(msg.to_string())),
        None => Ok(reply),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_id_normalization() {
        assert_eq!(ImageId::new("7"), ImageId::new(" 007 "));
        assert_eq!(ImageId::new("cat").as_str(), "cat");
        assert_eq!(ImageId::new("  a1 ").as_str(), "a1");
        assert!(ImageId::new("   ").is_empty());
    }

    #[test]
    fn test_image_id_from_number_or_string() {
        let ids: Vec<ImageId> = serde_json::from_str(r#"[7, "7", " 8 ", "x9"]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "8");
        assert_eq!(ids[3].as_str(), "x9");
    }

    #[test]
    fn test_image_id_serializes_as_string() {
        let ids = vec![ImageId::new("3"), ImageId::new("9")];
        let body = serde_json::to_string(&IdsRequest { ids: &ids }).unwrap();
        assert_eq!(body, r#"{"ids":["3","9"]}"#);
    }

    #[test]
    fn test_upload_response_deserialization() {
        let json = r#"{
            "files": [
                {"id": 12, "filename": "ab12_cat.png", "url": "https://x/cat.png",
                 "original_filename": "cat.png", "filesize": "1.0KB"},
                {"filename": "dog.jpg", "url": "https://x/dog.jpg"},
                {"id": null, "filename": "fox.gif", "url": "https://x/fox.gif"}
            ]
        }"#;

        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.files.len(), 3);
        assert_eq!(response.files[0].id, Some(ImageId::new("12")));
        assert_eq!(response.files[1].id, None);
        assert_eq!(response.files[2].id, None);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_gallery_page_deserialization() {
        let json = r#"{
            "images": [{
                "id": 3,
                "filename": "f00d_sea.jpg",
                "original_filename": "sea.jpg",
                "url": "https://x/static/uploads/f00d_sea.jpg",
                "thumbnail_url": "/static/uploads/thumbnails/f00d_sea.jpg",
                "filesize": "120.4KB",
                "filetype": "image/jpeg",
                "upload_date": "2024-05-01 10:00:00"
            }],
            "page": 2,
            "total_pages": 3,
            "total_images": 40
        }"#;

        let page: GalleryListing = serde_json::from_str(json).unwrap();
        assert_eq!(page.images[0].id.as_str(), "3");
        assert_eq!(page.images[0].display_name(), "sea.jpg");
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_check_reply_surfaces_error_field() {
        let reply: BatchDeleteResponse =
            serde_json::from_str(r#"{"error": "nothing selected"}"#).unwrap();
        assert_eq!(
            check_reply(reply).unwrap_err(),
            AppError::Application("nothing selected".to_string())
        );

        let reply: BatchDeleteResponse =
            serde_json::from_str(r#"{"message": "deleted 2", "deleted_count": 2}"#).unwrap();
        assert_eq!(check_reply(reply).unwrap().message, "deleted 2");
    }
}
