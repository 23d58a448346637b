//! Application configuration.
//!
//! Centralized configuration for the gallery frontend.
//! These are compile-time constants; the backend and the page layout
//! do not change at runtime.

/// Backend base URL.
///
/// The image backend serving `/upload`, `/gallery`, `/delete_image`, etc.
/// Relative asset paths it returns are resolved against this as well.
pub const BACKEND_URL: &str = "http://localhost:5000";

/// Console log threshold.
///
/// Messages below this level are dropped. Installed once by
/// [`crate::logging::init`].
pub const LOG_LEVEL: log::Level = log::Level::Error;

/// Maximum size of a single staged image (in bytes).
///
/// 16 MiB, same as the backend's request limit.
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Content-type prefix a staged file must carry.
pub const ACCEPTED_MIME_PREFIX: &str = "image/";

/// Multipart field name for uploaded files (repeated once per file).
pub const UPLOAD_FIELD: &str = "files[]";

/// Session-storage key holding the ids to pre-select in the gallery.
pub const SELECTED_IDS_STORAGE_KEY: &str = "lastUploadedImageIds";

/// How long "copied" feedback stays visible (ms).
pub const FEEDBACK_RESET_MS: u32 = 2_000;

/// Fade-out duration before a deleted card or row is removed (ms).
pub const FADE_OUT_MS: u32 = 500;

/// Number of recent images named in the post-failure recovery prompt.
pub const RECENT_IMAGES_LIMIT: usize = 5;

/// File name suggested for the exported URL spreadsheet.
pub const EXPORT_FILENAME: &str = "image_urls.xlsx";

/// Placeholder shown when a gallery thumbnail fails to load.
pub const THUMBNAIL_ERROR_IMAGE: &str = "/static/images/thumbnail-error.png";

/// Placeholder shown when the full-size preview fails to load.
pub const PREVIEW_ERROR_IMAGE: &str = "/static/images/error.png";
