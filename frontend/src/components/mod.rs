//! UI Components for the image gallery application.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Navigation bar
//! - [`Footer`] - Page footer
//! - [`LoadingOverlay`] - Busy overlay during deletes
//!
//! # Feature Components
//! - [`UploadSection`] - Image upload with drag & drop
//! - [`PreviewStrip`] - Local previews of staged files
//! - [`UploadResults`] - Uploaded file URLs with copy and delete
//! - [`GalleryPage`] - Paginated gallery with multi-select
//! - [`ImagePreviewModal`] - Full-size image preview

mod header;
mod footer;
mod overlay;
mod image_modal;
mod upload;
mod preview;
mod results;
mod gallery;

pub use header::*;
pub use footer::*;
pub use overlay::*;
pub use image_modal::*;
pub use upload::*;
pub use preview::*;
pub use results::*;
pub use gallery::*;
