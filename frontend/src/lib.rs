//! Image Host - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading images to the image host backend
//! and managing them through a paginated gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (Upload / Gallery navigation)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  "/"        UploadSection                                    │
//! │             ├── PreviewStrip (staged files)                  │
//! │             └── UploadResults (URLs, copy, delete)           │
//! │  "/gallery" GalleryPage                                      │
//! │             ├── GalleryCard × n (select, preview, delete)    │
//! │             ├── Pagination                                   │
//! │             └── ImagePreviewModal                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  LoadingOverlay, Footer                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Image ids, API payloads and errors
//! - [`selection`] - Gallery selection state and restoration
//! - [`session`] - Files staged for upload
//! - [`upload_result`] - Upload response processing
//! - [`actions`] - Delete and export flows shared by the pages
//! - [`components`] - UI components
//! - [`services`] - Backend and browser access

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod logging;
pub mod types;
pub mod selection;
pub mod session;
pub mod upload_result;
pub mod actions;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Identifiers
    ImageId,
    // API
    GalleryImage, GalleryListing, UploadResponse, UploadedFile,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(Busy::new());

    view! {
        <Title formatter=|page: String| format!("{} · Image Host", page)/>
        <Router>
            <Header/>
            <main>
                <Routes>
                    <Route path="/" view=UploadSection/>
                    <Route path="/gallery" view=GalleryPage/>
                </Routes>
            </main>
            <LoadingOverlay/>
            <Footer/>
        </Router>
    }
}
