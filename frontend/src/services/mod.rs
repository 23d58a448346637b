//! Backend and browser services.
//!
//! # Services
//!
//! - [`api`] - HTTP calls to the image backend
//! - [`browser`] - dialogs, clipboard, downloads, session storage,
//!   local file reads and image probes

pub mod api;
pub mod browser;
