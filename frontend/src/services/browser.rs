//! Thin wrappers over browser APIs.
//!
//! Dialogs, navigation, clipboard, downloads, session storage, local file
//! reads and image probes. Callback-based APIs are turned into futures by
//! wrapping them in a `js_sys::Promise`.

use gloo_storage::{errors::StorageError, SessionStorage, Storage};
use gloo_utils::{body, document, window};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList, FileReader, HtmlAnchorElement, HtmlImageElement};

use crate::config::SELECTED_IDS_STORAGE_KEY;
use crate::types::{AppError, AppResult, ImageId};

fn js_error(context: &str, err: JsValue) -> AppError {
    AppError::Browser(format!("{}: {:?}", context, err))
}

// =============================================================================
// Dialogs & navigation
// =============================================================================

pub fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        log::error!("alert failed: {:?}", e);
    }
}

/// Blocking confirmation. A failing dialog counts as "no".
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

pub fn navigate(href: &str) {
    if let Err(e) = window().location().set_href(href) {
        log::error!("Navigation to {} failed: {:?}", href, e);
    }
}

pub fn reload() {
    if let Err(e) = window().location().reload() {
        log::error!("Reload failed: {:?}", e);
    }
}

/// Milliseconds since the epoch, for cache-busting.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Smoothly scroll the element with `id` to the middle of the viewport.
pub fn scroll_to_element(id: &str) {
    if let Some(element) = document().get_element_by_id(id) {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

// =============================================================================
// Clipboard & downloads
// =============================================================================

pub async fn copy_to_clipboard(text: &str) -> AppResult<()> {
    let promise = window().navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| js_error("Clipboard write failed", e))
}

/// Download `url` through a temporary anchor.
pub fn trigger_download(url: &str, filename: &str) -> AppResult<()> {
    let anchor = document()
        .create_element("a")
        .map_err(|e| js_error("Failed to create anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| AppError::Browser("Created element is not an anchor".to_string()))?;
    anchor.set_href(url);
    anchor.set_download(filename);

    let body = body();
    body.append_child(&anchor)
        .map_err(|e| js_error("Failed to attach anchor", e))?;
    anchor.click();
    anchor.remove();
    Ok(())
}

// =============================================================================
// Session storage
// =============================================================================

/// Read and remove the stored gallery selection.
///
/// The key is removed on every read, parseable or not, so a value is
/// consumed at most once.
pub fn take_stored_selection() -> Option<Vec<ImageId>> {
    let stored = SessionStorage::get::<Vec<ImageId>>(SELECTED_IDS_STORAGE_KEY);
    SessionStorage::delete(SELECTED_IDS_STORAGE_KEY);

    match stored {
        Ok(ids) => {
            log::debug!("Restored {} ids from session storage", ids.len());
            Some(ids)
        }
        Err(StorageError::KeyNotFound(_)) => None,
        Err(e) => {
            log::error!("Failed to parse stored image ids: {}", e);
            None
        }
    }
}

/// Remember ids for the gallery's next load.
pub fn store_selection(ids: &[ImageId]) {
    if let Err(e) = SessionStorage::set(SELECTED_IDS_STORAGE_KEY, ids) {
        log::error!("Failed to store image ids: {}", e);
    }
}

// =============================================================================
// Files & images
// =============================================================================

pub fn files_from_list(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Read a local file as a `data:` URL. No network access.
pub async fn read_as_data_url(file: &File) -> AppResult<String> {
    let reader = FileReader::new().map_err(|e| js_error("Failed to create FileReader", e))?;

    let promise = Promise::new(&mut |resolve, reject| {
        let loaded = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| js_error("Failed to start file read", e))?;

    JsFuture::from(promise)
        .await
        .map_err(|e| js_error("File read failed", e))?
        .as_string()
        .ok_or_else(|| AppError::Browser("File read produced no data URL".to_string()))
}

/// Load `src` in an off-DOM image; resolves once it has loaded.
pub async fn probe_image(src: &str) -> AppResult<()> {
    let image = HtmlImageElement::new().map_err(|e| js_error("Failed to create image", e))?;

    let promise = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
    });

    image.set_src(src);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|_| AppError::Browser(format!("Failed to load image {}", src)))
}

/// Run `f` before the next repaint, once the current DOM updates are in.
pub fn after_next_paint(f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    if let Err(e) = window().request_animation_frame(callback.unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {:?}", e);
    }
}
