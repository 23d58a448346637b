//! User-triggered gallery actions.
//!
//! Each action validates locally, asks for confirmation where needed, makes
//! one request and reports the outcome once. Failures leave the page as it
//! was.

use leptos::*;

use crate::components::Busy;
use crate::config::EXPORT_FILENAME;
use crate::services::{api, browser};
use crate::types::{AppError, AppResult, ImageId};
use crate::upload_result::force_https;

/// Log (unless it is a validation error) and alert.
pub fn report(action: &str, err: &AppError) {
    if !err.is_validation() {
        log::error!("{} failed: {}", action, err);
    }
    browser::alert(&format!("{} failed: {}", action, err));
}

fn require_selection(ids: &[ImageId], what: &str) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::Validation(format!(
            "Please select the images to {} first",
            what
        )));
    }
    Ok(())
}

/// Confirm, then delete one image.
///
/// `on_deleted` runs only after the backend confirmed the deletion.
pub fn delete_one(id: ImageId, busy: Busy, on_deleted: impl FnOnce() + 'static) {
    if !browser::confirm("Delete this image? This cannot be undone.") {
        return;
    }

    log::debug!("🗑️ Deleting image {}", id);
    spawn_local(async move {
        busy.start();
        let result = api::delete_image(&id).await;
        busy.finish();

        match result {
            Ok(_) => on_deleted(),
            Err(e) => report("Delete", &e),
        }
    });
}

/// Validate, confirm, then delete every id and reload on success.
pub fn delete_many(ids: Vec<ImageId>, busy: Busy) {
    if let Err(e) = require_selection(&ids, "delete") {
        browser::alert(&e.to_string());
        return;
    }
    let prompt = format!(
        "Delete the {} selected images? This cannot be undone.",
        ids.len()
    );
    if !browser::confirm(&prompt) {
        return;
    }

    spawn_local(async move {
        busy.start();
        let result = api::batch_delete(&ids).await;
        busy.finish();

        match result {
            Ok(reply) => {
                log::info!(
                    "Batch delete: {} deleted, {} failed",
                    reply.deleted_count.unwrap_or(0),
                    reply.failed_count.unwrap_or(0)
                );
                browser::alert(&reply.message);
                browser::reload();
            }
            Err(e) => report("Batch delete", &e),
        }
    });
}

/// Validate, then fetch the URL spreadsheet and download it.
///
/// `exporting` drives the export modal and is cleared on every outcome.
pub fn export_urls(ids: Vec<ImageId>, exporting: RwSignal<bool>) {
    if let Err(e) = require_selection(&ids, "export") {
        browser::alert(&e.to_string());
        return;
    }

    exporting.set(true);
    spawn_local(async move {
        let result = api::download_urls(&ids).await;
        exporting.try_set(false);

        let downloaded = result.and_then(|reply| {
            let url = force_https(&reply.url);
            log::debug!("Export URL: {}", url);
            browser::trigger_download(&url, EXPORT_FILENAME)
        });
        if let Err(e) = downloaded {
            report("Download", &e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_a_validation_error() {
        let err = require_selection(&[], "delete").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("delete"));

        assert!(require_selection(&[ImageId::new("1")], "export").is_ok());
    }
}
