//! Image upload with drag & drop support.
//!
//! Handles file selection, local previews, upload to the backend and the
//! hand-off of the uploaded ids to the gallery.

use leptos::html::Input;
use leptos::*;
use leptos_meta::Title;
use web_sys::{File, HtmlInputElement};

use crate::components::{PreviewStrip, ResultRow, UploadResults};
use crate::services::{api, browser};
use crate::session::UploadSession;
use crate::types::AppError;
use crate::upload_result::{recovery_prompt, UploadOutcome};

#[component]
pub fn UploadSection() -> impl IntoView {
    let session = create_rw_signal(UploadSession::<File>::new());
    let drag_active = create_rw_signal(false);
    let submitting = create_rw_signal(false);
    let rows = create_rw_signal(Vec::<ResultRow>::new());
    let gallery_link = create_rw_signal(None::<String>);
    // Row keys keep counting across uploads so `<For>` never reuses a row.
    let next_row_key = store_value(0usize);
    let file_input = create_node_ref::<Input>();

    // Files dropped outside the zone must not replace the page.
    let window_dragover = window_event_listener(ev::dragover, |ev| ev.prevent_default());
    let window_drop = window_event_listener(ev::drop, |ev| ev.prevent_default());
    on_cleanup(move || {
        window_dragover.remove();
        window_drop.remove();
    });

    let add_files = move |files: Vec<File>| {
        let Some(result) = session.try_update(|s| s.ingest(files)) else {
            return;
        };
        let added = match result {
            Ok(added) => added,
            Err(e) => {
                browser::alert(&e.to_string());
                return;
            }
        };
        log::debug!("Staged {} file(s)", added.len());

        for entry in added {
            spawn_local(async move {
                match browser::read_as_data_url(&entry.file).await {
                    Ok(data_url) => {
                        session.try_update(|s| s.set_preview(entry.serial, data_url));
                    }
                    Err(e) => log::error!("Preview of {} failed: {}", entry.name, e),
                }
            });
        }
    };

    let on_file_change = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            add_files(browser::files_from_list(&list));
        }
    };

    let on_drag_enter = move |ev: ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(true);
    };
    let on_drag_over = move |ev: ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(true);
    };
    let on_drag_leave = move |ev: ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(false);
    };
    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        drag_active.set(false);
        if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
            add_files(browser::files_from_list(&list));
        }
    };

    let trigger_file_input = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let (serials, files): (Vec<u64>, Vec<File>) = session.with_untracked(|s| {
            s.staged()
                .iter()
                .map(|entry| (entry.serial, entry.file.clone()))
                .unzip()
        });
        if files.is_empty() {
            browser::alert("Please select at least one image to upload");
            return;
        }
        submitting.set(true);

        spawn_local(async move {
            let result = api::upload_images(files.iter()).await;
            submitting.try_set(false);

            match result {
                Ok(response) => {
                    let outcome = UploadOutcome::from_response(response);
                    log::debug!("Uploaded {} file(s)", outcome.files.len());

                    let link = outcome.gallery_link(browser::now_ms());
                    if link.is_none() {
                        log::error!("No image ids in the upload response, gallery link disabled");
                    }
                    browser::store_selection(&outcome.gallery_ids());

                    let count = outcome.files.len();
                    let Some(first_key) = next_row_key.try_update_value(|next| {
                        let first = *next;
                        *next += count;
                        first
                    }) else {
                        return;
                    };
                    gallery_link.try_set(link);
                    rows.try_set(ResultRow::from_files(first_key, outcome.files));
                    session.try_update(|s| s.remove_serials(&serials));
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                }
                Err(e) => recover_from_failure(e).await,
            }
        });
    };

    let zone_class = move || {
        if drag_active.get() {
            "upload-area active"
        } else {
            "upload-area"
        }
    };

    view! {
        <Title text="Upload images"/>
        <div class="container py-4">
            <form id="upload-form" on:submit=on_submit>
                <div
                    id="upload-area"
                    class=zone_class
                    on:click=trigger_file_input
                    on:dragenter=on_drag_enter
                    on:dragover=on_drag_over
                    on:dragleave=on_drag_leave
                    on:drop=on_drop
                >
                    <i class="bi bi-cloud-arrow-up upload-icon"></i>
                    <div class="upload-text">"Drag images here or click to choose"</div>
                    <div class="upload-hint text-muted">"JPG, PNG, GIF, ... up to 16MB each"</div>
                    <input
                        type="file"
                        id="file-input"
                        accept="image/*"
                        multiple=true
                        style="display:none"
                        node_ref=file_input
                        on:click=|ev: ev::MouseEvent| ev.stop_propagation()
                        on:change=on_file_change
                    />
                </div>

                <PreviewStrip session=session/>

                <button
                    type="submit"
                    id="upload-button"
                    class="btn btn-primary mt-3"
                    disabled=move || submitting.get()
                >
                    <Show
                        when=move || submitting.get()
                        fallback=|| "Upload images"
                    >
                        <span class="spinner-border spinner-border-sm me-2" role="status"></span>
                        "Uploading..."
                    </Show>
                </button>
            </form>

            <UploadResults rows=rows gallery_link=gallery_link/>
        </div>
    }
}

/// The upload may have landed on the server even though the request
/// failed on our side. Offer the gallery when it has something to show.
async fn recover_from_failure(err: AppError) {
    log::error!("Upload failed: {}", err);

    match api::fetch_gallery(None).await {
        Ok(listing) if !listing.images.is_empty() => {
            if browser::confirm(&recovery_prompt(&listing.images)) {
                browser::navigate("/gallery");
                return;
            }
        }
        Ok(_) => {}
        Err(e) => log::error!("Gallery check after failed upload failed: {}", e),
    }
    browser::alert(&format!("Upload failed: {}", err));
}
