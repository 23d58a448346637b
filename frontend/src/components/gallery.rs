//! Gallery grid with multi-select, delete, export and preview.
//!
//! On load the grid restores a selection passed through the
//! `selected_ids` query parameter or, failing that, session storage.

use std::collections::HashSet;

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_query_map, A};

use crate::actions;
use crate::components::{use_busy, ImageModal, ImagePreviewModal};
use crate::config::{FADE_OUT_MS, THUMBNAIL_ERROR_IMAGE};
use crate::logging;
use crate::selection::{
    initial_selection, remove_deleted, InitialSelection, SelectAllToggle, Selection, SelectionIndex,
};
use crate::services::{api, browser};
use crate::types::{GalleryImage, GalleryListing, ImageId};

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

fn card_dom_id(id: &ImageId) -> String {
    format!("image-card-{}", id)
}

/// Check the requested ids and report the ones that are not on this page.
fn restore_selection(
    initial: InitialSelection,
    images: RwSignal<Vec<GalleryImage>>,
    selection: RwSignal<Selection>,
) {
    let index = images.with_untracked(|imgs| {
        if logging::enabled(log::Level::Debug) {
            let available: Vec<&str> = imgs.iter().map(|img| img.id.as_str()).collect();
            log::debug!("Selectors on page: {:?}", available);
        }
        SelectionIndex::build(imgs)
    });

    let Some(report) = selection.try_update(|s| s.restore(&index, &initial.ids)) else {
        return;
    };
    for id in &report.unmatched {
        log::error!("No selector found for image id {}", id);
    }
    log::debug!(
        "Selected {}/{} images from {:?}",
        report.matched.len(),
        initial.ids.len(),
        initial.source
    );

    if let Some(first) = report.first_position {
        if let Some(id) = images.with_untracked(|imgs| imgs.get(first).map(|img| img.id.clone())) {
            browser::after_next_paint(move || browser::scroll_to_element(&card_dom_id(&id)));
        }
    }
}

#[component]
pub fn GalleryPage() -> impl IntoView {
    let busy = use_busy();
    let query = use_query_map();

    let images = create_rw_signal(Vec::<GalleryImage>::new());
    let meta = create_rw_signal(GalleryListing::default());
    let load_state = create_rw_signal(LoadState::Loading);
    let selection = create_rw_signal(Selection::default());
    let toggle = create_rw_signal(SelectAllToggle::default());
    let fading = create_rw_signal(HashSet::<ImageId>::new());
    let exporting = create_rw_signal(false);
    let modal = ImageModal::new();

    // Session storage is consumed on every visit, even when the URL wins.
    let stored = browser::take_stored_selection();
    let requested = query.with_untracked(|q| q.get("selected_ids").cloned());
    let pending_restore = store_value(initial_selection(requested.as_deref(), stored));

    let page_number = create_memo(move |_| {
        query.with(|q| q.get("page").and_then(|p| p.parse::<u32>().ok()))
    });

    create_effect(move |_| {
        let page = page_number.get();
        load_state.set(LoadState::Loading);

        spawn_local(async move {
            let result = api::fetch_gallery(page).await;
            if page_number.try_get_untracked() != Some(page) {
                return;
            }
            match result {
                Ok(mut listing) => {
                    log::debug!("Loaded gallery page {} ({} images)", listing.page, listing.images.len());
                    images.set(std::mem::take(&mut listing.images));
                    meta.set(listing);
                    selection.set(Selection::default());
                    toggle.set(SelectAllToggle::default());
                    load_state.set(LoadState::Ready);

                    if let Some(initial) = pending_restore.try_update_value(Option::take).flatten() {
                        restore_selection(initial, images, selection);
                    }
                }
                Err(e) => {
                    log::error!("Failed to load gallery: {}", e);
                    load_state.try_set(LoadState::Failed(e.to_string()));
                }
            }
        });
    });

    let on_delete = Callback::new(move |id: ImageId| {
        actions::delete_one(id.clone(), busy, move || {
            fading.try_update(|f| {
                f.insert(id.clone());
            });
            spawn_local(async move {
                TimeoutFuture::new(FADE_OUT_MS).await;
                images.try_update(|imgs| {
                    selection.try_update(|s| remove_deleted(imgs, s, &id));
                });
                fading.try_update(|f| {
                    f.remove(&id);
                });
            });
        });
    });

    let on_select_all = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        let checked = toggle.try_update(|t| t.press()).unwrap_or(false);
        images.with_untracked(|imgs| selection.update(|s| s.set_all(imgs, checked)));
    };

    let checked_ids =
        move || images.with_untracked(|imgs| selection.with_untracked(|s| s.ordered_ids(imgs)));

    let on_download = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        actions::export_urls(checked_ids(), exporting);
    };

    let on_batch_delete = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        actions::delete_many(checked_ids(), busy);
    };

    let actions_disabled = move || selection.with(Selection::actions_disabled);

    view! {
        <Title text="Gallery"/>
        <div class="container py-4">
            <div class="d-flex flex-wrap align-items-center gap-2 mb-4 gallery-toolbar">
                <h2 class="me-auto mb-0">"Gallery"</h2>
                <span class="text-muted">
                    {move || format!("{} selected", selection.with(Selection::len))}
                </span>
                <button id="select-all-btn" class="btn btn-outline-primary" on:click=on_select_all>
                    {move || toggle.get().label()}
                </button>
                <button
                    id="download-urls-btn"
                    class="btn btn-primary"
                    disabled=actions_disabled
                    on:click=on_download
                >
                    "Download URLs"
                </button>
                <button
                    id="batch-delete-btn"
                    class="btn btn-danger"
                    disabled=actions_disabled
                    on:click=on_batch_delete
                >
                    "Delete selected"
                </button>
            </div>

            {move || match load_state.get() {
                LoadState::Loading => view! {
                    <div class="text-center py-5">
                        <div class="spinner-border text-primary" role="status">
                            <span class="visually-hidden">"Loading..."</span>
                        </div>
                    </div>
                }.into_view(),
                LoadState::Failed(message) => view! {
                    <div class="alert alert-danger">
                        "Failed to load the gallery: " {message}
                    </div>
                }.into_view(),
                LoadState::Ready => view! {
                    <Show
                        when=move || !images.with(Vec::is_empty)
                        fallback=|| view! {
                            <div class="text-center text-muted py-5">
                                "No images yet. " <A href="/">"Upload some"</A>
                            </div>
                        }
                    >
                        <div class="row">
                            <For
                                each=move || images.get()
                                key=|img| img.id.clone()
                                children=move |image| view! {
                                    <GalleryCard
                                        image=image
                                        selection=selection
                                        fading=fading
                                        modal=modal
                                        on_delete=on_delete
                                    />
                                }
                            />
                        </div>
                    </Show>
                    <Pagination meta=meta/>
                }.into_view(),
            }}
        </div>

        <Show when=move || exporting.get() fallback=|| ()>
            <ExportModal/>
        </Show>
        <ImagePreviewModal modal=modal/>
    }
}

#[component]
fn GalleryCard(
    image: GalleryImage,
    selection: RwSignal<Selection>,
    fading: RwSignal<HashSet<ImageId>>,
    modal: ImageModal,
    on_delete: Callback<ImageId>,
) -> impl IntoView {
    let id = store_value(image.id.clone());
    let dom_id = card_dom_id(&image.id);
    let checkbox_id = format!("select-{}", image.id);
    let title = image.display_name().to_string();
    let thumb_failed = create_rw_signal(false);

    let is_checked = move || id.with_value(|id| selection.with(|s| s.is_checked(id)));
    let is_fading = move || id.with_value(|id| fading.with(|f| f.contains(id)));

    let on_check = move |ev: ev::Event| {
        let checked = event_target_checked(&ev);
        log::debug!("Selection changed: {} -> {}", id.get_value(), checked);
        selection.update(|s| s.set(id.get_value(), checked));
    };

    let thumbnail = api::asset_url(&image.thumbnail_url);
    let thumb_src = move || {
        if thumb_failed.get() {
            api::asset_url(THUMBNAIL_ERROR_IMAGE)
        } else {
            thumbnail.clone()
        }
    };

    let on_preview = {
        let title = title.clone();
        let full_url = image.url.clone();
        move |_| modal.open(title.clone(), full_url.clone())
    };

    let on_delete_click = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        on_delete.call(id.get_value());
    };

    view! {
        <div
            id=dom_id
            class=move || if is_fading() {
                "col-md-3 col-sm-4 col-6 mb-4 fade-out"
            } else {
                "col-md-3 col-sm-4 col-6 mb-4"
            }
        >
            <div class="card h-100" class:selected=is_checked>
                <img
                    class=move || if thumb_failed.get() {
                        "card-img-top preview-image thumbnail-error"
                    } else {
                        "card-img-top preview-image"
                    }
                    src=thumb_src
                    alt=title.clone()
                    loading="lazy"
                    on:click=on_preview
                    on:error=move |_| thumb_failed.set(true)
                />
                <div class="card-body">
                    <div class="form-check">
                        <input
                            type="checkbox"
                            class="form-check-input image-selector"
                            id=checkbox_id.clone()
                            data-id=image.id.to_string()
                            prop:checked=is_checked
                            on:change=on_check
                        />
                        <label class="form-check-label text-truncate d-block" for=checkbox_id title=title.clone()>
                            {title.clone()}
                        </label>
                    </div>
                    <small class="text-muted d-block">
                        {image.filesize.clone()} " · " {image.upload_date.clone()}
                    </small>
                    <button
                        type="button"
                        class="btn btn-sm btn-outline-danger delete-image mt-2"
                        on:click=on_delete_click
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn Pagination(meta: RwSignal<GalleryListing>) -> impl IntoView {
    let page = move || meta.with(|m| m.page);

    view! {
        <Show when=move || meta.with(|m| m.total_pages > 1) fallback=|| ()>
            <nav class="d-flex justify-content-between align-items-center mt-3">
                <Show when=move || meta.with(GalleryListing::has_previous) fallback=|| view! { <span></span> }>
                    <A href=move || format!("/gallery?page={}", page() - 1) class="btn btn-outline-secondary">
                        "Previous"
                    </A>
                </Show>
                <span class="text-muted">
                    {move || meta.with(|m| format!(
                        "Page {} of {} · {} images",
                        m.page, m.total_pages, m.total_images
                    ))}
                </span>
                <Show when=move || meta.with(GalleryListing::has_next) fallback=|| view! { <span></span> }>
                    <A href=move || format!("/gallery?page={}", page() + 1) class="btn btn-outline-secondary">
                        "Next"
                    </A>
                </Show>
            </nav>
        </Show>
    }
}

#[component]
fn ExportModal() -> impl IntoView {
    view! {
        <div class="modal-backdrop fade show"></div>
        <div class="modal d-block" tabindex="-1" id="downloadModal">
            <div class="modal-dialog modal-dialog-centered">
                <div class="modal-content">
                    <div class="modal-body text-center py-4">
                        <div class="spinner-border text-primary mb-3" role="status"></div>
                        <div>"Generating the URL spreadsheet..."</div>
                    </div>
                </div>
            </div>
        </div>
    }
}
