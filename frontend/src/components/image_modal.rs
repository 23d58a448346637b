//! Full-size image preview modal.
//!
//! Opening the modal shows a spinner while the full image is loaded in an
//! off-DOM probe; the real image (or the error placeholder) is swapped in
//! once the probe settles.

use leptos::*;

use crate::config::PREVIEW_ERROR_IMAGE;
use crate::services::{api, browser};

#[derive(Clone, Debug, PartialEq)]
enum PreviewState {
    Loading,
    Loaded(String),
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
struct ModalContent {
    title: String,
    state: PreviewState,
}

/// Handle to the preview modal.
///
/// Every `open` bumps a generation counter; a probe that settles after a
/// newer `open` (or a `close`) is discarded.
#[derive(Clone, Copy)]
pub struct ImageModal {
    content: RwSignal<Option<ModalContent>>,
    generation: StoredValue<u64>,
}

impl ImageModal {
    pub fn new() -> Self {
        Self {
            content: create_rw_signal(None),
            generation: store_value(0),
        }
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get_value() + 1;
        self.generation.set_value(next);
        next
    }

    pub fn open(&self, title: String, full_url: String) {
        let generation = self.bump();
        self.content.set(Some(ModalContent {
            title,
            state: PreviewState::Loading,
        }));

        let modal = *self;
        spawn_local(async move {
            let outcome = browser::probe_image(&full_url).await;
            if modal.generation.try_get_value() != Some(generation) {
                return;
            }
            let state = match outcome {
                Ok(()) => PreviewState::Loaded(full_url),
                Err(e) => {
                    log::error!("Failed to load full image {}: {}", full_url, e);
                    PreviewState::Failed
                }
            };
            modal.content.try_update(|content| {
                if let Some(content) = content {
                    content.state = state;
                }
            });
        });
    }

    pub fn close(&self) {
        self.bump();
        self.content.set(None);
    }

    pub fn is_open(&self) -> bool {
        self.content.with(Option::is_some)
    }

    fn is_loading(&self) -> bool {
        self.content
            .with(|c| matches!(c, Some(ModalContent { state: PreviewState::Loading, .. })))
    }

    fn title(&self) -> String {
        self.content
            .with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default())
    }

    fn image_src(&self) -> String {
        self.content.with(|c| match c.as_ref().map(|c| &c.state) {
            Some(PreviewState::Loaded(url)) => url.clone(),
            Some(PreviewState::Failed) => api::asset_url(PREVIEW_ERROR_IMAGE),
            _ => String::new(),
        })
    }
}

impl Default for ImageModal {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ImagePreviewModal(modal: ImageModal) -> impl IntoView {
    view! {
        <Show when=move || modal.is_open() fallback=|| ()>
            <div class="modal-backdrop fade show"></div>
            <div class="modal d-block" tabindex="-1" on:click=move |_| modal.close()>
                <div
                    class="modal-dialog modal-lg modal-dialog-centered"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{move || modal.title()}</h5>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| modal.close()
                            ></button>
                        </div>
                        <div class="modal-body text-center">
                            <div
                                class=move || if modal.is_loading() {
                                    "spinner-border text-primary"
                                } else {
                                    "spinner-border text-primary d-none"
                                }
                                role="status"
                            >
                                <span class="visually-hidden">"Loading..."</span>
                            </div>
                            <img
                                id="modalImage"
                                class=move || if modal.is_loading() { "img-fluid d-none" } else { "img-fluid" }
                                src=move || modal.image_src()
                                alt=move || modal.title()
                            />
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
