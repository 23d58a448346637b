//! Upload results table.
//!
//! One row per uploaded file with its URL, a copy control and a delete
//! control. The panel hides itself once the last row is deleted.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_router::A;

use crate::actions;
use crate::components::use_busy;
use crate::config::{FADE_OUT_MS, FEEDBACK_RESET_MS};
use crate::services::browser;
use crate::types::UploadedFile;
use crate::upload_result::join_urls;

/// A rendered result row.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub key: usize,
    pub file: UploadedFile,
    pub fading: bool,
}

impl ResultRow {
    /// Rows keyed `first_key..`. Keys must not repeat across uploads.
    pub fn from_files(first_key: usize, files: Vec<UploadedFile>) -> Vec<Self> {
        files
            .into_iter()
            .enumerate()
            .map(|(i, file)| Self { key: first_key + i, file, fading: false })
            .collect()
    }
}

/// "Copied" feedback that reverts after [`FEEDBACK_RESET_MS`].
///
/// Each copy starts a new round; a reset left over from an earlier round
/// does not cut a newer one short.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    round: u64,
    copied: bool,
}

impl CopyFeedback {
    /// Show the feedback and return the round its reset belongs to.
    pub fn mark(&mut self) -> u64 {
        self.round += 1;
        self.copied = true;
        self.round
    }

    pub fn reset(&mut self, round: u64) {
        if self.round == round {
            self.copied = false;
        }
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn copy_all_label(&self) -> &'static str {
        if self.copied {
            "Copied!"
        } else {
            "Copy all URLs"
        }
    }

    pub fn icon_class(&self) -> &'static str {
        if self.copied {
            "bi bi-clipboard-check copy-url"
        } else {
            "bi bi-clipboard copy-url"
        }
    }
}

/// Copy `text`, then show and later revert the feedback in `state`.
async fn copy_with_feedback(text: &str, state: RwSignal<CopyFeedback>, what: &str) {
    match browser::copy_to_clipboard(text).await {
        Ok(()) => {
            let Some(round) = state.try_update(CopyFeedback::mark) else {
                return;
            };
            TimeoutFuture::new(FEEDBACK_RESET_MS).await;
            state.try_update(|f| f.reset(round));
        }
        Err(e) => log::error!("Copying {} failed: {}", what, e),
    }
}

#[component]
pub fn UploadResults(
    rows: RwSignal<Vec<ResultRow>>,
    gallery_link: RwSignal<Option<String>>,
) -> impl IntoView {
    let copied_all = create_rw_signal(CopyFeedback::default());

    let on_copy_all = move |_| {
        let urls = rows.with_untracked(|rows| join_urls(rows.iter().map(|r| r.file.url.as_str())));
        if urls.is_empty() {
            return;
        }
        spawn_local(async move { copy_with_feedback(&urls, copied_all, "all URLs").await });
    };

    view! {
        <Show when=move || !rows.with(Vec::is_empty) fallback=|| ()>
            <div id="upload-results" class="card mt-4">
                <div class="card-header d-flex align-items-center gap-2">
                    <span class="me-auto">"Uploaded images"</span>
                    <Show when=move || gallery_link.with(Option::is_some) fallback=|| ()>
                        <A
                            href=move || gallery_link.get().unwrap_or_default()
                            class="btn btn-sm btn-outline-primary"
                        >
                            "View in gallery"
                        </A>
                    </Show>
                    <button
                        type="button"
                        id="copy-all-urls"
                        class="btn btn-sm btn-outline-secondary"
                        on:click=on_copy_all
                    >
                        {move || copied_all.get().copy_all_label()}
                    </button>
                </div>
                <table class="table mb-0">
                    <thead>
                        <tr>
                            <th>"File"</th>
                            <th>"URL"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody id="result-list">
                        <For
                            each=move || rows.get()
                            key=|row| row.key
                            children=move |row| view! { <ResultRowView rows=rows row=row/> }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

#[component]
fn ResultRowView(rows: RwSignal<Vec<ResultRow>>, row: ResultRow) -> impl IntoView {
    let busy = use_busy();
    let key = row.key;
    let copied = create_rw_signal(CopyFeedback::default());
    let is_fading = move || rows.with(|rows| rows.iter().any(|r| r.key == key && r.fading));

    let url = row.file.url.clone();
    let on_copy = {
        let url = url.clone();
        move |_| {
            let url = url.clone();
            spawn_local(async move { copy_with_feedback(&url, copied, "URL").await });
        }
    };

    let id = row.file.id.clone();
    let has_id = id.is_some();
    let on_delete = move |_| {
        let Some(id) = id.clone() else {
            return;
        };
        actions::delete_one(id, busy, move || {
            rows.try_update(|rows| {
                if let Some(r) = rows.iter_mut().find(|r| r.key == key) {
                    r.fading = true;
                }
            });
            spawn_local(async move {
                TimeoutFuture::new(FADE_OUT_MS).await;
                rows.try_update(|rows| rows.retain(|r| r.key != key));
            });
        });
    };

    view! {
        <tr class=move || if is_fading() { "fade-out" } else { "" }>
            <td>{row.file.filename.clone()}</td>
            <td>
                <div class="d-flex align-items-center">
                    <a
                        href=url.clone()
                        target="_blank"
                        class="me-2 text-truncate"
                        style="max-width: 250px;"
                    >
                        {url.clone()}
                    </a>
                    <i
                        class=move || copied.get().icon_class()
                        data-url=url.clone()
                        title="Copy link"
                        on:click=on_copy
                    ></i>
                </div>
            </td>
            <td>
                <button
                    type="button"
                    class="btn btn-sm btn-outline-danger delete-image"
                    disabled=!has_id
                    on:click=on_delete
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageId;

    fn file(name: &str, id: Option<&str>) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            url: format!("https://x/{name}"),
            id: id.map(ImageId::new),
        }
    }

    #[test]
    fn test_rows_get_stable_keys() {
        let rows = ResultRow::from_files(0, vec![file("a.png", Some("1")), file("b.png", None)]);
        assert_eq!(rows.iter().map(|r| r.key).collect::<Vec<_>>(), vec![0, 1]);
        assert!(rows.iter().all(|r| !r.fading));
    }

    #[test]
    fn test_successive_uploads_get_disjoint_keys() {
        let first = ResultRow::from_files(0, vec![file("old.png", Some("1"))]);
        let second = ResultRow::from_files(first.len(), vec![file("new.png", Some("2"))]);

        assert_ne!(first[0].key, second[0].key);
        assert_eq!(second[0].file.id, Some(ImageId::new("2")));
    }

    #[test]
    fn test_copy_feedback_reverts_after_its_own_round() {
        let mut feedback = CopyFeedback::default();
        assert_eq!(feedback.copy_all_label(), "Copy all URLs");

        let round = feedback.mark();
        assert_eq!(feedback.copy_all_label(), "Copied!");
        assert_eq!(feedback.icon_class(), "bi bi-clipboard-check copy-url");

        feedback.reset(round);
        assert!(!feedback.copied());
        assert_eq!(feedback.copy_all_label(), "Copy all URLs");
    }

    #[test]
    fn test_stale_reset_keeps_newer_feedback() {
        let mut feedback = CopyFeedback::default();
        let first = feedback.mark();
        let second = feedback.mark();

        feedback.reset(first);
        assert_eq!(feedback.copy_all_label(), "Copied!");
        feedback.reset(second);
        assert_eq!(feedback.icon_class(), "bi bi-clipboard copy-url");
    }
}
