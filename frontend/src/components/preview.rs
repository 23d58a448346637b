//! Preview strip for staged files.

use leptos::*;
use web_sys::File;

use crate::session::UploadSession;

#[component]
pub fn PreviewStrip(session: RwSignal<UploadSession<File>>) -> impl IntoView {
    let entries = move || {
        session.with(|s| {
            s.staged()
                .iter()
                .map(|entry| (entry.serial, entry.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <Show when=move || !session.with(UploadSession::is_empty) fallback=|| ()>
            <div id="preview-container" class="row g-2 mt-3">
                <For
                    each=entries
                    key=|(serial, _)| *serial
                    children=move |(serial, name)| view! {
                        <PreviewThumb session=session serial=serial name=name/>
                    }
                />
            </div>
        </Show>
    }
}

#[component]
fn PreviewThumb(session: RwSignal<UploadSession<File>>, serial: u64, name: String) -> impl IntoView {
    let preview = move || session.with(|s| s.preview_of(serial));
    let alt = name.clone();

    let on_remove = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        session.update(|s| {
            if let Some(index) = s.position_of(serial) {
                s.remove_at(index);
            }
        });
    };

    view! {
        <div class="col-md-3 col-sm-4 col-6">
            <div class="image-preview">
                {move || match preview() {
                    Some(src) => view! { <img src=src alt=alt.clone()/> }.into_view(),
                    None => view! {
                        <div class="spinner-border spinner-border-sm text-secondary" role="status"></div>
                    }.into_view(),
                }}
                <div class="remove-image" title="Remove" on:click=on_remove>
                    <i class="bi bi-x"></i>
                </div>
                <div class="image-name" title=name.clone()>{name.clone()}</div>
            </div>
        </div>
    }
}
