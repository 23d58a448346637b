//! Busy overlay shown while a delete request is in flight.

use leptos::*;

/// Count of requests currently holding the overlay.
///
/// Provided once by the app shell. Overlapping requests each hold it, so
/// the overlay only disappears when the last one finishes.
#[derive(Clone, Copy, Debug)]
pub struct Busy(RwSignal<usize>);

impl Busy {
    pub fn new() -> Self {
        Self(create_rw_signal(0))
    }

    pub fn start(&self) {
        self.0.update(|n| *n += 1);
    }

    pub fn finish(&self) {
        self.0.update(|n| *n = n.saturating_sub(1));
    }

    pub fn active(&self) -> bool {
        self.0.get() > 0
    }
}

impl Default for Busy {
    fn default() -> Self {
        Self::new()
    }
}

/// The app-wide [`Busy`] handle.
pub fn use_busy() -> Busy {
    expect_context::<Busy>()
}

#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let busy = use_busy();

    view! {
        <Show when=move || busy.active() fallback=|| ()>
            <div class="loading-overlay">
                <div class="loading-content">
                    <div class="spinner-border text-primary mb-2" role="status">
                        <span class="visually-hidden">"Loading..."</span>
                    </div>
                    <div>"Working..."</div>
                </div>
            </div>
        </Show>
    }
}
