//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="text-center text-muted py-4">
            <div>"Image Host • Powered by " <span class="rust-badge">"Rust + Leptos"</span></div>
        </footer>
    }
}
