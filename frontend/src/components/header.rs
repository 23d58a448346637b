//! Navigation bar

use leptos::*;
use leptos_router::A;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="navbar navbar-expand navbar-dark bg-dark">
            <div class="container">
                <A href="/" class="navbar-brand">"Image Host"</A>
                <nav class="navbar-nav">
                    <A href="/" class="nav-link" exact=true active_class="active">"Upload"</A>
                    <A href="/gallery" class="nav-link" active_class="active">"Gallery"</A>
                </nav>
            </div>
        </header>
    }
}
