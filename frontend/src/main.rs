//! Entry point for the WASM application

use gallery_frontend::{logging, App};
use leptos::*;

pub fn main() {
    logging::init();
    mount_to_body(|| view! { <App/> })
}
