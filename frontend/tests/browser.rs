#![cfg(target_arch = "wasm32")]

use gallery_frontend::config::SELECTED_IDS_STORAGE_KEY;
use gallery_frontend::services::browser;
use gallery_frontend::session::{is_acceptable, UploadSession};
use gallery_frontend::ImageId;
use gloo_storage::{SessionStorage, Storage};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::File;

wasm_bindgen_test_configure!(run_in_browser);

fn text_file(name: &str, body: &str) -> File {
    let parts = js_sys::Array::of1(&JsValue::from_str(body));
    File::new_with_str_sequence(&parts, name).expect("file")
}

#[wasm_bindgen_test]
fn stored_selection_is_consumed_once() {
    browser::store_selection(&[ImageId::new("5"), ImageId::new("6")]);

    let first = browser::take_stored_selection();
    assert_eq!(first, Some(vec![ImageId::new("5"), ImageId::new("6")]));
    assert_eq!(browser::take_stored_selection(), None);
}

#[wasm_bindgen_test]
fn malformed_stored_selection_is_dropped() {
    SessionStorage::raw()
        .set_item(SELECTED_IDS_STORAGE_KEY, "not json")
        .expect("set item");

    assert_eq!(browser::take_stored_selection(), None);
    assert!(SessionStorage::raw()
        .get_item(SELECTED_IDS_STORAGE_KEY)
        .expect("get item")
        .is_none());
}

#[wasm_bindgen_test]
fn untyped_file_is_not_staged() {
    let file = text_file("notes.txt", "hi");
    assert!(!is_acceptable(&file));

    let mut session = UploadSession::<File>::new();
    assert!(session.ingest(vec![file]).is_err());
    assert!(session.is_empty());
}

#[wasm_bindgen_test(async)]
async fn local_file_reads_as_data_url() {
    let file = text_file("notes.txt", "hi");
    let url = browser::read_as_data_url(&file).await.expect("data url");
    assert!(url.starts_with("data:"));
}
