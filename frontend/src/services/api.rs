//! HTTP client for the image backend.
//!
//! Every call follows the same order: status check, JSON parse, then the
//! reply's own `error` field. Nothing is retried.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::config::{BACKEND_URL, UPLOAD_FIELD};
use crate::types::{
    check_reply, ApiReply, AppError, AppResult, BatchDeleteResponse, DeleteResponse,
    DownloadUrlsResponse, ErrorReply, GalleryListing, IdsRequest, ImageId, UploadResponse,
};

fn endpoint(path: &str) -> String {
    format!("{}{}", BACKEND_URL, path)
}

/// Resolve a backend-relative asset path (`/static/...`) to a full URL.
pub fn asset_url(path: &str) -> String {
    if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        path.to_string()
    } else {
        endpoint(path)
    }
}

/// Headers the backend expects on its AJAX endpoints.
fn ajax(builder: RequestBuilder) -> RequestBuilder {
    builder
        .header("Accept", "application/json")
        .header("X-Requested-With", "XMLHttpRequest")
}

/// Status check, JSON parse, `error` field check.
async fn read_reply<T>(response: Response) -> AppResult<T>
where
    T: DeserializeOwned + ApiReply,
{
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::error!("Server responded with {}: {}", status, body);
        let message = serde_json::from_str::<ErrorReply>(&body)
            .ok()
            .and_then(|reply| reply.error);
        return Err(match message {
            Some(msg) => AppError::Application(msg),
            None => AppError::Transport(format!("Server responded with status {}", status)),
        });
    }

    let reply = response.json::<T>().await.map_err(|e| {
        log::error!("Failed to parse response: {}", e);
        AppError::Parse(e.to_string())
    })?;
    check_reply(reply)
}

/// `POST /upload` with every file under the repeated `files[]` field.
pub async fn upload_images<'a, I>(files: I) -> AppResult<UploadResponse>
where
    I: IntoIterator<Item = &'a File>,
{
    let form_data = FormData::new()
        .map_err(|e| AppError::Browser(format!("Failed to create FormData: {:?}", e)))?;

    for file in files {
        form_data
            .append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(|e| AppError::Browser(format!("Failed to append file: {:?}", e)))?;
    }

    let response = Request::post(&endpoint("/upload"))
        .body(form_data)?
        .send()
        .await?;
    log::debug!("Upload response status: {}", response.status());

    read_reply(response).await
}

/// `DELETE /delete_image/:id`.
pub async fn delete_image(id: &ImageId) -> AppResult<DeleteResponse> {
    let url = endpoint(&format!("/delete_image/{}", id));
    let response = ajax(Request::delete(&url)).send().await?;
    read_reply(response).await
}

/// `POST /batch_delete` with `{ids}`.
pub async fn batch_delete(ids: &[ImageId]) -> AppResult<BatchDeleteResponse> {
    let response = ajax(Request::post(&endpoint("/batch_delete")))
        .json(&IdsRequest { ids })?
        .send()
        .await?;
    read_reply(response).await
}

/// `POST /download_urls` with `{ids}`; returns the spreadsheet location.
pub async fn download_urls(ids: &[ImageId]) -> AppResult<DownloadUrlsResponse> {
    let response = ajax(Request::post(&endpoint("/download_urls")))
        .json(&IdsRequest { ids })?
        .send()
        .await?;
    read_reply(response).await
}

/// `GET /gallery?format=json[&page=N]`.
pub async fn fetch_gallery(page: Option<u32>) -> AppResult<GalleryListing> {
    let page = page.map(|p| p.to_string());
    let mut params = vec![("format", "json")];
    if let Some(page) = page.as_deref() {
        params.push(("page", page));
    }

    let response = ajax(Request::get(&endpoint("/gallery")))
        .query(params)
        .send()
        .await?;
    read_reply(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url_resolution() {
        assert_eq!(
            asset_url("/static/uploads/thumbnails/a.png"),
            format!("{}/static/uploads/thumbnails/a.png", BACKEND_URL)
        );
        assert_eq!(asset_url("https://cdn/a.png"), "https://cdn/a.png");
        assert_eq!(asset_url(""), "");
    }

    #[test]
    fn test_endpoint_is_backend_relative() {
        assert!(endpoint("/upload").starts_with(BACKEND_URL));
        assert!(endpoint("/upload").ends_with("/upload"));
    }
}
