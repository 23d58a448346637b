//! Processing of upload results.
//!
//! The backend normally returns an id per uploaded file. When it does not,
//! an id is derived from the filename by stripping the extension. This is a
//! heuristic: two files sharing a stem (`cat.png`, `cat.jpg`) map to the
//! same id.

use crate::config::RECENT_IMAGES_LIMIT;
use crate::types::{GalleryImage, ImageId, UploadResponse, UploadedFile};

/// Strip the last extension: `"cat.png"` → `"cat"`, `"a.b.c"` → `"a.b"`.
///
/// The extension must be non-empty and may not contain `/`, so
/// `"file."` and `"dir.x/file"` are returned unchanged.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() && !filename[dot + 1..].contains('/') => {
            &filename[..dot]
        }
        _ => filename,
    }
}

/// Uploaded files with every id resolved where possible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadOutcome {
    pub files: Vec<UploadedFile>,
}

impl UploadOutcome {
    /// Fill in missing ids from the filename.
    pub fn from_response(response: UploadResponse) -> Self {
        let files = response
            .files
            .into_iter()
            .enumerate()
            .map(|(i, mut file)| {
                let missing = file.id.as_ref().map_or(true, ImageId::is_empty);
                if missing {
                    log::warn!("File {} came back without an id", i);
                    if !file.filename.is_empty() {
                        let derived = ImageId::new(strip_extension(&file.filename));
                        log::debug!("Derived id {:?} for file {}", derived.as_str(), i);
                        file.id = Some(derived);
                    }
                }
                file
            })
            .collect();
        Self { files }
    }

    /// Non-empty ids, in response order.
    pub fn gallery_ids(&self) -> Vec<ImageId> {
        self.files
            .iter()
            .filter_map(|f| f.id.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// `/gallery?selected_ids=<csv>&t=<timestamp>`, or `None` without ids.
    pub fn gallery_link(&self, timestamp_ms: i64) -> Option<String> {
        let ids = self.gallery_ids();
        if ids.is_empty() {
            return None;
        }
        let csv = ids
            .iter()
            .map(ImageId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("/gallery?selected_ids={}&t={}", csv, timestamp_ms))
    }
}

/// Every URL, one per line, for "copy all".
pub fn join_urls<'a, I>(urls: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    urls.into_iter().collect::<Vec<_>>().join("\n")
}

/// Rewrite a plain `http:` URL (any case) to `https:`.
pub fn force_https(url: &str) -> String {
    match url.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http:") => format!("https:{}", &url[5..]),
        _ => url.to_string(),
    }
}

/// Question asked after a failed upload when the gallery is not empty.
///
/// The upload may have gone through on the server even though the client
/// saw an error, so the newest gallery entries are named.
pub fn recovery_prompt(recent: &[GalleryImage]) -> String {
    let names: Vec<&str> = recent
        .iter()
        .take(RECENT_IMAGES_LIMIT)
        .map(GalleryImage::display_name)
        .collect();
    format!(
        "The upload hit a network error, but the images may have been saved anyway.\n\n\
         Most recent images in the gallery:\n{}\n\nOpen the gallery to check?",
        names.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> UploadResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("cat.png"), "cat");
        assert_eq!(strip_extension("a.b.c"), "a.b");
        assert_eq!(strip_extension("file."), "file.");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension("dir.x/file"), "dir.x/file");
        assert_eq!(strip_extension(".png"), "");
    }

    #[test]
    fn test_missing_id_is_derived_from_filename() {
        let outcome = UploadOutcome::from_response(response(
            r#"{"files":[{"filename":"cat.png","url":"https://x/cat.png"}]}"#,
        ));

        assert_eq!(outcome.files[0].id, Some(ImageId::new("cat")));
        assert_eq!(outcome.gallery_ids(), vec![ImageId::new("cat")]);
        assert_eq!(
            outcome.gallery_link(1_700_000_000_000).as_deref(),
            Some("/gallery?selected_ids=cat&t=1700000000000")
        );
    }

    #[test]
    fn test_returned_ids_are_kept() {
        let outcome = UploadOutcome::from_response(response(
            r#"{"files":[
                {"id": 4, "filename":"a.png","url":"u1"},
                {"id": "", "filename":"b.jpg","url":"u2"}
            ]}"#,
        ));

        assert_eq!(outcome.gallery_ids(), vec![ImageId::new("4"), ImageId::new("b")]);
        assert_eq!(
            outcome.gallery_link(5).as_deref(),
            Some("/gallery?selected_ids=4,b&t=5")
        );
    }

    #[test]
    fn test_no_link_without_any_id() {
        let outcome = UploadOutcome::from_response(response(
            r#"{"files":[{"url":"https://x/anon"}, {"filename":".png","url":"u"}]}"#,
        ));

        assert!(outcome.gallery_ids().is_empty());
        assert!(outcome.gallery_link(1).is_none());
        assert_eq!(outcome.files.len(), 2);
    }

    #[test]
    fn test_join_urls_uses_newlines() {
        let joined = join_urls(["https://x/a.png", "https://x/b.png"]);
        assert_eq!(joined, "https://x/a.png\nhttps://x/b.png");
        assert_eq!(join_urls(std::iter::empty()), "");
    }

    #[test]
    fn test_recovery_prompt_names_recent_images() {
        let recent: Vec<GalleryImage> = (1..=7)
            .map(|i| GalleryImage {
                id: ImageId::new(i.to_string()),
                filename: format!("stored_{i}.png"),
                original_filename: format!("img{i}.png"),
                url: String::new(),
                thumbnail_url: String::new(),
                filesize: String::new(),
                filetype: String::new(),
                upload_date: String::new(),
            })
            .collect();

        let prompt = recovery_prompt(&recent);
        assert!(prompt.contains("img1.png"));
        assert!(prompt.contains("img5.png"));
        assert!(!prompt.contains("img6.png"));
        assert!(prompt.ends_with("Open the gallery to check?"));
    }

    #[test]
    fn test_force_https() {
        assert_eq!(force_https("http://x/f.xlsx"), "https://x/f.xlsx");
        assert_eq!(force_https("https://x/f.xlsx"), "https://x/f.xlsx");
        assert_eq!(force_https("/static/f.xlsx"), "/static/f.xlsx");
        assert_eq!(force_https("HTTP://x/f.xlsx"), "https://x/f.xlsx");
        assert_eq!(force_https("Http://x/f.xlsx"), "https://x/f.xlsx");
        assert_eq!(force_https("http"), "http");
    }
}
