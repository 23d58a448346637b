//! Staged files for the upload workflow.
//!
//! [`UploadSession`] is owned by the upload component and is the only
//! place staged files live. Every mutation leaves the collection fully
//! rebuilt before the preview strip reads it again.

use crate::config::{ACCEPTED_MIME_PREFIX, MAX_FILE_SIZE};
use crate::types::{AppError, AppResult};

/// What the session needs to know about a candidate file.
pub trait FileMeta {
    fn file_name(&self) -> String;
    fn content_type(&self) -> String;
    fn byte_size(&self) -> u64;
}

impl FileMeta for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn content_type(&self) -> String {
        self.type_()
    }

    fn byte_size(&self) -> u64 {
        self.size() as u64
    }
}

/// Images only, at most [`MAX_FILE_SIZE`].
pub fn is_acceptable<F: FileMeta>(file: &F) -> bool {
    file.content_type().starts_with(ACCEPTED_MIME_PREFIX) && file.byte_size() <= MAX_FILE_SIZE
}

/// A file waiting to be uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedFile<F> {
    /// Unique within the session; stable across removals.
    pub serial: u64,
    pub name: String,
    pub file: F,
    /// Data URL, filled in once the local read completes.
    pub preview: Option<String>,
}

/// Ordered list of staged files. Duplicates are kept.
#[derive(Clone, Debug)]
pub struct UploadSession<F> {
    staged: Vec<StagedFile<F>>,
    next_serial: u64,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self {
            staged: Vec::new(),
            next_serial: 0,
        }
    }
}

impl<F: FileMeta + Clone> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every acceptable candidate.
    ///
    /// Returns the newly staged entries, which still need a preview.
    /// Fails with one aggregate validation error when nothing is acceptable.
    pub fn ingest<I>(&mut self, candidates: I) -> AppResult<Vec<StagedFile<F>>>
    where
        I: IntoIterator<Item = F>,
    {
        let accepted: Vec<F> = candidates.into_iter().filter(is_acceptable).collect();
        if accepted.is_empty() {
            return Err(AppError::Validation(
                "Please choose valid image files (JPG, PNG, GIF, ...) of at most 16MB".to_string(),
            ));
        }

        let mut added = Vec::with_capacity(accepted.len());
        for file in accepted {
            let entry = StagedFile {
                serial: self.next_serial,
                name: file.file_name(),
                file,
                preview: None,
            };
            self.next_serial += 1;
            added.push(entry.clone());
            self.staged.push(entry);
        }
        Ok(added)
    }

    /// Remove the entry at `index`, rebuilding the list without it.
    pub fn remove_at(&mut self, index: usize) -> Option<StagedFile<F>> {
        if index >= self.staged.len() {
            return None;
        }
        let mut removed = None;
        self.staged = std::mem::take(&mut self.staged)
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                if i == index {
                    removed = Some(entry);
                    None
                } else {
                    Some(entry)
                }
            })
            .collect();
        removed
    }

    /// Attach a preview. Ignored (returns `false`) if the entry is gone.
    pub fn set_preview(&mut self, serial: u64, data_url: String) -> bool {
        match self.staged.iter_mut().find(|e| e.serial == serial) {
            Some(entry) => {
                entry.preview = Some(data_url);
                true
            }
            None => false,
        }
    }

    pub fn position_of(&self, serial: u64) -> Option<usize> {
        self.staged.iter().position(|e| e.serial == serial)
    }

    pub fn preview_of(&self, serial: u64) -> Option<String> {
        self.staged
            .iter()
            .find(|e| e.serial == serial)
            .and_then(|e| e.preview.clone())
    }

    pub fn staged(&self) -> &[StagedFile<F>] {
        &self.staged
    }

    pub fn files(&self) -> impl Iterator<Item = &F> {
        self.staged.iter().map(|e| &e.file)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Drop the entries with the given serials, keeping anything staged
    /// after they were taken.
    pub fn remove_serials(&mut self, serials: &[u64]) {
        self.staged = std::mem::take(&mut self.staged)
            .into_iter()
            .filter(|e| !serials.contains(&e.serial))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct FakeFile {
        name: &'static str,
        mime: &'static str,
        size: u64,
    }

    impl FileMeta for FakeFile {
        fn file_name(&self) -> String {
            self.name.to_string()
        }
        fn content_type(&self) -> String {
            self.mime.to_string()
        }
        fn byte_size(&self) -> u64 {
            self.size
        }
    }

    const MB: u64 = 1024 * 1024;

    fn png(name: &'static str, size: u64) -> FakeFile {
        FakeFile { name, mime: "image/png", size }
    }

    #[test]
    fn test_oversized_image_and_non_image_are_rejected() {
        let mut session = UploadSession::new();
        let err = session
            .ingest(vec![
                png("big.png", 20 * MB),
                FakeFile { name: "notes.pdf", mime: "application/pdf", size: 2 * MB },
            ])
            .unwrap_err();

        assert!(err.is_validation());
        assert!(session.is_empty());
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(is_acceptable(&png("edge.png", 16 * MB)));
        assert!(!is_acceptable(&png("over.png", 16 * MB + 1)));
    }

    #[test]
    fn test_mixed_batch_keeps_only_acceptable_files() {
        let mut session = UploadSession::new();
        let added = session
            .ingest(vec![
                png("a.png", MB),
                FakeFile { name: "b.txt", mime: "text/plain", size: 10 },
                png("c.png", MB),
            ])
            .unwrap();

        assert_eq!(added.len(), 2);
        let names: Vec<_> = session.staged().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut session = UploadSession::new();
        session.ingest(vec![png("a.png", MB)]).unwrap();
        session.ingest(vec![png("a.png", MB)]).unwrap();
        assert_eq!(session.len(), 2);
        assert_ne!(session.staged()[0].serial, session.staged()[1].serial);
    }

    #[test]
    fn test_remove_by_position() {
        let mut session = UploadSession::new();
        session
            .ingest(vec![png("a.png", MB), png("b.png", MB), png("c.png", MB)])
            .unwrap();

        let removed = session.remove_at(1).unwrap();
        assert_eq!(removed.name, "b.png");
        let names: Vec<_> = session.files().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);

        assert!(session.remove_at(5).is_none());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_late_preview_for_removed_file_is_ignored() {
        let mut session = UploadSession::new();
        let added = session.ingest(vec![png("a.png", MB), png("b.png", MB)]).unwrap();
        let (first, second) = (added[0].serial, added[1].serial);

        session.remove_at(0);
        assert!(!session.set_preview(first, "data:image/png;base64,AA".to_string()));
        assert!(session.set_preview(second, "data:image/png;base64,BB".to_string()));
        assert_eq!(session.preview_of(second).as_deref(), Some("data:image/png;base64,BB"));
        assert_eq!(session.position_of(second), Some(0));
    }

    #[test]
    fn test_files_staged_during_upload_survive_completion() {
        let mut session = UploadSession::new();
        let submitted: Vec<u64> = session
            .ingest(vec![png("a.png", MB), png("b.png", MB)])
            .unwrap()
            .iter()
            .map(|e| e.serial)
            .collect();
        session.ingest(vec![png("late.png", MB)]).unwrap();

        session.remove_serials(&submitted);
        let names: Vec<_> = session.files().map(|f| f.name).collect();
        assert_eq!(names, vec!["late.png"]);
    }
}
