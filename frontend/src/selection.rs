//! Gallery selection state.
//!
//! The set of checked images, the index used to restore a selection from
//! the URL or session storage, and the select-all toggle.

use std::collections::{HashMap, HashSet};

use crate::types::{GalleryImage, ImageId};

/// Where the ids to pre-select came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    Query,
    SessionStorage,
}

/// Ids requested for pre-selection on page load.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialSelection {
    pub ids: Vec<ImageId>,
    pub source: SelectionSource,
}

/// Split a `selected_ids` query value. Blank entries are dropped.
pub fn parse_query_ids(param: &str) -> Vec<ImageId> {
    param
        .split(',')
        .map(ImageId::new)
        .filter(|id| !id.is_empty())
        .collect()
}

/// Pick the ids to pre-select: a non-blank query parameter wins, otherwise
/// the ids stored in session storage.
pub fn initial_selection(
    query_param: Option<&str>,
    stored: Option<Vec<ImageId>>,
) -> Option<InitialSelection> {
    if let Some(param) = query_param.filter(|p| !p.trim().is_empty()) {
        return Some(InitialSelection {
            ids: parse_query_ids(param),
            source: SelectionSource::Query,
        });
    }
    stored.map(|ids| InitialSelection {
        ids: ids.into_iter().filter(|id| !id.is_empty()).collect(),
        source: SelectionSource::SessionStorage,
    })
}

/// Lookup from image id to its position in the grid.
#[derive(Clone, Debug, Default)]
pub struct SelectionIndex {
    positions: HashMap<ImageId, usize>,
}

impl SelectionIndex {
    pub fn build(images: &[GalleryImage]) -> Self {
        let positions = images
            .iter()
            .enumerate()
            .map(|(i, img)| (img.id.clone(), i))
            .collect();
        Self { positions }
    }

    pub fn position(&self, id: &ImageId) -> Option<usize> {
        self.positions.get(id).copied()
    }
}

/// Outcome of restoring a selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RestoreReport {
    pub matched: Vec<ImageId>,
    pub unmatched: Vec<ImageId>,
    /// Grid position of the first matched image.
    pub first_position: Option<usize>,
}

/// Ids of checked images.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    checked: HashSet<ImageId>,
}

impl Selection {
    pub fn is_checked(&self, id: &ImageId) -> bool {
        self.checked.contains(id)
    }

    pub fn set(&mut self, id: ImageId, checked: bool) {
        if checked {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
    }

    pub fn remove(&mut self, id: &ImageId) {
        self.checked.remove(id);
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Download and batch-delete stay disabled while nothing is checked.
    pub fn actions_disabled(&self) -> bool {
        self.is_empty()
    }

    /// Check or uncheck every image in `images`.
    pub fn set_all(&mut self, images: &[GalleryImage], checked: bool) {
        if checked {
            self.checked.extend(images.iter().map(|img| img.id.clone()));
        } else {
            self.checked.clear();
        }
    }

    /// Checked ids in grid order.
    pub fn ordered_ids(&self, images: &[GalleryImage]) -> Vec<ImageId> {
        images
            .iter()
            .filter(|img| self.checked.contains(&img.id))
            .map(|img| img.id.clone())
            .collect()
    }

    /// Check every id present in `index`; report the rest.
    pub fn restore(&mut self, index: &SelectionIndex, ids: &[ImageId]) -> RestoreReport {
        let mut report = RestoreReport::default();
        for id in ids {
            match index.position(id) {
                Some(pos) => {
                    self.checked.insert(id.clone());
                    report.matched.push(id.clone());
                    report.first_position = Some(match report.first_position {
                        Some(first) => first.min(pos),
                        None => pos,
                    });
                }
                None => report.unmatched.push(id.clone()),
            }
        }
        report
    }
}

/// Drop a deleted image from the grid and from the selection.
///
/// Only the card with `id` goes; returns `false` if it was already gone.
pub fn remove_deleted(
    images: &mut Vec<GalleryImage>,
    selection: &mut Selection,
    id: &ImageId,
) -> bool {
    let before = images.len();
    images.retain(|img| &img.id != id);
    selection.remove(id);
    images.len() != before
}

/// State of the select-all button.
///
/// The button flips between the two states on every press. Its label
/// tracks what the next press will do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectAllToggle {
    all_selected: bool,
}

impl SelectAllToggle {
    /// Flip and return the checked state to apply to every image.
    pub fn press(&mut self) -> bool {
        self.all_selected = !self.all_selected;
        self.all_selected
    }

    pub fn label(&self) -> &'static str {
        if self.all_selected {
            "Deselect all"
        } else {
            "Select all"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str) -> GalleryImage {
        GalleryImage {
            id: ImageId::new(id),
            filename: format!("{id}.png"),
            original_filename: String::new(),
            url: format!("https://x/{id}.png"),
            thumbnail_url: String::new(),
            filesize: String::new(),
            filetype: "image/png".to_string(),
            upload_date: String::new(),
        }
    }

    #[test]
    fn test_query_wins_over_storage() {
        let stored = Some(vec![ImageId::new("5")]);
        let initial = initial_selection(Some("3, 7,,9"), stored).unwrap();
        assert_eq!(initial.source, SelectionSource::Query);
        assert_eq!(
            initial.ids,
            vec![ImageId::new("3"), ImageId::new("7"), ImageId::new("9")]
        );
    }

    #[test]
    fn test_blank_query_falls_back_to_storage() {
        let stored: Vec<ImageId> = serde_json::from_str(r#"[ "5", "6" ]"#).unwrap();
        let initial = initial_selection(Some("  "), Some(stored)).unwrap();
        assert_eq!(initial.source, SelectionSource::SessionStorage);
        assert_eq!(initial.ids, vec![ImageId::new("5"), ImageId::new("6")]);

        assert!(initial_selection(None, None).is_none());
    }

    #[test]
    fn test_restore_reports_unmatched_ids() {
        let images = vec![image("1"), image("3"), image("9")];
        let index = SelectionIndex::build(&images);
        let mut selection = Selection::default();

        let ids = parse_query_ids("3,7,9");
        let report = selection.restore(&index, &ids);

        assert_eq!(report.matched, vec![ImageId::new("3"), ImageId::new("9")]);
        assert_eq!(report.unmatched, vec![ImageId::new("7")]);
        assert_eq!(report.first_position, Some(1));
        assert_eq!(selection.len(), 2);
        assert!(selection.is_checked(&ImageId::new("3")));
        assert!(!selection.is_checked(&ImageId::new("7")));
        assert!(!selection.actions_disabled());
    }

    #[test]
    fn test_restore_matches_integer_form() {
        let images = vec![image("42")];
        let index = SelectionIndex::build(&images);
        let mut selection = Selection::default();

        let report = selection.restore(&index, &parse_query_ids("042"));
        assert_eq!(report.matched.len(), 1);
    }

    #[test]
    fn test_actions_disabled_tracks_checked_count() {
        let images = vec![image("1"), image("2")];
        let mut selection = Selection::default();
        assert!(selection.actions_disabled());

        selection.set(ImageId::new("1"), true);
        assert!(!selection.actions_disabled());

        selection.set(ImageId::new("1"), false);
        assert!(selection.actions_disabled());

        selection.set_all(&images, true);
        assert_eq!(selection.ordered_ids(&images).len(), 2);
        selection.remove(&ImageId::new("2"));
        assert_eq!(selection.ordered_ids(&images), vec![ImageId::new("1")]);
    }

    #[test]
    fn test_select_all_toggle_flips_and_relabels() {
        let images = vec![image("1"), image("2"), image("3")];
        let mut selection = Selection::default();
        let mut toggle = SelectAllToggle::default();
        assert_eq!(toggle.label(), "Select all");

        let checked = toggle.press();
        selection.set_all(&images, checked);
        assert_eq!(selection.len(), 3);
        assert_eq!(toggle.label(), "Deselect all");

        let checked = toggle.press();
        selection.set_all(&images, checked);
        assert!(selection.is_empty());
        assert_eq!(toggle.label(), "Select all");
    }

    #[test]
    fn test_deleting_one_card_leaves_the_rest() {
        let mut images = vec![image("1"), image("2"), image("3")];
        let mut selection = Selection::default();
        selection.set_all(&images, true);

        assert!(remove_deleted(&mut images, &mut selection, &ImageId::new("2")));
        let left: Vec<&str> = images.iter().map(|img| img.id.as_str()).collect();
        assert_eq!(left, vec!["1", "3"]);
        assert!(!selection.is_checked(&ImageId::new("2")));
        assert_eq!(selection.len(), 2);

        assert!(!remove_deleted(&mut images, &mut selection, &ImageId::new("2")));
        assert_eq!(images.len(), 2);
        assert_eq!(selection.len(), 2);
    }
}
