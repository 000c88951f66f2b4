//! Per-session search and sort preferences.
//!
//! [`Preferences`] is a plain value object: handlers load it from the
//! session store, apply exactly one mutation, and save it back. The
//! listing query only ever reads it.

use serde::{Deserialize, Serialize};

use super::TagId;

/// Search filter and sort flags held for one browser session.
///
/// Defaults: no sorting, no selected tags, empty search text (matches all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Order notes by name ascending.
    pub sort_by_name: bool,
    /// Order notes by last-modified descending (applied after name).
    pub sort_by_time: bool,
    /// Selected tag ids; a note matches if it carries any of them.
    pub search_tags: Vec<TagId>,
    /// Literal substring the note content must contain.
    pub search_text: String,
}

impl Preferences {
    /// Adds a tag to the search filter unless it is already selected.
    ///
    /// Returns `true` if the filter changed.
    pub fn add_search_tag(&mut self, tag_id: TagId) -> bool {
        if self.search_tags.contains(&tag_id) {
            return false;
        }
        self.search_tags.push(tag_id);
        true
    }

    /// Removes a tag from the search filter. Absent ids are ignored.
    ///
    /// Returns `true` if the filter changed.
    pub fn remove_search_tag(&mut self, tag_id: TagId) -> bool {
        let before = self.search_tags.len();
        self.search_tags.retain(|id| *id != tag_id);
        self.search_tags.len() != before
    }

    /// Replaces the free-text search string.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Sets both sort flags at once.
    pub fn set_sort(&mut self, by_name: bool, by_time: bool) {
        self.sort_by_name = by_name;
        self.sort_by_time = by_time;
    }

    /// Returns `true` if a tag filter is active.
    #[must_use]
    pub fn filters_by_tag(&self) -> bool {
        !self.search_tags.is_empty()
    }

    /// Returns `true` if a text filter is active.
    #[must_use]
    pub fn filters_by_text(&self) -> bool {
        !self.search_text.is_empty()
    }
}
