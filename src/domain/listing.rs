//! Result of the filtered note list.

use serde::Serialize;

use super::{Note, Preferences, Tag};

/// Everything the note list page shows.
#[derive(Debug, Clone, Serialize)]
pub struct NoteListing {
    /// Notes matching the filter, in the requested order.
    pub notes: Vec<Note>,
    /// Every tag, for the search-tag picker.
    pub tags: Vec<Tag>,
    /// Tags currently selected in the search filter that still exist.
    pub search_tags: Vec<Tag>,
    /// Preferences the listing was computed with.
    pub preferences: Preferences,
}
