//! Tag entity.

use serde::Serialize;

use super::TagId;

/// Longest accepted tag name, in characters.
pub const MAX_TAG_NAME_LEN: usize = 100;

/// A user-defined label attachable to any number of notes.
///
/// Names are not unique; two tags may share a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Tag {
    /// Surrogate key assigned by the store.
    pub id: TagId,
    /// Label shown to the user.
    pub name: String,
}
