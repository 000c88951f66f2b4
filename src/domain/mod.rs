//! Domain layer: note and tag entities plus the per-session preferences
//! value object that drives note listing.

pub mod ids;
pub mod listing;
pub mod note;
pub mod preferences;
pub mod tag;

pub use ids::{NoteId, TagId};
pub use listing::NoteListing;
pub use note::{Note, NoteDetail};
pub use preferences::Preferences;
pub use tag::Tag;
