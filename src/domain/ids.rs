//! Type-safe surrogate keys for notes and tags.
//!
//! [`NoteId`] and [`TagId`] wrap the integer row ids assigned by the store
//! so that a note id can never be passed where a tag id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a [`super::Note`]. Stable for the lifetime of the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct NoteId(i64);

/// Identifier of a [`super::Tag`]. Stable for the lifetime of the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TagId(i64);

macro_rules! impl_row_id {
    ($name:ident) => {
        impl $name {
            /// Wraps a raw row id.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw row id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

impl_row_id!(NoteId);
impl_row_id!(TagId);

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_integer() {
        assert_eq!(NoteId::new(42).to_string(), "42");
        assert_eq!(TagId::new(7).to_string(), "7");
    }

    #[test]
    fn parses_form_values_with_whitespace() {
        let Ok(id) = " 12 ".parse::<TagId>() else {
            panic!("expected a valid tag id");
        };
        assert_eq!(id.get(), 12);
        assert!("twelve".parse::<TagId>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let Ok(json) = serde_json::to_string(&NoteId::new(3)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "3");
    }
}
