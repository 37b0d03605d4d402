//! Strongly typed identifiers
//!
//! The persistence service hands out opaque string ids (`_id`). A reference
//! field may arrive either as the bare id or as a populated document, so every
//! id type deserializes from both shapes and always serializes back to the
//! bare string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Either a bare id or a populated document carrying `_id`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl DocumentRef {
    fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Populated { id } => id,
        }
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                DocumentRef::deserialize(deserializer).map(|r| Self(r.into_id()))
            }
        }
    };
}

define_id!(
    /// Identifier of a task
    TaskId
);
define_id!(
    /// Identifier of a section; doubles as the column key on the board
    SectionId
);
define_id!(
    /// Identifier of a project
    ProjectId
);
define_id!(
    /// Identifier of a user
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id() {
        let id: SectionId = serde_json::from_str(r#""64f0c2""#).unwrap();
        assert_eq!(id.as_str(), "64f0c2");
    }

    #[test]
    fn test_populated_reference() {
        let id: ProjectId =
            serde_json::from_str(r#"{"_id": "p1", "title": "Launch", "owner": "u1"}"#).unwrap();
        assert_eq!(id, ProjectId::from("p1"));
    }

    #[test]
    fn test_serializes_bare() {
        let json = serde_json::to_string(&TaskId::from("t9")).unwrap();
        assert_eq!(json, r#""t9""#);
    }

    #[test]
    fn test_rejects_document_without_id() {
        let result: Result<UserId, _> = serde_json::from_str(r#"{"name": "nobody"}"#);
        assert!(result.is_err());
    }
}
