//! Strongly-typed value objects used by search requests.
//!
//! These wrappers enforce basic invariants (positive collection identifiers,
//! non-empty vocabulary terms) so that once a value reaches the domain layer
//! it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace prefix carried by generic vocabulary terms in rendered controls.
pub const GENERIC_VOCABULARY_PREFIX: &str = "voc:generic:";

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided identifier is not a number.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| TypeConstraintError::InvalidId(s.to_string()))?;
                Self::new(value)
            }
        }
    };
}

id_newtype!(CollectionId, "Identifier of a configured catalog collection.");

/// Controlled vocabulary term, stored without surrounding whitespace.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct VocabularyId(String);

impl VocabularyId {
    /// Trims the value and rejects empty terms.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the term as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the term with `prefix` removed, or the term itself when it
    /// does not start with `prefix`.
    pub fn without_prefix(&self, prefix: &str) -> &str {
        strip_namespace(&self.0, prefix)
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for VocabularyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VocabularyId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VocabularyId> for String {
    fn from(value: VocabularyId) -> Self {
        value.0
    }
}

/// Removes `prefix` from `value` when present. An empty prefix is a no-op.
pub fn strip_namespace<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_id_rejects_zero_and_garbage() {
        assert_eq!(CollectionId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(
            "12".parse::<CollectionId>().map(CollectionId::get),
            Ok(12)
        );
        assert!(matches!(
            "abc".parse::<CollectionId>(),
            Err(TypeConstraintError::InvalidId(_))
        ));
        assert_eq!(
            "-3".parse::<CollectionId>(),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn vocabulary_id_trims_and_strips_prefix() {
        let term = VocabularyId::new("  voc:generic:poster ").unwrap();
        assert_eq!(term.as_str(), "voc:generic:poster");
        assert_eq!(term.without_prefix(GENERIC_VOCABULARY_PREFIX), "poster");
        assert_eq!(term.without_prefix("voc:other:"), "voc:generic:poster");
        assert_eq!(
            VocabularyId::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn strip_namespace_only_removes_leading_prefix() {
        assert_eq!(strip_namespace("voc:generic:map", "voc:generic:"), "map");
        assert_eq!(strip_namespace("map:voc:generic:", "voc:generic:"), "map:voc:generic:");
        assert_eq!(strip_namespace("map", ""), "map");
    }
}
