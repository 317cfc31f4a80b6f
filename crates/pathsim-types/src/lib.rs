//! Validated text primitives shared by the PathSim crates.
//!
//! Catalog identifiers and marker names arrive from hand-authored data files and from user
//! input, so every one of them is trimmed and checked for emptiness once, at the boundary.

use std::borrow::Borrow;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Trimmed text with at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct NonEmptyText(String);

impl NonEmptyText {
    fn new(input: &str) -> Result<Self, TextError> {
        match input.trim() {
            "" => Err(TextError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }
}

/// Identifier of a catalog case, e.g. `ALCL_ALK_POS`.
///
/// Comparison is exact: ids are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseId(NonEmptyText);

/// Name of an immunohistochemistry marker on the panel, e.g. `CD30` or `EBER-ISH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerName(NonEmptyText);

macro_rules! str_like {
    ($ty:ty) => {
        impl $ty {
            /// Trims `input`, rejecting it if nothing is left.
            pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
                NonEmptyText::new(input.as_ref()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &(self.0).0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(&raw).map_err(serde::de::Error::custom)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = TextError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

str_like!(CaseId);
str_like!(MarkerName);
