//!
//! dotted: a flat, dot-separated key interface over nested sections.
//! This library lets callers treat an arbitrarily deep hierarchy of
//! key-value sections as one flat associative container.
//!
//! ## Core Concepts
//!
//! * **Sections (`section::Section`)**: Nested associative containers. Storage backends implement this trait to plug into the engine; `TreeSection` and `HashSection` are provided.
//! * **Nodes (`section::Node`)**: A slot in a section, either a nested `Section` or an opaque `Leaf` value.
//! * **Dotted keys (`key::DottedKey`)**: Strings like `"a.b.c"` whose segments name the sections to descend into and, last, the slot.
//! * **DottedMapping (`mapping::DottedMapping`)**: The traversal engine. Resolves dotted keys for get/set/delete and flattens the hierarchy back into dotted keys.
//! * **JSON bridge (`json`)**: Conversion between JSON documents and mappings (requires the "json" feature).

pub mod constants;
pub mod errors;
#[cfg(feature = "json")]
pub mod json;
pub mod key;
pub mod mapping;
pub mod section;

/// Re-export the core types for easier access.
pub use errors::MappingError;
pub use key::{DottedKey, KeyError};
pub use mapping::DottedMapping;
pub use section::{HashSection, Node, Section, TreeSection};

/// Result type used throughout the dotted library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dotted library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured mapping errors from the mapping engine
    #[error(transparent)]
    Mapping(MappingError),

    /// Malformed dotted keys
    #[error(transparent)]
    Key(#[from] KeyError),

    #[cfg(feature = "json")]
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Mapping(_) => "mapping",
            Error::Key(_) => "key",
            #[cfg(feature = "json")]
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a key or section was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict between a key and the stored structure.
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is caused by a malformed key.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self,
            Error::Key(_) | Error::Mapping(MappingError::InvalidKey { .. })
        )
    }
}
