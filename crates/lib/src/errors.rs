//! Error types for dotted mapping operations.
//!
//! This module defines structured error types for the traversal engine,
//! distinguishing lifecycle errors, malformed keys, lookup misses and
//! conflicts between the key's path and the stored structure.

use thiserror::Error;

use crate::key::KeyError;

/// Structured error types for [`DottedMapping`](crate::DottedMapping) operations.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The mapping has no base section yet
    #[error("Mapping has not been initialized")]
    Uninitialized,

    /// `init` was called on a mapping that already has a base section
    #[error("Mapping has already been initialized")]
    AlreadyInitialized,

    /// The key is not a well-formed dotted key
    #[error("{source}")]
    InvalidKey {
        key: String,
        #[source]
        source: KeyError,
    },

    /// A non-final segment of the key names no section
    #[error("Section '{segment}' does not exist (key '{key}')")]
    MissingSection { key: String, segment: String },

    /// The final segment of the key is absent from its section
    #[error("Key does not exist '{key}'")]
    KeyNotFound { key: String },

    /// A non-final segment of the key holds a leaf instead of a section
    #[error("Path conflict at '{segment}': a value is stored where key '{key}' needs a section")]
    PathConflict { key: String, segment: String },

    /// A section was required but a leaf was found or given
    #[error("Expected a section at '{key}', found a value")]
    NotASection { key: String },

    /// A leaf was required but a section was found
    #[error("Expected a value at '{key}', found a section")]
    LeafExpected { key: String },
}

impl MappingError {
    pub(crate) fn invalid_key(key: &str, source: KeyError) -> Self {
        MappingError::InvalidKey {
            key: key.to_string(),
            source,
        }
    }

    /// Check if this error is a lookup miss (missing section or missing key).
    ///
    /// Misses are the errors a default value can stand in for.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MappingError::MissingSection { .. } | MappingError::KeyNotFound { .. }
        )
    }

    /// Check if this error is a conflict between the key and the stored structure
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            MappingError::PathConflict { .. }
                | MappingError::NotASection { .. }
                | MappingError::LeafExpected { .. }
        )
    }

    /// Check if this error is caused by the mapping lifecycle
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            MappingError::Uninitialized | MappingError::AlreadyInitialized
        )
    }

    /// Get the dotted key this error is about, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            MappingError::InvalidKey { key, .. }
            | MappingError::MissingSection { key, .. }
            | MappingError::KeyNotFound { key }
            | MappingError::PathConflict { key, .. }
            | MappingError::NotASection { key }
            | MappingError::LeafExpected { key } => Some(key),
            MappingError::Uninitialized | MappingError::AlreadyInitialized => None,
        }
    }

    /// Get the segment where traversal stopped, if any
    pub fn segment(&self) -> Option<&str> {
        match self {
            MappingError::MissingSection { segment, .. }
            | MappingError::PathConflict { segment, .. } => Some(segment),
            _ => None,
        }
    }
}

// Conversion from MappingError to the main Error type
impl From<MappingError> for crate::Error {
    fn from(err: MappingError) -> Self {
        crate::Error::Mapping(err)
    }
}
