//! Dotted keys for flat access to nested sections.
//!
//! A dotted key is a string of one or more segments joined by
//! [`SEPARATOR`](crate::constants::SEPARATOR). Every segment except the last
//! names a section to descend into; the last one names the slot inside the
//! innermost section.
//!
//! # Usage
//!
//! ```rust
//! use dotted::key::DottedKey;
//! use std::str::FromStr;
//!
//! let key = DottedKey::from_str("server.http.port")?;
//! assert_eq!(key.depth(), 3);
//!
//! let (parents, last) = key.split_last();
//! assert_eq!(parents, vec!["server", "http"]);
//! assert_eq!(last, "port");
//! # Ok::<(), dotted::key::KeyError>(())
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::constants::SEPARATOR;

/// Error type for malformed dotted keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key is the empty string.
    #[error("Invalid key '': keys must contain at least one segment")]
    Empty,

    /// One of the segments is empty (leading, trailing or doubled separator).
    #[error("Invalid key '{key}': segment {index} is empty")]
    EmptySegment { key: String, index: usize },

    /// A single segment passed to [`DottedKey::child`] contains a separator.
    #[error("Invalid segment '{segment}': segments cannot contain '.'")]
    SeparatorInSegment { segment: String },
}

impl KeyError {
    /// The offending key or segment text.
    pub fn input(&self) -> &str {
        match self {
            KeyError::Empty => "",
            KeyError::EmptySegment { key, .. } => key,
            KeyError::SeparatorInSegment { segment } => segment,
        }
    }
}

/// Splits `key` into its segments, rejecting empty keys and empty segments.
///
/// This is the borrowed fast path used by the mapping engine; it does not
/// allocate beyond the returned vector.
///
/// ```rust
/// # use dotted::key::{split_key, KeyError};
/// assert_eq!(split_key("a.b.c").unwrap(), vec!["a", "b", "c"]);
/// assert!(matches!(split_key("a..c"), Err(KeyError::EmptySegment { index: 1, .. })));
/// ```
pub fn split_key(key: &str) -> Result<Vec<&str>, KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }

    let segments: Vec<&str> = key.split(SEPARATOR).collect();
    if let Some(index) = segments.iter().position(|segment| segment.is_empty()) {
        return Err(KeyError::EmptySegment {
            key: key.to_string(),
            index,
        });
    }
    Ok(segments)
}

/// Joins a qualified prefix and a segment the way flattened keys are built.
///
/// An empty prefix denotes the root section, so the segment is returned as is.
pub fn qualify(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        let mut qualified = String::with_capacity(prefix.len() + 1 + segment.len());
        qualified.push_str(prefix);
        qualified.push(SEPARATOR);
        qualified.push_str(segment);
        qualified
    }
}

/// An owned, validated dotted key.
///
/// `DottedKey` guarantees that the key has at least one segment and that no
/// segment is empty, so every key addresses exactly one slot and survives a
/// flatten/lookup round trip unchanged.
///
/// # Examples
///
/// ```rust
/// # use dotted::key::DottedKey;
/// let key = DottedKey::parse("user")?.child("profile")?.child("name")?;
/// assert_eq!(key.as_str(), "user.profile.name");
///
/// let segments: Vec<&str> = key.segments().collect();
/// assert_eq!(segments, vec!["user", "profile", "name"]);
/// # Ok::<(), dotted::key::KeyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DottedKey {
    inner: String,
}

impl DottedKey {
    /// Parses and validates a dotted key.
    pub fn parse(key: impl Into<String>) -> Result<Self, KeyError> {
        let inner = key.into();
        split_key(&inner)?;
        Ok(Self { inner })
    }

    /// Builds a key from already separated segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut key: Option<DottedKey> = None;
        for segment in segments {
            key = Some(match key {
                None => Self::root_segment(segment.as_ref())?,
                Some(parent) => parent.child(segment)?,
            });
        }
        key.ok_or(KeyError::Empty)
    }

    fn root_segment(segment: &str) -> Result<Self, KeyError> {
        if segment.contains(SEPARATOR) {
            return Err(KeyError::SeparatorInSegment {
                segment: segment.to_string(),
            });
        }
        Self::parse(segment)
    }

    /// Returns a new key addressing `segment` inside the section named by `self`.
    pub fn child(&self, segment: impl AsRef<str>) -> Result<Self, KeyError> {
        let segment = segment.as_ref();
        if segment.contains(SEPARATOR) {
            return Err(KeyError::SeparatorInSegment {
                segment: segment.to_string(),
            });
        }
        if segment.is_empty() {
            return Err(KeyError::EmptySegment {
                key: format!("{}{SEPARATOR}", self.inner),
                index: self.depth(),
            });
        }
        Ok(Self {
            inner: qualify(&self.inner, segment),
        })
    }

    /// Returns an iterator over the segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split(SEPARATOR)
    }

    /// Returns the number of segments in the key.
    pub fn depth(&self) -> usize {
        self.inner.matches(SEPARATOR).count() + 1
    }

    /// Splits the key into the section segments and the final slot segment.
    pub fn split_last(&self) -> (Vec<&str>, &str) {
        match self.inner.rsplit_once(SEPARATOR) {
            Some((parents, last)) => (parents.split(SEPARATOR).collect(), last),
            None => (Vec::new(), &self.inner),
        }
    }

    /// Returns the key of the enclosing section, or `None` for a top-level key.
    pub fn parent(&self) -> Option<DottedKey> {
        self.inner.rsplit_once(SEPARATOR).map(|(parent, _)| DottedKey {
            inner: parent.to_string(),
        })
    }

    /// Returns the final segment of the key.
    pub fn last(&self) -> &str {
        self.inner
            .rsplit_once(SEPARATOR)
            .map_or(self.inner.as_str(), |(_, last)| last)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Consumes the key and returns the underlying string.
    pub fn into_string(self) -> String {
        self.inner
    }
}

impl fmt::Display for DottedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl AsRef<str> for DottedKey {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl FromStr for DottedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DottedKey::parse(s)
    }
}

impl TryFrom<&str> for DottedKey {
    type Error = KeyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        DottedKey::parse(s)
    }
}

impl TryFrom<String> for DottedKey {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DottedKey::parse(s)
    }
}

impl From<DottedKey> for String {
    fn from(key: DottedKey) -> Self {
        key.inner
    }
}

impl PartialEq<str> for DottedKey {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for DottedKey {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}
