//! Bridge between JSON documents and dotted mappings.
//!
//! JSON objects map naturally onto sections: every object becomes a section
//! and every other JSON value becomes a leaf. This module converts whole
//! documents in both directions and between the nested and the flattened
//! (`{"a.b": 1}`) shapes.
//!
//! ```
//! use dotted::json::{self, JsonMapping};
//! use serde_json::json;
//!
//! let mapping: JsonMapping = json::from_json(json!({"db": {"host": "localhost", "port": 5432}}))?;
//! assert_eq!(mapping.get_leaf("db.port")?, &json!(5432));
//!
//! let flat = json::flatten(&mapping);
//! assert_eq!(flat.get("db.host"), Some(&json!("localhost")));
//! # Ok::<(), dotted::Error>(())
//! ```

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    DottedMapping, Result,
    errors::MappingError,
    section::{Node, Section, TreeSection},
};

/// A section whose leaves are arbitrary JSON values.
pub type JsonSection = TreeSection<Value>;

/// A dotted mapping over JSON sections.
pub type JsonMapping = DottedMapping<JsonSection>;

/// Name used in errors that concern the whole document rather than a key.
const ROOT_KEY: &str = "<root>";

/// Builds a mapping from a nested JSON document.
///
/// The document root must be an object. Nested objects become sections,
/// including empty ones.
pub fn from_json<S>(value: Value) -> Result<DottedMapping<S>>
where
    S: Section + DeserializeOwned,
{
    if !value.is_object() {
        return Err(MappingError::NotASection {
            key: ROOT_KEY.to_string(),
        }
        .into());
    }
    let base: S = serde_json::from_value(value)?;
    trace!(sections = base.section_len(), "Loaded mapping from JSON");
    Ok(DottedMapping::with_base(base))
}

/// Serializes the mapping back into a nested JSON document.
pub fn to_json<S>(mapping: &DottedMapping<S>) -> Result<Value>
where
    S: Section + Serialize,
{
    let base = mapping.base().ok_or(MappingError::Uninitialized)?;
    Ok(serde_json::to_value(base)?)
}

/// Produces a single-level JSON object keyed by dotted keys.
///
/// Only leaves are listed; empty sections have no flattened form. An
/// uninitialized mapping flattens to an empty object.
pub fn flatten<S>(mapping: &DottedMapping<S>) -> Map<String, Value>
where
    S: Section<Leaf = Value>,
{
    mapping
        .iter()
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

/// Builds a mapping from a single-level object keyed by dotted keys.
///
/// Keys are applied in the object's order, so a later key that needs a
/// section where an earlier key stored a value fails with
/// [`MappingError::PathConflict`].
pub fn unflatten(flat: Map<String, Value>) -> Result<JsonMapping> {
    let mut mapping = JsonMapping::empty();
    mapping.try_extend(flat.into_iter().map(|(key, value)| (key, Node::Leaf(value))))?;
    Ok(mapping)
}
