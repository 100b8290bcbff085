//! The dotted mapping engine.
//!
//! [`DottedMapping`] presents a hierarchy of nested [`Section`]s through one
//! flat associative interface. A key such as `"a.b.c"` names slot `c` inside
//! section `b` inside section `a`; reads walk that chain, writes create the
//! missing links, and iteration flattens the hierarchy back into dotted keys.
//!
//! # Lifecycle
//!
//! A mapping starts without a base section ([`DottedMapping::new`]) and
//! becomes usable once the host installs one, either at construction
//! ([`DottedMapping::with_base`], [`DottedMapping::empty`]) or later through
//! [`DottedMapping::init`]. Accessors on an uninitialized mapping fail with
//! [`MappingError::Uninitialized`]; iterating one yields nothing.
//!
//! # Usage
//!
//! ```
//! use dotted::{DottedMapping, TreeSection};
//!
//! let mut config = DottedMapping::<TreeSection<i64>>::empty();
//! config.set_leaf("a.b.c", 1)?;
//! config.set_leaf("a.b.d", 2)?;
//! config.set_leaf("a.e", 3)?;
//!
//! assert_eq!(config.get_leaf("a.b.d")?, &2);
//! assert!(config.get("a.b")?.is_section());
//! assert_eq!(config.len(), 3);
//!
//! let keys: Vec<String> = config.keys().collect();
//! assert_eq!(keys, vec!["a.b.c", "a.b.d", "a.e"]);
//! # Ok::<(), dotted::MappingError>(())
//! ```

use std::{fmt, iter::FusedIterator};

use tracing::{debug, trace};

use crate::{
    errors::MappingError,
    key::{KeyError, qualify, split_key},
    section::{Node, Section},
};

/// A flat, dot-separated view over a tree of nested sections.
///
/// `DottedMapping` owns at most one base section. All keys are split on `.`;
/// every segment except the last must name a section, and the last segment
/// names the slot, which may hold a leaf or a whole nested section.
///
/// The engine never converts stored values: a leaf sitting where a key needs
/// a section is reported as [`MappingError::PathConflict`] on reads and
/// writes alike.
///
/// Mutating operations take `&mut self`. Sharing a mapping between threads
/// requires an external lock around each logical operation, since
/// [`get_or_set`](Self::get_or_set) is a check-then-act sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct DottedMapping<S: Section> {
    base: Option<S>,
}

impl<S: Section> DottedMapping<S> {
    /// Creates an uninitialized mapping with no base section.
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Creates a mapping over an existing base section.
    pub fn with_base(base: S) -> Self {
        Self { base: Some(base) }
    }

    /// Creates a mapping over a fresh, empty base section.
    pub fn empty() -> Self {
        Self::with_base(S::new_section())
    }

    /// Installs the base section of an uninitialized mapping.
    ///
    /// The transition is one-way: calling `init` on a mapping that already
    /// has a base leaves it untouched and fails with
    /// [`MappingError::AlreadyInitialized`].
    pub fn init(&mut self, base: S) -> Result<(), MappingError> {
        if self.base.is_some() {
            return Err(MappingError::AlreadyInitialized);
        }
        debug!("Initializing dotted mapping base section");
        self.base = Some(base);
        Ok(())
    }

    /// Returns `true` once a base section is installed.
    pub fn is_initialized(&self) -> bool {
        self.base.is_some()
    }

    /// The base section, if installed.
    pub fn base(&self) -> Option<&S> {
        self.base.as_ref()
    }

    /// The base section for direct modification, if installed.
    pub fn base_mut(&mut self) -> Option<&mut S> {
        self.base.as_mut()
    }

    /// Consumes the mapping and returns its base section.
    pub fn into_base(self) -> Option<S> {
        self.base
    }

    /// Walks to the section holding the final segment of `key`.
    ///
    /// Read-only traversal: missing sections are reported, never created.
    fn descend<'m, 'k>(&'m self, key: &'k str) -> Result<(&'m S, &'k str), MappingError> {
        let base = self.base.as_ref().ok_or(MappingError::Uninitialized)?;
        let segments = split_key(key).map_err(|err| MappingError::invalid_key(key, err))?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(MappingError::invalid_key(key, KeyError::Empty));
        };

        let mut section = base;
        for segment in parents {
            match section.get_node(segment) {
                Some(Node::Section(child)) => section = child,
                Some(Node::Leaf(_)) => return Err(path_conflict(key, segment)),
                None => return Err(missing_section(key, segment)),
            }
        }
        Ok((section, *last))
    }

    /// Mutable counterpart of [`descend`](Self::descend).
    ///
    /// With `create`, every missing intermediate section is inserted as a
    /// fresh empty section.
    fn descend_mut<'k>(
        &mut self,
        key: &'k str,
        create: bool,
    ) -> Result<(&mut S, &'k str), MappingError> {
        let base = self.base.as_mut().ok_or(MappingError::Uninitialized)?;
        let segments = split_key(key).map_err(|err| MappingError::invalid_key(key, err))?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(MappingError::invalid_key(key, KeyError::Empty));
        };

        let mut section = base;
        for segment in parents {
            if create && section.get_node(segment).is_none() {
                trace!(key, segment, "Creating missing section");
                section.insert_node(segment.to_string(), Node::empty_section());
            }
            match section.get_node_mut(segment) {
                Some(Node::Section(child)) => section = child,
                Some(Node::Leaf(_)) => return Err(path_conflict(key, segment)),
                None => return Err(missing_section(key, segment)),
            }
        }
        Ok((section, *last))
    }

    /// Gets the node stored at `key`: a leaf or a nested section.
    ///
    /// # Errors
    ///
    /// - [`MappingError::MissingSection`] if an intermediate section is absent
    /// - [`MappingError::KeyNotFound`] if the final slot is absent
    /// - [`MappingError::PathConflict`] if an intermediate slot holds a leaf
    pub fn get(&self, key: impl AsRef<str>) -> Result<&Node<S>, MappingError> {
        let key = key.as_ref();
        let (section, subkey) = self.descend(key)?;
        section.get_node(subkey).ok_or_else(|| key_not_found(key))
    }

    /// Gets the node stored at `key` for in-place modification.
    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Result<&mut Node<S>, MappingError> {
        let key = key.as_ref();
        let (section, subkey) = self.descend_mut(key, false)?;
        section.get_node_mut(subkey).ok_or_else(|| key_not_found(key))
    }

    /// Gets the leaf value stored at `key`.
    ///
    /// Fails with [`MappingError::LeafExpected`] if the slot holds a section.
    pub fn get_leaf(&self, key: impl AsRef<str>) -> Result<&S::Leaf, MappingError> {
        let key = key.as_ref();
        match self.get(key)? {
            Node::Leaf(value) => Ok(value),
            Node::Section(_) => Err(MappingError::LeafExpected {
                key: key.to_string(),
            }),
        }
    }

    /// Gets the nested section stored at `key`.
    ///
    /// Fails with [`MappingError::NotASection`] if the slot holds a leaf.
    pub fn get_section(&self, key: impl AsRef<str>) -> Result<&S, MappingError> {
        let key = key.as_ref();
        match self.get(key)? {
            Node::Section(section) => Ok(section),
            Node::Leaf(_) => Err(MappingError::NotASection {
                key: key.to_string(),
            }),
        }
    }

    /// Returns `true` if `key` resolves to a stored node.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_ok()
    }

    /// Stores `node` at `key`, creating missing intermediate sections.
    ///
    /// Any value or section previously at that exact slot is replaced, not
    /// merged, and returned.
    pub fn set(
        &mut self,
        key: impl AsRef<str>,
        node: Node<S>,
    ) -> Result<Option<Node<S>>, MappingError> {
        let key = key.as_ref();
        let (section, subkey) = self.descend_mut(key, true)?;
        Ok(section.insert_node(subkey.to_string(), node))
    }

    /// Stores a leaf value at `key`. See [`set`](Self::set).
    pub fn set_leaf(
        &mut self,
        key: impl AsRef<str>,
        value: S::Leaf,
    ) -> Result<Option<Node<S>>, MappingError> {
        self.set(key, Node::Leaf(value))
    }

    /// Removes the node at `key` and returns it.
    ///
    /// Sections emptied by the removal stay in place.
    pub fn delete(&mut self, key: impl AsRef<str>) -> Result<Node<S>, MappingError> {
        let key = key.as_ref();
        let (section, subkey) = self.descend_mut(key, false)?;
        let removed = section
            .remove_node(subkey)
            .ok_or_else(|| key_not_found(key))?;
        debug!(key, kind = removed.type_name(), "Deleted key");
        Ok(removed)
    }

    /// Like [`delete`](Self::delete), but a lookup miss yields `Ok(None)`.
    pub fn pop(&mut self, key: impl AsRef<str>) -> Result<Option<Node<S>>, MappingError> {
        match self.delete(key) {
            Ok(node) => Ok(Some(node)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Removes the first leaf in iteration order and returns it with its key.
    ///
    /// Returns `Ok(None)` once no leaf is reachable. Sections emptied by the
    /// removal stay in place, as with [`delete`](Self::delete).
    pub fn pop_first(&mut self) -> Result<Option<(String, S::Leaf)>, MappingError> {
        if self.base.is_none() {
            return Err(MappingError::Uninitialized);
        }
        let Some(key) = self.keys().next() else {
            return Ok(None);
        };
        match self.delete(&key)? {
            Node::Leaf(value) => Ok(Some((key, value))),
            Node::Section(_) => Err(MappingError::LeafExpected { key }),
        }
    }

    /// Gets the node at `key`, falling back to `default` on a lookup miss.
    ///
    /// Only misses ([`MappingError::MissingSection`] and
    /// [`MappingError::KeyNotFound`]) are replaced by the default; with
    /// `None` the miss itself is returned. The mapping is never modified.
    ///
    /// ```
    /// # use dotted::{DottedMapping, Node, TreeSection};
    /// let config = DottedMapping::<TreeSection<i64>>::empty();
    /// let fallback = Node::leaf(42);
    ///
    /// assert_eq!(config.get_or_default("missing.key", Some(&fallback))?, &fallback);
    /// assert!(config.get_or_default("missing.key", None).is_err());
    /// # Ok::<(), dotted::MappingError>(())
    /// ```
    pub fn get_or_default<'a>(
        &'a self,
        key: impl AsRef<str>,
        default: Option<&'a Node<S>>,
    ) -> Result<&'a Node<S>, MappingError> {
        match self.get(key) {
            Ok(node) => Ok(node),
            Err(err) if err.is_not_found() => default.ok_or(err),
            Err(err) => Err(err),
        }
    }

    /// Gets the node at `key`, storing `node` there first if the key is absent.
    ///
    /// An existing value is never replaced.
    pub fn get_or_set(
        &mut self,
        key: impl AsRef<str>,
        node: Node<S>,
    ) -> Result<&Node<S>, MappingError> {
        let key = key.as_ref();
        let present = match self.get(key) {
            Ok(_) => true,
            Err(err) if err.is_not_found() => false,
            Err(err) => return Err(err),
        };
        if !present {
            self.set(key, node)?;
        }
        self.get(key)
    }

    /// Stores every `(key, node)` pair in order, stopping at the first error.
    pub fn try_extend<I, K>(&mut self, pairs: I) -> Result<(), MappingError>
    where
        I: IntoIterator<Item = (K, Node<S>)>,
        K: AsRef<str>,
    {
        for (key, node) in pairs {
            self.set(key, node)?;
        }
        Ok(())
    }

    /// Replaces the base with a fresh empty section.
    ///
    /// Empty sections go along with the leaves; nothing of the old tree is
    /// kept.
    pub fn clear(&mut self) -> Result<(), MappingError> {
        let base = self.base.as_mut().ok_or(MappingError::Uninitialized)?;
        *base = S::new_section();
        Ok(())
    }

    /// Iterates over `(dotted key, leaf)` pairs for every reachable leaf.
    ///
    /// The walk is depth-first over an explicit stack, so arbitrarily deep
    /// nesting does not grow the call stack. Within a section, children are
    /// visited in the section's own iteration order. Empty sections
    /// contribute no keys.
    pub fn iter(&self) -> Iter<'_, S> {
        let mut stack = Vec::new();
        if let Some(base) = &self.base {
            stack.push((base.nodes(), String::new()));
        }
        Iter { stack }
    }

    /// Iterates over the dotted keys of every reachable leaf.
    pub fn keys(&self) -> Keys<'_, S> {
        Keys { inner: self.iter() }
    }

    /// Iterates over every reachable leaf value, in key order.
    pub fn values(&self) -> Values<'_, S> {
        Values { inner: self.iter() }
    }

    /// Number of leaves, recomputed by a full walk on every call.
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    /// Returns `true` if no leaf is reachable from the base.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<S: Section> Default for DottedMapping<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for DottedMapping<S>
where
    S: Section,
    S::Leaf: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, S: Section> IntoIterator for &'a DottedMapping<S> {
    type Item = (String, &'a S::Leaf);
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn key_not_found(key: &str) -> MappingError {
    MappingError::KeyNotFound {
        key: key.to_string(),
    }
}

fn missing_section(key: &str, segment: &str) -> MappingError {
    MappingError::MissingSection {
        key: key.to_string(),
        segment: segment.to_string(),
    }
}

fn path_conflict(key: &str, segment: &str) -> MappingError {
    MappingError::PathConflict {
        key: key.to_string(),
        segment: segment.to_string(),
    }
}

/// Flattening iterator over `(dotted key, leaf)` pairs.
///
/// Created by [`DottedMapping::iter`].
pub struct Iter<'a, S: Section + 'a> {
    // Each frame is a partially consumed section and the qualified key of
    // that section ("" for the base).
    stack: Vec<(S::Nodes<'a>, String)>,
}

impl<'a, S: Section + 'a> Iterator for Iter<'a, S> {
    type Item = (String, &'a S::Leaf);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((mut nodes, prefix)) = self.stack.pop() {
            let Some((segment, node)) = nodes.next() else {
                continue;
            };
            let qualified = qualify(&prefix, segment);
            self.stack.push((nodes, prefix));

            match node {
                Node::Section(child) => self.stack.push((child.nodes(), qualified)),
                Node::Leaf(value) => return Some((qualified, value)),
            }
        }
        None
    }
}

impl<'a, S: Section + 'a> FusedIterator for Iter<'a, S> {}

/// Iterator over dotted keys, created by [`DottedMapping::keys`].
pub struct Keys<'a, S: Section + 'a> {
    inner: Iter<'a, S>,
}

impl<'a, S: Section + 'a> Iterator for Keys<'a, S> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<'a, S: Section + 'a> FusedIterator for Keys<'a, S> {}

/// Iterator over leaf values, created by [`DottedMapping::values`].
pub struct Values<'a, S: Section + 'a> {
    inner: Iter<'a, S>,
}

impl<'a, S: Section + 'a> Iterator for Values<'a, S> {
    type Item = &'a S::Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

impl<'a, S: Section + 'a> FusedIterator for Values<'a, S> {}
