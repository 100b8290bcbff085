//! A hashed in-memory section.
//!
//! `HashSection` keeps its children in a `HashMap`. Iteration order is
//! arbitrary but stable for as long as the section is not modified, which is
//! all the flattening iterator relies on.

use std::collections::{HashMap, hash_map};

use super::{Node, Section, clone_section, sections_eq};

/// A section backed by a `HashMap`.
///
/// Prefer [`TreeSection`](super::TreeSection) when callers need a
/// reproducible key order across runs.
#[derive(Debug, Eq)]
#[cfg_attr(
    feature = "json",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct HashSection<V> {
    children: HashMap<String, Node<HashSection<V>>>,
}

impl<V> HashSection<V> {
    /// Create a new empty `HashSection`.
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
        }
    }

    /// Create an empty `HashSection` with room for `capacity` direct children.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            children: HashMap::with_capacity(capacity),
        }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the section has no direct children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get a reference to the internal HashMap.
    pub fn as_hashmap(&self) -> &HashMap<String, Node<HashSection<V>>> {
        &self.children
    }
}

impl<V> Default for HashSection<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for HashSection<V> {
    fn clone(&self) -> Self {
        clone_section(self)
    }
}

impl<V: PartialEq> PartialEq for HashSection<V> {
    fn eq(&self, other: &Self) -> bool {
        sections_eq(self, other)
    }
}

impl<V> Drop for HashSection<V> {
    // Nested sections are detached onto a heap stack before they drop, so
    // each one is released with no children left to recurse into.
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut stack = vec![std::mem::take(&mut self.children)];
        while let Some(children) = stack.pop() {
            for node in children.into_values() {
                if let Node::Section(mut section) = node {
                    stack.push(std::mem::take(&mut section.children));
                }
            }
        }
    }
}

impl<V> From<HashMap<String, Node<HashSection<V>>>> for HashSection<V> {
    fn from(children: HashMap<String, Node<HashSection<V>>>) -> Self {
        Self { children }
    }
}

/// Iterator over the direct children of a [`HashSection`].
pub struct Nodes<'a, V> {
    inner: hash_map::Iter<'a, String, Node<HashSection<V>>>,
}

impl<'a, V> Iterator for Nodes<'a, V> {
    type Item = (&'a str, &'a Node<HashSection<V>>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(segment, node)| (segment.as_str(), node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> Section for HashSection<V> {
    type Leaf = V;
    type Nodes<'a>
        = Nodes<'a, V>
    where
        Self: 'a;

    fn new_section() -> Self {
        Self::new()
    }

    fn get_node(&self, segment: &str) -> Option<&Node<Self>> {
        self.children.get(segment)
    }

    fn get_node_mut(&mut self, segment: &str) -> Option<&mut Node<Self>> {
        self.children.get_mut(segment)
    }

    fn insert_node(&mut self, segment: String, node: Node<Self>) -> Option<Node<Self>> {
        self.children.insert(segment, node)
    }

    fn remove_node(&mut self, segment: &str) -> Option<Node<Self>> {
        self.children.remove(segment)
    }

    fn nodes(&self) -> Self::Nodes<'_> {
        Nodes {
            inner: self.children.iter(),
        }
    }

    fn section_len(&self) -> usize {
        self.children.len()
    }
}
