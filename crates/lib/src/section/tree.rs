//! An ordered in-memory section.
//!
//! `TreeSection` keeps its children in a `BTreeMap`, so iteration (and
//! therefore the flattened key order of a mapping built from it) is sorted
//! by segment and fully deterministic.

use std::collections::{BTreeMap, btree_map};

use super::{Node, Section, clone_section, sections_eq};

/// A section backed by a `BTreeMap`, iterating in segment order.
///
/// # Examples
///
/// ```
/// use dotted::{DottedMapping, TreeSection};
///
/// let mut config = DottedMapping::<TreeSection<i64>>::empty();
/// config.set_leaf("b.x", 2)?;
/// config.set_leaf("a", 1)?;
///
/// let keys: Vec<String> = config.keys().collect();
/// assert_eq!(keys, vec!["a", "b.x"]);
/// # Ok::<(), dotted::MappingError>(())
/// ```
#[derive(Debug, Eq)]
#[cfg_attr(
    feature = "json",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TreeSection<V> {
    children: BTreeMap<String, Node<TreeSection<V>>>,
}

impl<V> TreeSection<V> {
    /// Create a new empty `TreeSection`.
    pub fn new() -> Self {
        Self {
            children: BTreeMap::new(),
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

    /// Get a reference to the internal BTreeMap.
    pub fn as_btreemap(&self) -> &BTreeMap<String, Node<TreeSection<V>>> {
        &self.children
    }
}

impl<V> Default for TreeSection<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TreeSection<V> {
    fn clone(&self) -> Self {
        clone_section(self)
    }
}

impl<V: PartialEq> PartialEq for TreeSection<V> {
    fn eq(&self, other: &Self) -> bool {
        sections_eq(self, other)
    }
}

impl<V> Drop for TreeSection<V> {
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

impl<V> From<BTreeMap<String, Node<TreeSection<V>>>> for TreeSection<V> {
    fn from(children: BTreeMap<String, Node<TreeSection<V>>>) -> Self {
        Self { children }
    }
}

impl<V> FromIterator<(String, Node<TreeSection<V>>)> for TreeSection<V> {
    fn from_iter<I: IntoIterator<Item = (String, Node<TreeSection<V>>)>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

/// Iterator over the direct children of a [`TreeSection`].
pub struct Nodes<'a, V> {
    inner: btree_map::Iter<'a, String, Node<TreeSection<V>>>,
}

impl<'a, V> Iterator for Nodes<'a, V> {
    type Item = (&'a str, &'a Node<TreeSection<V>>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(segment, node)| (segment.as_str(), node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> Section for TreeSection<V> {
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

    fn is_empty_section(&self) -> bool {
        self.children.is_empty()
    }
}
