//! Sections: the nested containers a dotted mapping is built from.
//!
//! A section maps string segments to [`Node`]s. A node is either a nested
//! section or an opaque leaf value, so the question "is this value a
//! section?" is answered by the type itself ([`Node::is_section`]) instead
//! of by inspecting the stored value at runtime.
//!
//! Storage backends plug into [`DottedMapping`](crate::DottedMapping) by
//! implementing [`Section`]. Two in-memory backends are provided:
//!
//! - [`TreeSection`] - ordered by segment, deterministic iteration
//! - [`HashSection`] - hashed, iteration order stable while unmodified

pub mod hash;
pub mod tree;

pub use hash::HashSection;
pub use tree::TreeSection;

/// A nested associative container usable as a level of a dotted mapping.
///
/// Implementors supply the `NewSection` primitive ([`Section::new_section`])
/// and plain single-level access to their children. All traversal across
/// levels is done by the mapping engine.
///
/// # Examples
///
/// ```
/// use dotted::section::{Node, Section, TreeSection};
///
/// let mut section = TreeSection::<i64>::new_section();
/// section.insert_node("port".to_string(), Node::leaf(8080));
/// section.insert_node("tls".to_string(), Node::empty_section());
///
/// assert!(section.get_node("tls").is_some_and(Node::is_section));
/// assert_eq!(section.section_len(), 2);
/// ```
pub trait Section: Sized {
    /// The opaque value type stored at leaf slots.
    type Leaf;

    /// Iterator over the direct children of a section.
    type Nodes<'a>: Iterator<Item = (&'a str, &'a Node<Self>)>
    where
        Self: 'a;

    /// Creates a fresh, empty section.
    fn new_section() -> Self;

    /// Looks up a direct child.
    fn get_node(&self, segment: &str) -> Option<&Node<Self>>;

    /// Looks up a direct child for modification.
    fn get_node_mut(&mut self, segment: &str) -> Option<&mut Node<Self>>;

    /// Stores a direct child, returning the node previously stored there.
    fn insert_node(&mut self, segment: String, node: Node<Self>) -> Option<Node<Self>>;

    /// Removes a direct child, returning it if it was present.
    fn remove_node(&mut self, segment: &str) -> Option<Node<Self>>;

    /// Iterates over the direct children in the section's own order.
    fn nodes(&self) -> Self::Nodes<'_>;

    /// Number of direct children (sections and leaves alike).
    fn section_len(&self) -> usize {
        self.nodes().count()
    }

    /// Returns `true` if the section has no direct children.
    fn is_empty_section(&self) -> bool {
        self.nodes().next().is_none()
    }
}

/// A slot in a section: either a nested section or a leaf value.
///
/// With the `json` feature, nodes serialize untagged: a section as a map and
/// a leaf as its own value. On deserialization any map becomes a section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "json",
    serde(
        untagged,
        bound(
            serialize = "S: serde::Serialize, S::Leaf: serde::Serialize",
            deserialize = "S: serde::Deserialize<'de>, S::Leaf: serde::Deserialize<'de>"
        )
    )
)]
pub enum Node<S: Section> {
    Section(S),
    Leaf(S::Leaf),
}

impl<S: Section> Node<S> {
    /// Type name for the Section variant
    pub const SECTION_TYPE: &'static str = "Section";
    /// Type name for the Leaf variant
    pub const LEAF_TYPE: &'static str = "Leaf";

    /// Wraps a value as a leaf node.
    pub fn leaf(value: S::Leaf) -> Self {
        Node::Leaf(value)
    }

    /// Wraps a section as a node.
    pub fn section(section: S) -> Self {
        Node::Section(section)
    }

    /// A node holding a fresh, empty section.
    pub fn empty_section() -> Self {
        Node::Section(S::new_section())
    }

    /// The `IsSection` primitive: `true` if this node is a nested section.
    pub fn is_section(&self) -> bool {
        matches!(self, Node::Section(_))
    }

    /// Returns `true` if this node is a leaf value.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_section(&self) -> Option<&S> {
        match self {
            Node::Section(section) => Some(section),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_section_mut(&mut self) -> Option<&mut S> {
        match self {
            Node::Section(section) => Some(section),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&S::Leaf> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Section(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut S::Leaf> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Section(_) => None,
        }
    }

    pub fn into_section(self) -> Option<S> {
        match self {
            Node::Section(section) => Some(section),
            Node::Leaf(_) => None,
        }
    }

    pub fn into_leaf(self) -> Option<S::Leaf> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Section(_) => None,
        }
    }

    /// Returns a human-readable name for this node type
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Section(_) => Self::SECTION_TYPE,
            Node::Leaf(_) => Self::LEAF_TYPE,
        }
    }
}

/// Deep-copies a section tree over an explicit stack.
///
/// Backends use this for `Clone` so that copying does not consume one call
/// frame per nesting level.
pub(crate) fn clone_section<S>(source: &S) -> S
where
    S: Section,
    S::Leaf: Clone,
{
    // Frame: children left to copy, the copy being built, and the segment
    // the copy is stored under in its parent ("" for the root).
    let mut stack = Vec::new();
    let mut current = (source.nodes(), S::new_section(), String::new());
    loop {
        match current.0.next() {
            Some((segment, Node::Leaf(value))) => {
                current
                    .1
                    .insert_node(segment.to_string(), Node::Leaf(value.clone()));
            }
            Some((segment, Node::Section(child))) => {
                let frame = (child.nodes(), S::new_section(), segment.to_string());
                stack.push(std::mem::replace(&mut current, frame));
            }
            None => match stack.pop() {
                Some(parent) => {
                    let (_, copy, segment) = std::mem::replace(&mut current, parent);
                    current.1.insert_node(segment, Node::Section(copy));
                }
                None => return current.1,
            },
        }
    }
}

/// Structural equality of two section trees, compared over an explicit stack.
///
/// Children are matched by segment, so backends without a stable order
/// compare equal whenever they hold the same nodes.
pub(crate) fn sections_eq<S>(left: &S, right: &S) -> bool
where
    S: Section,
    S::Leaf: PartialEq,
{
    let mut stack = vec![(left, right)];
    while let Some((left, right)) = stack.pop() {
        if left.section_len() != right.section_len() {
            return false;
        }
        for (segment, node) in left.nodes() {
            match (node, right.get_node(segment)) {
                (Node::Leaf(a), Some(Node::Leaf(b))) if a == b => {}
                (Node::Section(a), Some(Node::Section(b))) => stack.push((a, b)),
                _ => return false,
            }
        }
    }
    true
}
