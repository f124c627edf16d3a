//! Pattern tree merging every active pattern.
//!
//! Patterns are stored as a trie in an arena (`Vec<TreeNode>` addressed by
//! `NodeIndex`), so common prefixes, including common wildcard ancestors,
//! exist exactly once. The walks that turn the tree plus the index cache into
//! discovery prefixes and concrete paths live in `walk`.
//!
//! ## Module Structure
//!
//! - `node_index` - Compact arena index (`NodeIndex`)
//! - `node` - Tree node and its flags (`TreeNode`, `NodeFlags`)
//! - `walk` - Discovery frontier and expansion walks

mod node;
mod node_index;
mod walk;

pub use node::{NodeFlags, TreeNode};
pub use node_index::NodeIndex;
pub use walk::{Discovery, MissingPrefix};

use crate::pattern::{Pattern, Segment};

/// Arena-backed trie of patterns.
#[derive(Debug)]
pub struct PatternTree {
    nodes: Vec<TreeNode>,
    separator: char,
}

impl PatternTree {
    /// Creates an empty tree joining segments with `separator`.
    pub fn new(separator: char) -> Self {
        Self {
            nodes: vec![TreeNode::root()],
            separator,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Inserts the pattern's segment chain and marks its terminal node.
    ///
    /// Adding the same pattern twice leaves the tree unchanged. Returns the
    /// terminal node.
    pub fn add_pattern(&mut self, pattern: &Pattern) -> NodeIndex {
        let mut current = NodeIndex::ROOT;
        for segment in pattern.segments() {
            current = match segment {
                Segment::Literal(text) => self.literal_child_or_insert(current, text),
                Segment::Wildcard => self.wildcard_child_or_insert(current),
            };
        }

        let flag = if pattern.is_object_path() {
            NodeFlags::OBJECT_LEAF
        } else {
            NodeFlags::LEAF
        };
        self.node_mut(current).mark(flag);
        current
    }

    /// Gets a node by its index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.get()]
    }

    #[inline]
    fn node_mut(&mut self, index: NodeIndex) -> &mut TreeNode {
        &mut self.nodes[index.get()]
    }

    /// Returns the number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no pattern has been added.
    pub fn is_empty(&self) -> bool {
        !self.node(NodeIndex::ROOT).has_children()
    }

    /// Drops every pattern, keeping the arena allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(TreeNode::root());
    }

    fn push(&mut self, node: TreeNode) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    fn literal_child_or_insert(&mut self, parent: NodeIndex, segment: &str) -> NodeIndex {
        if let Some(existing) = self.node(parent).literal_child(segment) {
            return existing;
        }
        let index = self.push(TreeNode::literal(segment));
        self.node_mut(parent).insert_literal_child(segment, index);
        index
    }

    fn wildcard_child_or_insert(&mut self, parent: NodeIndex) -> NodeIndex {
        if let Some(existing) = self.node(parent).wildcard_child() {
            return existing;
        }
        let index = self.push(TreeNode::wildcard());
        self.node_mut(parent).set_wildcard_child(index);
        index
    }
}
