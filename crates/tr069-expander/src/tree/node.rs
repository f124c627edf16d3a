//! Pattern tree node.

use std::collections::BTreeMap;

use bitflags::bitflags;

use super::node_index::NodeIndex;

bitflags! {
    /// Role of a node within the merged patterns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// The segment is the wildcard token.
        const WILDCARD = 1 << 0;
        /// At least one pattern ends here (`A.B`).
        const LEAF = 1 << 1;
        /// At least one partial-path pattern ends here (`A.B.`).
        const OBJECT_LEAF = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// One segment position shared by every pattern passing through it.
///
/// Literal children are kept in an ordered map for deterministic traversal.
/// The wildcard child lives in its own slot, so a node can never have two.
#[derive(Debug, Default)]
pub struct TreeNode {
    segment: Box<str>,
    flags: NodeFlags,
    children: BTreeMap<Box<str>, NodeIndex>,
    wildcard: Option<NodeIndex>,
}

impl TreeNode {
    pub(super) fn root() -> Self {
        Self::default()
    }

    pub(super) fn literal(segment: &str) -> Self {
        Self {
            segment: segment.into(),
            ..Self::default()
        }
    }

    pub(super) fn wildcard() -> Self {
        Self {
            flags: NodeFlags::WILDCARD,
            ..Self::default()
        }
    }

    /// The literal token; empty for the root and for wildcard nodes.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.flags.contains(NodeFlags::WILDCARD)
    }

    /// Returns true if a parameter or partial-path pattern ends here.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.flags
            .intersects(NodeFlags::LEAF | NodeFlags::OBJECT_LEAF)
    }

    pub fn literal_child(&self, segment: &str) -> Option<NodeIndex> {
        self.children.get(segment).copied()
    }

    pub fn wildcard_child(&self) -> Option<NodeIndex> {
        self.wildcard
    }

    /// Literal children in segment order.
    pub fn literal_children(&self) -> impl Iterator<Item = (&str, NodeIndex)> {
        self.children
            .iter()
            .map(|(segment, index)| (segment.as_ref(), *index))
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty() || self.wildcard.is_some()
    }

    pub(super) fn mark(&mut self, flag: NodeFlags) {
        self.flags.insert(flag);
    }

    pub(super) fn insert_literal_child(&mut self, segment: &str, index: NodeIndex) {
        self.children.insert(segment.into(), index);
    }

    pub(super) fn set_wildcard_child(&mut self, index: NodeIndex) {
        debug_assert!(self.wildcard.is_none(), "node already has a wildcard child");
        self.wildcard = Some(index);
    }
}
