//! Arena index type for tree nodes.

/// A compact 32-bit index into the pattern tree arena.
///
/// Patterns are short and few, so u32 is far more than enough; keeping the
/// index small keeps `TreeNode` child maps and queue waiter lists compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeIndex(u32);

impl NodeIndex {
    /// The tree root. Always present, never a wildcard.
    pub const ROOT: Self = Self(0);

    /// Creates a new NodeIndex from a usize.
    ///
    /// # Panics
    /// Panics if `index` does not fit in a u32.
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(
            index <= u32::MAX as usize,
            "tree node index must fit in u32"
        );
        Self(index as u32)
    }

    /// Returns the index as a usize.
    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}
