//! Tree walks driven by the index cache.
//!
//! All walks carry the concrete path built so far in a single `String`
//! buffer where every segment is followed by the separator (`A.B.1.`). At a
//! wildcard node that buffer is exactly the discovery prefix to query, and at
//! a leaf it is the expanded path once the trailing separator is dropped.

use super::node_index::NodeIndex;
use super::node::{NodeFlags, TreeNode};
use super::PatternTree;
use crate::cache::{IndexCache, InstanceIndices};
use crate::error::{ExpanderError, Result};

/// A prefix that must be queried before the wildcard `node` can be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub prefix: String,
    pub node: NodeIndex,
}

/// What `PatternTree::expand` does at a wildcard whose prefix has no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPrefix {
    /// Contribute no paths. Used for progressive inspection mid-discovery.
    Skip,
    /// Report `InternalInconsistency`. Used once discovery is complete.
    Fail,
}

impl PatternTree {
    /// Returns the prefix of every wildcard reachable from the root that has
    /// no cache entry yet.
    ///
    /// Wildcards below an unanswered wildcard are not returned: their prefix
    /// only exists once an outer instance number is known. Answered wildcards
    /// are walked through with their cached indices, so a pattern added after
    /// an earlier expansion only asks for what is still unknown.
    pub fn discovery_prefixes(&self, cache: &IndexCache) -> Vec<Discovery> {
        let mut out = Vec::new();
        let mut path = String::new();
        self.collect_frontier(NodeIndex::ROOT, &mut path, cache, &mut out);
        out
    }

    /// Returns the prefixes that become queryable once the wildcard `node`,
    /// reached through `prefix`, resolved to `indices`.
    ///
    /// For every index the walk follows all literal branches below the
    /// wildcard and stops at the next wildcard on each of them. Branches that
    /// end in literal leaves contribute nothing; those paths are complete.
    pub fn next_level_prefixes(
        &self,
        node: NodeIndex,
        prefix: &str,
        indices: &InstanceIndices,
        cache: &IndexCache,
    ) -> Vec<Discovery> {
        let mut out = Vec::new();
        let mut path = String::with_capacity(prefix.len() + 8);
        for index in indices.iter() {
            path.clear();
            path.push_str(prefix);
            self.push_index(&mut path, index);
            self.collect_frontier(node, &mut path, cache, &mut out);
        }
        out
    }

    /// Expands every pattern into concrete paths using the cached indices.
    ///
    /// A wildcard whose prefix maps to an empty set contributes nothing. The
    /// result is in traversal order and may contain duplicates when a literal
    /// instance number and a wildcard overlap (`A.1.B` and `A.*.B`).
    pub fn expand(&self, cache: &IndexCache, missing: MissingPrefix) -> Result<Vec<String>> {
        let mut out = Vec::new();
        let mut path = String::new();
        self.expand_children(NodeIndex::ROOT, &mut path, cache, missing, &mut out)?;
        Ok(out)
    }

    fn collect_frontier(
        &self,
        parent: NodeIndex,
        path: &mut String,
        cache: &IndexCache,
        out: &mut Vec<Discovery>,
    ) {
        let node = self.node(parent);
        let base = path.len();

        for (segment, child) in node.literal_children() {
            self.push_segment(path, segment);
            self.collect_frontier(child, path, cache, out);
            path.truncate(base);
        }

        let Some(wildcard) = node.wildcard_child() else {
            return;
        };
        match cache.get(path.as_str()) {
            Some(indices) => {
                for index in indices.iter() {
                    self.push_index(path, index);
                    self.collect_frontier(wildcard, path, cache, out);
                    path.truncate(base);
                }
            }
            None => out.push(Discovery {
                prefix: path.clone(),
                node: wildcard,
            }),
        }
    }

    fn expand_children(
        &self,
        parent: NodeIndex,
        path: &mut String,
        cache: &IndexCache,
        missing: MissingPrefix,
        out: &mut Vec<String>,
    ) -> Result<()> {
        let node = self.node(parent);
        let base = path.len();

        for (segment, child) in node.literal_children() {
            self.push_segment(path, segment);
            self.expand_node(child, path, cache, missing, out)?;
            path.truncate(base);
        }

        let Some(wildcard) = node.wildcard_child() else {
            return Ok(());
        };
        let Some(indices) = cache.get(path.as_str()) else {
            return match missing {
                MissingPrefix::Skip => Ok(()),
                MissingPrefix::Fail => {
                    log::error!("no cached indices for reachable wildcard prefix {path:?}");
                    Err(ExpanderError::InternalInconsistency(format!(
                        "wildcard prefix {path:?} was never discovered"
                    )))
                }
            };
        };
        for index in indices.iter() {
            self.push_index(path, index);
            self.expand_node(wildcard, path, cache, missing, out)?;
            path.truncate(base);
        }
        Ok(())
    }

    /// Emits `path` for a leaf node, then continues below it.
    fn expand_node(
        &self,
        index: NodeIndex,
        path: &mut String,
        cache: &IndexCache,
        missing: MissingPrefix,
        out: &mut Vec<String>,
    ) -> Result<()> {
        let node: &TreeNode = self.node(index);
        if node.flags().contains(NodeFlags::LEAF) {
            let end = path.len() - self.separator.len_utf8();
            out.push(path[..end].to_string());
        }
        if node.flags().contains(NodeFlags::OBJECT_LEAF) {
            out.push(path.clone());
        }
        self.expand_children(index, path, cache, missing, out)
    }

    fn push_segment(&self, path: &mut String, segment: &str) {
        path.push_str(segment);
        path.push(self.separator);
    }

    fn push_index(&self, path: &mut String, index: u32) {
        use std::fmt::Write;

        let _ = write!(path, "{index}{}", self.separator);
    }
}
