//! Ordered, deduplicated queue of prefixes awaiting discovery.

use std::collections::VecDeque;

use fnv::FnvHashMap;

use crate::tree::{Discovery, NodeIndex};

/// Prefixes waiting to be handed out by `PathExpander::next`, in FIFO order.
///
/// Each prefix appears at most once. Several wildcard nodes can wait on the
/// same prefix text (for example `A.1.B.*` next to `A.*.B.*` once `A.` has
/// answered `1`); they share a single query and are all resumed when it is
/// answered.
#[derive(Debug, Default)]
pub struct PendingQueue {
    order: VecDeque<String>,
    waiters: FnvHashMap<String, Vec<NodeIndex>>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `discovery.prefix` unless already queued, in which case its
    /// node is recorded as another waiter.
    ///
    /// Returns true if the prefix was newly queued.
    pub fn enqueue(&mut self, discovery: Discovery) -> bool {
        let Discovery { prefix, node } = discovery;
        if let Some(nodes) = self.waiters.get_mut(prefix.as_str()) {
            add_waiter(nodes, node);
            return false;
        }
        self.order.push_back(prefix.clone());
        self.waiters.insert(prefix, vec![node]);
        true
    }

    /// Removes the oldest prefix together with the nodes waiting on it.
    pub fn pop_front(&mut self) -> Option<(String, Vec<NodeIndex>)> {
        let prefix = self.order.pop_front()?;
        let nodes = self.waiters.remove(prefix.as_str()).unwrap_or_default();
        Some((prefix, nodes))
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.waiters.contains_key(prefix)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Queued prefixes in the order they will be handed out.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.waiters.clear();
    }
}

/// Records `node` as waiting, ignoring repeats.
pub(crate) fn add_waiter(nodes: &mut Vec<NodeIndex>, node: NodeIndex) {
    if !nodes.contains(&node) {
        nodes.push(node);
    }
}
