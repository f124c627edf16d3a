//! PathExpander - main API for wildcard expansion.
//!
//! The expander is a call-and-response state machine. The caller adds
//! patterns, then loops on `next()` / `register()` performing one discovery
//! query (e.g. a TR-069 `GetParameterNames` with `NextLevel=true`) per
//! prefix, and finally calls `collect()`.
//!
//! ```
//! use tr069_expander::PathExpander;
//!
//! let mut expander = PathExpander::new();
//! expander.add(["Device.WiFi.AccessPoint.*.Enable"])?;
//!
//! while let Some(prefix) = expander.next() {
//!     assert_eq!(prefix, "Device.WiFi.AccessPoint.");
//!     expander.register(&["Device.WiFi.AccessPoint.1", "Device.WiFi.AccessPoint.2"])?;
//! }
//!
//! assert_eq!(
//!     expander.collect()?,
//!     vec![
//!         "Device.WiFi.AccessPoint.1.Enable",
//!         "Device.WiFi.AccessPoint.2.Enable",
//!     ]
//! );
//! # Ok::<(), tr069_expander::ExpanderError>(())
//! ```

use std::collections::BTreeSet;

use crate::cache::{IndexCache, InstanceIndices};
use crate::config::ExpanderConfig;
use crate::error::{ExpanderError, Result};
use crate::extract::extract_indices;
use crate::pattern::Pattern;
use crate::queue::{add_waiter, PendingQueue};
use crate::tree::{Discovery, MissingPrefix, NodeIndex, PatternTree};


/// The single discovery request handed out by `next()` and not yet answered.
#[derive(Debug)]
struct Outstanding {
    prefix: String,
    waiters: Vec<NodeIndex>,
}

/// Incremental discovery and expansion engine.
///
/// Completion is derived, never tracked: the expander is complete exactly
/// when nothing is queued and nothing is outstanding.
#[derive(Debug)]
pub struct PathExpander {
    config: ExpanderConfig,
    tree: PatternTree,
    cache: IndexCache,
    queue: PendingQueue,
    outstanding: Option<Outstanding>,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    /// Creates an expander for TR-069 paths (`.` separator, `*` wildcard).
    pub fn new() -> Self {
        Self::from_validated(ExpanderConfig::default())
    }

    /// Creates an expander with a custom configuration.
    pub fn with_config(config: ExpanderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: ExpanderConfig) -> Self {
        Self {
            tree: PatternTree::new(config.separator),
            cache: IndexCache::new(),
            queue: PendingQueue::new(),
            outstanding: None,
            config,
        }
    }

    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Adds patterns to the expansion.
    ///
    /// Every pattern is parsed before any is applied: the first invalid one
    /// fails the whole call with `InvalidPattern` and leaves the expander
    /// untouched. Patterns without wildcards are resolved immediately.
    ///
    /// Adding after a completed expansion reopens it: prefixes already in
    /// the cache are reused, and only wildcards that are still unknown are
    /// queued. Call `reset()` instead when starting an unrelated expansion.
    pub fn add<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = patterns
            .into_iter()
            .map(|raw| Pattern::parse(raw.as_ref(), &self.config))
            .collect::<Result<Vec<_>>>()?;

        for pattern in &parsed {
            self.tree.add_pattern(pattern);
        }
        log::debug!(
            "added {} pattern(s), tree has {} node(s)",
            parsed.len(),
            self.tree.len()
        );

        for discovery in self.tree.discovery_prefixes(&self.cache) {
            self.schedule(discovery);
        }
        Ok(())
    }

    /// Returns the next prefix to query, or `None` once discovery is done.
    ///
    /// While a prefix is outstanding, calling `next()` again returns the same
    /// prefix rather than skipping it.
    pub fn next(&mut self) -> Option<String> {
        if let Some(outstanding) = &self.outstanding {
            return Some(outstanding.prefix.clone());
        }

        let Some((prefix, waiters)) = self.queue.pop_front() else {
            log::debug!("discovery complete after {} query(ies)", self.cache.len());
            return None;
        };
        self.outstanding = Some(Outstanding {
            prefix: prefix.clone(),
            waiters,
        });
        Some(prefix)
    }

    /// Answers the outstanding prefix with the identifiers the device
    /// reported under it.
    ///
    /// An empty answer is final: the branch contributes no paths and is not
    /// asked again.
    pub fn register<S>(&mut self, identifiers: &[S]) -> Result<()>
    where
        S: AsRef<str>,
    {
        let Some(Outstanding { prefix, waiters }) = self.outstanding.take() else {
            log::warn!("register called with no outstanding discovery request");
            return Err(ExpanderError::NoOutstandingRequest);
        };

        let indices = extract_indices(&prefix, identifiers, self.config.separator);
        log::debug!(
            "prefix {prefix:?} resolved to {} instance(s) from {} identifier(s)",
            indices.len(),
            identifiers.len()
        );

        let discoveries: Vec<Discovery> = waiters
            .iter()
            .flat_map(|&node| {
                self.tree
                    .next_level_prefixes(node, &prefix, &indices, &self.cache)
            })
            .collect();
        self.cache.insert(prefix, indices);

        for discovery in discoveries {
            self.schedule(discovery);
        }
        Ok(())
    }

    /// Like `register`, but first checks that `prefix` is the outstanding one.
    ///
    /// `prefix` may be given with or without its trailing separator.
    pub fn register_for<S>(&mut self, prefix: &str, identifiers: &[S]) -> Result<()>
    where
        S: AsRef<str>,
    {
        let Some(outstanding) = &self.outstanding else {
            log::warn!("register_for({prefix:?}) with no outstanding discovery request");
            return Err(ExpanderError::NoOutstandingRequest);
        };

        let expected = outstanding.prefix.as_str();
        let matches = expected == prefix
            || expected
                .strip_suffix(self.config.separator)
                .is_some_and(|trimmed| trimmed == prefix);
        if !matches {
            log::warn!("register_for({prefix:?}) while {expected:?} is outstanding");
            return Err(ExpanderError::PrefixMismatch {
                expected: expected.to_string(),
                actual: prefix.to_string(),
            });
        }
        self.register(identifiers)
    }

    /// Returns every expanded path, sorted and deduplicated.
    ///
    /// Fails with `NotComplete` while prefixes are queued or outstanding;
    /// driving `next()` / `register()` is the caller's job. Repeated calls
    /// return the same list.
    pub fn collect(&self) -> Result<Vec<String>> {
        if !self.is_complete() {
            return Err(ExpanderError::NotComplete {
                pending: self.queue.len(),
                outstanding: self.outstanding().map(str::to_string),
            });
        }
        let paths = self.tree.expand(&self.cache, MissingPrefix::Fail)?;
        Ok(sorted_unique(paths))
    }

    /// Returns the paths resolvable from what has been discovered so far.
    ///
    /// Unlike `collect()`, this never fails; branches still waiting for an
    /// answer are left out.
    pub fn snapshot(&self) -> Vec<String> {
        let paths = self
            .tree
            .expand(&self.cache, MissingPrefix::Skip)
            .unwrap_or_default();
        sorted_unique(paths)
    }

    /// Clears patterns, cache, queue and outstanding request.
    ///
    /// Allocations are kept, which is what makes pooling worthwhile.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.cache.clear();
        self.queue.clear();
        self.outstanding = None;
    }

    /// Returns true when nothing is queued and nothing is outstanding.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty() && self.outstanding.is_none()
    }

    /// The prefix handed out by `next()` and awaiting `register()`.
    pub fn outstanding(&self) -> Option<&str> {
        self.outstanding
            .as_ref()
            .map(|outstanding| outstanding.prefix.as_str())
    }

    /// Number of queued prefixes, not counting the outstanding one.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued prefixes in the order `next()` will hand them out.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter()
    }

    /// The answer registered for `prefix`, if any.
    pub fn cached_indices(&self, prefix: &str) -> Option<&InstanceIndices> {
        self.cache.get(prefix)
    }

    /// Number of prefixes answered so far.
    pub fn discoveries(&self) -> usize {
        self.cache.len()
    }

    /// Queues a discovery unless it is already outstanding or queued, in
    /// which case its node joins the existing request.
    fn schedule(&mut self, discovery: Discovery) {
        if let Some(outstanding) = self.outstanding.as_mut() {
            if outstanding.prefix == discovery.prefix {
                add_waiter(&mut outstanding.waiters, discovery.node);
                return;
            }
        }
        if self.cache.contains(&discovery.prefix) {
            log::debug!("skipping cached prefix {:?}", discovery.prefix);
            return;
        }

        let prefix = discovery.prefix.clone();
        if self.queue.enqueue(discovery) {
            log::debug!("queued discovery prefix {prefix:?}");
        }
    }
}

fn sorted_unique(paths: Vec<String>) -> Vec<String> {
    paths
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
