//! Reuse pool for expanders.
//!
//! Expanding the same handful of patterns per device session allocates a
//! tree, a cache and a queue each time. The pool keeps reset expanders around
//! so those allocations are reused. Pooling has no effect on results: every
//! expander handed out is indistinguishable from `PathExpander::new()`.
//!
//! ## Global EXPANDER_POOL
//!
//! A process-wide pool with the default TR-069 configuration is available
//! through `ExpanderPool::global()`.

use std::ops::{Deref, DerefMut};
use std::sync::LazyLock;

use parking_lot::Mutex;

use crate::config::ExpanderConfig;
use crate::error::Result;
use crate::expander::PathExpander;

/// Global pool of default-configured expanders.
pub static EXPANDER_POOL: LazyLock<ExpanderPool> = LazyLock::new(ExpanderPool::default);

/// A pool of idle, reset expanders sharing one configuration.
pub struct ExpanderPool {
    idle: Mutex<Vec<PathExpander>>,
    config: ExpanderConfig,
    max_idle: usize,
}

impl std::fmt::Debug for ExpanderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpanderPool")
            .field("idle", &self.idle.lock().len())
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

impl Default for ExpanderPool {
    fn default() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            config: ExpanderConfig::default(),
            max_idle: Self::DEFAULT_MAX_IDLE,
        }
    }
}

impl ExpanderPool {
    /// Idle expanders kept by default; extra returns are dropped.
    pub const DEFAULT_MAX_IDLE: usize = 16;

    /// Creates a pool whose expanders use `config`.
    pub fn new(config: ExpanderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Sets how many idle expanders the pool retains.
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Returns the process-wide pool.
    pub fn global() -> &'static ExpanderPool {
        &EXPANDER_POOL
    }

    /// Takes an expander from the pool, creating one if none is idle.
    ///
    /// The expander goes back to the pool, reset, when the guard is dropped.
    pub fn acquire(&self) -> PooledExpander<'_> {
        let expander = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| PathExpander::from_validated(self.config.clone()));
        PooledExpander {
            pool: self,
            expander: Some(expander),
        }
    }

    /// Number of idle expanders currently held.
    pub fn idle_len(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, mut expander: PathExpander) {
        expander.reset();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(expander);
        }
    }
}

/// An expander borrowed from an `ExpanderPool`.
#[derive(Debug)]
pub struct PooledExpander<'a> {
    pool: &'a ExpanderPool,
    expander: Option<PathExpander>,
}

impl PooledExpander<'_> {
    /// Detaches the expander from the pool, keeping its cache and patterns.
    pub fn into_inner(mut self) -> PathExpander {
        self.expander
            .take()
            .expect("pooled expander is present until dropped")
    }
}

impl Deref for PooledExpander<'_> {
    type Target = PathExpander;

    fn deref(&self) -> &PathExpander {
        self.expander
            .as_ref()
            .expect("pooled expander is present until dropped")
    }
}

impl DerefMut for PooledExpander<'_> {
    fn deref_mut(&mut self) -> &mut PathExpander {
        self.expander
            .as_mut()
            .expect("pooled expander is present until dropped")
    }
}

impl Drop for PooledExpander<'_> {
    fn drop(&mut self) {
        if let Some(expander) = self.expander.take() {
            self.pool.release(expander);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquired_expander_is_fresh() {
        let pool = ExpanderPool::default();
        {
            let mut expander = pool.acquire();
            expander.add(["A.*.B"]).expect("valid pattern");
            assert_eq!(expander.next().as_deref(), Some("A."));
        }
        assert_eq!(pool.idle_len(), 1);

        let mut expander = pool.acquire();
        assert_eq!(pool.idle_len(), 0);
        assert!(expander.is_complete());
        assert_eq!(expander.next(), None);
        assert!(expander.collect().expect("complete").is_empty());
    }

    #[test]
    fn pool_respects_max_idle() {
        let pool = ExpanderPool::default().with_max_idle(1);
        let first = pool.acquire();
        let second = pool.acquire();
        drop(first);
        drop(second);
        assert_eq!(pool.idle_len(), 1);
    }

    #[test]
    fn into_inner_keeps_state_out_of_the_pool() {
        let pool = ExpanderPool::default();
        let mut pooled = pool.acquire();
        pooled.add(["A.*"]).expect("valid pattern");
        let mut expander = pooled.into_inner();
        assert_eq!(pool.idle_len(), 0);
        assert_eq!(expander.next().as_deref(), Some("A."));
    }

    #[test]
    fn pool_uses_its_config() {
        let config = ExpanderConfig::new().with_separator('/');
        let pool = ExpanderPool::new(config).expect("valid config");
        let mut expander = pool.acquire();
        expander.add(["a/*/b"]).expect("valid pattern");
        assert_eq!(expander.next().as_deref(), Some("a/"));
    }

    #[test]
    fn pool_rejects_invalid_config() {
        let config = ExpanderConfig::new().with_wildcard("");
        assert!(ExpanderPool::new(config).is_err());
    }

    #[test]
    fn global_pool_hands_out_default_expanders() {
        let expander = ExpanderPool::global().acquire();
        assert_eq!(expander.config(), &ExpanderConfig::default());
    }
}
