//! Pluggable discovery transport and the loop that drives it.
//!
//! The expander never talks to a device itself. Callers that have a
//! synchronous way to list the children of a prefix can implement
//! `Discoverer` (or pass a closure) and let `PathExpander::expand_with` run
//! the whole `next` / `register` loop.

use crate::error::{ExpanderError, Result};
use crate::expander::PathExpander;

/// Boxed error type accepted from discoverers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Lists the identifiers below a discovery prefix.
///
/// For TR-069 this is a `GetParameterNames(prefix, NextLevel=true)` call;
/// the returned names are matched against the prefix by the expander, so
/// extra entries are harmless.
pub trait Discoverer {
    type Error: Into<BoxError>;

    fn discover(&mut self, prefix: &str) -> std::result::Result<Vec<String>, Self::Error>;
}

impl<F, E> Discoverer for F
where
    F: FnMut(&str) -> std::result::Result<Vec<String>, E>,
    E: Into<BoxError>,
{
    type Error = E;

    fn discover(&mut self, prefix: &str) -> std::result::Result<Vec<String>, E> {
        self(prefix)
    }
}

impl PathExpander {
    /// Runs discovery to completion with `discoverer` and collects the paths.
    ///
    /// A discoverer failure is returned as `ExpanderError::Discovery` and
    /// leaves the failed prefix outstanding, so calling `expand_with` again
    /// retries it. When `max_discoveries` is configured, exceeding it returns
    /// `DiscoveryLimit`.
    pub fn expand_with<D>(&mut self, discoverer: &mut D) -> Result<Vec<String>>
    where
        D: Discoverer + ?Sized,
    {
        let limit = self.config().max_discoveries;
        let mut issued = 0usize;

        while let Some(prefix) = self.next() {
            if let Some(limit) = limit {
                if issued >= limit {
                    log::warn!("discovery limit {limit} reached with {prefix:?} pending");
                    return Err(ExpanderError::DiscoveryLimit(limit));
                }
            }
            issued += 1;

            let identifiers = discoverer.discover(&prefix).map_err(|error| {
                let source: BoxError = error.into();
                log::warn!("discovery of {prefix:?} failed: {source}");
                ExpanderError::Discovery {
                    prefix: prefix.clone(),
                    source,
                }
            })?;
            self.register(&identifiers)?;
        }

        self.collect()
    }
}
