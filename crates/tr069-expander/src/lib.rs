//! TR-069 wildcard path expansion library.
//!
//! This crate resolves parameter-path patterns such as
//! `InternetGatewayDevice.LANDevice.*.WLANConfiguration.*.SSID` into the
//! concrete paths present on a device, one discovery query at a time:
//! - Pattern parsing with configurable separator and wildcard token
//! - A shared pattern tree so common wildcard ancestors are queried once
//! - A write-once index cache and a deduplicated discovery queue
//! - Index extraction from raw `GetParameterNames` responses
//! - An optional driver loop and a reuse pool
//!
//! The transport is left to the caller: `PathExpander::next` hands out the
//! prefix to query and `PathExpander::register` takes the answer.

pub mod cache;
pub mod config;
pub mod discover;
pub mod error;
pub mod expander;
pub mod extract;
pub mod pattern;
pub mod pool;
pub mod queue;
pub mod tree;

// Re-export main types
pub use cache::{IndexCache, InstanceIndices};
pub use config::ExpanderConfig;
pub use discover::{BoxError, Discoverer};
pub use error::{ExpanderError, Result};
pub use expander::PathExpander;
pub use extract::extract_indices;
pub use pattern::{Pattern, Segment};
pub use pool::{ExpanderPool, PooledExpander, EXPANDER_POOL};
