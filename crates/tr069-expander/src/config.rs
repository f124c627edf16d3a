//! Expander configuration.
//!
//! Defaults follow TR-069 parameter naming: `.` separates segments and `*`
//! stands for one instance number.

use serde::{Deserialize, Serialize};

use crate::error::{ExpanderError, Result};

pub const DEFAULT_SEPARATOR: char = '.';
pub const DEFAULT_WILDCARD: &str = "*";

/// Settings shared by every pattern added to one expander.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanderConfig {
    /// Segment separator in patterns, prefixes and discovered identifiers.
    pub separator: char,
    /// Token that marks a wildcard segment. Must make up the whole segment.
    pub wildcard: String,
    /// Upper bound on discovery queries issued by `PathExpander::expand_with`.
    pub max_discoveries: Option<usize>,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            wildcard: DEFAULT_WILDCARD.to_string(),
            max_discoveries: None,
        }
    }
}

impl ExpanderConfig {
    /// Creates the default TR-069 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the wildcard token.
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    /// Caps the number of discovery queries a driven expansion may issue.
    pub fn with_max_discoveries(mut self, limit: usize) -> Self {
        self.max_discoveries = Some(limit);
        self
    }

    /// Checks that the wildcard token can be told apart from literal segments.
    pub fn validate(&self) -> Result<()> {
        if self.wildcard.is_empty() {
            return Err(ExpanderError::InvalidConfig(
                "wildcard token must not be empty".to_string(),
            ));
        }
        if self.wildcard.contains(self.separator) {
            return Err(ExpanderError::InvalidConfig(format!(
                "wildcard token {:?} contains the separator {:?}",
                self.wildcard, self.separator
            )));
        }
        if self.separator.is_ascii_digit() {
            return Err(ExpanderError::InvalidConfig(format!(
                "separator {:?} cannot be a digit",
                self.separator
            )));
        }
        if self.max_discoveries == Some(0) {
            return Err(ExpanderError::InvalidConfig(
                "max_discoveries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
