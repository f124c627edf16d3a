//! Pattern parsing.
//!
//! A pattern is a separator-joined list of segments where a segment equal to
//! the wildcard token stands for exactly one instance number, e.g.
//! `Device.WiFi.AccessPoint.*.Enable`. A trailing separator marks a TR-069
//! partial path (an object rather than a parameter) and is kept on every
//! expanded path.

use std::fmt;

use crate::config::ExpanderConfig;
use crate::error::{ExpanderError, Result};

/// One position in a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(Box<str>),
    Wildcard,
}

impl Segment {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// A parsed, immutable pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
    object_path: bool,
}

impl Pattern {
    /// Parses `raw` using the separator and wildcard token from `config`.
    pub fn parse(raw: &str, config: &ExpanderConfig) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(ExpanderError::InvalidPattern(
                "pattern must not be empty".to_string(),
            ));
        }

        let (body, object_path) = match raw.strip_suffix(config.separator) {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let mut segments = Vec::new();
        for (position, text) in body.split(config.separator).enumerate() {
            if text.is_empty() {
                return Err(ExpanderError::InvalidPattern(format!(
                    "{raw:?}: empty segment at position {position}"
                )));
            }
            if text == config.wildcard {
                segments.push(Segment::Wildcard);
            } else if text.contains(config.wildcard.as_str()) {
                return Err(ExpanderError::InvalidPattern(format!(
                    "{raw:?}: segment {text:?} mixes the wildcard {:?} with other text",
                    config.wildcard
                )));
            } else {
                segments.push(Segment::Literal(text.into()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            object_path,
        })
    }

    /// The text the pattern was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true for TR-069 partial paths (trailing separator).
    pub fn is_object_path(&self) -> bool {
        self.object_path
    }

    pub fn wildcard_count(&self) -> usize {
        self.segments.iter().filter(|segment| segment.is_wildcard()).count()
    }

    /// A pattern without wildcards needs no discovery.
    pub fn is_resolved(&self) -> bool {
        self.wildcard_count() == 0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
