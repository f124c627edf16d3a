#[derive(Debug, thiserror::Error)]
pub enum ExpanderError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("No outstanding discovery request; call next() first")]
    NoOutstandingRequest,

    #[error("Prefix mismatch: expected {expected:?}, got {actual:?}")]
    PrefixMismatch { expected: String, actual: String },

    #[error("Expansion not complete: {pending} pending, outstanding {outstanding:?}")]
    NotComplete {
        pending: usize,
        outstanding: Option<String>,
    },

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Discovery failed for {prefix:?}: {source}")]
    Discovery {
        prefix: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Discovery limit of {0} queries exceeded")]
    DiscoveryLimit(usize),
}

pub type Result<T> = std::result::Result<T, ExpanderError>;
