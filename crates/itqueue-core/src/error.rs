use thiserror::Error;

/// Failures raised by the queue itself.
///
/// Errors produced by a callback or key hook are never wrapped in this type;
/// they reach the caller exactly as the collaborator returned them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Invalid nesting level {level}: levels start at 1")]
    InvalidLevel { level: usize },

    #[error("Nesting level {level} exceeds the configured depth limit of {limit}")]
    DepthLimitExceeded { level: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, QueueError>;
