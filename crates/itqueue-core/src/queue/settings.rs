use serde::{Deserialize, Serialize};

use crate::error::{QueueError, Result};
use crate::types::EvaluationOrder;

/// Settings for a [`Queue`](super::Queue).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueSettings {
    /// Driver used by [`Queue::run`](super::Queue::run).
    /// [`Queue::process`](super::Queue::process) always divides first.
    pub order: EvaluationOrder,

    /// Deepest nesting level the queue may subdivide.
    /// Elements with more scope descriptors than this abort processing
    /// with [`QueueError::DepthLimitExceeded`]. `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl QueueSettings {
    /// Creates a new instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the evaluation order used by `Queue::run`.
    pub fn with_order(mut self, order: EvaluationOrder) -> Self {
        self.order = order;
        self
    }

    /// Bounds the subdivision depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Removes any depth bound.
    pub fn without_depth_limit(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Fails if a run keyed at `level` may not be subdivided.
    pub fn check_depth(&self, level: usize) -> Result<()> {
        match self.max_depth {
            Some(limit) if level > limit => Err(QueueError::DepthLimitExceeded { level, limit }),
            _ => Ok(()),
        }
    }
}
