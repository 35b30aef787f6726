#[cfg(feature = "trace")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::EvaluationOrder;

// ============================================================================
// Trace types - only populated when "trace" feature is enabled
// ============================================================================

/// One callback invocation.
#[cfg(feature = "trace")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackEvent {
    /// Driver that fired the callback
    pub order: EvaluationOrder,
    /// Level of the driver call that fired the callback
    pub level: usize,
    /// Scope prefix handed to the callback, rendered with `Debug`
    pub prefix: Vec<String>,
    /// Number of elements passed in
    pub input_len: usize,
    /// Number of elements returned
    pub output_len: usize,
}

/// Record of every callback invocation of one queue run, in the order the
/// callbacks returned.
#[cfg(feature = "trace")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTrace {
    pub events: Vec<CallbackEvent>,
}

#[cfg(feature = "trace")]
impl QueueTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Deepest level at which a callback fired.
    pub fn max_level(&self) -> Option<usize> {
        self.events.iter().map(|e| e.level).max()
    }

    /// Events fired at `level`, in order.
    pub fn at_level(&self, level: usize) -> impl Iterator<Item = &CallbackEvent> {
        self.events.iter().filter(move |e| e.level == level)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn record<S: fmt::Debug>(
        &mut self,
        order: EvaluationOrder,
        level: usize,
        prefix: &[S],
        input_len: usize,
        output_len: usize,
    ) {
        self.events.push(CallbackEvent {
            order,
            level,
            prefix: prefix.iter().map(|s| format!("{:?}", s)).collect(),
            input_len,
            output_len,
        });
    }
}

/// Stub type when trace feature is disabled - never actually populated
#[cfg(not(feature = "trace"))]
#[derive(Debug, Clone, Default)]
pub struct QueueTrace {
    _private: (),
}

#[cfg(not(feature = "trace"))]
impl QueueTrace {
    #[inline(always)]
    pub(crate) fn record<S: fmt::Debug>(
        &mut self,
        _order: EvaluationOrder,
        _level: usize,
        _prefix: &[S],
        _input_len: usize,
        _output_len: usize,
    ) {
    }
}
