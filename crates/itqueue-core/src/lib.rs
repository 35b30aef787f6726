//! Divide-and-conquer processing of IR elements nested in iteration spaces.
//!
//! Elements carry a stack of scope descriptors, outermost first. A [`Queue`]
//! splits a flat element sequence into contiguous runs sharing a scope prefix,
//! one nesting level at a time, and applies a caller supplied [`Callback`] to
//! the runs, either after (fdta) or before (fatd) dividing them further.

pub mod error;
pub mod types;
pub mod util;
pub mod queue;

pub use error::{QueueError, Result};
pub use types::{EvaluationOrder, Scoped};

pub use queue::{
    derive_key, scan_runs, Callback, FnKeyHook, Key, KeyHook, NoKeyHook, Queue, QueueSettings,
    QueueTrace, Run,
};
#[cfg(feature = "trace")]
pub use queue::CallbackEvent;
