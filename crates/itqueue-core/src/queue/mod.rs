mod callback;
mod key;
mod processor;
mod settings;
mod trace;

pub use callback::{Callback, FnKeyHook, KeyHook, NoKeyHook};
pub use key::{derive_key, scan_runs, Key, Run};
pub use processor::Queue;
pub use settings::QueueSettings;
#[cfg(feature = "trace")]
pub use trace::CallbackEvent;
pub use trace::QueueTrace;
