use tracing::{debug, instrument, trace};

use crate::error::QueueError;
use crate::types::{EvaluationOrder, Scoped};

use super::callback::{Callback, FnKeyHook, KeyHook, NoKeyHook};
use super::key::scan_runs;
use super::settings::QueueSettings;
use super::trace::QueueTrace;

/// Processes elements nested in iteration spaces with a divide-and-conquer
/// algorithm.
///
/// The input is split into contiguous runs of elements sharing the same scope
/// prefix, one nesting level at a time, and `callback` is applied to each run.
/// Depending on the driver the callback fires after the runs of the next
/// level have been processed ([`process_fdta`](Self::process_fdta), "first
/// divide then apply") or before dividing them further
/// ([`process_fatd`](Self::process_fatd), "first apply then divide").
///
/// The queue holds nothing but its configuration, so one instance can serve
/// any number of independent, possibly concurrent, invocations.
#[derive(Debug, Clone)]
pub struct Queue<C, H = NoKeyHook> {
    callback: C,
    key_hook: H,
    settings: QueueSettings,
}

impl<C> Queue<C> {
    /// Creates a queue around `callback`, grouping purely by scope prefix.
    pub fn new(callback: C) -> Self {
        Self {
            callback,
            key_hook: NoKeyHook,
            settings: QueueSettings::default(),
        }
    }
}

impl<C, H> Queue<C, H> {
    /// Replaces the key hook.
    pub fn with_key_hook<H2>(self, key_hook: H2) -> Queue<C, H2> {
        Queue {
            callback: self.callback,
            key_hook,
            settings: self.settings,
        }
    }

    /// Uses a closure `Fn(&T, usize) -> Result<K, E>` as key hook.
    pub fn with_key_fn<F, K>(self, key_fn: F) -> Queue<C, FnKeyHook<F, K>> {
        self.with_key_hook(FnKeyHook::new(key_fn))
    }

    pub fn with_settings(mut self, settings: QueueSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &QueueSettings {
        &self.settings
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn key_hook(&self) -> &H {
        &self.key_hook
    }

    /// Processes `elements` dividing first, starting at level 1 with an empty
    /// prefix.
    #[instrument(level = "debug", skip_all, fields(elements = elements.len()))]
    pub fn process<T, E>(&self, elements: Vec<T>) -> Result<Vec<T>, E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        self.divide_then_apply(elements, 1, &[], None)
    }

    /// Processes `elements` from level 1 with the driver selected by
    /// [`QueueSettings::order`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(elements = elements.len(), order = %self.settings.order)
    )]
    pub fn run<T, E>(&self, elements: Vec<T>) -> Result<Vec<T>, E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        match self.settings.order {
            EvaluationOrder::DivideThenApply => self.divide_then_apply(elements, 1, &[], None),
            EvaluationOrder::ApplyThenDivide => self.apply_then_divide(elements, 1, None),
        }
    }

    /// First divide, then apply.
    ///
    /// Every run at `level` whose scope stack is not exhausted is processed
    /// recursively at `level + 1` under its own prefix; exhausted runs are kept
    /// as they are. The concatenation of all runs is then handed to the
    /// callback together with `prefix`, the context this call was made in.
    /// At the top level that context is the empty prefix.
    #[instrument(level = "debug", skip_all, fields(elements = elements.len(), level = level))]
    pub fn process_fdta<T, E>(
        &self,
        elements: Vec<T>,
        level: usize,
        prefix: &[T::Scope],
    ) -> Result<Vec<T>, E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        ensure_level(level)?;
        self.divide_then_apply(elements, level, prefix, None)
    }

    /// First apply, then divide.
    ///
    /// The callback is applied to every run at `level` whose scope stack is
    /// not exhausted, with the run's own prefix, and its result is processed
    /// recursively at `level + 1`. No callback fires on the concatenation.
    #[instrument(level = "debug", skip_all, fields(elements = elements.len(), level = level))]
    pub fn process_fatd<T, E>(&self, elements: Vec<T>, level: usize) -> Result<Vec<T>, E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        ensure_level(level)?;
        self.apply_then_divide(elements, level, None)
    }

    /// Like [`process`](Self::process), also returning every callback
    /// invocation.
    #[cfg(feature = "trace")]
    pub fn process_traced<T, E>(&self, elements: Vec<T>) -> Result<(Vec<T>, QueueTrace), E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        let mut trace = QueueTrace::new();
        let output = self.divide_then_apply(elements, 1, &[], Some(&mut trace))?;
        Ok((output, trace))
    }

    /// Like [`run`](Self::run), also returning every callback invocation.
    #[cfg(feature = "trace")]
    pub fn run_traced<T, E>(&self, elements: Vec<T>) -> Result<(Vec<T>, QueueTrace), E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        let mut trace = QueueTrace::new();
        let output = match self.settings.order {
            EvaluationOrder::DivideThenApply => {
                self.divide_then_apply(elements, 1, &[], Some(&mut trace))?
            }
            EvaluationOrder::ApplyThenDivide => {
                self.apply_then_divide(elements, 1, Some(&mut trace))?
            }
        };
        Ok((output, trace))
    }

    fn divide_then_apply<T, E>(
        &self,
        elements: Vec<T>,
        level: usize,
        prefix: &[T::Scope],
        mut trace: Option<&mut QueueTrace>,
    ) -> Result<Vec<T>, E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        let runs = scan_runs::<T, E, H>(elements, level, &self.key_hook)?;
        trace!(level, runs = runs.len(), "fdta: divided");

        let mut processed = Vec::new();
        for run in runs {
            if run.is_base_case(level) {
                processed.extend(run.elements);
                continue;
            }

            self.settings.check_depth(level)?;
            let nested = self.divide_then_apply(
                run.elements,
                level + 1,
                &run.key.prefix,
                trace.as_deref_mut(),
            )?;
            processed.extend(nested);
        }

        let input_len = processed.len();
        let output = <C as Callback<T, E>>::apply(&self.callback, processed, prefix)?;
        debug!(
            level,
            prefix_len = prefix.len(),
            input_len,
            output_len = output.len(),
            "fdta: applied"
        );

        if let Some(trace) = trace {
            trace.record(
                EvaluationOrder::DivideThenApply,
                level,
                prefix,
                input_len,
                output.len(),
            );
        }

        Ok(output)
    }

    fn apply_then_divide<T, E>(
        &self,
        elements: Vec<T>,
        level: usize,
        mut trace: Option<&mut QueueTrace>,
    ) -> Result<Vec<T>, E>
    where
        T: Scoped,
        C: Callback<T, E>,
        H: KeyHook<T, E>,
        E: From<QueueError>,
    {
        let runs = scan_runs::<T, E, H>(elements, level, &self.key_hook)?;
        trace!(level, runs = runs.len(), "fatd: divided");

        let mut processed = Vec::new();
        for run in runs {
            if run.is_base_case(level) {
                processed.extend(run.elements);
                continue;
            }

            self.settings.check_depth(level)?;
            let input_len = run.elements.len();
            let applied =
                <C as Callback<T, E>>::apply(&self.callback, run.elements, &run.key.prefix)?;
            debug!(
                level,
                prefix_len = run.key.prefix.len(),
                input_len,
                output_len = applied.len(),
                "fatd: applied"
            );

            if let Some(trace) = trace.as_deref_mut() {
                trace.record(
                    EvaluationOrder::ApplyThenDivide,
                    level,
                    &run.key.prefix,
                    input_len,
                    applied.len(),
                );
            }

            processed.extend(self.apply_then_divide(applied, level + 1, trace.as_deref_mut())?);
        }

        Ok(processed)
    }
}

fn ensure_level(level: usize) -> Result<(), QueueError> {
    if level == 0 {
        return Err(QueueError::InvalidLevel { level });
    }
    Ok(())
}
