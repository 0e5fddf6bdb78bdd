//! Lazy, chainable streams.
//!
//! A [`Stream`] is created from a value and a registry snapshot. Calling an
//! operation appends a pending step and refines the *predicted* type of the
//! pipeline, rejecting calls that no signature could ever accept. Nothing
//! runs until [`Stream::result`], which replays the steps against the actual
//! values and memoizes the outcome.

mod dispatch;
mod resolve;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use opstream_config::StreamConfig;
use opstream_core::{Result, SemanticType};
use tracing::debug;

use crate::builtins::THEN;
use crate::callable::{Callable, CallableRef};
use crate::registry::{global, Registry, SignatureTexts, Snapshot};
use crate::tag::tag;
use crate::value::Value;

pub use dispatch::PendingStep;

/// An immutable pipeline over a source value.
///
/// Cloning shares the pipeline, including its memoized result.
#[derive(Clone)]
pub struct Stream {
    inner: Arc<StreamState>,
}

struct StreamState {
    snapshot: Snapshot,
    source: Arc<Value>,
    predicted: SemanticType,
    steps: Vec<Arc<PendingStep>>,
    result: Mutex<Option<Value>>,
}

impl Stream {
    /// Creates a stream over the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::AmbiguousSignature`](opstream_core::StreamError::AmbiguousSignature)
    /// if the registry currently holds clashing signatures.
    pub fn of(value: impl Into<Value>) -> Result<Self> {
        let snapshot = global::read(Registry::snapshot)?;
        Ok(Self::with_snapshot(snapshot, value))
    }

    /// Creates a stream over an explicit registry.
    pub fn of_in(registry: &Registry, value: impl Into<Value>) -> Result<Self> {
        Ok(Self::with_snapshot(registry.snapshot()?, value))
    }

    /// Creates a stream over an already validated snapshot.
    pub fn with_snapshot(snapshot: Snapshot, value: impl Into<Value>) -> Self {
        let value = value.into();
        let predicted = tag(&value);
        debug!(event = "stream_created", source_type = %predicted);
        Self {
            inner: Arc::new(StreamState {
                snapshot,
                source: Arc::new(value),
                predicted,
                steps: Vec::new(),
                result: Mutex::new(None),
            }),
        }
    }

    /// Appends a call to `name` with the given extra arguments.
    ///
    /// The call is checked against the predicted type only; a receiver
    /// predicted as `Any` may still fail once the actual value is known.
    ///
    /// # Errors
    ///
    /// - [`StreamError::UnknownOperation`](opstream_core::StreamError::UnknownOperation)
    ///   if `name` is not in the snapshot
    /// - [`StreamError::WrongOperationArgs`](opstream_core::StreamError::WrongOperationArgs)
    ///   if no signature accepts the predicted argument types
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Result<Self> {
        let (step, predicted) =
            dispatch::plan_step(&self.inner.snapshot, self.inner.predicted, name, args)?;

        let mut steps = Vec::with_capacity(self.inner.steps.len() + 1);
        steps.extend(self.inner.steps.iter().cloned());
        steps.push(Arc::new(step));

        Ok(Self {
            inner: Arc::new(StreamState {
                snapshot: self.inner.snapshot.clone(),
                source: Arc::clone(&self.inner.source),
                predicted,
                steps,
                result: Mutex::new(None),
            }),
        })
    }

    /// Applies `func` to the current value.
    pub fn then(&self, func: Callable) -> Result<Self> {
        self.invoke(THEN, vec![Value::Function(func)])
    }

    /// The predicted type of the pipeline's output.
    pub fn predicted_type(&self) -> SemanticType {
        self.inner.predicted
    }

    /// Capitalized name of the predicted type, e.g. `"Number"`.
    pub fn type_name(&self) -> &'static str {
        self.inner.predicted.name()
    }

    pub fn source(&self) -> &Value {
        &self.inner.source
    }

    pub fn steps(&self) -> impl Iterator<Item = &PendingStep> {
        self.inner.steps.iter().map(|step| step.as_ref())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.inner.snapshot
    }

    pub fn is_resolved(&self) -> bool {
        self.lock_result().is_some()
    }

    /// Runs every pending step and returns the final value.
    ///
    /// Resolution happens once; later calls return the cached value without
    /// invoking any callable again. A failed resolution is not cached.
    ///
    /// The cache is not locked while callables run, so a callable may
    /// resolve the stream it belongs to. The first value stored wins.
    ///
    /// # Errors
    ///
    /// - [`StreamError::WrongTransformationArgs`](opstream_core::StreamError::WrongTransformationArgs)
    ///   if a step has no candidate for the actual types
    /// - any error raised by a registered callable
    pub fn result(&self) -> Result<Value> {
        if let Some(value) = self.lock_result().as_ref() {
            return Ok(value.clone());
        }

        let value = resolve::resolve(&self.inner.source, &self.inner.steps)?;
        debug!(
            event = "stream_resolved",
            steps = self.inner.steps.len() as u64,
            result_type = %tag(&value),
        );
        Ok(self.lock_result().get_or_insert(value).clone())
    }

    /// Returns true if both handles share the same pipeline.
    pub fn ptr_eq(&self, other: &Stream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock_result(&self) -> std::sync::MutexGuard<'_, Option<Value>> {
        self.inner
            .result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Static access to the process-wide registry.
impl Stream {
    /// Registers an operation in the process-wide registry.
    ///
    /// See [`Registry::operation`].
    pub fn operation(
        name: &str,
        signatures: impl SignatureTexts,
        callable: impl Into<CallableRef>,
    ) -> Result<()> {
        global::write(|registry| registry.operation(name, signatures, callable))
    }

    /// Registers an operation backed by the native function of the same name.
    pub fn operation_by_name(name: &str, signatures: impl SignatureTexts) -> Result<()> {
        global::write(|registry| registry.operation_by_name(name, signatures))
    }

    pub fn has_operation(name: &str) -> bool {
        global::read(|registry| registry.has_operation(name))
    }

    pub fn remove_operations<I, S>(names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        global::write(|registry| registry.remove_operations(names));
    }

    /// Restores the process-wide registry to its built-in-only state.
    pub fn reset() {
        global::reset();
    }

    /// Rebuilds the process-wide registry from `config`.
    pub fn configure(config: &StreamConfig) {
        global::configure(config);
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stream({})", self.inner.predicted)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("source", &self.inner.source)
            .field("predicted", &self.inner.predicted)
            .field("steps", &self.inner.steps.len())
            .finish()
    }
}
