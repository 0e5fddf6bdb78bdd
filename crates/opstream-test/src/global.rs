//! Serialized access to the process-wide registry.
//!
//! Tests run in parallel threads but share one registry. Hold
//! [`global_registry_lock`] for the whole test, and register through an
//! [`OperationsGuard`] so the operations are removed even if the test fails.

use std::sync::{Mutex, MutexGuard, PoisonError};

use opstream_dynamic::{CallableRef, Result, SignatureTexts, Stream};

static LOCK: Mutex<()> = Mutex::new(());

/// Locks the process-wide registry for the calling test.
///
/// A poisoned lock (a previous test panicked) is recovered.
pub fn global_registry_lock() -> MutexGuard<'static, ()> {
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes the operations it registered when dropped.
#[derive(Debug, Default)]
pub struct OperationsGuard {
    names: Vec<String>,
}

impl OperationsGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation in the process-wide registry and tracks it.
    ///
    /// The name is tracked even when registration fails.
    pub fn operation(
        &mut self,
        name: &str,
        signatures: impl SignatureTexts,
        callable: impl Into<CallableRef>,
    ) -> Result<()> {
        self.track(name);
        Stream::operation(name, signatures, callable)
    }

    /// Registers a native-backed operation and tracks it.
    pub fn operation_by_name(&mut self, name: &str, signatures: impl SignatureTexts) -> Result<()> {
        self.track(name);
        Stream::operation_by_name(name, signatures)
    }

    /// Tracks a name registered elsewhere.
    pub fn track(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Drop for OperationsGuard {
    fn drop(&mut self) {
        Stream::remove_operations(&self.names);
    }
}
