//! Callables that count their invocations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use opstream_dynamic::{Callable, Result, Value};

/// Shared invocation counter.
///
/// Every callable produced by the same counter increments it.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `func`, counting each call before delegating.
    pub fn wrap<F>(&self, name: &str, func: F) -> Callable
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        let calls = Arc::clone(&self.calls);
        Callable::new(name, move |args| {
            calls.fetch_add(1, Ordering::SeqCst);
            func(args)
        })
    }

    /// A callable returning its first argument (the receiver).
    pub fn identity(&self, name: &str) -> Callable {
        self.wrap(name, |args| Ok(args.into_iter().next().unwrap_or(Value::Null)))
    }

    /// Number of calls so far.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}
