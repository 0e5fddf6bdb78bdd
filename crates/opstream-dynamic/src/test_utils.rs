//! Test utilities for opstream-dynamic
//!
//! Provides registries and callables shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use opstream_core::StreamError;

use crate::callable::Callable;
use crate::registry::Registry;
use crate::value::Value;

/// Creates a registry with `size: List|Map -> Number` backed by `count`.
pub fn make_size_registry() -> Registry {
    let mut registry = Registry::with_builtins();
    registry
        .operation("size", "List|Map -> Number", "count")
        .expect("size registers");
    registry
}

/// Creates a registry with integer addition over numbers.
///
/// `add: Number -> Number -> Number`
pub fn make_add_registry() -> Registry {
    let mut registry = Registry::with_builtins();
    registry
        .operation("add", "Number -> Number -> Number", add())
        .expect("add registers");
    registry
}

/// A callable adding two integers.
pub fn add() -> Callable {
    Callable::binary("add", |a, b| match (a.as_i64(), b.as_i64()) {
        (Some(a), Some(b)) => Ok(Value::Int(a + b)),
        _ => Err(StreamError::callable("add() expects two integers")),
    })
}

/// A unary callable returning its argument and counting its invocations.
pub fn make_counting_identity(name: &str) -> (Callable, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let callable = Callable::unary(name, move |value| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    });
    (callable, calls)
}

/// A unary callable that always fails with `message`.
pub fn make_failing(name: &str, message: &'static str) -> Callable {
    Callable::unary(name, move |_| Err(StreamError::callable(message)))
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
