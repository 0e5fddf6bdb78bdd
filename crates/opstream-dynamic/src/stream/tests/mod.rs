//! Tests for stream dispatch and resolution.

mod test_resolve;

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::*;
use crate::callable::Callable;
use crate::registry::Registry;
use crate::value::Value;

// The process-wide registry is shared by every test in this crate.
static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn lock_global() -> MutexGuard<'static, ()> {
    GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry with `id: Any -> Any`, `strlen: String -> Number`,
/// `double: Number -> Number` and `pick: Number -> String` / `pick: String -> Number`.
fn make_widening_registry() -> Registry {
    let mut registry = Registry::with_builtins();
    registry
        .operation("id", "Any -> Any", Callable::unary("id", Ok))
        .unwrap();
    registry.operation_by_name("strlen", "String -> Number").unwrap();
    registry
        .operation("pick", "Number -> String", "to_string")
        .unwrap();
    registry.operation("pick", "String -> Number", "strlen").unwrap();
    registry
        .operation(
            "double",
            "Number -> Number",
            Callable::unary("double", |v| {
                Ok(Value::from(v.as_i64().unwrap_or_default() * 2))
            }),
        )
        .unwrap();
    registry
}
