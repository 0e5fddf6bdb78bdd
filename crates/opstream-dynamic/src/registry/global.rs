//! The process-wide registry behind the static stream API.
//!
//! Entries persist until removed. Nothing is scoped automatically: code that
//! registers temporary operations must remove them, or later streams will
//! see them (and may report them as ambiguous).

use std::sync::{OnceLock, PoisonError, RwLock};

use opstream_config::StreamConfig;

use crate::registry::Registry;

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

fn global() -> &'static RwLock<Registry> {
    GLOBAL.get_or_init(|| RwLock::new(Registry::with_builtins()))
}

/// Runs `f` with shared access to the global registry.
pub fn read<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let guard = global().read().unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Runs `f` with exclusive access to the global registry.
pub fn write<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = global().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Restores the global registry to its initial state (built-ins only).
pub fn reset() {
    write(|registry| *registry = Registry::with_builtins());
}

/// Replaces the global registry with a fresh one built from `config`.
pub fn configure(config: &StreamConfig) {
    write(|registry| *registry = Registry::from_config(config));
}
