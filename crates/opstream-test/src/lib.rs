//! Shared test fixtures for opstream crates.
//!
//! This crate provides callables, registries and guards for testing code
//! built on `opstream-dynamic`. It is NOT a dev-dependency of
//! `opstream-dynamic` itself, to avoid circular dependencies.
//!
//! - [`counter`] - Callables that count their invocations
//! - [`global`] - Serialized access to the process-wide registry
//! - [`registries`] - Prebuilt registries
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! opstream-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use opstream_test::{global_registry_lock, CallCounter, OperationsGuard};
//! ```

pub mod counter;
pub mod global;
pub mod registries;

pub use counter::CallCounter;
pub use global::{global_registry_lock, OperationsGuard};
pub use registries::{arithmetic_registry, strings_registry};
