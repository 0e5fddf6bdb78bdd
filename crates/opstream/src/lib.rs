//! opstream - lazy, type-dispatched streams over runtime values
//!
//! Register operations with textual signatures, wrap a value in a
//! [`Stream`], chain calls, and resolve once.
//!
//! # Example
//!
//! ```rust
//! use opstream::prelude::*;
//!
//! let mut registry = Registry::with_builtins();
//! registry.operation("size", "List|Map -> Number", "count").unwrap();
//!
//! let size = Stream::of_in(&registry, Value::list([1, 2, 3]))
//!     .unwrap()
//!     .invoke("size", vec![])
//!     .unwrap();
//! assert_eq!(size.to_string(), "Stream(Number)");
//! assert_eq!(size.result().unwrap(), Value::Int(3));
//! ```

// Type system
pub use opstream_core::{
    parse_signatures, ErrorKind, ErrorValue, Result, SemanticType, Signature, StreamError,
};

// Configuration
pub use opstream_config::{ConfigError, DuplicatePolicy, StreamConfig};

// Runtime values, registry and streams
pub use opstream_dynamic::{
    global, natives, tag, tag_all, Callable, CallableRef, Candidate, Key, OperationVariant,
    PendingStep, Record, Registry, Resource, SignatureTexts, Snapshot, Stream, Value, THEN,
};

// Console output
#[cfg(feature = "console")]
pub use opstream_console as console;

pub mod prelude {
    pub use super::{Callable, Registry, SemanticType, Stream, StreamError, Value};
    pub use super::{DuplicatePolicy, StreamConfig};
}
