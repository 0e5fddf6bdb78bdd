//! Runtime values, operation registry and lazy streams.
//!
//! Operations are registered by name with one or more textual signatures
//! (`"List|Map -> Number"`). A [`Stream`] wraps a value, dispatches calls
//! against the predicted type of the pipeline, and defers the actual work
//! until [`Stream::result`] is called.
//!
//! ```
//! use opstream_dynamic::{Registry, Stream, Value};
//!
//! let mut registry = Registry::with_builtins();
//! registry.operation_by_name("strtoupper", "String -> String").unwrap();
//! registry.operation_by_name("strlen", "String -> Number").unwrap();
//!
//! let stream = Stream::of_in(&registry, "hello").unwrap();
//! let upper = stream.invoke("strtoupper", vec![]).unwrap();
//! assert_eq!(upper.type_name(), "String");
//!
//! let length = upper.invoke("strlen", vec![]).unwrap();
//! assert_eq!(length.to_string(), "Stream(Number)");
//! assert_eq!(length.result().unwrap(), Value::Int(5));
//! ```

mod builtins;
mod callable;
pub mod natives;
mod registry;
mod stream;
mod tag;
mod value;

#[cfg(test)]
mod natives_tests;
#[cfg(test)]
pub mod test_utils;

pub use builtins::THEN;
pub use callable::{Callable, CallableRef};
pub use registry::{global, Candidate, OperationVariant, Registry, SignatureTexts, Snapshot};
pub use stream::{PendingStep, Stream};
pub use tag::{tag, tag_all};
pub use value::{Key, Record, Resource, Value};

pub use opstream_core::{ErrorKind, ErrorValue, Result, SemanticType, Signature, StreamError};
