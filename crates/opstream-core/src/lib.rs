//! opstream Core - the type system behind lazily dispatched streams
//!
//! This crate provides the building blocks shared by every other opstream crate:
//! - Semantic type tags and the `Any` wildcard
//! - Signatures and the textual signature language (`"List|Map -> Number"`)
//! - The error taxonomy raised by registration, dispatch and resolution

pub mod error;
pub mod signature;
pub mod types;

#[cfg(test)]
mod signature_tests;

pub use error::{ErrorKind, ErrorValue, Result, StreamError};
pub use signature::{parse_signatures, Signature};
pub use types::SemanticType;
