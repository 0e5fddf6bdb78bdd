//! Built-in operations.

use opstream_core::{SemanticType, Signature, StreamError};

use crate::callable::Callable;
use crate::registry::{OperationVariant, Registry};
use crate::value::Value;

/// Name of the operation applying an arbitrary function to the current value.
pub const THEN: &str = "then";

pub(crate) fn install(registry: &mut Registry) {
    registry.push(OperationVariant::new(
        THEN,
        vec![Signature::new(
            SemanticType::Any,
            &[SemanticType::Function],
            SemanticType::Any,
        )],
        Callable::binary(THEN, |value, func| match func {
            Value::Function(callable) => callable.call(vec![value]),
            other => Err(StreamError::callable(format!(
                "then() expects a function, {} given",
                other.semantic_type()
            ))),
        }),
    ));
}
