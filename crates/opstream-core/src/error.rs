//! Error types for opstream

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::types::{join_types, SemanticType};

/// Vocabulary listed in invalid-signature messages.
const SIGNATURE_VOCABULARY: &str =
    "Null, Boolean, Number, String, Resource, Function, List, Map, Object, Error, Stream, Any";

/// Main error type for stream registration, construction, dispatch and resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// The callable given to `operation` is not invocable.
    #[error("Stream: unknown callable '{0}'")]
    UnknownCallable(String),

    /// Signature text failed syntax or vocabulary validation.
    #[error("Stream: invalid signature '{0}' it should follow the syntax 'TypeArg1 -> TypeArg2 -> ... -> ReturnType' and types to use are {vocabulary}", vocabulary = SIGNATURE_VOCABULARY)]
    InvalidSignature(String),

    /// Dispatch to a name missing from the stream's registry snapshot.
    #[error("Stream: call to unknown operation '{0}'")]
    UnknownOperation(String),

    /// Exact re-registration under a rejecting duplicate policy.
    #[error("Stream: operation '{0}' already exists")]
    DuplicatedOperation(String),

    /// Two signatures of one operation share a parameter tuple.
    #[error("Stream: signatures of the operation '{0}' are duplicated or ambiguous")]
    AmbiguousSignature(String),

    /// No variant accepts the predicted argument types at call time.
    #[error("Stream: wrong arguments ({types}) given to operation '{operation}'", types = join_types(.args))]
    WrongOperationArgs {
        operation: String,
        args: Vec<SemanticType>,
    },

    /// No pending candidate accepts the actual argument types at resolution time.
    #[error(
        "Stream: operation '{operation}' could not be called with arguments types ({types}); expected types are {alternatives}",
        types = join_types(.args),
        alternatives = format_expected(.expected)
    )]
    WrongTransformationArgs {
        operation: String,
        args: Vec<SemanticType>,
        expected: Vec<Vec<SemanticType>>,
    },

    /// A registered callable failed while resolving.
    #[error("{}", .0.message())]
    Callable(ErrorValue),
}

fn format_expected(expected: &[Vec<SemanticType>]) -> String {
    expected
        .iter()
        .map(|types| format!("({})", join_types(types)))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Discriminant of [`StreamError`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownCallable,
    InvalidSignature,
    UnknownOperation,
    DuplicatedOperation,
    AmbiguousSignature,
    WrongOperationArgs,
    WrongTransformationArgs,
    Callable,
}

impl ErrorKind {
    /// The kebab-case name of this kind, e.g. `wrong-operation-args`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownCallable => "unknown-callable",
            ErrorKind::InvalidSignature => "invalid-signature",
            ErrorKind::UnknownOperation => "unknown-operation",
            ErrorKind::DuplicatedOperation => "duplicated-operation",
            ErrorKind::AmbiguousSignature => "ambiguous-signature",
            ErrorKind::WrongOperationArgs => "wrong-operation-args",
            ErrorKind::WrongTransformationArgs => "wrong-transformation-args",
            ErrorKind::Callable => "callable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::UnknownCallable(_) => ErrorKind::UnknownCallable,
            StreamError::InvalidSignature(_) => ErrorKind::InvalidSignature,
            StreamError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            StreamError::DuplicatedOperation(_) => ErrorKind::DuplicatedOperation,
            StreamError::AmbiguousSignature(_) => ErrorKind::AmbiguousSignature,
            StreamError::WrongOperationArgs { .. } => ErrorKind::WrongOperationArgs,
            StreamError::WrongTransformationArgs { .. } => ErrorKind::WrongTransformationArgs,
            StreamError::Callable(_) => ErrorKind::Callable,
        }
    }

    /// Shorthand for a failure raised from inside a registered callable.
    pub fn callable(message: impl Into<Arc<str>>) -> Self {
        StreamError::Callable(ErrorValue::new(message))
    }
}

/// The value-level Error: a human-readable message that can be chained.
///
/// # Examples
///
/// ```
/// use opstream_core::ErrorValue;
///
/// let inner = ErrorValue::new("Ooops !");
/// let outer = ErrorValue::chain(&inner, "Second error");
/// assert_eq!(outer.message(), "Ooops ! -> Second error");
/// assert_eq!(outer.to_string(), "[Error: Ooops ! -> Second error]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorValue {
    message: Arc<str>,
}

impl ErrorValue {
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates an error whose message follows the previous one: `"<previous> -> <message>"`.
    pub fn chain(previous: &ErrorValue, message: impl AsRef<str>) -> Self {
        Self::new(format!("{} -> {}", previous.message, message.as_ref()))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Error: {}]", self.message)
    }
}

impl From<StreamError> for ErrorValue {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Callable(inner) => inner,
            other => ErrorValue::new(other.to_string()),
        }
    }
}

/// Result type alias for opstream operations
pub type Result<T> = std::result::Result<T, StreamError>;
