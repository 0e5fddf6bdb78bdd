//! Invocable values and callable references.

use std::fmt;
use std::sync::Arc;

use opstream_core::{Result, StreamError};

use crate::natives;
use crate::value::Value;

type CallableFn = dyn Fn(Vec<Value>) -> Result<Value> + Send + Sync;

/// A named, cheaply clonable function over values.
///
/// The receiver of a stream step is always the first argument.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallableFn>,
}

impl Callable {
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Wraps a one-argument function; any other arity fails at call time.
    pub fn unary<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let label = name.clone();
        Self::new(name, move |args| {
            let [a] = take_args::<1>(&label, args)?;
            func(a)
        })
    }

    /// Wraps a two-argument function; any other arity fails at call time.
    pub fn binary<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(Value, Value) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let label = name.clone();
        Self::new(name, move |args| {
            let [a, b] = take_args::<2>(&label, args)?;
            func(a, b)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        (self.func)(args)
    }

    /// Returns true if both callables share the same function.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callable").field(&self.name).finish()
    }
}

pub(crate) fn take_args<const N: usize>(name: &str, args: Vec<Value>) -> Result<[Value; N]> {
    let given = args.len();
    args.try_into().map_err(|_| {
        StreamError::callable(format!(
            "{}() expects {} argument(s), {} given",
            name, N, given
        ))
    })
}

/// The callable half of an operation registration.
///
/// A name is looked up in the native function table; a value must be a
/// `Function`. Anything else is an unknown callable.
#[derive(Debug, Clone)]
pub enum CallableRef {
    Named(String),
    Value(Value),
}

impl CallableRef {
    /// Resolves the reference into something invocable.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnknownCallable`] naming the reference.
    pub fn resolve(self) -> Result<Callable> {
        match self {
            CallableRef::Named(name) => {
                natives::lookup(&name).ok_or(StreamError::UnknownCallable(name))
            }
            CallableRef::Value(Value::Function(callable)) => Ok(callable),
            CallableRef::Value(other) => Err(StreamError::UnknownCallable(other.to_string())),
        }
    }
}

impl From<&str> for CallableRef {
    fn from(name: &str) -> Self {
        CallableRef::Named(name.to_string())
    }
}

impl From<String> for CallableRef {
    fn from(name: String) -> Self {
        CallableRef::Named(name)
    }
}

impl From<Callable> for CallableRef {
    fn from(callable: Callable) -> Self {
        CallableRef::Value(Value::Function(callable))
    }
}

impl From<Value> for CallableRef {
    fn from(value: Value) -> Self {
        CallableRef::Value(value)
    }
}
