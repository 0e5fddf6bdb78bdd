//! Runtime values carried through streams.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use opstream_core::{ErrorValue, SemanticType};

use crate::callable::Callable;
use crate::stream::Stream;
use crate::tag::tag;

/// A runtime value.
///
/// `Int` and `Float` are both tagged `Number`. A `Map` whose keys are
/// exactly `0..n` in order is tagged `List`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Arc<str>),
    Resource(Resource),
    Function(Callable),
    List(Vec<Value>),
    /// Keyed collection in insertion order.
    Map(Vec<(Key, Value)>),
    Object(Arc<Record>),
    Error(ErrorValue),
    Stream(Stream),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                a == b || (a - b).abs() < f64::EPSILON || (a.is_nan() && b.is_nan())
            }
            // Mixed numeric comparison
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b || (*a as f64 - b).abs() < f64::EPSILON
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Resource(a), Value::Resource(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Stream(a), Value::Stream(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Value {
    /// Builds a `Map` from key/value pairs, keeping their order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a `List` from anything convertible into values.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// The semantic tag of this value. Shorthand for [`tag`].
    #[inline]
    pub fn semantic_type(&self) -> SemanticType {
        tag(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a number, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Number of entries of a `List` or `Map`.
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Values of a `List` or `Map`, in order.
    pub fn items(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items.clone()),
            Value::Map(entries) => Some(entries.iter().map(|(_, v)| v.clone()).collect()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Resource(_) => f.write_str("[Resource]"),
            Value::Function(_) => f.write_str("[Function]"),
            Value::List(items) => write_list(f, items.iter()),
            Value::Map(entries) if tag(self) == SemanticType::List => {
                write_list(f, entries.iter().map(|(_, v)| v))
            }
            Value::Map(entries) => {
                write_fields(f, entries.iter().map(|(k, v)| (k.to_string(), v)))
            }
            Value::Object(record) => write_fields(
                f,
                record.fields.iter().map(|(k, v)| (k.to_string(), v)),
            ),
            Value::Error(err) => write!(f, "{}", err),
            Value::Stream(stream) => write!(f, "{}", stream),
        }
    }
}

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

fn write_fields<'a>(
    f: &mut fmt::Formatter<'_>,
    fields: impl Iterator<Item = (String, &'a Value)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in fields.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    f.write_str("}")
}

/// Key of a `Map` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(Arc<str>),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Key::Int(v as i64)
    }
}

impl From<usize> for Key {
    fn from(v: usize) -> Self {
        Key::Int(v as i64)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Str(v.into())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Str(v.into())
    }
}

/// A structured value with a class name and named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub class: Arc<str>,
    pub fields: Vec<(Arc<str>, Value)>,
}

impl Record {
    pub fn new(class: impl Into<Arc<str>>) -> Self {
        Self {
            class: class.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field.as_ref() == name)
            .map(|(_, value)| value)
    }
}

/// An opaque handle to an OS resource (file, socket, ...).
///
/// Identity is by handle: two resources are equal only if they share it.
#[derive(Clone)]
pub struct Resource {
    kind: Arc<str>,
    handle: Arc<dyn Any + Send + Sync>,
}

impl Resource {
    pub fn new(kind: impl Into<Arc<str>>, handle: impl Any + Send + Sync) -> Self {
        Self {
            kind: kind.into(),
            handle: Arc::new(handle),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Borrows the handle if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource").field("kind", &self.kind).finish()
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Callable> for Value {
    fn from(v: Callable) -> Self {
        Value::Function(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Object(Arc::new(v))
    }
}

impl From<Resource> for Value {
    fn from(v: Resource) -> Self {
        Value::Resource(v)
    }
}

impl From<ErrorValue> for Value {
    fn from(v: ErrorValue) -> Self {
        Value::Error(v)
    }
}

impl From<Stream> for Value {
    fn from(v: Stream) -> Self {
        Value::Stream(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
