//! Type tagging of runtime values.

use opstream_core::SemanticType;

use crate::value::{Key, Value};

/// Classifies a value into its semantic tag.
///
/// Errors, streams and functions are recognized before the plain host
/// kinds; a keyed collection is a `List` only when its keys run `0, 1, ..`
/// in order. Never returns `Any`.
///
/// # Examples
///
/// ```
/// use opstream_core::SemanticType;
/// use opstream_dynamic::{tag, Value};
///
/// assert_eq!(tag(&Value::from(1.5)), SemanticType::Number);
/// assert_eq!(tag(&Value::list([1, 2, 3])), SemanticType::List);
/// assert_eq!(tag(&Value::map([(0, "a"), (1, "b")])), SemanticType::List);
/// assert_eq!(tag(&Value::map([("name", "Foo")])), SemanticType::Map);
/// ```
pub fn tag(value: &Value) -> SemanticType {
    match value {
        Value::Error(_) => SemanticType::Error,
        Value::Stream(_) => SemanticType::Stream,
        Value::Function(_) => SemanticType::Function,
        Value::Null => SemanticType::Null,
        Value::Bool(_) => SemanticType::Boolean,
        Value::Int(_) | Value::Float(_) => SemanticType::Number,
        Value::String(_) => SemanticType::String,
        Value::Resource(_) => SemanticType::Resource,
        Value::List(_) => SemanticType::List,
        Value::Map(entries) if has_sequential_keys(entries) => SemanticType::List,
        Value::Map(_) => SemanticType::Map,
        Value::Object(_) => SemanticType::Object,
    }
}

/// Tags a receiver followed by its arguments.
pub fn tag_all<'a>(
    receiver: SemanticType,
    args: impl IntoIterator<Item = &'a Value>,
) -> Vec<SemanticType> {
    std::iter::once(receiver)
        .chain(args.into_iter().map(tag))
        .collect()
}

fn has_sequential_keys(entries: &[(Key, Value)]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(i, (key, _))| matches!(key, Key::Int(k) if *k == i as i64))
}
