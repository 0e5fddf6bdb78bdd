//! Native function table.
//!
//! Operations registered without an explicit callable use the function of
//! the same name from this table, e.g. `operation("count", "List -> Number")`.

use std::collections::HashMap;
use std::sync::OnceLock;

use opstream_core::{Result, StreamError};

use crate::callable::Callable;
use crate::tag::tag;
use crate::value::{Key, Value};

static NATIVES: OnceLock<HashMap<String, Callable>> = OnceLock::new();

/// Looks up a native function by name.
pub fn lookup(name: &str) -> Option<Callable> {
    table().get(name).cloned()
}

/// Names of every native function, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = table().keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

fn table() -> &'static HashMap<String, Callable> {
    NATIVES.get_or_init(|| {
        [
            Callable::unary("count", count),
            Callable::unary("strlen", strlen),
            Callable::binary("str_repeat", str_repeat),
            Callable::unary("strtoupper", |v| map_str("strtoupper", v, str::to_uppercase)),
            Callable::unary("strtolower", |v| map_str("strtolower", v, str::to_lowercase)),
            Callable::unary("trim", |v| map_str("trim", v, |s| s.trim().to_string())),
            Callable::unary("to_string", |v| Ok(Value::from(v.to_string()))),
            Callable::unary("head", |v| ends("head", v, |items| items.first().cloned())),
            Callable::unary("last", |v| ends("last", v, |items| items.last().cloned())),
            Callable::unary("sum", sum),
            Callable::unary("reverse", reverse),
            Callable::unary("keys", keys),
            Callable::unary("values", |v| {
                v.items()
                    .map(Value::List)
                    .ok_or_else(|| expected("values", "a collection", &v))
            }),
        ]
        .into_iter()
        .map(|callable| (callable.name().to_string(), callable))
        .collect()
    })
}

fn expected(function: &str, what: &str, got: &Value) -> StreamError {
    StreamError::callable(format!(
        "{}() expects {}, {} given",
        function,
        what,
        tag(got)
    ))
}

fn count(v: Value) -> Result<Value> {
    v.entry_count()
        .map(Value::from)
        .ok_or_else(|| expected("count", "a collection", &v))
}

fn strlen(v: Value) -> Result<Value> {
    v.as_str()
        .map(|s| Value::from(s.chars().count()))
        .ok_or_else(|| expected("strlen", "a string", &v))
}

fn str_repeat(text: Value, times: Value) -> Result<Value> {
    let s = text
        .as_str()
        .ok_or_else(|| expected("str_repeat", "a string", &text))?;
    let n = times
        .as_i64()
        .filter(|n| *n >= 0)
        .ok_or_else(|| expected("str_repeat", "a non-negative integer", &times))?;
    Ok(Value::from(s.repeat(n as usize)))
}

fn map_str(function: &str, v: Value, f: impl Fn(&str) -> String) -> Result<Value> {
    v.as_str()
        .map(|s| Value::from(f(s)))
        .ok_or_else(|| expected(function, "a string", &v))
}

fn ends(function: &str, v: Value, pick: impl Fn(&[Value]) -> Option<Value>) -> Result<Value> {
    v.items()
        .map(|items| pick(&items).unwrap_or(Value::Null))
        .ok_or_else(|| expected(function, "a collection", &v))
}

fn sum(v: Value) -> Result<Value> {
    let items = v.items().ok_or_else(|| expected("sum", "a collection", &v))?;
    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut is_float = false;
    for item in &items {
        match item {
            Value::Int(i) => {
                int_total = int_total
                    .checked_add(*i)
                    .ok_or_else(|| StreamError::callable("sum() overflows a 64-bit integer"))?;
            }
            Value::Float(f) => {
                is_float = true;
                float_total += f;
            }
            other => return Err(expected("sum", "numbers", other)),
        }
    }
    Ok(if is_float {
        Value::Float(float_total + int_total as f64)
    } else {
        Value::Int(int_total)
    })
}

fn reverse(v: Value) -> Result<Value> {
    match &v {
        Value::String(s) => Ok(Value::from(s.chars().rev().collect::<String>())),
        _ => v
            .items()
            .map(|mut items| {
                items.reverse();
                Value::List(items)
            })
            .ok_or_else(|| expected("reverse", "a string or a collection", &v)),
    }
}

fn keys(v: Value) -> Result<Value> {
    match &v {
        Value::List(items) => Ok(Value::List((0..items.len()).map(Value::from).collect())),
        Value::Map(entries) => Ok(Value::List(
            entries
                .iter()
                .map(|(key, _)| match key {
                    Key::Int(i) => Value::Int(*i),
                    Key::Str(s) => Value::String(s.clone()),
                })
                .collect(),
        )),
        _ => Err(expected("keys", "a collection", &v)),
    }
}
