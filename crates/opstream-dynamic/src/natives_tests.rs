//! Tests for the native function table.

use crate::natives::{lookup, names};
use crate::value::Value;
use opstream_core::Result;

fn call(name: &str, args: Vec<Value>) -> Result<Value> {
    lookup(name).expect("native exists").call(args)
}

#[test]
fn test_names_sorted_and_complete() {
    assert_eq!(
        names(),
        vec![
            "count",
            "head",
            "keys",
            "last",
            "reverse",
            "str_repeat",
            "strlen",
            "strtolower",
            "strtoupper",
            "sum",
            "to_string",
            "trim",
            "values",
        ]
    );
    assert!(lookup("bar").is_none());
}

#[test]
fn test_count() {
    assert_eq!(call("count", vec![Value::list([1, 2, 3])]).unwrap(), Value::Int(3));
    assert_eq!(
        call("count", vec![Value::map([("a", 1)])]).unwrap(),
        Value::Int(1)
    );
    let err = call("count", vec![Value::from(5)]).unwrap_err();
    assert_eq!(err.to_string(), "count() expects a collection, Number given");
}

#[test]
fn test_strings() {
    assert_eq!(call("strlen", vec![Value::from("héllo")]).unwrap(), Value::Int(5));
    assert_eq!(
        call("str_repeat", vec![Value::from("ab"), Value::from(2)]).unwrap(),
        Value::from("abab")
    );
    assert!(call("str_repeat", vec![Value::from("ab"), Value::from(-1)]).is_err());
    assert_eq!(call("strtoupper", vec![Value::from("Hi")]).unwrap(), Value::from("HI"));
    assert_eq!(call("strtolower", vec![Value::from("Hi")]).unwrap(), Value::from("hi"));
    assert_eq!(call("trim", vec![Value::from("  x ")]).unwrap(), Value::from("x"));
    assert_eq!(call("reverse", vec![Value::from("abc")]).unwrap(), Value::from("cba"));
    assert_eq!(
        call("to_string", vec![Value::list([1, 2])]).unwrap(),
        Value::from("[1, 2]")
    );
}

#[test]
fn test_collections() {
    let list = Value::list([1, 2, 3]);
    assert_eq!(call("head", vec![list.clone()]).unwrap(), Value::Int(1));
    assert_eq!(call("last", vec![list.clone()]).unwrap(), Value::Int(3));
    assert_eq!(call("head", vec![Value::List(vec![])]).unwrap(), Value::Null);
    assert_eq!(call("sum", vec![list.clone()]).unwrap(), Value::Int(6));
    assert_eq!(
        call("sum", vec![Value::list([Value::from(1), Value::from(0.5)])]).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(call("reverse", vec![list]).unwrap(), Value::list([3, 2, 1]));

    let map = Value::map([("name", "Foo"), ("age", "11")]);
    assert_eq!(
        call("keys", vec![map.clone()]).unwrap(),
        Value::list(["name", "age"])
    );
    assert_eq!(call("values", vec![map]).unwrap(), Value::list(["Foo", "11"]));
}

#[test]
fn test_arity_is_checked() {
    let err = call("strlen", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "strlen() expects 1 argument(s), 0 given");
}

#[test]
fn test_sum_overflow_is_callable_error() {
    let err = call("sum", vec![Value::list([Value::Int(i64::MAX), Value::Int(1)])]).unwrap_err();
    assert_eq!(err.kind(), opstream_core::ErrorKind::Callable);
    assert_eq!(err.to_string(), "sum() overflows a 64-bit integer");

    assert_eq!(
        call("sum", vec![Value::list([Value::Int(i64::MAX), Value::Int(-1)])]).unwrap(),
        Value::Int(i64::MAX - 1)
    );
}
