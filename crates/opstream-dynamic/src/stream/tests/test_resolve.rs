//! Resolution against actual values and memoization.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::*;
use crate::test_utils::{calls, make_add_registry, make_counting_identity, make_failing, make_size_registry};
use opstream_core::{ErrorKind, SemanticType, StreamError};

#[test]
fn test_no_steps_returns_source() {
    let registry = Registry::new();
    let stream = Stream::of_in(&registry, "foo").unwrap();

    assert_eq!(stream.result().unwrap(), Value::from("foo"));
    assert!(stream.is_resolved());
}

#[test]
fn test_size_of_list_and_map() {
    let registry = make_size_registry();

    let list = Stream::of_in(&registry, Value::list([1, 2, 3])).unwrap();
    assert_eq!(list.invoke("size", vec![]).unwrap().result().unwrap(), Value::Int(3));

    let map = Stream::of_in(&registry, Value::map([("name", "Foo"), ("age", "11")])).unwrap();
    assert_eq!(map.invoke("size", vec![]).unwrap().result().unwrap(), Value::Int(2));
}

#[test]
fn test_chained_steps_run_in_order() {
    let mut registry = make_add_registry();
    registry.operation_by_name("to_string", "Number -> String").unwrap();
    registry.operation_by_name("strlen", "String -> Number").unwrap();

    let stream = Stream::of_in(&registry, 95)
        .unwrap()
        .invoke("add", vec![Value::from(5)])
        .unwrap()
        .invoke("to_string", vec![])
        .unwrap()
        .invoke("strlen", vec![])
        .unwrap();

    assert_eq!(stream.type_name(), "Number");
    assert_eq!(stream.result().unwrap(), Value::Int(3));
}

#[test]
fn test_extra_arguments_follow_receiver() {
    let mut registry = Registry::new();
    registry
        .operation_by_name("str_repeat", "String -> Number -> String")
        .unwrap();

    let stream = Stream::of_in(&registry, "ab")
        .unwrap()
        .invoke("str_repeat", vec![Value::from(3)])
        .unwrap();
    assert_eq!(stream.result().unwrap(), Value::from("ababab"));
}

#[test]
fn test_any_widening_fails_at_resolution() {
    let registry = make_widening_registry();
    let stream = Stream::of_in(&registry, 5)
        .unwrap()
        .invoke("id", vec![])
        .unwrap()
        .invoke("strlen", vec![])
        .unwrap();

    let err = stream.result().unwrap_err();
    assert_eq!(
        err,
        StreamError::WrongTransformationArgs {
            operation: "strlen".to_string(),
            args: vec![SemanticType::Number],
            expected: vec![vec![SemanticType::String]],
        }
    );
    assert_eq!(
        err.to_string(),
        "Stream: operation 'strlen' could not be called with arguments types (Number); \
         expected types are (String)"
    );
}

#[test]
fn test_widened_step_picks_candidate_by_actual_type() {
    let registry = make_widening_registry();
    let any = Stream::of_in(&registry, "hello")
        .unwrap()
        .invoke("id", vec![])
        .unwrap();

    let picked = any.invoke("pick", vec![]).unwrap();
    assert_eq!(picked.type_name(), "Any");
    assert_eq!(picked.result().unwrap(), Value::Int(5));
}

#[test]
fn test_expected_lists_every_candidate() {
    let registry = make_widening_registry();
    let stream = Stream::of_in(&registry, Value::list([1]))
        .unwrap()
        .invoke("id", vec![])
        .unwrap()
        .invoke("pick", vec![])
        .unwrap();

    let err = stream.result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Stream: operation 'pick' could not be called with arguments types (List); \
         expected types are (Number) or (String)"
    );
}

#[test]
fn test_then_applies_function() {
    let registry = Registry::with_builtins();
    let stream = Stream::of_in(&registry, 3)
        .unwrap()
        .then(Callable::unary("double", |v| {
            Ok(Value::from(v.as_i64().unwrap_or_default() * 2))
        }))
        .unwrap();

    assert_eq!(stream.result().unwrap(), Value::Int(6));
}

#[test]
fn test_result_is_memoized() {
    let (identity, counter) = make_counting_identity("identity");
    let mut registry = Registry::new();
    registry.operation("identity", "Any -> Any", identity).unwrap();

    let stream = Stream::of_in(&registry, 1)
        .unwrap()
        .invoke("identity", vec![])
        .unwrap();
    assert!(!stream.is_resolved());

    assert_eq!(stream.result().unwrap(), Value::Int(1));
    assert_eq!(stream.result().unwrap(), Value::Int(1));
    assert_eq!(calls(&counter), 1);

    // Clones share the cache.
    let clone = stream.clone();
    assert!(clone.ptr_eq(&stream));
    assert_eq!(clone.result().unwrap(), Value::Int(1));
    assert_eq!(calls(&counter), 1);
}

#[test]
fn test_derived_stream_resolves_independently() {
    let (identity, counter) = make_counting_identity("identity");
    let mut registry = Registry::new();
    registry.operation("identity", "Any -> Any", identity).unwrap();

    let first = Stream::of_in(&registry, 1)
        .unwrap()
        .invoke("identity", vec![])
        .unwrap();
    first.result().unwrap();

    let second = first.invoke("identity", vec![]).unwrap();
    assert!(!second.is_resolved());
    second.result().unwrap();
    assert_eq!(calls(&counter), 3);
}

#[test]
fn test_callable_error_aborts_resolution() {
    let (identity, counter) = make_counting_identity("identity");
    let mut registry = Registry::new();
    registry
        .operation("explode", "Any -> Any", make_failing("explode", "Ooops !"))
        .unwrap();
    registry.operation("identity", "Any -> Any", identity).unwrap();

    let stream = Stream::of_in(&registry, 1)
        .unwrap()
        .invoke("explode", vec![])
        .unwrap()
        .invoke("identity", vec![])
        .unwrap();

    let err = stream.result().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Callable);
    assert_eq!(err.to_string(), "Ooops !");
    assert_eq!(calls(&counter), 0);
}

#[test]
fn test_failure_is_not_cached() {
    let registry = make_widening_registry();
    let stream = Stream::of_in(&registry, 5)
        .unwrap()
        .invoke("id", vec![])
        .unwrap()
        .invoke("strlen", vec![])
        .unwrap();

    assert!(stream.result().is_err());
    assert!(!stream.is_resolved());
    assert!(stream.result().is_err());
}

#[test]
fn test_native_arity_mismatch_is_callable_error() {
    let mut registry = Registry::new();
    registry.operation("count", "List -> Number -> Number", "count").unwrap();

    let stream = Stream::of_in(&registry, Value::list([1]))
        .unwrap()
        .invoke("count", vec![Value::from(2)])
        .unwrap();

    let err = stream.result().unwrap_err();
    assert_eq!(err.to_string(), "count() expects 1 argument(s), 2 given");
}

#[test]
fn test_branch_widening_resolves_matching_branch() {
    let registry = make_widening_registry();
    let picked = Stream::of_in(&registry, "hello")
        .unwrap()
        .invoke("id", vec![])
        .unwrap()
        .invoke("pick", vec![])
        .unwrap();
    assert_eq!(picked.type_name(), "Any");

    // The String branch of pick yields a Number, which double accepts.
    let doubled = picked.invoke("double", vec![]).unwrap();
    assert_eq!(doubled.type_name(), "Number");
    assert_eq!(doubled.result().unwrap(), Value::Int(10));
}

#[test]
fn test_branch_widening_fails_at_resolution() {
    let registry = make_widening_registry();
    let picked = Stream::of_in(&registry, 5)
        .unwrap()
        .invoke("id", vec![])
        .unwrap()
        .invoke("pick", vec![])
        .unwrap();
    assert_eq!(picked.type_name(), "Any");

    // Accepted against the widened prediction; the Number branch of pick
    // yields a String at resolution.
    let doubled = picked.invoke("double", vec![]).unwrap();
    let err = doubled.result().unwrap_err();
    assert_eq!(
        err,
        StreamError::WrongTransformationArgs {
            operation: "double".to_string(),
            args: vec![SemanticType::String],
            expected: vec![vec![SemanticType::Number]],
        }
    );
    assert_eq!(
        err.to_string(),
        "Stream: operation 'double' could not be called with arguments types (String); \
         expected types are (Number)"
    );
}

#[test]
fn test_callable_may_resolve_its_own_stream() {
    let slot: Arc<Mutex<Option<Stream>>> = Arc::default();
    let entered = Arc::new(AtomicBool::new(false));
    let reenter = {
        let slot = Arc::clone(&slot);
        let entered = Arc::clone(&entered);
        Callable::unary("reenter", move |value| {
            if entered.swap(true, Ordering::SeqCst) {
                return Ok(value);
            }
            let stream = slot.lock().unwrap().clone();
            match stream {
                Some(stream) => stream.result(),
                None => Ok(value),
            }
        })
    };
    let mut registry = Registry::new();
    registry.operation("reenter", "Any -> Any", reenter).unwrap();

    let stream = Stream::of_in(&registry, 7)
        .unwrap()
        .invoke("reenter", vec![])
        .unwrap();
    *slot.lock().unwrap() = Some(stream.clone());

    assert_eq!(stream.result().unwrap(), Value::Int(7));
    assert!(stream.is_resolved());
    assert!(entered.load(Ordering::SeqCst));

    slot.lock().unwrap().take();
}

#[test]
fn test_sum_overflow_surfaces_from_result() {
    let mut registry = Registry::new();
    registry.operation_by_name("sum", "List -> Number").unwrap();

    let stream = Stream::of_in(&registry, Value::list([Value::Int(i64::MAX), Value::Int(1)]))
        .unwrap()
        .invoke("sum", vec![])
        .unwrap();

    let err = stream.result().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Callable);
    assert!(!stream.is_resolved());
}
