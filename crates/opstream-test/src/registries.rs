//! Prebuilt registries.

use opstream_dynamic::{Callable, Registry, StreamError, Value};

/// Built-ins plus integer arithmetic.
///
/// - `add: Number -> Number -> Number`
/// - `multiply: Number -> Number -> Number`
/// - `negate: Number -> Number`
/// - `sum: List|Map -> Number`
pub fn arithmetic_registry() -> Registry {
    let mut registry = Registry::with_builtins();
    let ops = [
        ("add", "Number -> Number -> Number", int_binary("add", i64::checked_add)),
        (
            "multiply",
            "Number -> Number -> Number",
            int_binary("multiply", i64::checked_mul),
        ),
        (
            "negate",
            "Number -> Number",
            Callable::unary("negate", |a| {
                a.as_i64()
                    .and_then(i64::checked_neg)
                    .map(Value::Int)
                    .ok_or_else(|| StreamError::callable("negate() expects an integer"))
            }),
        ),
    ];
    for (name, signature, callable) in ops {
        registry
            .operation(name, signature, callable)
            .unwrap_or_else(|err| panic!("{} registers: {}", name, err));
    }
    registry
        .operation_by_name("sum", "List|Map -> Number")
        .expect("sum registers");
    registry
}

/// Built-ins plus the native string functions.
///
/// - `strlen: String -> Number`
/// - `strtoupper`, `strtolower`, `trim`: `String -> String`
/// - `str_repeat: String -> Number -> String`
pub fn strings_registry() -> Registry {
    let mut registry = Registry::with_builtins();
    registry
        .operation_by_name("strlen", "String -> Number")
        .expect("strlen registers");
    for name in ["strtoupper", "strtolower", "trim"] {
        registry
            .operation_by_name(name, "String -> String")
            .unwrap_or_else(|err| panic!("{} registers: {}", name, err));
    }
    registry
        .operation_by_name("str_repeat", "String -> Number -> String")
        .expect("str_repeat registers");
    registry
}

fn int_binary(name: &'static str, op: fn(i64, i64) -> Option<i64>) -> Callable {
    Callable::binary(name, move |a, b| {
        a.as_i64()
            .zip(b.as_i64())
            .and_then(|(a, b)| op(a, b))
            .map(Value::Int)
            .ok_or_else(|| StreamError::callable(format!("{}() expects two integers", name)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_registry_operations() {
        let registry = arithmetic_registry();
        let names: Vec<&str> = registry.operation_names().collect();
        assert_eq!(names, vec!["add", "multiply", "negate", "sum", "then"]);
        assert!(registry.snapshot().is_ok());
    }

    #[test]
    fn test_strings_registry_operations() {
        let registry = strings_registry();
        assert!(registry.has_operation("str_repeat"));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_strings_registry_names_and_signatures() {
        let registry = strings_registry();
        let names: Vec<&str> = registry.operation_names().collect();
        assert_eq!(
            names,
            vec!["str_repeat", "strlen", "strtolower", "strtoupper", "then", "trim"]
        );
        assert!(registry.snapshot().is_ok());
    }
}
