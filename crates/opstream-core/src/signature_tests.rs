//! Tests for signature parsing and expansion

use super::error::{ErrorKind, StreamError};
use super::signature::*;
use super::types::SemanticType::*;

#[test]
fn test_single_signature() {
    let sigs = parse_signatures("List -> Number").unwrap();
    assert_eq!(sigs, vec![Signature::new(List, &[], Number)]);
    assert_eq!(sigs[0].params(), &[List]);
    assert_eq!(sigs[0].returns(), Number);
}

#[test]
fn test_whitespace_and_case_are_ignored() {
    let sigs = parse_signatures("  number|LIST->string ").unwrap();
    assert_eq!(
        sigs,
        vec![
            Signature::new(Number, &[], String),
            Signature::new(List, &[], String),
        ]
    );
}

#[test]
fn test_union_expansion_order() {
    let sigs = parse_signatures("Number|List -> Number -> String|Array -> Number").unwrap();
    assert_eq!(sigs.len(), 4);
    assert_eq!(sigs[0], Signature::new(Number, &[Number, String], Number));
    assert_eq!(sigs[1], Signature::new(List, &[Number, String], Number));
    assert_eq!(sigs[2], Signature::new(Number, &[Number, Map], Number));
    assert_eq!(sigs[3], Signature::new(List, &[Number, Map], Number));
}

#[test]
fn test_union_in_return_position() {
    let sigs = parse_signatures("Number -> String|Null").unwrap();
    assert_eq!(
        sigs,
        vec![
            Signature::new(Number, &[], String),
            Signature::new(Number, &[], Null),
        ]
    );
}

#[test]
fn test_repeated_alternative_collapses() {
    let sigs = parse_signatures("List|List -> Number").unwrap();
    assert_eq!(sigs, vec![Signature::new(List, &[], Number)]);
}

#[test]
fn test_any_and_extended_vocabulary() {
    let sigs = parse_signatures("Any -> Error|Stream|Resource -> Object").unwrap();
    assert_eq!(sigs.len(), 3);
    assert!(sigs.iter().all(|s| s.params()[0] == Any));
}

#[test]
fn test_invalid_signatures_quote_the_text() {
    for text in ["List, Number", "[a] -> Number", "Number", "List -> Foo", "List ->", ""] {
        let err = parse_signatures(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSignature);
        assert_eq!(err, StreamError::InvalidSignature(text.to_string()));
        assert!(err.to_string().contains(&format!("'{}'", text)));
    }
}

#[test]
fn test_accepts() {
    let add = Signature::new(Number, &[Number], Number);
    assert!(add.accepts(&[Number, Number]));
    assert!(add.accepts(&[Any, Number]));
    assert!(!add.accepts(&[String, Number]));
    assert!(!add.accepts(&[Number]));
    assert!(!add.accepts(&[Number, Number, Number]));
}

#[test]
fn test_display() {
    let sig = Signature::new(List, &[Function], Any);
    assert_eq!(sig.to_string(), "List -> Function -> Any");
}

#[test]
fn test_receiver_only_signature() {
    let sig = Signature::new(String, &[], Number);
    assert_eq!(sig.receiver(), String);
    assert_eq!(sig.params(), &[String]);
    assert_eq!(sig.returns(), Number);
    assert!(sig.accepts(&[String]));
    assert!(!sig.accepts(&[]));
    assert_eq!(sig.to_string(), "String -> Number");
}
