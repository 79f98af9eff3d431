use super::*;
use crate::pattern::WILDCARD;

fn list(items: Vec<Value>) -> Value {
    Value::list(items)
}

fn ints(ns: &[i64]) -> Value {
    ns.iter().copied().map(Value::Int).collect()
}

// Wildcard

#[test]
fn test_wildcard_matches_every_kind() {
    let subjects = [
        Value::Null,
        Value::Bool(false),
        Value::Int(999),
        Value::Float(f64::NAN),
        Value::from("x"),
        ints(&[1, 2]),
        Value::record([("a", Value::Int(1))]),
    ];
    for subject in &subjects {
        assert!(matches(subject, &Pattern::Wildcard), "{subject}");
    }
}

#[test]
fn test_wildcard_is_not_a_value() {
    // No literal, however shaped, stands in for the wildcard.
    assert!(!matches(&Value::Int(1), &Pattern::literal(Value::Null)));
    assert!(!matches(&Value::Null, &Pattern::literal("_")));
}

// Literals

#[test]
fn test_primitive_literals() {
    assert!(matches(&Value::Int(5), &Pattern::from(5)));
    assert!(matches(&Value::from("hello"), &Pattern::from("hello")));
    assert!(matches(&Value::Bool(true), &Pattern::from(true)));
    assert!(matches(&Value::Null, &Pattern::literal(())));

    assert!(!matches(&Value::Int(5), &Pattern::from(4)));
    assert!(!matches(&Value::from("a"), &Pattern::from("b")));
    assert!(!matches(&Value::Int(1), &Pattern::from("1")));
}

#[test]
fn test_literal_nan_matches_nan() {
    assert!(matches(&Value::Float(f64::NAN), &Pattern::from(f64::NAN)));
}

#[test]
fn test_literal_signed_zeros_differ() {
    assert!(!matches(&Value::Float(0.0), &Pattern::from(-0.0)));
    assert!(!matches(&Value::Float(-0.0), &Pattern::from(0.0)));
    assert!(matches(&Value::Float(-0.0), &Pattern::from(-0.0)));
}

#[test]
fn test_literal_int_does_not_match_float() {
    assert!(!matches(&Value::Int(1), &Pattern::from(1.0)));
}

#[test]
fn test_composite_literal_is_exact() {
    let subject = Value::record([("a", Value::Int(1)), ("b", Value::Int(2))]);
    let partial_literal = Pattern::literal(Value::record([("a", Value::Int(1))]));
    assert!(!matches(&subject, &partial_literal));

    let exact = Pattern::literal(Value::record([("b", Value::Int(2)), ("a", Value::Int(1))]));
    assert!(matches(&subject, &exact));
}

#[test]
fn test_composite_literal_same_identity() {
    let subject = ints(&[1, 2, 3]);
    assert!(matches(&subject, &Pattern::Literal(subject.clone())));
}

// Sequences

#[test]
fn test_sequence_exact() {
    assert!(matches(&ints(&[1, 2, 3]), &Pattern::sequence([1, 2, 3])));
}

#[test]
fn test_sequence_with_wildcard() {
    let pattern = Pattern::sequence([Pattern::from(1), WILDCARD, Pattern::from(3)]);
    assert!(matches(&ints(&[1, 2, 3]), &pattern));
    assert!(matches(&ints(&[1, 99, 3]), &pattern));
    assert!(!matches(&ints(&[1, 2, 4]), &pattern));
}

#[test]
fn test_sequence_length_mismatch() {
    assert!(!matches(&ints(&[1, 2]), &Pattern::sequence([1, 2, 3])));
    assert!(!matches(&ints(&[1, 2, 3]), &Pattern::sequence([1, 2])));
    // No subsequence matching, even with wildcards.
    assert!(!matches(&ints(&[1, 2, 3]), &Pattern::sequence([WILDCARD, WILDCARD])));
}

#[test]
fn test_empty_sequences() {
    assert!(matches(&list(vec![]), &Pattern::Sequence(vec![])));
    assert!(!matches(&ints(&[1]), &Pattern::Sequence(vec![])));
}

#[test]
fn test_sequence_against_non_list() {
    let pattern = Pattern::Sequence(vec![]);
    assert!(!matches(&Value::Null, &pattern));
    assert!(!matches(&Value::record([("0", Value::Int(1))]), &pattern));
    assert!(!matches(&Value::from(""), &pattern));
}

// Partial records

#[test]
fn test_partial_shallow() {
    let subject = Value::record([("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert!(matches(&subject, &Pattern::partial([("a", 1)])));
    assert!(matches(&subject, &Pattern::partial([("b", 2), ("a", 1)])));
    assert!(!matches(&subject, &Pattern::partial([("a", 2)])));
}

#[test]
fn test_partial_missing_key_fails() {
    let subject = Value::record([("a", Value::Int(1))]);
    assert!(!matches(&subject, &Pattern::partial([("c", 1)])));
    assert!(!matches(&subject, &Pattern::partial([("c", WILDCARD)])));
}

#[test]
fn test_empty_partial_matches_any_record() {
    let empty = Pattern::Partial(rustc_hash::FxHashMap::default());
    assert!(matches(&Value::record(Vec::<(String, Value)>::new()), &empty));
    assert!(matches(&Value::record([("x", Value::Null)]), &empty));
}

#[test]
fn test_partial_against_non_record() {
    let pattern = Pattern::partial([("a", WILDCARD)]);
    assert!(!matches(&Value::Null, &pattern));
    assert!(!matches(&ints(&[1]), &pattern));
    assert!(!matches(&Value::from("a"), &pattern));
}

#[test]
fn test_partial_deep() {
    let subject = Value::record([(
        "user",
        Value::record([
            ("id", Value::from("123")),
            (
                "profile",
                Value::record([("age", Value::Int(22)), ("country", Value::from("BO"))]),
            ),
        ]),
    )]);
    let pattern = Pattern::partial([(
        "user",
        Pattern::partial([("profile", Pattern::partial([("age", 22)]))]),
    )]);
    assert!(matches(&subject, &pattern));

    let wrong = Pattern::partial([(
        "user",
        Pattern::partial([("profile", Pattern::partial([("age", 23)]))]),
    )]);
    assert!(!matches(&subject, &wrong));
}

#[test]
fn test_partial_key_wildcard_ignores_shape() {
    let pattern = Pattern::partial([("user", Pattern::partial([("data", WILDCARD)]))]);
    for data in [Value::Null, Value::Int(1), ints(&[1]), Value::record([("age", Value::Int(20))])] {
        let subject = Value::record([("user", Value::record([("id", Value::Int(1)), ("data", data)]))]);
        assert!(matches(&subject, &pattern));
    }
}

#[test]
fn test_sequence_of_partials() {
    let subject = list(vec![
        Value::record([("k", Value::from("a")), ("v", Value::Int(1))]),
        Value::record([("k", Value::from("b")), ("v", Value::Int(2))]),
    ]);
    let pattern = Pattern::sequence([
        Pattern::partial([("k", "a")]),
        Pattern::partial([("v", 2)]),
    ]);
    assert!(matches(&subject, &pattern));
}

#[test]
fn test_deeply_nested_sequence() {
    let mut subject = Value::Int(0);
    let mut pattern = Pattern::from(0);
    for _ in 0..1_000 {
        subject = list(vec![subject]);
        pattern = Pattern::Sequence(vec![pattern]);
    }
    assert!(matches(&subject, &pattern));
    assert!(!matches(&list(vec![subject]), &pattern));
}

#[test]
fn test_deeply_nested_literal() {
    let build = |depth: usize, innermost: i64| {
        let mut value = Value::Int(innermost);
        for _ in 0..depth {
            value = list(vec![Value::record([("next", value)])]);
        }
        value
    };
    let subject = build(20_000, 0);
    assert!(matches(&subject, &Pattern::Literal(build(20_000, 0))));
    assert!(!matches(&subject, &Pattern::Literal(build(20_000, 1))));
    assert!(!matches(&subject, &Pattern::Literal(build(19_999, 0))));
}
