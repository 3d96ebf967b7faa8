//! Tests for conjunction and disjunction semantics.

use kova::{catalog::chars, try_validate, Arg, Check, Config, LogRecorder, Messages, Or, Rule};
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug>(v: Validation<T, Messages>) -> Messages {
    v.into_result().unwrap_err()
}

fn equals(n: i64) -> Check<i64> {
    Check::new(format!("test.eq{}", n), move |v: &i64| *v == n)
}

#[test]
fn test_and_accumulates_every_violation_in_order() {
    let messages = unwrap_failure(try_validate(&Config::new(), |cx| {
        cx.check(" ", &chars::not_blank())?;
        cx.check(" ", &chars::min_length(2))?;
        cx.check(" ", &chars::starts_with("x"))?;
        Ok(())
    }));

    let ids: Vec<_> = messages.iter().map(|m| m.constraint_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "kova.charSequence.notBlank",
            "kova.charSequence.min",
            "kova.charSequence.startsWith"
        ]
    );
}

#[test]
fn test_and_fail_fast_keeps_only_first() {
    let config = Config::new().with_fail_fast(true);
    let messages = unwrap_failure(try_validate(&config, |cx| {
        cx.check(" ", &chars::not_blank())?;
        cx.check(" ", &chars::min_length(2))?;
        Ok(())
    }));

    assert_eq!(messages.len(), 1);
    assert_eq!(messages.first().constraint_id, "kova.charSequence.notBlank");
}

#[test]
fn test_zero_constraints_succeed() {
    assert!(try_validate(&Config::new(), |_| Ok(())).is_success());
}

#[test]
fn test_or_short_circuit_records_nothing() {
    let recorder = LogRecorder::new();
    let config = Config::new().with_logger(recorder.logger());
    let rule = equals(1).or(equals(2)).or(equals(3));

    let result = try_validate(&config, |cx| cx.apply(&1i64, &rule));

    assert!(result.is_success());
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_or_aggregates_branch_messages() {
    let rule = equals(1).or(equals(2)).or(equals(3));
    let messages = unwrap_failure(try_validate(&Config::new(), |cx| cx.apply(&9i64, &rule)));

    assert_eq!(messages.len(), 1);
    let composite = messages.first();
    assert_eq!(composite.constraint_id, "kova.or");
    assert_eq!(composite.args.len(), 3);
    let branch_ids: Vec<_> = composite
        .nested()
        .map(|branch| branch[0].constraint_id.clone())
        .collect();
    assert_eq!(branch_ids, vec!["test.eq1", "test.eq2", "test.eq3"]);
}

#[test]
fn test_nested_or_keeps_shape() {
    let inner = equals(1).or(equals(2));
    let rule = Or::new(inner).or_else(equals(3));

    let messages = unwrap_failure(try_validate(&Config::new(), |cx| cx.apply(&0i64, &rule)));

    let outer = messages.first();
    assert_eq!(outer.constraint_id, "kova.or");
    match &outer.args[0] {
        Arg::Messages(first_branch) => {
            assert_eq!(first_branch.len(), 1);
            assert_eq!(first_branch[0].constraint_id, "kova.or");
            assert_eq!(first_branch[0].args.len(), 2);
        }
        Arg::Value(_) => panic!("expected branch messages"),
    }
}

#[test]
fn test_or_under_fail_fast_still_tries_every_branch() {
    let config = Config::new().with_fail_fast(true);
    let rule = equals(1).or(equals(2)).or(equals(3));

    assert!(try_validate(&config, |cx| cx.apply(&3i64, &rule)).is_success());

    let messages = unwrap_failure(try_validate(&config, |cx| {
        cx.apply(&4i64, &rule)?;
        cx.check(&4i64, &equals(5))?;
        Ok(())
    }));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages.first().constraint_id, "kova.or");
}

#[test]
fn test_imperative_or_returns_branch_value() {
    let result = try_validate(&Config::new(), |cx| {
        cx.or(|cx| {
            cx.check("abc", &chars::length(2))?;
            Ok("short")
        })
        .or_else(|cx| {
            cx.check("abc", &chars::length(3))?;
            Ok("medium")
        })
        .end()
    });

    assert_eq!(result.into_result().unwrap(), Some("medium"));
}
