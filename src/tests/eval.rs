// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::ast::{CompareOp, Expr, Predicate};
use crate::eval::{EvalError, PredicateEvaluator, Record, RecordEvaluator};

fn record() -> Record {
    Record::new()
        .set("population", 1200_i64)
        .set("name", "Berlin")
        .set("code", "12,345")
        .set("height", 3.5)
}

#[test]
fn numeric_comparison_against_literal() {
    let predicate = Predicate::Compare {
        op: CompareOp::Gt,
        lhs: Expr::attribute("population"),
        rhs: Expr::literal(1000_i64),
    };
    assert_eq!(RecordEvaluator.evaluate(&predicate, &record()), Ok(true));
}

#[test]
fn text_literal_holding_a_number_is_coerced() {
    let predicate = Predicate::Compare {
        op: CompareOp::Lt,
        lhs: Expr::literal("3"),
        rhs: Expr::literal(5_i64),
    };
    assert_eq!(RecordEvaluator.evaluate(&predicate, &record()), Ok(true));
}

#[test]
fn coercion_failure_names_the_field() {
    let predicate = Predicate::Compare {
        op: CompareOp::Gt,
        lhs: Expr::attribute("code"),
        rhs: Expr::literal(1000_i64),
    };
    assert_eq!(
        RecordEvaluator.evaluate(&predicate, &record()),
        Err(EvalError::DecodeNumber {
            field: "code".to_string()
        })
    );
}

#[test]
fn decode_failure_display_matches_the_contract() {
    let error = EvalError::DecodeNumber {
        field: "population".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Unable to decode 'population' as a number"
    );
}

#[test]
fn text_comparison_when_no_side_is_numeric() {
    let predicate = Predicate::Compare {
        op: CompareOp::Eq,
        lhs: Expr::attribute("name"),
        rhs: Expr::literal("Berlin"),
    };
    assert_eq!(RecordEvaluator.evaluate(&predicate, &record()), Ok(true));
}

#[test]
fn between_coerces_all_three_operands() {
    let predicate = Predicate::Between {
        value: Expr::attribute("height"),
        lower: Expr::literal(1_i64),
        upper: Expr::literal(10_i64),
    };
    assert_eq!(RecordEvaluator.evaluate(&predicate, &record()), Ok(true));

    let failing = Predicate::Between {
        value: Expr::attribute("code"),
        lower: Expr::literal(1_i64),
        upper: Expr::literal(10_i64),
    };
    assert_eq!(
        RecordEvaluator.evaluate(&failing, &record()),
        Err(EvalError::DecodeNumber {
            field: "code".to_string()
        })
    );
}

#[test]
fn missing_field_is_null() {
    let predicate = Predicate::IsNull {
        expr: Expr::attribute("absent"),
    };
    assert_eq!(RecordEvaluator.evaluate(&predicate, &record()), Ok(true));

    let present = Predicate::IsNull {
        expr: Expr::attribute("name"),
    };
    assert_eq!(RecordEvaluator.evaluate(&present, &record()), Ok(false));
}

#[test]
fn like_wildcards() {
    let matching = Predicate::like(Expr::attribute("name"), "Ber*");
    assert_eq!(RecordEvaluator.evaluate(&matching, &record()), Ok(true));

    let single = Predicate::like(Expr::attribute("name"), "B?rlin");
    assert_eq!(RecordEvaluator.evaluate(&single, &record()), Ok(true));

    let failing = Predicate::like(Expr::attribute("name"), "Par*");
    assert_eq!(RecordEvaluator.evaluate(&failing, &record()), Ok(false));
}

#[test]
fn logical_combinators_short_circuit_errors() {
    let predicate = Predicate::And(vec![
        Predicate::Compare {
            op: CompareOp::Eq,
            lhs: Expr::attribute("name"),
            rhs: Expr::literal("Berlin"),
        },
        Predicate::Compare {
            op: CompareOp::Gt,
            lhs: Expr::attribute("code"),
            rhs: Expr::literal(0_i64),
        },
    ]);
    assert_eq!(
        RecordEvaluator.evaluate(&predicate, &record()),
        Err(EvalError::DecodeNumber {
            field: "code".to_string()
        })
    );
}

#[test]
fn function_calls_are_not_executed() {
    let predicate = Predicate::Compare {
        op: CompareOp::Eq,
        lhs: Expr::function("strLength", vec![Expr::attribute("name")]),
        rhs: Expr::literal(6_i64),
    };
    assert_eq!(
        RecordEvaluator.evaluate(&predicate, &record()),
        Err(EvalError::UnknownFunction("strLength".to_string()))
    );
}

#[test]
fn records_deserialize_from_json() {
    let record =
        Record::from_json(r#"{"name": "Berlin", "population": 3645000, "height": 34.5}"#).unwrap();
    assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("Berlin"));
    assert_eq!(record.get("population").and_then(|v| v.as_f64()), Some(3645000.0));
}
