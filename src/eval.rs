// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Sample records and predicate evaluation.
//!
//! The refinement pass only needs two capabilities from the data-source
//! layer: fetch one sample record, and evaluate a predicate against a
//! record reporting failures. Both are traits here. [`RecordEvaluator`]
//! is the default evaluator over in-memory records; hosts backed by a
//! real data store supply their own.

use crate::ast::{CompareOp, Expr, Predicate};
use crate::value::Value;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One sample record: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Parse a record from a JSON object, the form data-source dumps use.
    pub fn from_json(text: &str) -> Result<Record> {
        serde_json::from_str(text).context("failed to parse sample record")
    }
}

/// Supplies sample records to the refinement pass. An exhausted source
/// simply yields no promotions, not an error.
pub trait SampleSource {
    fn next_sample(&mut self) -> Option<Record>;
}

impl<I: Iterator<Item = Record>> SampleSource for I {
    fn next_sample(&mut self) -> Option<Record> {
        self.next()
    }
}

/// Failure raised while evaluating a predicate against a record.
///
/// `DecodeNumber` carries the offending field name directly; its display
/// form matches the legacy message contract so that components able to
/// report only strings stay interoperable (see `refine`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Unable to decode '{field}' as a number")]
    DecodeNumber { field: String },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{0}")]
    Message(String),
}

/// Evaluates a rule predicate against one sample record.
pub trait PredicateEvaluator {
    fn evaluate(&self, predicate: &Predicate, record: &Record) -> Result<bool, EvalError>;
}

/// Default evaluator over in-memory records.
///
/// Comparison operands are coerced to numbers whenever either side is
/// numeric; a text field that fails coercion raises `DecodeNumber` with
/// that field's name, which is exactly the signal the refinement pass
/// listens for. Spatial and temporal predicates are not evaluated against
/// sample records and hold vacuously. Function calls are not executed
/// here; hosts with a function engine provide their own evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordEvaluator;

/// An operand value plus the attribute it was read from, if any. The
/// provenance is what lets coercion failures name the offending field.
struct Operand {
    value: Value,
    field: Option<String>,
}

impl PredicateEvaluator for RecordEvaluator {
    fn evaluate(&self, predicate: &Predicate, record: &Record) -> Result<bool, EvalError> {
        match predicate {
            Predicate::Not(inner) => Ok(!self.evaluate(inner, record)?),
            Predicate::And(children) => {
                for child in children {
                    if !self.evaluate(child, record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(children) => {
                for child in children {
                    if self.evaluate(child, record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::Compare { op, lhs, rhs } => {
                let lhs = eval_operand(lhs, record)?;
                let rhs = eval_operand(rhs, record)?;
                compare(op, &lhs, &rhs)
            }
            Predicate::Between {
                value,
                lower,
                upper,
            } => {
                let v = eval_operand(value, record)?;
                let lo = eval_operand(lower, record)?;
                let hi = eval_operand(upper, record)?;
                Ok(compare(&CompareOp::Le, &lo, &v)? && compare(&CompareOp::Le, &v, &hi)?)
            }
            Predicate::IsNull { expr } => {
                let operand = eval_operand(expr, record)?;
                Ok(operand.value.is_null())
            }
            Predicate::Like {
                expr,
                pattern,
                wildcard,
                single,
            } => {
                let operand = eval_operand(expr, record)?;
                Ok(like_match(
                    &operand.value.to_text(),
                    pattern,
                    *wildcard,
                    *single,
                ))
            }
            Predicate::Spatial { .. } | Predicate::Temporal { .. } => Ok(true),
        }
    }
}

fn eval_operand(expr: &Expr, record: &Record) -> Result<Operand, EvalError> {
    match expr {
        Expr::Attribute { name } => Ok(Operand {
            value: record.get(name).cloned().unwrap_or(Value::Null),
            field: Some(name.clone()),
        }),
        Expr::Literal { value } => Ok(Operand {
            value: value.clone(),
            field: None,
        }),
        Expr::Function { name, .. } => Err(EvalError::UnknownFunction(name.clone())),
        Expr::Opaque => Ok(Operand {
            value: Value::Null,
            field: None,
        }),
    }
}

/// Numeric view of an operand, coercing text. A text value that cannot be
/// parsed raises `DecodeNumber` when the operand came from a field.
fn coerce_number(operand: &Operand) -> Result<f64, EvalError> {
    if let Some(n) = operand.value.as_f64() {
        return Ok(n);
    }
    let text = operand.value.to_text();
    text.trim().parse::<f64>().map_err(|_| match &operand.field {
        Some(field) => EvalError::DecodeNumber {
            field: field.clone(),
        },
        None => EvalError::Message(format!("cannot decode literal '{text}' as a number")),
    })
}

fn compare(op: &CompareOp, lhs: &Operand, rhs: &Operand) -> Result<bool, EvalError> {
    // A null operand (typically a field missing from the record) never
    // satisfies a comparison and must not look like a coercion failure.
    if lhs.value.is_null() || rhs.value.is_null() {
        return Ok(false);
    }

    // Numeric comparison whenever either side is a number.
    if lhs.value.as_f64().is_some() || rhs.value.as_f64().is_some() {
        let l = coerce_number(lhs)?;
        let r = coerce_number(rhs)?;
        return Ok(match op {
            CompareOp::Lt => l < r,
            CompareOp::Le => l <= r,
            CompareOp::Eq => l == r,
            CompareOp::Ge => l >= r,
            CompareOp::Gt => l > r,
            CompareOp::Ne => l != r,
        });
    }

    let l = lhs.value.to_text();
    let r = rhs.value.to_text();
    Ok(match op {
        CompareOp::Lt => l < r,
        CompareOp::Le => l <= r,
        CompareOp::Eq => l == r,
        CompareOp::Ge => l >= r,
        CompareOp::Gt => l > r,
        CompareOp::Ne => l != r,
    })
}

/// Wildcard match with configurable multi- and single-character wildcards.
fn like_match(text: &str, pattern: &str, wildcard: char, single: char) -> bool {
    fn matches(text: &[char], pattern: &[char], wildcard: char, single: char) -> bool {
        match pattern.split_first() {
            None => text.is_empty(),
            Some((&p, rest)) if p == wildcard => {
                (0..=text.len()).any(|i| matches(&text[i..], rest, wildcard, single))
            }
            Some((&p, rest)) => match text.split_first() {
                Some((&t, text_rest)) if p == single || p == t => {
                    matches(text_rest, rest, wildcard, single)
                }
                _ => false,
            },
        }
    }
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    matches(&text, &pattern, wildcard, single)
}
