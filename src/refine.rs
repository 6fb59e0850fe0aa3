// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Field type refinement.
//!
//! The static walk cannot always pick the right numeric width: an
//! attribute compared only against text literals stays `Text` even when
//! the underlying data holds large integers. This pass evaluates each
//! rule's predicate against one sample record, intercepts coercion
//! failures, and promotes the offending attribute to `LongInteger`.

use crate::ast::StyledLayerDescriptor;
use crate::eval::{EvalError, PredicateEvaluator, SampleSource};
use crate::registry::AttributeRegistry;
use crate::types::FieldType;

/// Message contract for coercion failures reported as plain strings.
/// Structured evaluators raise [`EvalError::DecodeNumber`] instead; the
/// prefix/suffix pair exists for components only able to report text.
pub const UNABLE_TO_DECODE_PREFIX: &str = "Unable to decode '";
pub const UNABLE_TO_DECODE_SUFFIX: &str = "' as a number";

/// Extract the field name from a decode-failure message, if the message
/// matches the contract.
pub fn decode_failure_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix(UNABLE_TO_DECODE_PREFIX)?;
    rest.strip_suffix(UNABLE_TO_DECODE_SUFFIX)
}

/// Receives evaluation failures the refinement pass does not recognize.
/// Such failures skip the rule for this pass; they never abort it.
pub trait Reporter {
    fn report(&mut self, rule: &str, error: &EvalError);
}

/// Discards everything reported to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _rule: &str, _error: &EvalError) {}
}

/// Run one refinement pass over every rule in the document. Returns
/// whether any promotion changed the registry.
///
/// Each pass surfaces at most one failure per rule, so a predicate with
/// several independently failing sub-expressions needs several passes;
/// see [`refine_until_stable`].
pub fn refine_field_types(
    sld: &StyledLayerDescriptor,
    registry: &mut AttributeRegistry,
    source: &mut dyn SampleSource,
    evaluator: &dyn PredicateEvaluator,
    reporter: &mut dyn Reporter,
) -> bool {
    let mut updated = false;

    for layer in &sld.layers {
        for style in &layer.styles {
            for fts in &style.feature_type_styles {
                for rule in &fts.rules {
                    let Some(filter) = &rule.filter else {
                        continue;
                    };
                    let Some(record) = source.next_sample() else {
                        continue;
                    };
                    match evaluator.evaluate(filter, &record) {
                        Ok(_) => {}
                        Err(EvalError::DecodeNumber { field }) => {
                            updated |= registry.promote(&field, FieldType::LongInteger);
                        }
                        Err(error) => {
                            // A string-reporting evaluator may still carry
                            // the decode contract in its message.
                            let message = error.to_string();
                            if let Some(field) = decode_failure_field(&message) {
                                updated |= registry.promote(field, FieldType::LongInteger);
                            } else {
                                reporter.report(&rule.name, &error);
                            }
                        }
                    }
                }
            }
        }
    }

    updated
}

/// Re-run refinement passes until one reports no change.
pub fn refine_until_stable(
    sld: &StyledLayerDescriptor,
    registry: &mut AttributeRegistry,
    source: &mut dyn SampleSource,
    evaluator: &dyn PredicateEvaluator,
    reporter: &mut dyn Reporter,
) -> usize {
    let mut passes = 0;
    loop {
        passes += 1;
        if !refine_field_types(sld, registry, source, evaluator, reporter) {
            return passes;
        }
    }
}
