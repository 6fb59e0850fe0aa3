// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Attribute type inference for geospatial style documents.
//!
//! A style document references named data attributes inside filter
//! predicates, symbolizer properties and function calls, with no schema
//! available up front. This crate walks the document tree, collects every
//! referenced attribute name, infers its most specific value type from
//! local and sibling context, and separates geometry-valued attributes
//! from scalar ones. A secondary refinement pass evaluates rule predicates
//! against a sample record and promotes attributes whose inferred type
//! turned out to be too narrow.

pub mod ast;

mod eval;
mod extract;
mod functions;
mod refine;
mod registry;
mod sniff;
mod types;
mod value;
mod walker;
mod wkt;

pub use eval::{EvalError, PredicateEvaluator, Record, RecordEvaluator, SampleSource};
pub use functions::{Builtins, FunctionResolver, FunctionSignature};
pub use refine::{
    decode_failure_field, refine_field_types, refine_until_stable, NoopReporter, Reporter,
    UNABLE_TO_DECODE_PREFIX, UNABLE_TO_DECODE_SUFFIX,
};
pub use registry::{AttributeEntry, AttributeRegistry};
pub use sniff::sniff;
pub use types::{Expected, FieldType, GeometryKind};
pub use value::Value;
pub use walker::{extract_attributes, AttributeExtractor};

#[cfg(test)]
mod tests;
