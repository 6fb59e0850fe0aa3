// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Function signature lookup.
//!
//! The extractor needs, for each function call, the ordered formal
//! parameter types and the declared return type. Where the signatures come
//! from is a boundary concern: hosts with their own function registry
//! implement [`FunctionResolver`], while [`Builtins`] serves the common
//! filter-function vocabulary out of a static table.

use crate::types::{Expected, FieldType, GeometryKind};

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Ordered formal parameter types and declared return type of a function.
///
/// A call with more actual arguments than formal parameters matches the
/// surplus arguments against the last formal parameter (variadic-tail
/// convention).
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub params: Vec<Expected>,
    pub ret: FieldType,
}

/// Resolves a function name to its signature. Unknown functions yield
/// `None`, which the extractor treats as "no parameter-type guidance".
pub trait FunctionResolver {
    fn resolve(&self, name: &str) -> Option<&FunctionSignature>;
}

fn sig(
    m: &mut HashMap<&'static str, FunctionSignature>,
    name: &'static str,
    params: &[Expected],
    ret: FieldType,
) {
    m.insert(
        name,
        FunctionSignature {
            params: params.to_vec(),
            ret,
        },
    );
}

fn register_strings(m: &mut HashMap<&'static str, FunctionSignature>) {
    use Expected::Field;
    use FieldType::*;

    sig(m, "strConcat", &[Field(Text), Field(Text)], Text);
    sig(m, "strLength", &[Field(Text)], Integer);
    sig(m, "strToLowerCase", &[Field(Text)], Text);
    sig(m, "strToUpperCase", &[Field(Text)], Text);
    sig(m, "strTrim", &[Field(Text)], Text);
    sig(m, "strSubstring", &[Field(Text), Field(Integer), Field(Integer)], Text);
    sig(m, "strIndexOf", &[Field(Text), Field(Text)], Integer);
    // Declared with a single formal parameter; accepts any number of
    // arguments through the variadic-tail convention.
    sig(m, "Concatenate", &[Field(Text)], Text);
}

fn register_numbers(m: &mut HashMap<&'static str, FunctionSignature>) {
    use Expected::Field;
    use FieldType::*;

    sig(m, "abs", &[Field(Integer)], Integer);
    sig(m, "abs_2", &[Field(Double)], Double);
    sig(m, "ceil", &[Field(Double)], Double);
    sig(m, "floor", &[Field(Double)], Double);
    sig(m, "round", &[Field(Double)], Integer);
    sig(m, "min", &[Field(Double), Field(Double)], Double);
    sig(m, "max", &[Field(Double), Field(Double)], Double);
    sig(m, "pow", &[Field(Double), Field(Double)], Double);
    sig(m, "parseDouble", &[Field(Text)], Double);
    sig(m, "parseInt", &[Field(Text)], Integer);
    sig(m, "parseLong", &[Field(Text)], LongInteger);
}

fn register_geometry(m: &mut HashMap<&'static str, FunctionSignature>) {
    use Expected::{Field, Geometry};

    let geom = Field(FieldType::Geometry);
    sig(m, "area", &[geom], FieldType::Double);
    sig(m, "geomLength", &[geom], FieldType::Double);
    sig(m, "buffer", &[geom, Field(FieldType::Double)], FieldType::Geometry);
    sig(m, "centroid", &[geom], FieldType::Geometry);
    sig(m, "startPoint", &[Geometry(GeometryKind::Line)], FieldType::Geometry);
    sig(m, "endPoint", &[Geometry(GeometryKind::Line)], FieldType::Geometry);
    sig(m, "vertices", &[geom], FieldType::Geometry);
}

#[rustfmt::skip]
lazy_static! {
    static ref SIGNATURES: HashMap<&'static str, FunctionSignature> = {
        let mut m: HashMap<&'static str, FunctionSignature> = HashMap::new();

        register_strings(&mut m);
        register_numbers(&mut m);
        register_geometry(&mut m);

        m
    };
}

/// Signature table for the common filter-function vocabulary.
#[derive(Debug, Default, Clone, Copy)]
pub struct Builtins;

impl FunctionResolver for Builtins {
    fn resolve(&self, name: &str) -> Option<&FunctionSignature> {
        SIGNATURES.get(name)
    }
}
