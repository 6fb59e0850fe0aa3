// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The style document tree.
//!
//! The tree is produced by an external loader and is only read here. Each
//! kind family (expression, predicate, symbolizer) is a closed sum type so
//! the extractor can match exhaustively instead of inspecting runtime
//! types.

use crate::value::Value;

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum SpatialOp {
    Bbox,
    Contains,
    Crosses,
    Disjoint,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum TemporalOp {
    After,
    Before,
    During,
    TEquals,
}

/// Expression node. Attribute references, literals and function calls are
/// the only kinds that carry a type signal; everything the loader produces
/// beyond those (arithmetic, environment variables, ...) is opaque to the
/// inference and folds to `Opaque`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum Expr {
    Attribute {
        name: String,
    },

    Literal {
        value: Value,
    },

    Function {
        name: String,
        args: Vec<Expr>,
    },

    Opaque,
}

impl Expr {
    pub fn attribute(name: impl Into<String>) -> Expr {
        Expr::Attribute { name: name.into() }
    }

    pub fn literal(value: impl Into<Value>) -> Expr {
        Expr::Literal {
            value: value.into(),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Function {
            name: name.into(),
            args,
        }
    }
}

/// Filter predicate attached to a rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum Predicate {
    Not(Box<Predicate>),

    And(Vec<Predicate>),

    Or(Vec<Predicate>),

    Compare {
        op: CompareOp,
        lhs: Expr,
        rhs: Expr,
    },

    Spatial {
        op: SpatialOp,
        lhs: Expr,
        rhs: Expr,
    },

    Temporal {
        op: TemporalOp,
        lhs: Expr,
        rhs: Expr,
    },

    Between {
        value: Expr,
        lower: Expr,
        upper: Expr,
    },

    IsNull {
        expr: Expr,
    },

    Like {
        expr: Expr,
        pattern: String,
        wildcard: char,
        single: char,
    },
}

impl Predicate {
    /// A `Like` predicate with the conventional `*` / `?` wildcards.
    pub fn like(expr: Expr, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            expr,
            pattern: pattern.into(),
            wildcard: '*',
            single: '?',
        }
    }
}

/// Symbolizer kinds. Point, line and polygon symbolizers pin their
/// geometry expression to a concrete geometry kind; text and raster
/// symbolizers accept any geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum Symbolizer {
    Point {
        geometry: Option<Expr>,
    },

    Line {
        geometry: Option<Expr>,
    },

    Polygon {
        geometry: Option<Expr>,
    },

    Text {
        geometry: Option<Expr>,
        label: Option<Expr>,
    },

    Raster {
        geometry: Option<Expr>,
    },
}

impl Symbolizer {
    pub fn geometry(&self) -> Option<&Expr> {
        match self {
            Symbolizer::Point { geometry }
            | Symbolizer::Line { geometry }
            | Symbolizer::Polygon { geometry }
            | Symbolizer::Text { geometry, .. }
            | Symbolizer::Raster { geometry } => geometry.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Rule {
    pub name: String,
    pub filter: Option<Predicate>,
    pub symbolizers: Vec<Symbolizer>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct FeatureTypeStyle {
    pub name: String,
    pub rules: Vec<Rule>,
    pub options: BTreeMap<String, String>,
}

impl FeatureTypeStyle {
    /// Option key holding a comma-separated list of sort fields, each an
    /// attribute name optionally followed by `A` or `D`.
    pub const SORT_BY: &'static str = "sortBy";

    /// Option key holding a single attribute name used for sort grouping.
    pub const SORT_BY_GROUP: &'static str = "sortByGroup";
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct Style {
    pub name: String,
    pub feature_type_styles: Vec<FeatureTypeStyle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct StyledLayer {
    pub name: String,
    pub styles: Vec<Style>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub struct StyledLayerDescriptor {
    pub layers: Vec<StyledLayer>,
}
