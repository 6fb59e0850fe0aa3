// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

/// Value type recorded for a discovered attribute.
///
/// The scalar types form a small lattice for merge purposes: `Double`
/// dominates `Integer`, every other transition is last-write-wins.
/// `Geometry` never lives in the scalar registry for long; the walker
/// relocates geometry-typed entries into the geometry set after the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum FieldType {
    Text,
    Integer,
    LongInteger,
    Double,
    Geometry,
}

impl FieldType {
    /// Apply the merge rule: `incoming` replaces `self` unless that would
    /// downgrade an attribute already known to hold doubles.
    pub fn merged_with(self, incoming: FieldType) -> FieldType {
        if self == FieldType::Double && incoming == FieldType::Integer {
            FieldType::Double
        } else {
            incoming
        }
    }

    /// A determined type carries a signal worth propagating onto sibling
    /// operands. `Text` is the default inference and `Geometry` is handled
    /// at the reference site, never through the scalar merge rule.
    pub fn is_determined(self) -> bool {
        !matches!(self, FieldType::Text | FieldType::Geometry)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::LongInteger => "long",
            FieldType::Double => "double",
            FieldType::Geometry => "geometry",
        };
        f.write_str(s)
    }
}

/// Concrete geometry kinds carried by symbolizers. A point symbolizer
/// expects its geometry expression to yield a point, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

/// Expected-type hint pushed down while extracting an expression.
///
/// Either a scalar field type or a concrete geometry kind. The generic
/// geometry expectation is spelled `Expected::Field(FieldType::Geometry)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Field(FieldType),
    Geometry(GeometryKind),
}

impl Expected {
    pub const TEXT: Expected = Expected::Field(FieldType::Text);

    /// Whether this hint denotes a geometry-valued expression, either a
    /// concrete kind or the generic geometry type.
    pub fn is_geometry(self) -> bool {
        matches!(
            self,
            Expected::Geometry(_) | Expected::Field(FieldType::Geometry)
        )
    }

    /// The field type registered for an attribute seen under this hint.
    pub fn field_type(self) -> FieldType {
        match self {
            Expected::Field(t) => t,
            Expected::Geometry(_) => FieldType::Geometry,
        }
    }
}

impl From<FieldType> for Expected {
    fn from(t: FieldType) -> Self {
        Expected::Field(t)
    }
}

impl From<GeometryKind> for Expected {
    fn from(k: GeometryKind) -> Self {
        Expected::Geometry(k)
    }
}
