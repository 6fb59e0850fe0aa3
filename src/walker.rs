// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Depth-first walk of a style document, populating an attribute
//! registry as it goes.

use crate::ast::{
    Expr, FeatureTypeStyle, Predicate, Rule, Style, StyledLayer, StyledLayerDescriptor, Symbolizer,
};
use crate::extract::InferenceContext;
use crate::functions::{Builtins, FunctionResolver};
use crate::registry::AttributeRegistry;
use crate::types::{Expected, FieldType, GeometryKind};

/// Walks a style document and collects every referenced attribute.
///
/// One extractor serves one inference run; the registry it produces is
/// replaced wholesale the next time inference is requested.
pub struct AttributeExtractor<'a> {
    registry: AttributeRegistry,
    resolver: &'a dyn FunctionResolver,
}

/// Run inference over a full style document with the builtin function
/// signatures.
pub fn extract_attributes(sld: &StyledLayerDescriptor) -> AttributeRegistry {
    AttributeExtractor::new(&Builtins).walk(sld)
}

impl<'a> AttributeExtractor<'a> {
    pub fn new(resolver: &'a dyn FunctionResolver) -> Self {
        AttributeExtractor {
            registry: AttributeRegistry::new(),
            resolver,
        }
    }

    /// Walk the whole document and return the populated registry.
    pub fn walk(mut self, sld: &StyledLayerDescriptor) -> AttributeRegistry {
        for layer in &sld.layers {
            self.walk_layer(layer);
        }
        // An attribute first seen as a scalar may have been proven
        // geometry-valued later in the walk; restore disjointness.
        self.registry.relocate_geometry_entries();
        self.registry
    }

    fn ctx(&mut self) -> InferenceContext<'_> {
        InferenceContext {
            registry: &mut self.registry,
            resolver: self.resolver,
        }
    }

    fn extract(&mut self, expected: Expected, expr: &Expr) -> (Vec<String>, FieldType) {
        let mut found = Vec::new();
        let inferred = self.ctx().extract(expected, expr, &mut found);
        (found, inferred)
    }

    fn walk_layer(&mut self, layer: &StyledLayer) {
        for style in &layer.styles {
            self.walk_style(style);
        }
    }

    fn walk_style(&mut self, style: &Style) {
        for fts in &style.feature_type_styles {
            self.walk_feature_type_style(fts);
        }
    }

    fn walk_feature_type_style(&mut self, fts: &FeatureTypeStyle) {
        for rule in &fts.rules {
            self.walk_rule(rule);
        }
        self.walk_sort_options(fts);
    }

    /// Sort keys are always scalar attributes, never geometry.
    fn walk_sort_options(&mut self, fts: &FeatureTypeStyle) {
        if let Some(group) = fts.options.get(FeatureTypeStyle::SORT_BY_GROUP) {
            let refr = Expr::attribute(group.trim());
            self.extract(Expected::TEXT, &refr);
        }
        if let Some(sort_by) = fts.options.get(FeatureTypeStyle::SORT_BY) {
            for key in parse_sort_by(sort_by) {
                let refr = Expr::attribute(key);
                self.extract(Expected::TEXT, &refr);
            }
        }
    }

    fn walk_rule(&mut self, rule: &Rule) {
        if let Some(filter) = &rule.filter {
            self.walk_predicate(filter);
        }
        for symbolizer in &rule.symbolizers {
            self.walk_symbolizer(symbolizer);
        }
    }

    /// Extract a symbolizer's geometry expression with the symbolizer's
    /// canonical geometry kind, so a plain attribute reference there lands
    /// in the geometry set.
    fn walk_symbolizer(&mut self, symbolizer: &Symbolizer) {
        let expected = match symbolizer {
            Symbolizer::Point { .. } => Expected::Geometry(GeometryKind::Point),
            Symbolizer::Line { .. } => Expected::Geometry(GeometryKind::Line),
            Symbolizer::Polygon { .. } => Expected::Geometry(GeometryKind::Polygon),
            Symbolizer::Text { .. } | Symbolizer::Raster { .. } => {
                Expected::Field(FieldType::Geometry)
            }
        };
        if let Some(geometry) = symbolizer.geometry() {
            self.extract(expected, geometry);
        }
        if let Symbolizer::Text {
            label: Some(label), ..
        } = symbolizer
        {
            self.extract(Expected::TEXT, label);
        }
    }

    fn walk_predicate(&mut self, predicate: &Predicate) {
        match predicate {
            Predicate::Not(inner) => self.walk_predicate(inner),
            Predicate::And(children) | Predicate::Or(children) => {
                for child in children {
                    self.walk_predicate(child);
                }
            }
            Predicate::Compare { lhs, rhs, .. }
            | Predicate::Spatial { lhs, rhs, .. }
            | Predicate::Temporal { lhs, rhs, .. } => {
                let left = self.extract(Expected::TEXT, lhs);
                let right = self.extract(Expected::TEXT, rhs);
                self.ctx().reconcile(&[left, right]);
            }
            Predicate::Between {
                value,
                lower,
                upper,
            } => {
                let lo = self.extract(Expected::TEXT, lower);
                let mid = self.extract(Expected::TEXT, value);
                let hi = self.extract(Expected::TEXT, upper);
                self.ctx().reconcile(&[lo, mid, hi]);
            }
            // Single operand, nothing to reconcile against.
            Predicate::IsNull { expr } | Predicate::Like { expr, .. } => {
                self.extract(Expected::TEXT, expr);
            }
        }
    }
}

/// Parse a `sortBy` option value: comma-separated sort fields, each an
/// attribute name optionally followed by an `A` or `D` direction token.
fn parse_sort_by(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter_map(|part| {
        let mut tokens = part.split_whitespace();
        tokens.next()
    })
}
