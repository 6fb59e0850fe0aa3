// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Expression type extraction and sibling-operand reconciliation.

use crate::ast::Expr;
use crate::functions::FunctionResolver;
use crate::registry::AttributeRegistry;
use crate::sniff::sniff;
use crate::types::{Expected, FieldType};

/// Mutable state threaded through one inference run: the registry being
/// populated plus the function-signature resolver. Keeping it explicit
/// (rather than hidden visitor state) makes extraction testable node by
/// node.
pub(crate) struct InferenceContext<'a> {
    pub registry: &'a mut AttributeRegistry,
    pub resolver: &'a dyn FunctionResolver,
}

impl InferenceContext<'_> {
    /// Classify one expression node, registering any attribute references
    /// it contains. Names newly registered as scalars are appended to
    /// `found` so the caller can reconcile them against sibling operands.
    /// Returns the node's inferred value type.
    pub fn extract(&mut self, expected: Expected, expr: &Expr, found: &mut Vec<String>) -> FieldType {
        match expr {
            Expr::Attribute { name } => self.extract_attribute(expected, name, found),
            Expr::Function { name, args } => self.extract_function(name, args, found),
            Expr::Literal { value } => sniff(&value.to_text()),
            Expr::Opaque => FieldType::Text,
        }
    }

    fn extract_attribute(
        &mut self,
        expected: Expected,
        name: &str,
        found: &mut Vec<String>,
    ) -> FieldType {
        if expected.is_geometry() {
            if self.registry.contains_scalar(name) {
                // First seen in a scalar context, now proven geometry-valued.
                // The post-walk scan relocates the entry.
                self.registry.promote(name, FieldType::Geometry);
            } else {
                self.registry.add_geometry(name);
            }
            return FieldType::Geometry;
        }

        if self.registry.is_geometry(name) {
            return FieldType::Geometry;
        }

        if let Some(existing) = self.registry.scalar_type(name) {
            // First registration fixed the declared type; later corrections
            // go through the merge rule only.
            return existing;
        }

        let field_type = expected.field_type();
        self.registry.register(name, field_type);
        found.push(name.to_string());
        field_type
    }

    fn extract_function(
        &mut self,
        name: &str,
        args: &[Expr],
        found: &mut Vec<String>,
    ) -> FieldType {
        let resolver = self.resolver;
        let Some(signature) = resolver.resolve(name) else {
            // Unknown function: no parameter-type guidance.
            for arg in args {
                self.extract(Expected::TEXT, arg, found);
            }
            return FieldType::Text;
        };

        for (i, arg) in args.iter().enumerate() {
            // Surplus arguments match the last formal parameter.
            let expected = match signature.params.get(i) {
                Some(&p) => p,
                None => signature.params.last().copied().unwrap_or(Expected::TEXT),
            };
            self.extract(expected, arg, found);
        }

        signature.ret
    }

    /// Cross-propagate determined types between the operand sides of a
    /// comparison-like predicate. Operands compared against each other
    /// must share a value domain, so a strongly-typed side pushes its
    /// inference onto the attributes discovered on every other side.
    ///
    /// Geometry never propagates here; it is recorded at the reference
    /// site itself.
    pub fn reconcile(&mut self, sides: &[(Vec<String>, FieldType)]) {
        for (i, (_, inferred)) in sides.iter().enumerate() {
            if !inferred.is_determined() {
                continue;
            }
            for (j, (names, _)) in sides.iter().enumerate() {
                if i == j {
                    continue;
                }
                for name in names {
                    self.registry.promote(name, *inferred);
                }
            }
        }
    }
}
