// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::types::FieldType;
use crate::value::Value;

use std::collections::{BTreeSet, HashMap};

/// One discovered scalar attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEntry {
    pub name: String,
    pub field_type: FieldType,
    pub default_value: Option<Value>,
}

/// Ordered collection of discovered attributes.
///
/// Scalar entries keep their insertion order so output is reproducible
/// across runs; a name index backs O(1) merge decisions. Geometry-valued
/// attribute names live in a separate set. Invariant: the scalar key set
/// and the geometry set are disjoint.
///
/// Both containers are created empty per inference run and discarded when
/// the next run replaces them; nothing is persisted.
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    entries: Vec<AttributeEntry>,
    index: HashMap<String, usize>,
    geometry: BTreeSet<String>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-if-absent, preserving insertion order. Returns whether a new
    /// entry was created.
    pub fn register(&mut self, name: &str, field_type: FieldType) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(AttributeEntry {
            name: name.to_string(),
            field_type,
            default_value: None,
        });
        true
    }

    /// Apply the merge rule to an existing entry; no-op for unknown names.
    /// Returns whether the registered type actually changed.
    pub fn promote(&mut self, name: &str, field_type: FieldType) -> bool {
        if let Some(&i) = self.index.get(name) {
            let entry = &mut self.entries[i];
            let merged = entry.field_type.merged_with(field_type);
            if merged != entry.field_type {
                entry.field_type = merged;
                return true;
            }
        }
        false
    }

    pub fn scalar_type(&self, name: &str) -> Option<FieldType> {
        self.index.get(name).map(|&i| self.entries[i].field_type)
    }

    pub fn contains_scalar(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Record `name` as geometry-valued. Callers must ensure the name is
    /// not currently scalar-registered; use `relocate_geometry_entries` to
    /// restore disjointness after direct type updates.
    pub fn add_geometry(&mut self, name: &str) {
        self.geometry.insert(name.to_string());
    }

    pub fn is_geometry(&self, name: &str) -> bool {
        self.geometry.contains(name)
    }

    /// Move every scalar entry whose type ended up `Geometry` into the
    /// geometry set. This happens when an attribute is first seen in a
    /// non-geometry context and later proven geometry-valued elsewhere.
    pub fn relocate_geometry_entries(&mut self) {
        if !self
            .entries
            .iter()
            .any(|e| e.field_type == FieldType::Geometry)
        {
            return;
        }
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.field_type == FieldType::Geometry {
                self.index.remove(&entry.name);
                self.geometry.insert(entry.name);
            } else {
                kept.push(entry);
            }
        }
        for (i, entry) in kept.iter().enumerate() {
            self.index.insert(entry.name.clone(), i);
        }
        self.entries = kept;
    }

    /// Discovered scalar attributes in insertion order.
    pub fn scalar_fields(&self) -> &[AttributeEntry] {
        &self.entries
    }

    /// Names of attributes known to be geometry-valued.
    pub fn geometry_fields(&self) -> &BTreeSet<String> {
        &self.geometry
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.geometry.is_empty()
    }
}
