// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::registry::AttributeRegistry;
use crate::types::FieldType;

#[test]
fn register_preserves_insertion_order() {
    let mut registry = AttributeRegistry::new();
    registry.register("b", FieldType::Text);
    registry.register("a", FieldType::Integer);
    registry.register("c", FieldType::Double);

    let names: Vec<&str> = registry
        .scalar_fields()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn register_is_idempotent() {
    let mut registry = AttributeRegistry::new();
    assert!(registry.register("name", FieldType::Text));
    assert!(!registry.register("name", FieldType::Text));
    assert_eq!(registry.scalar_fields().len(), 1);
}

#[test]
fn first_registration_wins() {
    let mut registry = AttributeRegistry::new();
    registry.register("name", FieldType::Integer);
    registry.register("name", FieldType::Double);
    assert_eq!(registry.scalar_type("name"), Some(FieldType::Integer));
}

#[test]
fn promote_overwrites_by_default() {
    let mut registry = AttributeRegistry::new();
    registry.register("a", FieldType::Text);
    assert!(registry.promote("a", FieldType::Integer));
    assert_eq!(registry.scalar_type("a"), Some(FieldType::Integer));
    assert!(registry.promote("a", FieldType::Double));
    assert_eq!(registry.scalar_type("a"), Some(FieldType::Double));
}

#[test]
fn double_dominates_integer() {
    let mut registry = AttributeRegistry::new();
    registry.register("a", FieldType::Double);
    assert!(!registry.promote("a", FieldType::Integer));
    assert_eq!(registry.scalar_type("a"), Some(FieldType::Double));
}

#[test]
fn promote_unknown_name_is_noop() {
    let mut registry = AttributeRegistry::new();
    assert!(!registry.promote("ghost", FieldType::Integer));
    assert!(registry.is_empty());
}

#[test]
fn promote_to_same_type_reports_no_change() {
    let mut registry = AttributeRegistry::new();
    registry.register("a", FieldType::Text);
    assert!(registry.promote("a", FieldType::LongInteger));
    assert!(!registry.promote("a", FieldType::LongInteger));
}

#[test]
fn relocation_moves_geometry_entries() {
    let mut registry = AttributeRegistry::new();
    registry.register("shape", FieldType::Text);
    registry.register("name", FieldType::Text);
    registry.promote("shape", FieldType::Geometry);

    registry.relocate_geometry_entries();

    assert!(!registry.contains_scalar("shape"));
    assert!(registry.geometry_fields().contains("shape"));
    assert_eq!(registry.scalar_type("name"), Some(FieldType::Text));
    // Index stays consistent after compaction.
    registry.promote("name", FieldType::Integer);
    assert_eq!(registry.scalar_type("name"), Some(FieldType::Integer));
}

#[test]
fn scalar_and_geometry_sets_are_disjoint_after_relocation() {
    let mut registry = AttributeRegistry::new();
    registry.register("geom", FieldType::Geometry);
    registry.relocate_geometry_entries();

    for entry in registry.scalar_fields() {
        assert!(!registry.geometry_fields().contains(&entry.name));
    }
    assert!(registry.geometry_fields().contains("geom"));
}
