// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::types::FieldType;
use crate::wkt;

/// Best-guess type of a literal from its textual form.
///
/// Ordered trial parsing, first success wins: well-known-text geometry,
/// then signed integer, then signed floating value, falling back to text.
/// Parse failures along the way are the intended fallback chain, not
/// errors.
pub fn sniff(text: &str) -> FieldType {
    if wkt::is_wkt(text) {
        return FieldType::Geometry;
    }
    if text.parse::<i64>().is_ok() {
        return FieldType::Integer;
    }
    if text.parse::<f64>().is_ok() {
        return FieldType::Double;
    }
    FieldType::Text
}
