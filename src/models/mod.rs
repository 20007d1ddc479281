//! Core data model for the conversion pipeline.
//!
//! A CSV cell can arrive as a string, a number, a boolean, or a missing
//! value depending on upstream inference. Instead of inspecting
//! `serde_json::Value` variants all over the pipeline, the boundary is a
//! closed [`Cell`] variant and normalization is a total function over it.

use serde_json::{Number, Value};

// =============================================================================
// Cell
// =============================================================================

/// A single typed cell of the input table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value (empty field or absent column).
    Null,
    /// Textual value, possibly with surrounding whitespace.
    Text(String),
    /// Numeric value (integer or float).
    Number(Number),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Infer a typed cell from a raw CSV field.
    ///
    /// Inference order: empty, integer, float, boolean, text. The raw
    /// text is kept as-is for the `Text` case; trimming happens during
    /// normalization, not here.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Number(Number::from(i));
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if let Some(n) = Number::from_f64(f) {
                return Cell::Number(n);
            }
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Cell::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Cell::Bool(false);
        }
        Cell::Text(raw.to_string())
    }

    /// Normalize a cell value.
    ///
    /// - `Null` stays `Null`.
    /// - `Text` is trimmed; if the trimmed result is empty the cell
    ///   becomes `Null`.
    /// - Numbers and booleans pass through unchanged.
    ///
    /// Normalization is idempotent: normalizing an already-normalized
    /// cell returns it unchanged.
    pub fn normalize(self) -> Self {
        match self {
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Cell::Null
                } else if trimmed.len() == s.len() {
                    Cell::Text(s)
                } else {
                    Cell::Text(trimmed.to_string())
                }
            }
            other => other,
        }
    }

    /// Whether this cell is the missing marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Convert into a JSON value.
    pub fn into_value(self) -> Value {
        match self {
            Cell::Null => Value::Null,
            Cell::Text(s) => Value::String(s),
            Cell::Number(n) => Value::Number(n),
            Cell::Bool(b) => Value::Bool(b),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
