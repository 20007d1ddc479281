//! # Unflat - CSV to JSON conversion with array-column reconstruction
//!
//! Unflat converts tabular exports back into structured JSON. Array
//! fields that were flattened into indexed columns (`skill[0]`,
//! `skill[1]`, ...) are detected, ordered numerically, and folded back
//! into JSON arrays, one record per input row.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│ JSON Array  │
//! │  (any enc.) │     │ (auto-enc)  │     │(group+build)│     │ (1 obj/row) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use unflat::{convert_file, ConvertOptions};
//!
//! let conversion = convert_file("talent.csv", &ConvertOptions::default())?;
//! std::fs::write("talent.json", conversion.to_json(true)?)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Typed cell variant and value normalization
//! - [`parser`] - CSV parsing with encoding/delimiter auto-detection
//! - [`transform`] - Column grouping, record building, and the pipeline

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, ConvertResult, CsvError, CsvResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::Cell;

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_bytes_auto, parse_file,
    parse_file_auto, ParseResult,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::builder::build_record;
pub use transform::grouper::ArrayGroups;
pub use transform::pipeline::{
    convert_bytes, convert_file, convert_rows, Conversion, ConvertOptions, CsvInfo,
};
