//! Error types for the unflat conversion pipeline.
//!
//! Two layers:
//!
//! - [`CsvError`] - CSV reading/decoding errors
//! - [`ConvertError`] - Top-level conversion errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV reading and decoding.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file content.
    #[error("Failed to decode content as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    /// Malformed CSV (unbalanced quotes, bad record).
    #[error("Invalid CSV: {0}")]
    Malformed(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Delimiter outside the ASCII range.
    #[error("Unsupported delimiter: '{0}' (must be a single ASCII character)")]
    Delimiter(char),

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the main error type returned by [`crate::pipeline::convert_file`].
/// Per-field coercion failures are never errors: the conversion either
/// succeeds for the whole input or aborts.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// An array base name collides with a plain scalar column.
    ///
    /// `skill[0]` next to a plain `skill` column would make one silently
    /// overwrite the other, so it is rejected before any row is built.
    #[error("Column '{base}' exists both as a plain column and as indexed columns ('{base}[N]')")]
    ColumnCollision { base: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the output artifact.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
