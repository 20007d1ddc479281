//! High-level conversion API.
//!
//! Combines parsing, column grouping, and record building into single
//! entry points over files, bytes, or already-parsed rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use unflat::{convert_file, ConvertOptions};
//!
//! let conversion = convert_file("talent.csv", &ConvertOptions::default())?;
//! println!("{} records", conversion.records.len());
//! std::fs::write("talent.json", conversion.to_json(true)?)?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};
use crate::parser::{parse_bytes, parse_bytes_auto, parse_file, parse_file_auto, ParseResult};
use crate::transform::builder::build_record;
use crate::transform::grouper::ArrayGroups;

/// Options for a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Delimiter to use; `None` auto-detects from the header line.
    pub delimiter: Option<char>,

    /// Pretty-print the JSON document.
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            pretty: true,
        }
    }
}

/// Result of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// One output record per input row, in input order.
    pub records: Vec<Map<String, Value>>,

    /// Array-group base names detected in the header, sorted.
    pub group_names: Vec<String>,

    /// CSV parsing metadata.
    pub csv_info: CsvInfo,
}

/// CSV file information.
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl Conversion {
    /// Serialize the output document (a JSON array, one object per row).
    pub fn to_json(&self, pretty: bool) -> ConvertResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.records)?
        } else {
            serde_json::to_string(&self.records)?
        };
        Ok(json)
    }
}

/// Convert a CSV file into an output document.
///
/// This is the main entry point. It:
/// 1. Parses the CSV (auto-detecting encoding, and delimiter unless overridden)
/// 2. Detects indexed array-column groups
/// 3. Rejects base names that collide with plain scalar columns
/// 4. Builds one record per row, preserving input order
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> ConvertResult<Conversion> {
    let parsed = match options.delimiter {
        Some(d) => parse_file(path, d)?,
        None => parse_file_auto(path)?,
    };
    convert_rows(parsed)
}

/// Convert raw CSV bytes into an output document.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> ConvertResult<Conversion> {
    let parsed = match options.delimiter {
        Some(d) => parse_bytes(bytes, d)?,
        None => parse_bytes_auto(bytes)?,
    };
    convert_rows(parsed)
}

/// Convert already-parsed rows into an output document.
pub fn convert_rows(parsed: ParseResult) -> ConvertResult<Conversion> {
    let groups = ArrayGroups::detect(&parsed.headers);

    let collisions = groups.collisions(&parsed.headers);
    if let Some(base) = collisions.into_iter().next() {
        return Err(ConvertError::ColumnCollision { base });
    }

    let records: Vec<Map<String, Value>> = parsed
        .rows
        .iter()
        .map(|cells| build_record(&parsed.headers, cells, &groups))
        .collect();

    let mut group_names: Vec<String> =
        groups.iter().map(|(base, _)| base.to_string()).collect();
    group_names.sort();

    Ok(Conversion {
        records,
        group_names,
        csv_info: CsvInfo {
            encoding: parsed.encoding,
            delimiter: parsed.delimiter,
            headers: parsed.headers,
            row_count: parsed.rows.len(),
        },
    })
}
