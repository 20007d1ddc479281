//! CSV reading with encoding and delimiter auto-detection.
//!
//! Tokenization (quoting, escaping) is delegated to the `csv` crate;
//! this module handles the steps around it: detecting the file encoding,
//! decoding to UTF-8, guessing the delimiter, and turning raw fields
//! into typed [`Cell`]s.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::Cell;

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Column headers, in file order.
    pub headers: Vec<String>,
    /// One row of typed cells per data line, aligned with `headers`.
    pub rows: Vec<Vec<Cell>>,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV content with an explicit delimiter.
///
/// Headers come from the first record. Rows shorter than the header are
/// padded with [`Cell::Null`]; extra fields are ignored.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if !delimiter.is_ascii() {
        return Err(CsvError::Delimiter(delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<Cell> = (0..headers.len())
            .map(|i| record.get(i).map(Cell::infer).unwrap_or(Cell::Null))
            .collect();
        rows.push(cells);
    }

    Ok(ParseResult {
        headers,
        rows,
        encoding,
        delimiter,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter, encoding)
}

/// Parse CSV bytes with an explicit delimiter and auto-detected encoding.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    parse_str(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse a CSV file with an explicit delimiter.
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    #[test]
    fn test_simple_csv() {
        let csv = "name,age\nAlice,30\nBob,25";
        let result = parse_str(csv, ',', "utf-8".into()).unwrap();

        assert_eq!(result.headers, vec!["name", "age"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0][0], Cell::Text("Alice".into()));
        assert_eq!(result.rows[0][1], Cell::Number(Number::from(30)));
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name,value\n\"Alice\",\"Hello, World\"";
        let result = parse_str(csv, ',', "utf-8".into()).unwrap();

        assert_eq!(result.rows[0][0], Cell::Text("Alice".into()));
        assert_eq!(result.rows[0][1], Cell::Text("Hello, World".into()));
    }

    #[test]
    fn test_missing_values_are_null() {
        let csv = "a,b,c\n1,,3";
        let result = parse_str(csv, ',', "utf-8".into()).unwrap();

        assert_eq!(result.rows[0][1], Cell::Null);
    }

    #[test]
    fn test_short_row_padded_with_null() {
        let csv = "a,b,c\n1,2";
        let result = parse_str(csv, ',', "utf-8".into()).unwrap();

        assert_eq!(result.rows[0][2], Cell::Null);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "a,b\n1,2,3,4";
        let result = parse_str(csv, ',', "utf-8".into()).unwrap();

        assert_eq!(result.rows[0].len(), 2);
    }

    #[test]
    fn test_typed_inference() {
        let csv = "s,i,f,b\nhello,7,2.5,true";
        let result = parse_str(csv, ',', "utf-8".into()).unwrap();

        assert_eq!(result.rows[0][0], Cell::Text("hello".into()));
        assert_eq!(result.rows[0][1], Cell::Number(Number::from(7)));
        assert_eq!(result.rows[0][2], Cell::Number(Number::from_f64(2.5).unwrap()));
        assert_eq!(result.rows[0][3], Cell::Bool(true));
    }

    #[test]
    fn test_empty_csv_error() {
        let result = parse_str("", ',', "utf-8".into());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = parse_str("a,b\n1,2", '→', "utf-8".into());
        assert!(matches!(result, Err(CsvError::Delimiter('→'))));
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_pipe() {
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "name;age\nAlice;30\nBob;25";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.headers, vec!["name", "age"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }
}
