//! Build one output record from one row and the detected array groups.
//!
//! Three passes over the row: scalar columns are normalized and copied
//! through, the `yearsExperience` field gets a best-effort integer
//! coercion, and each array group is folded into an ordered JSON array
//! with null cells collapsed out.

use serde_json::{Map, Number, Value};

use crate::models::Cell;
use crate::transform::grouper::ArrayGroups;

/// Field that receives integer coercion when present.
const YEARS_EXPERIENCE: &str = "yearsExperience";

/// Build an output record from one row of cells.
///
/// `cells` is aligned with `headers`; positions past the end of the row
/// read as null. Grouped columns never appear under their own column
/// name, only folded into their base-name array.
pub fn build_record(headers: &[String], cells: &[Cell], groups: &ArrayGroups) -> Map<String, Value> {
    let mut record = Map::new();

    // Scalar pass: everything that is not part of an array group.
    for (pos, header) in headers.iter().enumerate() {
        if groups.contains_column(pos) {
            continue;
        }
        let value = cell_at(cells, pos).normalize().into_value();
        record.insert(header.clone(), value);
    }

    // Integer coercion for yearsExperience. Failure keeps the
    // normalized value from the scalar pass.
    if let Some(value) = record.get(YEARS_EXPERIENCE) {
        if !value.is_null() {
            if let Some(years) = coerce_years(value) {
                record.insert(YEARS_EXPERIENCE.to_string(), Value::Number(Number::from(years)));
            }
        }
    }

    // Array pass: fold each group, dropping null cells. An all-null
    // group still yields an empty array, never a missing key.
    for (base, positions) in groups.iter() {
        let mut items = Vec::new();
        for &pos in positions {
            let cell = cell_at(cells, pos).normalize();
            if !cell.is_null() {
                items.push(cell.into_value());
            }
        }
        record.insert(base.to_string(), Value::Array(items));
    }

    record
}

fn cell_at(cells: &[Cell], pos: usize) -> Cell {
    cells.get(pos).cloned().unwrap_or(Cell::Null)
}

/// Interpret a normalized value as a year count.
///
/// The value is rendered as text, parsed as a float, and truncated, so
/// `"5.0"`, `"5"`, and `5.7` all become `5`. Returns `None` when the
/// value does not parse or the result does not fit an `i64`.
fn coerce_years(value: &Value) -> Option<i64> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let parsed = text.trim().parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let truncated = parsed.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(fields: &[&str]) -> Vec<Cell> {
        fields.iter().map(|f| Cell::infer(f)).collect()
    }

    #[test]
    fn test_scalar_passthrough_with_trimming() {
        let h = headers(&["name", "level"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["Alice", " Senior "]), &groups);

        assert_eq!(record["name"], json!("Alice"));
        assert_eq!(record["level"], json!("Senior"));
    }

    #[test]
    fn test_empty_scalar_becomes_null() {
        let h = headers(&["name", "level"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["Alice", ""]), &groups);

        assert_eq!(record["level"], Value::Null);
    }

    #[test]
    fn test_array_collapsing_drops_empty_slots() {
        let h = headers(&["skill[0]", "skill[1]", "skill[2]"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["Go", "", "Rust"]), &groups);

        assert_eq!(record["skill"], json!(["Go", "Rust"]));
    }

    #[test]
    fn test_all_empty_group_yields_empty_array() {
        let h = headers(&["name", "skill[0]", "skill[1]"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["Alice", "", "  "]), &groups);

        assert_eq!(record["skill"], json!([]));
        assert!(record.contains_key("skill"));
    }

    #[test]
    fn test_array_respects_numeric_index_order() {
        let h = headers(&["skill[10]", "skill[2]", "skill[0]"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["ten", "two", "zero"]), &groups);

        assert_eq!(record["skill"], json!(["zero", "two", "ten"]));
    }

    #[test]
    fn test_grouped_columns_absent_as_scalars() {
        let h = headers(&["name", "skill[0]"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["Alice", "Go"]), &groups);

        assert!(!record.contains_key("skill[0]"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_years_experience_float_string_truncated() {
        let h = headers(&["yearsExperience"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(
            &h,
            &[Cell::Text("5.0".into())],
            &groups,
        );

        assert_eq!(record["yearsExperience"], json!(5));
    }

    #[test]
    fn test_years_experience_inferred_number() {
        let h = headers(&["yearsExperience"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["3"]), &groups);

        assert_eq!(record["yearsExperience"], json!(3));
    }

    #[test]
    fn test_years_experience_fractional_truncates() {
        let h = headers(&["yearsExperience"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["7.9"]), &groups);

        assert_eq!(record["yearsExperience"], json!(7));
    }

    #[test]
    fn test_years_experience_unparsable_kept_as_string() {
        let h = headers(&["yearsExperience"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["five"]), &groups);

        assert_eq!(record["yearsExperience"], json!("five"));
    }

    #[test]
    fn test_years_experience_null_left_alone() {
        let h = headers(&["yearsExperience"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&[""]), &groups);

        assert_eq!(record["yearsExperience"], Value::Null);
    }

    #[test]
    fn test_short_row_reads_as_null() {
        let h = headers(&["name", "skill[0]", "skill[1]"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["Alice", "Go"]), &groups);

        assert_eq!(record["skill"], json!(["Go"]));
    }

    #[test]
    fn test_numbers_survive_in_arrays() {
        let h = headers(&["score[0]", "score[1]"]);
        let groups = ArrayGroups::detect(&h);
        let record = build_record(&h, &row(&["10", "2.5"]), &groups);

        assert_eq!(record["score"], json!([10, 2.5]));
    }
}
