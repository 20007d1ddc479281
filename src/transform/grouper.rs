//! Detect indexed array columns and group them by base name.
//!
//! Tabular exports flatten array fields into indexed columns. This module
//! finds those column families and orders them so the record builder can
//! fold them back into arrays:
//!
//! ```text
//! CSV headers (flat)                →  Array groups
//! ┌───────────────────────────────┐   ┌──────────────────────────────┐
//! │ name, skill[2], skill[0],     │   │ skill    → [skill[0],        │
//! │ skill[10], level, tool[0]     │ → │             skill[2],        │
//! └───────────────────────────────┘   │             skill[10]]       │
//!                                     │ tool     → [tool[0]]         │
//!                                     └──────────────────────────────┘
//! ```
//!
//! Ordering is by the numeric index, not lexical (`[10]` sorts after
//! `[2]`). Non-matching headers stay scalar and are handled by the
//! record builder's scalar pass.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Matches `base[idx]` where `base` has no `[` and `idx` is decimal digits.
static ARRAY_COL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\[]+)\[(\d+)\]$").unwrap());

/// Indexed-column families detected in a header row.
///
/// Each group maps a base name to the column positions belonging to it,
/// sorted ascending by the parsed index. Positions (not names) are kept
/// so duplicate column names stay distinct. Indices need not be
/// contiguous or zero-based; only relative order matters.
#[derive(Debug, Clone, Default)]
pub struct ArrayGroups {
    groups: HashMap<String, Vec<usize>>,
    members: HashSet<usize>,
}

impl ArrayGroups {
    /// Scan headers and bucket indexed columns by base name.
    ///
    /// This cannot fail: headers with no indexed columns produce an
    /// empty grouping. An index that does not fit in `u64` leaves the
    /// column scalar. Base names are case-sensitive.
    pub fn detect(headers: &[String]) -> Self {
        let mut buckets: HashMap<String, Vec<(u64, usize)>> = HashMap::new();

        for (pos, header) in headers.iter().enumerate() {
            if let Some(caps) = ARRAY_COL_PATTERN.captures(header) {
                let base = &caps[1];
                let Ok(idx) = caps[2].parse::<u64>() else {
                    continue;
                };
                buckets.entry(base.to_string()).or_default().push((idx, pos));
            }
        }

        let mut groups = HashMap::new();
        let mut members = HashSet::new();
        for (base, mut pairs) in buckets {
            // stable: ties (duplicate indices) keep original column order
            pairs.sort_by_key(|&(idx, _)| idx);
            let positions: Vec<usize> = pairs.into_iter().map(|(_, pos)| pos).collect();
            members.extend(positions.iter().copied());
            groups.insert(base, positions);
        }

        Self { groups, members }
    }

    /// Whether the column at `pos` belongs to any array group.
    pub fn contains_column(&self, pos: usize) -> bool {
        self.members.contains(&pos)
    }

    /// Iterate over `(base name, ordered column positions)`.
    ///
    /// Iteration order of the groups themselves is unspecified; the
    /// per-group position ordering is deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups.iter().map(|(base, positions)| (base.as_str(), positions.as_slice()))
    }

    /// Number of detected groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no indexed columns were detected.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Base names that also exist as plain scalar headers.
    ///
    /// A plain `skill` column next to `skill[0]` would make the array
    /// assignment and the scalar assignment race for the same record
    /// key; callers should reject such inputs before building records.
    pub fn collisions(&self, headers: &[String]) -> Vec<String> {
        let mut found: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(pos, header)| {
                !self.contains_column(*pos) && self.groups.contains_key(header.as_str())
            })
            .map(|(_, header)| header.clone())
            .collect();
        found.sort();
        found.dedup();
        found
    }
}
