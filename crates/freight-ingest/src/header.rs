//! Content-driven header location.
//!
//! Header position is unreliable across vendors and months, so candidate
//! rows are scored by how many cells match a known alias (across every
//! vendor's table), with a bonus when the row below looks more like data
//! than the candidate itself.

use std::collections::BTreeSet;

use tracing::trace;

use freight_normalize::{looks_numeric_or_date, normalize_key};

/// Options for the header scan.
#[derive(Debug, Clone, Copy)]
pub struct HeaderScanOptions {
    /// How many leading rows to consider.
    pub max_rows: usize,
    /// Minimum alias matches for a row to count as a header at all.
    pub min_alias_matches: usize,
}

impl Default for HeaderScanOptions {
    fn default() -> Self {
        Self {
            max_rows: 15,
            min_alias_matches: 2,
        }
    }
}

/// A located header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    pub row_index: usize,
    pub score: usize,
}

fn alias_matches(row: &[String], alias_keys: &BTreeSet<String>) -> usize {
    row.iter()
        .filter(|cell| {
            let key = normalize_key(cell);
            !key.is_empty() && alias_keys.contains(&key)
        })
        .count()
}

fn data_ratio(row: &[String]) -> f64 {
    let non_empty: Vec<&String> = row.iter().filter(|cell| !cell.trim().is_empty()).collect();
    if non_empty.is_empty() {
        return 0.0;
    }
    let data_like = non_empty
        .iter()
        .filter(|cell| looks_numeric_or_date(cell))
        .count();
    data_like as f64 / non_empty.len() as f64
}

/// Currency cells mark totals/summary rows, never headers.
fn has_currency_cell(row: &[String]) -> bool {
    row.iter().any(|cell| cell.contains('$'))
}

/// Finds the header row within the first `max_rows` rows.
///
/// Returns `None` when no candidate reaches `min_alias_matches`; the
/// caller turns that into a file-level header-not-found failure. Ties in
/// score resolve to the earliest row.
pub fn locate_header(
    rows: &[Vec<String>],
    alias_keys: &BTreeSet<String>,
    options: &HeaderScanOptions,
) -> Option<HeaderLocation> {
    let probe = rows.len().min(options.max_rows);
    let mut best: Option<HeaderLocation> = None;
    for index in 0..probe {
        let row = &rows[index];
        if has_currency_cell(row) {
            continue;
        }
        let matches = alias_matches(row, alias_keys);
        if matches < options.min_alias_matches {
            continue;
        }
        let own_ratio = data_ratio(row);
        let below_ratio = rows.get(index + 1).map_or(0.0, |below| data_ratio(below));
        let bonus = usize::from(below_ratio > own_ratio);
        let score = matches + bonus;
        trace!(row = index, matches, bonus, "header candidate");
        if best.is_none_or(|current| score > current.score) {
            best = Some(HeaderLocation {
                row_index: index,
                score,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    fn alias_keys() -> BTreeSet<String> {
        ["tracking_number", "net_charge", "ship_date", "zone"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn finds_header_below_metadata_rows() {
        let rows = grid(&[
            &["FedEx Invoice Export", ""],
            &["Account LOL509", ""],
            &["Tracking Number", "Net Charge", "Ship Date", "Zone"],
            &["794644790132", "18.40", "8/2/2025", "2"],
        ]);
        let location = locate_header(&rows, &alias_keys(), &HeaderScanOptions::default()).unwrap();
        assert_eq!(location.row_index, 2);
    }

    #[test]
    fn scan_depth_only_needs_to_reach_the_header() {
        let rows = grid(&[
            &["banner", ""],
            &["", "meta"],
            &["Tracking Number", "Net Charge"],
            &["794", "18.40"],
        ]);
        for max_rows in 3..=15 {
            let options = HeaderScanOptions {
                max_rows,
                ..HeaderScanOptions::default()
            };
            let location = locate_header(&rows, &alias_keys(), &options).unwrap();
            assert_eq!(location.row_index, 2, "max_rows={max_rows}");
        }
    }

    #[test]
    fn nothing_found_below_threshold() {
        let rows = grid(&[&["a", "b"], &["1", "2"]]);
        assert_eq!(
            locate_header(&rows, &alias_keys(), &HeaderScanOptions::default()),
            None
        );
    }

    #[test]
    fn summary_rows_with_currency_are_never_headers() {
        // A totals row repeating header-ish words plus dollar figures must
        // not outrank the real header above it.
        let rows = grid(&[
            &["Tracking Number", "Net Charge"],
            &["Total Net Charge", "$1,204.88"],
            &["794", "18.40"],
        ]);
        let location = locate_header(&rows, &alias_keys(), &HeaderScanOptions::default()).unwrap();
        assert_eq!(location.row_index, 0);
    }

    #[test]
    fn ties_break_to_the_earliest_row() {
        let rows = grid(&[
            &["Tracking Number", "Net Charge", "x"],
            &["Tracking Number", "Net Charge", "y"],
        ]);
        let location = locate_header(&rows, &alias_keys(), &HeaderScanOptions::default()).unwrap();
        assert_eq!(location.row_index, 0);
    }
}
