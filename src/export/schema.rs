//! Column-set resolution for heterogeneous flat records.
//!
//! Records in one export need not share a key set; the schema is the union of
//! everything observed, ordered either by a caller-supplied explicit list or
//! by the default rule (lexicographic, identity columns pulled to the front).

use crate::export::Row;
use std::collections::HashSet;

/// Columns pulled to the front of a default-ordered schema, front to back.
const PRIORITY_COLUMNS: &[&str] = &["nct_id", "title", "status", "lead_sponsor"];

/// Resolve the ordered column set for a batch of rows.
///
/// With an explicit order, its columns come first as given (deduplicated) and
/// any remaining discovered columns follow lexicographically. Without one,
/// all discovered columns are sorted lexicographically and the priority
/// columns are then moved to the front in reverse-priority insertion order.
pub fn resolve_columns(rows: &[Row], explicit_order: Option<&[String]>) -> Vec<String> {
    let discovered: HashSet<&str> = rows
        .iter()
        .flat_map(|row| row.iter().map(|(name, _)| name.as_str()))
        .collect();

    match explicit_order {
        Some(order) => {
            let mut columns: Vec<String> = Vec::new();
            for name in order {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
            let mut remaining: Vec<String> = discovered
                .iter()
                .filter(|name| !columns.iter().any(|c| c == *name))
                .map(|name| name.to_string())
                .collect();
            remaining.sort();
            columns.extend(remaining);
            columns
        }
        None => {
            let mut columns: Vec<String> = discovered.iter().map(|name| name.to_string()).collect();
            columns.sort();
            for priority in PRIORITY_COLUMNS.iter().rev() {
                if let Some(position) = columns.iter().position(|c| c == priority) {
                    let column = columns.remove(position);
                    columns.insert(0, column);
                }
            }
            columns
        }
    }
}

/// Cell value for a row under a column; missing columns are empty, never an
/// error.
pub fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.iter()
        .find(|(name, _)| name == column)
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

/// Human-readable header label: separators become spaces, words title-cased.
pub fn header_label(field: &str) -> String {
    field
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
