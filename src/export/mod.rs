pub mod delimited;
pub mod schema;
pub mod spreadsheet;

pub use delimited::write_delimited;
pub use schema::{header_label, resolve_columns};
pub use spreadsheet::write_spreadsheet;

/// One flat record ready for export: ordered `(field, value)` pairs.
///
/// Rows in a batch need not share a field set; the schema module resolves the
/// union at export time.
pub type Row = Vec<(String, String)>;

/// Adapt the `(&'static str, String)` pairs produced by records and
/// aggregates into an owned row.
pub fn row_from_fields(fields: Vec<(&'static str, String)>) -> Row {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
