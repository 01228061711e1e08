use crate::error::{ProspectorError, Result};
use crate::export::{schema, Row};
use std::path::Path;

/// Write rows as a delimited text table with a human-readable header.
///
/// The header row carries display labels; cells for columns a record lacks
/// are written empty. Empty input is refused before the file is touched.
pub fn write_delimited(
    path: &Path,
    rows: &[Row],
    columns: &[String],
    delimiter: u8,
) -> Result<()> {
    if rows.is_empty() {
        return Err(ProspectorError::NothingToExport);
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    let labels: Vec<String> = columns.iter().map(|c| schema::header_label(c)).collect();
    writer.write_record(&labels)?;

    for row in rows {
        let record: Vec<&str> = columns.iter().map(|column| schema::cell(row, column)).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_input_is_refused_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let result = write_delimited(&path, &[], &["a".to_string()], b';');
        assert!(matches!(result, Err(ProspectorError::NothingToExport)));
        assert!(!path.exists());
    }

    #[test]
    fn test_round_trip_preserves_string_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let rows = vec![
            row(&[("nct_id", "NCT1"), ("title", "A; with delimiter"), ("status", "RECRUITING")]),
            row(&[("nct_id", "NCT2"), ("title", "Plain"), ("status", "COMPLETED")]),
        ];
        let columns = schema::resolve_columns(&rows, None);
        write_delimited(&path, &rows, &columns, b';').unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let parsed: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(parsed.len(), 2);
        for (parsed_row, original) in parsed.iter().zip(&rows) {
            for (index, column) in columns.iter().enumerate() {
                assert_eq!(&parsed_row[index], schema::cell(original, column));
            }
        }
    }

    #[test]
    fn test_header_uses_display_labels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let rows = vec![row(&[("nct_id", "NCT1"), ("lead_sponsor", "Acme")])];
        let columns = schema::resolve_columns(&rows, None);
        write_delimited(&path, &rows, &columns, b';').unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "Nct Id;Lead Sponsor");
    }

    #[test]
    fn test_missing_cells_written_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let rows = vec![row(&[("a", "1")]), row(&[("b", "2")])];
        let columns = schema::resolve_columns(&rows, None);
        write_delimited(&path, &rows, &columns, b',').unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "1,");
        assert_eq!(lines[2], ",2");
    }
}
