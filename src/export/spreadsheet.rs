use crate::error::{ProspectorError, Result};
use crate::export::{schema, Row};
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

const HEADER_FILL: Color = Color::RGB(0x4472C4);

/// Joined-list and free-text columns get a wide, wrapped cell.
const LONG_TEXT_COLUMNS: &[&str] = &[
    "title",
    "collaborators",
    "facilities",
    "cities",
    "conditions",
    "condition_keywords",
    "primary_outcomes",
    "secondary_outcomes",
    "eligibility_criteria",
    "investigator_names",
    "investigator_affiliations",
    "central_contacts",
    "contact_emails",
    "drugs",
    "devices",
    "procedures",
    "other_interventions",
    "linkedin_url",
];

/// Write rows as a styled spreadsheet: same data as the delimited table, with
/// a bold filled header pinned above the data and heuristic column sizing.
pub fn write_spreadsheet(path: &Path, rows: &[Row], columns: &[String]) -> Result<()> {
    if rows.is_empty() {
        return Err(ProspectorError::NothingToExport);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL);
    let wrap_format = Format::new().set_text_wrap();

    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(
            0,
            col,
            &schema::header_label(column),
            &header_format,
        )?;
        worksheet.set_column_width(col, column_width(column))?;
    }

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = (index + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            let value = schema::cell(row, column);
            let col = col as u16;
            if is_long_text(column) {
                worksheet.write_string_with_format(sheet_row, col, value, &wrap_format)?;
            } else {
                worksheet.write_string(sheet_row, col, value)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    workbook.save(path)?;
    Ok(())
}

fn is_long_text(column: &str) -> bool {
    LONG_TEXT_COLUMNS.contains(&column)
}

/// Width from the field name: wide for wrapped text, narrow for counters,
/// otherwise enough for the header label.
fn column_width(column: &str) -> f64 {
    if is_long_text(column) {
        45.0
    } else if column.ends_with("count") || column.ends_with("mentions") || column == "enrollment" {
        12.0
    } else {
        let label_width = schema::header_label(column).len() + 4;
        (label_width.max(14) as f64).min(30.0)
    }
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
    fn test_empty_input_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.xlsx");
        let result = write_spreadsheet(&path, &[], &["a".to_string()]);
        assert!(matches!(result, Err(ProspectorError::NothingToExport)));
        assert!(!path.exists());
    }

    #[test]
    fn test_spreadsheet_file_is_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.xlsx");

        let rows = vec![
            row(&[("nct_id", "NCT1"), ("title", "Study"), ("collaborator_count", "2")]),
            row(&[("nct_id", "NCT2"), ("eligibility_criteria", "Adults only")]),
        ];
        let columns = schema::resolve_columns(&rows, None);
        write_spreadsheet(&path, &rows, &columns).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_width_heuristic() {
        assert_eq!(column_width("eligibility_criteria"), 45.0);
        assert_eq!(column_width("collaborator_count"), 12.0);
        assert_eq!(column_width("enrollment"), 12.0);
        assert!(column_width("status") >= 14.0);
        assert!(column_width("lead_sponsor_category") <= 30.0);
    }
}
