// SkuFinder - core/export.rs
//
// Serialises an already-computed ResultTable. Pure transformation: never
// re-runs the search and never touches the filesystem.
//
// The spreadsheet artifact has a single sheet named "Matches" with headers
// Product Code | Old Description | New Description. Absent new descriptions
// are written as empty cells; the "Not Found" sentinel is a display concern.

use crate::core::model::ResultTable;
use crate::util::constants;
use crate::util::error::ExportError;
use rust_xlsxwriter::{Format, Workbook};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Default artifact file name for this format.
    pub fn default_file_name(&self) -> String {
        match self {
            ExportFormat::Xlsx => constants::EXPORT_FILE_NAME.to_string(),
            other => {
                let stem = constants::EXPORT_FILE_NAME
                    .strip_suffix(".xlsx")
                    .unwrap_or(constants::EXPORT_FILE_NAME);
                format!("{stem}.{}", other.extension())
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!(
                "unknown export format '{other}'; expected xlsx, csv, or json"
            )),
        }
    }
}

/// Serialise `rows` in the requested format.
pub fn export(rows: &ResultTable, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => export_xlsx(rows),
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            export_csv(rows, &mut buf)?;
            Ok(buf)
        }
        ExportFormat::Json => {
            let mut buf = Vec::new();
            export_json(rows, &mut buf)?;
            Ok(buf)
        }
    }
}

/// Build the spreadsheet artifact in memory.
pub fn export_xlsx(rows: &ResultTable) -> Result<Vec<u8>, ExportError> {
    let xlsx_err = |e| ExportError::Xlsx { source: e };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name(constants::EXPORT_SHEET_NAME)
        .map_err(xlsx_err)?;

    for (col, (header, width)) in constants::EXPORT_HEADERS
        .iter()
        .zip(constants::EXPORT_COLUMN_WIDTHS)
        .enumerate()
    {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
        worksheet
            .set_column_width(col as u16, width)
            .map_err(xlsx_err)?;
    }

    for (idx, row) in rows.indexed() {
        let sheet_row = (idx + 1) as u32;
        let cells = [
            row.product_code.as_deref(),
            row.product_description.as_deref(),
            row.sku_name.as_deref(),
        ];
        for (col, cell) in cells.iter().enumerate() {
            if let Some(value) = cell {
                worksheet
                    .write_string(sheet_row, col as u16, *value)
                    .map_err(xlsx_err)?;
            }
        }
    }

    let bytes = workbook.save_to_buffer().map_err(xlsx_err)?;
    tracing::debug!(rows = rows.len(), bytes = bytes.len(), "Spreadsheet export built");
    Ok(bytes)
}

/// Export rows to CSV with the human-readable headers.
pub fn export_csv<W: Write>(rows: &ResultTable, writer: W) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv { source: e };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(constants::EXPORT_HEADERS)
        .map_err(csv_err)?;

    for row in &rows.rows {
        csv_writer
            .write_record([
                row.product_code.as_deref().unwrap_or(""),
                row.product_description.as_deref().unwrap_or(""),
                row.sku_name.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Csv {
        source: csv::Error::from(e),
    })?;

    Ok(rows.len())
}

/// Export rows as a JSON array of objects keyed by the human-readable headers.
pub fn export_json<W: Write>(rows: &ResultTable, writer: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, &rows.rows)
        .map_err(|e| ExportError::Json { source: e })?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ResultRow;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn row(code: &str, old: &str, new: Option<&str>) -> ResultRow {
        ResultRow {
            product_code: Some(code.to_string()),
            product_description: Some(old.to_string()),
            sku_name: new.map(str::to_string),
        }
    }

    fn sample() -> ResultTable {
        ResultTable {
            rows: vec![
                row("A1", "Foo Bar 20mg", Some("Foo Bar New 20mg")),
                row("B2", "Baz", None),
            ],
        }
    }

    #[test]
    fn test_xlsx_sheet_name_and_headers() {
        let bytes = export_xlsx(&sample()).unwrap();
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Matches".to_string()]);

        let range = workbook.worksheet_range("Matches").unwrap();
        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(header, vec!["Product Code", "Old Description", "New Description"]);

        assert_eq!(range.get_value((1, 2)), Some(&Data::String("Foo Bar New 20mg".to_string())));
        // Absent new description is an empty cell, not the sentinel.
        assert!(matches!(range.get_value((2, 2)), None | Some(Data::Empty)));
    }

    #[test]
    fn test_xlsx_empty_table_has_header_only() {
        let bytes = export_xlsx(&ResultTable::default()).unwrap();
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range("Matches").unwrap();
        assert_eq!(range.height(), 1);
    }

    #[test]
    fn test_csv_export() {
        let mut buf = Vec::new();
        let count = export_csv(&sample(), &mut buf).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("Product Code,Old Description,New Description")
        );
        assert_eq!(lines.next(), Some("A1,Foo Bar 20mg,Foo Bar New 20mg"));
        assert_eq!(lines.next(), Some("B2,Baz,"));
    }

    #[test]
    fn test_json_export_uses_display_headers() {
        let mut buf = Vec::new();
        let count = export_json(&sample(), &mut buf).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["Product Code"], "A1");
        assert_eq!(value[1]["New Description"], serde_json::Value::Null);
    }

    #[test]
    fn test_format_parse_and_file_names() {
        assert_eq!("XLSX".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Xlsx.default_file_name(), "matched_products.xlsx");
        assert_eq!(ExportFormat::Csv.default_file_name(), "matched_products.csv");
    }
}
