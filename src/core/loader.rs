// SkuFinder - core/loader.rs
//
// Dataset loading: resolves a logical dataset name to the first available
// storage encoding and parses it into a RawTable.
//
// Encodings are probed in a fixed order (spreadsheet, then delimited text).
// The first file that exists wins; a parse failure on that file is returned
// as-is and the next encoding is NOT tried.
//
// Core layer: file access goes through the `DatasetSource` trait so the
// probing logic can be tested without a real filesystem.

use crate::core::model::{DatasetRole, Encoding, RawTable};
use crate::util::constants;
use crate::util::error::DatasetError;
use calamine::{Data, Reader, Xlsx};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

/// Where dataset files come from.
pub trait DatasetSource {
    /// Read the named file. Returns `Ok(None)` when it does not exist.
    fn read(&self, file_name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Full path of the named file, for messages.
    fn locate(&self, file_name: &str) -> PathBuf;
}

type ParseFn = fn(&Path, &[u8]) -> Result<RawTable, DatasetError>;

/// Probe order. First existing file wins.
const ENCODINGS: [(Encoding, ParseFn); 2] = [
    (Encoding::Spreadsheet, parse_spreadsheet),
    (Encoding::Delimited, parse_delimited),
];

/// Load the dataset for `role` from `source`.
pub fn load_dataset<S: DatasetSource + ?Sized>(
    source: &S,
    role: DatasetRole,
) -> Result<RawTable, DatasetError> {
    load_named(source, role.base_name())
}

/// Load a dataset by base filename, probing each supported encoding in order.
pub fn load_named<S: DatasetSource + ?Sized>(
    source: &S,
    base: &str,
) -> Result<RawTable, DatasetError> {
    let mut tried = Vec::with_capacity(ENCODINGS.len());

    for (encoding, parse) in ENCODINGS {
        let file_name = format!("{base}.{}", encoding.extension());
        let path = source.locate(&file_name);

        let bytes = source
            .read(&file_name)
            .map_err(|e| DatasetError::Io {
                path: path.clone(),
                source: e,
            })?;

        let Some(bytes) = bytes else {
            tracing::debug!(path = %path.display(), "Dataset encoding not present");
            tried.push(path);
            continue;
        };

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            encoding = ?encoding,
            "Parsing dataset"
        );
        let table = parse(&path, &bytes)?;
        tracing::info!(
            dataset = base,
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "Dataset loaded"
        );
        return Ok(table);
    }

    Err(DatasetError::NotFound {
        dataset: base.to_string(),
        tried,
    })
}

// =============================================================================
// Delimited text
// =============================================================================

/// Parse comma-separated text with a header row.
///
/// Short rows are padded with blanks; surplus cells beyond the header width
/// are dropped. A leading UTF-8 byte-order mark is ignored.
pub fn parse_delimited(path: &Path, bytes: &[u8]) -> Result<RawTable, DatasetError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let csv_err = |e: csv::Error| DatasetError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        if rows.len() >= constants::MAX_DATASET_ROWS {
            return Err(DatasetError::TooManyRows {
                path: path.to_path_buf(),
                max: constants::MAX_DATASET_ROWS,
            });
        }
        let row = (0..headers.len())
            .map(|i| record.get(i).and_then(non_blank))
            .collect();
        rows.push(row);
    }

    Ok(RawTable {
        source: path.to_path_buf(),
        encoding: Encoding::Delimited,
        headers,
        rows,
    })
}

// =============================================================================
// Spreadsheet
// =============================================================================

/// Parse the first worksheet of an xlsx workbook. Its first row is the header.
pub fn parse_spreadsheet(path: &Path, bytes: &[u8]) -> Result<RawTable, DatasetError> {
    let xlsx_err = |e: calamine::XlsxError| DatasetError::Spreadsheet {
        path: path.to_path_buf(),
        source: e,
    };

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec())).map_err(xlsx_err)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::NoSheets {
            path: path.to_path_buf(),
        })?
        .map_err(xlsx_err)?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(first) => first
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for sheet_row in sheet_rows {
        if rows.len() >= constants::MAX_DATASET_ROWS {
            return Err(DatasetError::TooManyRows {
                path: path.to_path_buf(),
                max: constants::MAX_DATASET_ROWS,
            });
        }
        let row = (0..headers.len())
            .map(|i| sheet_row.get(i).and_then(cell_text))
            .collect();
        rows.push(row);
    }

    Ok(RawTable {
        source: path.to_path_buf(),
        encoding: Encoding::Spreadsheet,
        headers,
        rows,
    })
}

/// Render a spreadsheet cell as text. Blank and error cells are `None`.
///
/// Whole-number floats are written without a fractional part so that a code
/// typed as `1234` in Excel joins against `1234` from a CSV.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => non_blank(s),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
