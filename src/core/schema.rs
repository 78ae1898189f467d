// SkuFinder - core/schema.rs
//
// Schema normalisation: header names are trimmed and lower-cased, then the
// role's required columns are located and the raw rows are converted into
// typed records. Columns outside the required set are carried through in
// source order.

use crate::core::model::{DatasetRole, NewRecord, NewTable, OldRecord, OldTable, RawTable};
use crate::util::error::SchemaError;

/// Canonical form of a column header.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Normalise every header of `table` in place.
pub fn normalize_headers(table: &mut RawTable) {
    for header in &mut table.headers {
        *header = normalize_header(header);
    }
}

/// Column positions resolved for one dataset.
struct ColumnLayout {
    /// Positions of the required columns, in `role.required_columns()` order.
    required: Vec<usize>,
    /// Positions of every other column, in source order.
    extra: Vec<usize>,
}

/// Locate the role's required columns in already-normalised headers.
///
/// When two headers normalise to the same name, the leftmost one is used and
/// the others are treated as extra columns.
fn resolve_columns(headers: &[String], role: DatasetRole) -> Result<ColumnLayout, SchemaError> {
    if headers.is_empty() {
        return Err(SchemaError::EmptyHeader {
            dataset: role.base_name().to_string(),
        });
    }

    let mut required = Vec::new();
    let mut missing = Vec::new();
    for &column in role.required_columns() {
        match headers.iter().position(|h| h == column) {
            Some(idx) => required.push(idx),
            None => missing.push(column),
        }
    }

    if !missing.is_empty() {
        tracing::warn!(
            dataset = role.base_name(),
            missing = ?missing,
            found = ?headers,
            "Required columns missing"
        );
        return Err(SchemaError::MissingColumns {
            dataset: role.base_name().to_string(),
            missing,
            expected: role.display_columns(),
        });
    }

    let extra = (0..headers.len())
        .filter(|idx| !required.contains(idx))
        .collect();

    Ok(ColumnLayout { required, extra })
}

fn take_cell(row: &mut [Option<String>], idx: usize) -> Option<String> {
    row.get_mut(idx).and_then(Option::take)
}

/// Normalise and validate the discontinued-products table.
pub fn into_old_table(mut raw: RawTable) -> Result<OldTable, SchemaError> {
    normalize_headers(&mut raw);
    let layout = resolve_columns(&raw.headers, DatasetRole::Old)?;
    let (code_idx, desc_idx) = (layout.required[0], layout.required[1]);

    let extra_columns = layout.extra.iter().map(|&i| raw.headers[i].clone()).collect();
    let records = raw
        .rows
        .into_iter()
        .map(|mut row| OldRecord {
            extra: layout.extra.iter().map(|&i| take_cell(&mut row, i)).collect(),
            product_code: take_cell(&mut row, code_idx),
            product_description: take_cell(&mut row, desc_idx),
        })
        .collect();

    Ok(OldTable {
        extra_columns,
        records,
    })
}

/// Normalise and validate the replacement-products table.
pub fn into_new_table(mut raw: RawTable) -> Result<NewTable, SchemaError> {
    normalize_headers(&mut raw);
    let layout = resolve_columns(&raw.headers, DatasetRole::New)?;
    let (sku_idx, name_idx) = (layout.required[0], layout.required[1]);

    let extra_columns = layout.extra.iter().map(|&i| raw.headers[i].clone()).collect();
    let records = raw
        .rows
        .into_iter()
        .map(|mut row| NewRecord {
            extra: layout.extra.iter().map(|&i| take_cell(&mut row, i)).collect(),
            sku: take_cell(&mut row, sku_idx),
            sku_name: take_cell(&mut row, name_idx),
        })
        .collect();

    Ok(NewTable {
        extra_columns,
        records,
    })
}
