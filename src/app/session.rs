// SkuFinder - app/session.rs
//
// One lookup session: both datasets are loaded, validated, and reconciled
// once when the session opens. Each search then re-filters the cached merged
// table, so a search is a pure function of the merged table and criteria.
//
// Any load or validation failure aborts the session before a merged table
// exists; partial results are never exposed.

use crate::core::export::{self, ExportFormat};
use crate::core::filter::{self, SearchOutcome};
use crate::core::loader::{self, DatasetSource};
use crate::core::model::{DatasetRole, MergedTable, ResultTable, SearchCriteria};
use crate::core::reconcile;
use crate::core::schema;
use crate::platform::fs;
use crate::util::error::{ExportError, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Dataset files resolved from a single directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DatasetSource for DirectorySource {
    fn read(&self, file_name: &str) -> io::Result<Option<Vec<u8>>> {
        fs::read_if_exists(&self.root.join(file_name))
    }

    fn locate(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

/// Loaded and reconciled datasets, ready to search.
#[derive(Debug, Clone)]
pub struct LookupSession {
    merged: MergedTable,
}

impl LookupSession {
    /// Load both datasets from `source`, validate them, and join them.
    ///
    /// The old dataset is resolved first; the first failure is returned.
    pub fn open<S: DatasetSource + ?Sized>(source: &S) -> Result<Self> {
        let started = Instant::now();

        let old_raw = loader::load_dataset(source, DatasetRole::Old)?;
        let new_raw = loader::load_dataset(source, DatasetRole::New)?;

        let old = schema::into_old_table(old_raw)?;
        let new = schema::into_new_table(new_raw)?;

        let merged = reconcile::reconcile(&old, &new);

        tracing::info!(
            merged_rows = merged.len(),
            unmatched = merged.unmatched_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Lookup session ready"
        );

        Ok(Self { merged })
    }

    /// Build a session directly from an already-merged table.
    pub fn from_merged(merged: MergedTable) -> Self {
        Self { merged }
    }

    pub fn merged(&self) -> &MergedTable {
        &self.merged
    }

    /// Run one search against the cached merged table.
    pub fn search(&self, criteria: &SearchCriteria) -> SearchOutcome {
        let outcome = filter::filter(&self.merged, criteria);
        tracing::info!(
            query = %criteria.query,
            strength = criteria.strength.map_or("All", |s| s.token()),
            matches = outcome.match_count(),
            "Search complete"
        );
        outcome
    }
}

/// Serialise `rows` and write the artifact to `path`.
///
/// Returns the number of rows written.
pub fn write_export(rows: &ResultTable, format: ExportFormat, path: &Path) -> Result<usize> {
    let bytes = export::export(rows, format)?;
    fs::write_file(path, &bytes).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(
        path = %path.display(),
        format = %format,
        rows = rows.len(),
        bytes = bytes.len(),
        "Export written"
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Strength;
    use crate::util::error::{DatasetError, SchemaError, SkuFinderError};

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_open_and_search() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "old_products.csv",
            "Product Code,Product Description\nA1,Foo Bar 20mg\nB2,Baz\n",
        );
        write(dir.path(), "new_products.csv", "SKU,SKU Name\nA1,Foo Bar New 20mg\n");

        let session = LookupSession::open(&DirectorySource::new(dir.path())).unwrap();
        assert_eq!(session.merged().len(), 2);

        let outcome = session.search(&SearchCriteria {
            query: String::new(),
            strength: Some(Strength::Twenty),
        });
        let rows = outcome.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows[0].sku_name.as_deref(), Some("Foo Bar New 20mg"));
    }

    #[test]
    fn test_missing_new_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old_products.csv", "Product Code,Product Description\n");
        let err = LookupSession::open(&DirectorySource::new(dir.path())).unwrap_err();
        assert!(
            matches!(err, SkuFinderError::Dataset(DatasetError::NotFound { ref dataset, .. }) if dataset == "new_products"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_schema_mismatch_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "old_products.csv", "Code,Description\nA1,x\n");
        write(dir.path(), "new_products.csv", "SKU,SKU Name\nA1,y\n");
        let err = LookupSession::open(&DirectorySource::new(dir.path())).unwrap_err();
        assert!(
            matches!(err, SkuFinderError::Schema(SchemaError::MissingColumns { .. })),
            "got {err:?}"
        );
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("matched_products.csv");
        let rows = ResultTable::default();
        let written = write_export(&rows, ExportFormat::Csv, &path).unwrap();
        assert_eq!(written, 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Product Code,Old Description,New Description"));
    }
}
