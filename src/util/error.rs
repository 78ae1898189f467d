// SkuFinder - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant names the dataset or
// path it concerns so messages can be shown to the user verbatim.
//
// Note: "no matches" is deliberately absent. An empty search result is an
// outcome (`core::filter::SearchOutcome::NoMatches`), not a failure.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SkuFinder operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SkuFinderError {
    /// A dataset could not be located or parsed.
    Dataset(DatasetError),

    /// A dataset loaded but lacks required columns.
    Schema(SchemaError),

    /// Export operation failed.
    Export(ExportError),
}

impl fmt::Display for SkuFinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset(e) => write!(f, "Dataset error: {e}"),
            Self::Schema(e) => write!(f, "Schema error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for SkuFinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dataset(e) => Some(e),
            Self::Schema(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Errors related to locating and parsing an input dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// Neither supported encoding exists for the dataset.
    NotFound {
        dataset: String,
        tried: Vec<PathBuf>,
    },

    /// The delimited-text file could not be parsed.
    Csv { path: PathBuf, source: csv::Error },

    /// The spreadsheet file could not be opened or a sheet could not be read.
    Spreadsheet {
        path: PathBuf,
        source: calamine::XlsxError,
    },

    /// The spreadsheet contains no worksheets.
    NoSheets { path: PathBuf },

    /// The dataset exceeds the in-memory row limit.
    TooManyRows { path: PathBuf, max: usize },

    /// I/O error while reading a dataset file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { dataset, tried } => {
                let paths: Vec<String> =
                    tried.iter().map(|p| p.display().to_string()).collect();
                write!(
                    f,
                    "Could not find `{dataset}` (looked for: {})",
                    paths.join(", ")
                )
            }
            Self::Csv { path, source } => {
                write!(f, "Failed to parse CSV '{}': {source}", path.display())
            }
            Self::Spreadsheet { path, source } => {
                write!(
                    f,
                    "Failed to read spreadsheet '{}': {source}",
                    path.display()
                )
            }
            Self::NoSheets { path } => {
                write!(f, "Spreadsheet '{}' contains no sheets", path.display())
            }
            Self::TooManyRows { path, max } => write!(
                f,
                "'{}' has more than {max} data rows. Split the file or remove unused rows.",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Spreadsheet { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DatasetError> for SkuFinderError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Errors related to column validation after header normalisation.
#[derive(Debug)]
pub enum SchemaError {
    /// Required columns are absent.
    MissingColumns {
        dataset: String,
        /// Normalised names of the missing columns.
        missing: Vec<&'static str>,
        /// Header spellings the user is expected to provide.
        expected: &'static [&'static str],
    },

    /// The file has no header row at all.
    EmptyHeader { dataset: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns {
                dataset,
                missing,
                expected,
            } => write!(
                f,
                "`{dataset}` must contain: {} (missing: {})",
                expected
                    .iter()
                    .map(|c| format!("`{c}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
                missing.join(", ")
            ),
            Self::EmptyHeader { dataset } => {
                write!(f, "`{dataset}` has no header row")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for SkuFinderError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// Spreadsheet serialisation error.
    Xlsx { source: rust_xlsxwriter::XlsxError },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },

    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx { source } => write!(f, "Spreadsheet export error: {source}"),
            Self::Csv { source } => write!(f, "CSV export error: {source}"),
            Self::Json { source } => write!(f, "JSON export error: {source}"),
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xlsx { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for SkuFinderError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Never fatal: `platform::config::load_config` reports these as warnings
/// and continues with defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Convenience type alias for SkuFinder results.
pub type Result<T> = std::result::Result<T, SkuFinderError>;
