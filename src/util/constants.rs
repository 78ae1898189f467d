// SkuFinder - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Dataset names, required headers, and export layout are fixed here so that
// every layer agrees on them.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SkuFinder";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SkuFinder";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input datasets
// =============================================================================

/// Base filename (without extension) of the discontinued-products dataset.
pub const OLD_DATASET_BASE: &str = "old_products";

/// Base filename (without extension) of the replacement-products dataset.
pub const NEW_DATASET_BASE: &str = "new_products";

/// Extension of the spreadsheet encoding. Probed first.
pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Extension of the delimited-text encoding. Probed second.
pub const DELIMITED_EXTENSION: &str = "csv";

/// Hard upper bound on data rows read from a single dataset.
///
/// Both tables are held in memory for the whole session; the cap stops a
/// mistaken multi-million-row export from exhausting memory.
pub const MAX_DATASET_ROWS: usize = 1_000_000;

// =============================================================================
// Schema
// =============================================================================

/// Normalised column holding the old product identifier (join key).
pub const COL_PRODUCT_CODE: &str = "product code";

/// Normalised column holding the old product description.
pub const COL_PRODUCT_DESCRIPTION: &str = "product description";

/// Normalised column holding the replacement identifier (join key).
pub const COL_SKU: &str = "sku";

/// Normalised column holding the replacement description.
pub const COL_SKU_NAME: &str = "sku name";

/// Columns the old dataset must provide after normalisation.
pub const OLD_REQUIRED_COLUMNS: &[&str] = &[COL_PRODUCT_CODE, COL_PRODUCT_DESCRIPTION];

/// Columns the new dataset must provide after normalisation.
pub const NEW_REQUIRED_COLUMNS: &[&str] = &[COL_SKU, COL_SKU_NAME];

/// Headers as users are told to write them in the old dataset.
pub const OLD_DISPLAY_COLUMNS: &[&str] = &["Product Code", "Product Description"];

/// Headers as users are told to write them in the new dataset.
pub const NEW_DISPLAY_COLUMNS: &[&str] = &["SKU", "SKU Name"];

// =============================================================================
// Search
// =============================================================================

/// Selector value meaning "no strength restriction".
pub const STRENGTH_ALL: &str = "All";

// =============================================================================
// Presentation
// =============================================================================

/// Shown in place of a new description when no replacement matched.
pub const NOT_FOUND_LABEL: &str = "Not Found";

/// Maximum characters shown per column in the text list view before truncation.
pub const MAX_DISPLAY_COLUMN_WIDTH: usize = 60;

// =============================================================================
// Export
// =============================================================================

/// Default file name of the downloadable spreadsheet artifact.
pub const EXPORT_FILE_NAME: &str = "matched_products.xlsx";

/// Name of the single worksheet in the exported artifact.
pub const EXPORT_SHEET_NAME: &str = "Matches";

/// Human-readable export headers, in column order.
pub const EXPORT_HEADERS: [&str; 3] = ["Product Code", "Old Description", "New Description"];

/// Column widths (in Excel character units) applied to the exported sheet.
pub const EXPORT_COLUMN_WIDTHS: [f64; 3] = [18.0, 48.0, 48.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Name of the optional configuration file in the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
