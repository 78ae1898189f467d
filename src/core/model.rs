// SkuFinder - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// Join-side columns are explicit `Option` fields rather than open maps so
// that a missing column is caught once, by the schema normaliser, instead of
// at every access.

use crate::util::constants;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// =============================================================================
// Dataset roles and encodings
// =============================================================================

/// Which of the two input tables a dataset plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetRole {
    /// Discontinued products (`product code`, `product description`).
    Old,
    /// Replacement SKUs (`sku`, `sku name`).
    New,
}

impl DatasetRole {
    /// Fixed base filename the dataset is resolved from.
    pub fn base_name(&self) -> &'static str {
        match self {
            DatasetRole::Old => constants::OLD_DATASET_BASE,
            DatasetRole::New => constants::NEW_DATASET_BASE,
        }
    }

    /// Normalised column names that must be present.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetRole::Old => constants::OLD_REQUIRED_COLUMNS,
            DatasetRole::New => constants::NEW_REQUIRED_COLUMNS,
        }
    }

    /// Header spellings quoted back to the user in schema errors.
    pub fn display_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetRole::Old => constants::OLD_DISPLAY_COLUMNS,
            DatasetRole::New => constants::NEW_DISPLAY_COLUMNS,
        }
    }
}

impl fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

/// Storage encoding a dataset was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Spreadsheet,
    Delimited,
}

impl Encoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::Spreadsheet => constants::SPREADSHEET_EXTENSION,
            Encoding::Delimited => constants::DELIMITED_EXTENSION,
        }
    }
}

// =============================================================================
// Raw table (loader output, before schema validation)
// =============================================================================

/// A table exactly as parsed: header row plus data rows.
///
/// Every row has `headers.len()` cells. Blank cells are `None`.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// File the table was read from.
    pub source: PathBuf,
    pub encoding: Encoding,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

// =============================================================================
// Validated tables
// =============================================================================

/// One row of the discontinued-products dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OldRecord {
    pub product_code: Option<String>,
    pub product_description: Option<String>,
    /// Values of the non-required columns, aligned with `OldTable::extra_columns`.
    pub extra: Vec<Option<String>>,
}

/// The discontinued-products dataset after schema validation.
#[derive(Debug, Clone, Default)]
pub struct OldTable {
    pub extra_columns: Vec<String>,
    pub records: Vec<OldRecord>,
}

/// One row of the replacement-products dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub sku: Option<String>,
    pub sku_name: Option<String>,
    /// Values of the non-required columns, aligned with `NewTable::extra_columns`.
    pub extra: Vec<Option<String>>,
}

/// The replacement-products dataset after schema validation.
#[derive(Debug, Clone, Default)]
pub struct NewTable {
    pub extra_columns: Vec<String>,
    pub records: Vec<NewRecord>,
}

// =============================================================================
// Merged table (left outer join output)
// =============================================================================

/// An old record paired with at most one matching new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub old: OldRecord,
    /// `None` when no new record shares the old record's code.
    pub new: Option<NewRecord>,
}

impl MergedRecord {
    pub fn product_code(&self) -> Option<&str> {
        self.old.product_code.as_deref()
    }

    pub fn product_description(&self) -> Option<&str> {
        self.old.product_description.as_deref()
    }

    /// New-side description; absent both for unmatched rows and for matched
    /// rows whose `sku name` cell is blank.
    pub fn sku_name(&self) -> Option<&str> {
        self.new.as_ref().and_then(|n| n.sku_name.as_deref())
    }
}

/// Left outer join of old records onto new records.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    pub old_extra_columns: Vec<String>,
    pub new_extra_columns: Vec<String>,
    pub records: Vec<MergedRecord>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows with no new-side match.
    pub fn unmatched_count(&self) -> usize {
        self.records.iter().filter(|r| r.new.is_none()).count()
    }
}

// =============================================================================
// Strength
// =============================================================================

/// Nicotine-strength category embedded in product descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strength {
    Zero,
    Twenty,
    Forty,
    Fifty,
}

impl Strength {
    /// Returns all variants in selector order.
    pub fn all() -> &'static [Strength] {
        &[
            Strength::Zero,
            Strength::Twenty,
            Strength::Forty,
            Strength::Fifty,
        ]
    }

    /// Token searched for in descriptions.
    pub fn token(&self) -> &'static str {
        match self {
            Strength::Zero => "0mg",
            Strength::Twenty => "20mg",
            Strength::Forty => "40mg",
            Strength::Fifty => "50mg",
        }
    }

    /// Parse a selector value. `"All"` (any case) yields `Ok(None)`.
    pub fn parse_selector(value: &str) -> Result<Option<Strength>, StrengthParseError> {
        if value.trim().eq_ignore_ascii_case(constants::STRENGTH_ALL) {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Strength {
    type Err = StrengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Strength::all()
            .iter()
            .copied()
            .find(|st| st.token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StrengthParseError {
                value: s.to_string(),
            })
    }
}

/// A strength selector value outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthParseError {
    pub value: String,
}

impl fmt::Display for StrengthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options: Vec<&str> = Strength::all().iter().map(|s| s.token()).collect();
        write!(
            f,
            "unknown strength '{}'; expected one of {}, {}",
            self.value,
            options.join(", "),
            constants::STRENGTH_ALL
        )
    }
}

impl std::error::Error for StrengthParseError {}

// =============================================================================
// Search criteria and results
// =============================================================================

/// User search input. Both parts are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Case-insensitive substring over product code and old description.
    /// Empty = no text filter.
    pub query: String,

    /// Strength token over old and new descriptions. `None` = "All".
    pub strength: Option<Strength>,
}

impl SearchCriteria {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.strength.is_none()
    }
}

/// A merged row projected to the three displayed columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Product Code")]
    pub product_code: Option<String>,

    #[serde(rename = "Old Description")]
    pub product_description: Option<String>,

    #[serde(rename = "New Description")]
    pub sku_name: Option<String>,
}

impl ResultRow {
    /// New description for display, with the sentinel for absent values.
    pub fn new_description_label(&self) -> &str {
        self.sku_name
            .as_deref()
            .unwrap_or(constants::NOT_FOUND_LABEL)
    }
}

/// Ordered, duplicate-free search results.
///
/// Positions in `rows` are the stable row indices handed to the
/// presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResultRow> {
        self.rows.get(index)
    }

    /// Rows paired with their result index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &ResultRow)> {
        self.rows.iter().enumerate()
    }
}
