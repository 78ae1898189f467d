// SkuFinder - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Opening the lookup session (both datasets, fatal on failure)
// 4. One search, rendered to stdout, with optional export

use skufinder::app::session::{self, DirectorySource, LookupSession};
use skufinder::app::state::AppState;
use skufinder::core::export::ExportFormat;
use skufinder::core::model::{SearchCriteria, Strength};
use skufinder::platform::config::{self, PlatformPaths};
use skufinder::ui::table;
use skufinder::util;

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// SkuFinder - find replacement products for discontinued product codes.
///
/// Reads `old_products` and `new_products` (.xlsx preferred, .csv fallback)
/// from the data directory, joins them on product code = SKU, and lists the
/// rows matching the search.
#[derive(Parser, Debug)]
#[command(name = "SkuFinder", version, about)]
struct Cli {
    /// Search by old product code or old description (case-insensitive).
    #[arg(short = 'q', long = "query", default_value = "")]
    query: String,

    /// Strength filter: 0mg, 20mg, 40mg, 50mg, or All.
    #[arg(
        short = 's',
        long = "strength",
        default_value = "All",
        value_parser = Strength::parse_selector
    )]
    strength: std::option::Option<Strength>,

    /// Directory containing old_products and new_products (default: config, then cwd).
    #[arg(short = 'D', long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Export the matches (to matched_products.xlsx unless --output is given).
    #[arg(short = 'e', long = "export")]
    export: bool,

    /// Export destination; implies --export.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Export format: xlsx, csv, or json.
    #[arg(short = 'f', long = "format")]
    format: Option<ExportFormat>,

    /// Print the full detail of one result row by index.
    #[arg(short = 'r', long = "row")]
    row: Option<usize>,

    /// Path to config.toml (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SkuFinder starting"
    );

    let mut state = AppState::new();
    state.warnings = config_warnings;
    for warning in &state.warnings {
        eprintln!("Warning: {warning}");
    }

    // Data directory: CLI override > config > current directory
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| app_config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let lookup = match LookupSession::open(&DirectorySource::new(&data_dir)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, data_dir = %data_dir.display(), "Failed to open lookup session");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let criteria = SearchCriteria {
        query: cli.query.clone(),
        strength: cli.strength,
    };
    state.submit_search(&lookup, criteria);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render(&mut out, &mut state, cli.row) {
        tracing::error!(error = %e, "Failed to write results");
        return ExitCode::FAILURE;
    }

    if !cli.export && cli.output.is_none() {
        return ExitCode::SUCCESS;
    }

    let Some(rows) = state.results().filter(|_| state.can_export()) else {
        eprintln!("Nothing to export.");
        return ExitCode::SUCCESS;
    };

    let format = cli
        .format
        .or_else(|| {
            app_config
                .export_format
                .as_deref()
                .and_then(|f| f.parse().ok())
        })
        .unwrap_or_default();

    let export_path = cli.output.clone().unwrap_or_else(|| {
        app_config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format.default_file_name())
    });

    match session::write_export(rows, format, &export_path) {
        Ok(count) => {
            eprintln!("Exported {count} row(s) to {}", export_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Write the status line, the result list, and the selected row detail.
fn render<W: Write>(out: &mut W, state: &mut AppState, row: Option<usize>) -> std::io::Result<()> {
    table::render_status(out, state)?;

    let Some(rows) = state.results() else {
        return Ok(());
    };
    table::render_results(out, rows)?;

    if let Some(index) = row {
        state.select(index);
        match state.selected_row() {
            Some(selected) => {
                writeln!(out)?;
                table::render_detail(out, index, selected)?;
            }
            None => eprintln!("Row {index} is out of range."),
        }
    }
    Ok(())
}
