//! drillbook - drilling field data entry and reporting service
//!
//! # Usage
//!
//! ```bash
//! # Serve the API with 20 seeded records per kind
//! drillbook serve --addr 127.0.0.1:8080
//!
//! # Export January's rows for three columns
//! drillbook export --from 2024-01-01 --to 2024-01-31 --fields holeId,depth,rockType
//!
//! # Log dashboard figures for the seeded data
//! drillbook summary
//! ```
//!
//! # Environment Variables
//!
//! - `DRILLBOOK_CONFIG`: Path to a TOML config file (default: ./drillbook.toml)
//! - `DRILLBOOK_SERVER_ADDR`: Override the bind address
//! - `DRILLBOOK_CORS_ORIGINS`: Comma-separated origins allowed cross-origin
//! - `RUST_LOG`: Logging level (default: info)
//! - `RESET_DB`: Set to "true" to wipe the data directory on startup

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use drillbook::api::{self, DashboardState};
use drillbook::config::{self, AppConfig};
use drillbook::export::{self, DateRange};
use drillbook::reports;
use drillbook::store::{seed, PreferencesStore, RecordStore};
use drillbook::types::{parse_flexible_date, ReportField};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "drillbook")]
#[command(about = "Diamond-drilling field data entry and reporting service")]
#[command(version)]
struct CliArgs {
    /// Wipe the data directory (preference database) on startup.
    /// Can also be set via RESET_DB=true environment variable.
    #[arg(long)]
    reset_db: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP API (default)
    Serve {
        /// Override the server address
        #[arg(short, long, value_name = "HOST:PORT")]
        addr: Option<String>,

        /// Start with an empty store instead of generated records
        #[arg(long)]
        no_seed: bool,
    },

    /// Write an xlsx export of the joined report
    Export {
        /// Range start (YYYY-MM-DD)
        #[arg(long = "from")]
        from: String,
        /// Range end, inclusive (YYYY-MM-DD)
        #[arg(long = "to")]
        to: String,
        /// Comma-separated field keys or labels (default: report table columns)
        #[arg(long)]
        fields: Option<String>,
        /// JSON array of row objects to export instead of the seeded store
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output path (default: <prefix>-<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Log dashboard figures and chart distributions for the seeded store
    Summary,
}

// ============================================================================
// Database Reset
// ============================================================================

/// Check if a reset is requested via CLI flag or environment variable.
fn should_reset_db(cli_flag: bool) -> bool {
    if cli_flag {
        return true;
    }
    if let Ok(val) = std::env::var("RESET_DB") {
        let val_lower = val.to_lowercase();
        return val_lower == "true" || val_lower == "1" || val_lower == "yes";
    }
    false
}

/// Remove the data directory and all its contents.
fn reset_data_directory(data_path: &Path) -> Result<()> {
    if !data_path.exists() {
        info!("Data directory does not exist, nothing to reset");
        return Ok(());
    }

    warn!("RESET_DB detected, removing {}", data_path.display());
    std::fs::remove_dir_all(data_path).context("Failed to remove data directory")?;
    warn!("Data directory removed, preferences start from defaults");
    Ok(())
}

// ============================================================================
// Startup Helpers
// ============================================================================

/// Fresh store, seeded according to `[seed]` unless `skip_seed`.
fn build_store(cfg: &AppConfig, skip_seed: bool) -> RecordStore {
    let mut store = RecordStore::new();
    if cfg.seed.enabled && !skip_seed {
        seed::seed_store(&mut store, cfg.seed.records_per_kind, cfg.seed.rng_seed);
    } else {
        info!("Seed data disabled, starting with an empty store");
    }
    store
}

/// Open the preference database, degrading to defaults-only on failure.
fn open_preferences(cfg: &AppConfig) -> Option<PreferencesStore> {
    if let Err(e) = std::fs::create_dir_all(&cfg.storage.data_dir) {
        warn!(dir = %cfg.storage.data_dir.display(), error = %e, "Cannot create data directory, preferences will not persist");
        return None;
    }
    match PreferencesStore::open(cfg.preferences_db_path()) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "Preferences database unavailable, serving defaults");
            None
        }
    }
}

fn parse_date_arg(name: &str, raw: &str) -> Result<chrono::NaiveDate> {
    parse_flexible_date(raw).with_context(|| format!("--{name}: invalid date '{raw}'"))
}

// ============================================================================
// Commands
// ============================================================================

async fn run_server(cfg: &AppConfig, addr_override: Option<String>, no_seed: bool) -> Result<()> {
    let addr: SocketAddr = match addr_override {
        Some(addr) => addr.parse().with_context(|| format!("Invalid --addr '{addr}'"))?,
        None => cfg.server_addr()?,
    };

    let store = build_store(cfg, no_seed).into_shared();
    let mut state = DashboardState::new(store);
    if let Some(prefs) = open_preferences(cfg) {
        state = state.with_preferences(prefs);
    }
    let app = api::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, site = %cfg.site.name, "drillbook API listening");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    match result {
        Ok(()) => {
            info!("Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}

fn run_export(
    cfg: &AppConfig,
    from: &str,
    to: &str,
    fields: Option<&str>,
    input: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<()> {
    let range = DateRange::new(parse_date_arg("from", from)?, parse_date_arg("to", to)?)?;
    let fields = match fields {
        Some(list) => ReportField::parse_list(list).map_err(anyhow::Error::msg)?,
        None => ReportField::TABLE_COLUMNS.to_vec(),
    };
    let sheet = &cfg.export.sheet_name;

    let bytes = match input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let rows: Vec<Map<String, Value>> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of objects", path.display()))?;
            export::build_export(&rows, range, &fields, sheet)?
        }
        None => {
            let store = build_store(cfg, false);
            export::build_export(&reports::joined_rows(&store), range, &fields, sheet)?
        }
    };

    let output = output.unwrap_or_else(|| {
        PathBuf::from(export::export_filename(&cfg.export.file_prefix, Utc::now()))
    });
    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), "Export written");
    Ok(())
}

fn run_summary(cfg: &AppConfig) {
    let store = build_store(cfg, false);
    let summary = reports::dashboard_summary(&store);
    info!(
        total_meters = format!("{:.1}", summary.total_meters_drilled),
        avg_recovery = ?summary.average_core_recovery,
        active_sites = summary.active_sites,
        equipment_needing_attention = summary.equipment_needing_attention,
        "Dashboard summary"
    );
    for c in reports::maintenance_status_distribution(store.maintenance_logs()) {
        info!(status = %c.name, count = c.value, "Maintenance item status");
    }
    for c in reports::rock_type_distribution(store.core_samples()) {
        info!(rock_type = %c.name, count = c.value, "Core sample rock type");
    }
    for m in reports::monthly_progress(store.progress_reports()) {
        info!(month = %m.month, meters = format!("{:.1}", m.meters), reports = m.reports, "Monthly progress");
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let app_config = AppConfig::load();
    config::init(app_config);
    let cfg = config::get();

    // Reset check, before the preference database is opened
    if should_reset_db(args.reset_db) {
        reset_data_directory(&cfg.storage.data_dir)?;
    }

    match args.command.unwrap_or(SubCommand::Serve {
        addr: None,
        no_seed: false,
    }) {
        SubCommand::Serve { addr, no_seed } => run_server(cfg, addr, no_seed).await,
        SubCommand::Export {
            from,
            to,
            fields,
            input,
            output,
        } => run_export(cfg, &from, &to, fields.as_deref(), input.as_deref(), output),
        SubCommand::Summary => {
            run_summary(cfg);
            Ok(())
        }
    }
}
