//! CLI entry point for the bike-sharing usage dashboard.
//!
//! The filter flags stand in for the dashboard's controls: a date range
//! bounded by the data, and one checkbox per season (all ticked by default).

use anyhow::{Context, Result};
use bike_share_dashboard::context::DatasetContext;
use bike_share_dashboard::dashboard::Dashboard;
use bike_share_dashboard::filter::SeasonSelection;
use bike_share_dashboard::output::{DASHBOARD_FILE, log_summary, write_json, write_panel_tables};
use bike_share_dashboard::parser::parse_date;
use bike_share_dashboard::record::Season;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_share_dashboard")]
#[command(about = "Aggregates an hourly bike-sharing usage log into dashboard tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataSource {
    /// Path or URL of the hourly usage CSV (optionally gzip-compressed)
    #[arg(value_name = "FILE_OR_URL", env = "BIKE_DATA_SOURCE")]
    source: String,
}

#[derive(Args)]
struct Filters {
    /// First day of the usage date range (defaults to the earliest date in the data)
    #[arg(long, value_parser = parse_day)]
    start: Option<NaiveDate>,

    /// Last day of the usage date range (defaults to the latest date in the data)
    #[arg(long, value_parser = parse_day)]
    end: Option<NaiveDate>,

    /// Season to include in the user type behavior panel; repeat for several
    /// (defaults to every season)
    #[arg(long = "season", value_name = "SEASON", value_parser = parse_season)]
    seasons: Vec<Season>,

    /// Clear every season checkbox, leaving the user type behavior panel empty
    #[arg(long, conflicts_with = "seasons")]
    no_seasons: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    All,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full dashboard and write it to an output directory
    Render {
        #[command(flatten)]
        data: DataSource,

        #[command(flatten)]
        filters: Filters,

        /// Directory to write the dashboard document and panel tables to
        #[arg(short, long, default_value = "dashboard")]
        output_dir: PathBuf,

        /// Which surfaces to write
        #[arg(short, long, value_enum, default_value_t = OutputFormat::All)]
        format: OutputFormat,

        /// Gzip compress the dashboard JSON
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Log the headline metrics and panel sizes
    Summary {
        #[command(flatten)]
        data: DataSource,

        #[command(flatten)]
        filters: Filters,
    },
    /// Print a single panel's table as CSV on stdout
    Table {
        #[command(flatten)]
        data: DataSource,

        /// Panel id, e.g. daily_usage or weather_groups
        #[arg(value_name = "PANEL_ID")]
        panel: String,

        #[command(flatten)]
        filters: Filters,
    },
    /// List the season checkboxes and the selectable date range
    Seasons {
        #[command(flatten)]
        data: DataSource,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_share_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_share_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            data,
            filters,
            output_dir,
            format,
            gzip,
        } => {
            let dashboard = build_dashboard(&data.source, &filters)?;
            render(&dashboard, &output_dir, format, gzip)?;
        }
        Commands::Summary { data, filters } => {
            let dashboard = build_dashboard(&data.source, &filters)?;
            log_summary(&dashboard);
        }
        Commands::Table {
            data,
            panel,
            filters,
        } => {
            let dashboard = build_dashboard(&data.source, &filters)?;
            let Some(found) = dashboard.panel(&panel) else {
                anyhow::bail!(
                    "unknown panel '{panel}', expected one of: {}",
                    dashboard.panel_ids().join(", ")
                );
            };
            found.table.write_csv(std::io::stdout().lock())?;
        }
        Commands::Seasons { data } => {
            let ctx = DatasetContext::load(&data.source)?;
            match ctx.bounds() {
                Some(bounds) => {
                    info!(start = %bounds.start, end = %bounds.end, "Selectable date range")
                }
                None => info!("Dataset is empty"),
            }
            for checkbox in ctx.season_selection(&[])?.checkboxes() {
                info!(
                    season = %checkbox.season,
                    code = checkbox.season.code(),
                    checked = checkbox.selected,
                    "Season checkbox"
                );
            }
        }
    }

    Ok(())
}

/// Loads the dataset once and builds the dashboard for the given filters.
#[tracing::instrument(skip_all, fields(source = %source))]
fn build_dashboard(source: &str, filters: &Filters) -> Result<Dashboard> {
    let ctx = DatasetContext::load(source)?;
    let range = ctx.date_range(filters.start, filters.end)?;
    let seasons = if filters.no_seasons {
        SeasonSelection::none(ctx.seasons())
    } else {
        ctx.season_selection(&filters.seasons)?
    };
    Ok(Dashboard::build(&ctx, range, seasons))
}

/// Writes the dashboard to the requested surfaces under `output_dir`.
fn render(
    dashboard: &Dashboard,
    output_dir: &Path,
    format: OutputFormat,
    gzip: bool,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    if matches!(format, OutputFormat::Json | OutputFormat::All) {
        let path = write_json(&output_dir.join(DASHBOARD_FILE), dashboard, gzip)?;
        info!(path = %path.display(), "Dashboard document written");
    }

    if matches!(format, OutputFormat::Csv | OutputFormat::All) {
        write_panel_tables(output_dir, dashboard)?;
    }

    log_summary(dashboard);
    Ok(())
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn parse_season(s: &str) -> Result<Season, String> {
    s.parse::<Season>().map_err(|e| e.to_string())
}
