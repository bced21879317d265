//! Display surfaces for an assembled dashboard.
//!
//! Supports a console summary, a JSON dashboard document (optionally
//! gzip-compressed) and one CSV file per panel.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::dashboard::Dashboard;

/// File name of the dashboard document inside the output directory.
pub const DASHBOARD_FILE: &str = "dashboard.json";

/// File name of the metrics table inside the output directory.
pub const METRICS_FILE: &str = "metrics.csv";

/// Logs the header, metrics and per-panel row counts.
pub fn log_summary(dashboard: &Dashboard) {
    info!(
        title = dashboard.title,
        start = %dashboard.date_range.start,
        end = %dashboard.date_range.end,
        seasons = ?dashboard.seasons.selected(),
        "Dashboard"
    );

    for metric in &dashboard.metrics {
        info!(metric = metric.label, value = %metric.display, "Metric");
    }

    for panel in &dashboard.panels {
        info!(
            panel = panel.id,
            section = panel.section,
            kind = ?panel.kind,
            rows = panel.table.len(),
            "Panel"
        );
    }
}

/// Writes the dashboard document to `path`, or to `path` with a `.gz`
/// suffix when `gzip` is set. Returns the path written.
pub fn write_json(path: &Path, dashboard: &Dashboard, gzip: bool) -> Result<PathBuf> {
    let body = serde_json::to_vec_pretty(dashboard)?;

    let (target, bytes) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&body)?;
        let mut name = path.as_os_str().to_owned();
        name.push(".gz");
        (PathBuf::from(name), encoder.finish()?)
    } else {
        (path.to_path_buf(), body)
    };

    fs::write(&target, &bytes)
        .with_context(|| format!("failed to write {}", target.display()))?;
    debug!(path = %target.display(), bytes = bytes.len(), "Dashboard JSON written");
    Ok(target)
}

/// Writes every panel table to `<dir>/<panel id>.csv` and the metrics to
/// `<dir>/metrics.csv`. Returns the files written.
pub fn write_panel_tables(dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut written = Vec::with_capacity(dashboard.panels.len() + 1);

    for panel in &dashboard.panels {
        let path = dir.join(format!("{}.csv", panel.id));
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        panel
            .table
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("failed to write panel {}", panel.id))?;
        debug!(path = %path.display(), rows = panel.table.len(), "Panel table written");
        written.push(path);
    }

    let path = dir.join(METRICS_FILE);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);
    for metric in &dashboard.metrics {
        writer.serialize(metric)?;
    }
    writer.flush()?;
    written.push(path);

    info!(files = written.len(), dir = %dir.display(), "Panel tables written");
    Ok(written)
}
