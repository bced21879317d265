//! Process-wide dataset context: the loaded records plus the facts the
//! filter controls are built from.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::filter::{DateRange, SeasonSelection};
use crate::parser::load_records;
use crate::record::{HourlyRecord, Season};

/// The immutable dataset, loaded once and shared by reference.
#[derive(Debug, Clone)]
pub struct DatasetContext {
    records: Vec<HourlyRecord>,
    bounds: Option<DateRange>,
    seasons: Vec<Season>,
}

impl DatasetContext {
    pub fn new(records: Vec<HourlyRecord>) -> Self {
        let bounds = match (
            records.iter().map(|r| r.date).min(),
            records.iter().map(|r| r.date).max(),
        ) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        let mut seasons = Vec::new();
        for r in &records {
            if !seasons.contains(&r.season) {
                seasons.push(r.season);
            }
        }

        Self {
            records,
            bounds,
            seasons,
        }
    }

    /// Loads `source` and builds the context around it.
    pub fn load(source: &str) -> Result<Self> {
        let ctx = Self::new(load_records(source)?);
        if let Some(bounds) = ctx.bounds {
            info!(
                start = %bounds.start,
                end = %bounds.end,
                seasons = ctx.seasons.len(),
                "Dataset context ready"
            );
        }
        Ok(ctx)
    }

    pub fn records(&self) -> &[HourlyRecord] {
        &self.records
    }

    /// Earliest and latest date in the data; `None` when it is empty.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// Distinct seasons in order of first appearance.
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Resolves user-picked dates against the dataset bounds. Missing dates
    /// default to the bounds; dates outside them are rejected.
    pub fn date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DateRange> {
        let Some(bounds) = self.bounds else {
            return match (start, end) {
                (Some(start), Some(end)) => DateRange::new(start, end),
                _ => anyhow::bail!("dataset is empty, an explicit start and end date are required"),
            };
        };

        let start = start.unwrap_or(bounds.start);
        let end = end.unwrap_or(bounds.end);
        for date in [start, end] {
            anyhow::ensure!(
                bounds.contains(date),
                "date {date} is outside the dataset range {} to {}",
                bounds.start,
                bounds.end
            );
        }
        DateRange::new(start, end)
    }

    /// Builds the season checklist. An empty `selected` ticks every season.
    pub fn season_selection(&self, selected: &[Season]) -> Result<SeasonSelection> {
        if selected.is_empty() {
            Ok(SeasonSelection::all(&self.seasons))
        } else {
            SeasonSelection::from_selected(&self.seasons, selected)
        }
    }
}
