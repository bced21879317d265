//! The two dashboard filters: an inclusive date range and a season checklist.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{HourlyRecord, Season};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> anyhow::Result<Self> {
        anyhow::ensure!(start <= end, "start date {start} is after end date {end}");
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One checkbox per season present in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonCheckbox {
    pub season: Season,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonSelection {
    checkboxes: Vec<SeasonCheckbox>,
}

impl SeasonSelection {
    /// Every checkbox ticked, the initial state.
    pub fn all(seasons: &[Season]) -> Self {
        Self::uniform(seasons, true)
    }

    /// Every checkbox cleared.
    pub fn none(seasons: &[Season]) -> Self {
        Self::uniform(seasons, false)
    }

    fn uniform(seasons: &[Season], selected: bool) -> Self {
        Self {
            checkboxes: seasons
                .iter()
                .map(|&season| SeasonCheckbox { season, selected })
                .collect(),
        }
    }

    /// Ticks exactly the seasons in `selected`.
    ///
    /// # Errors
    ///
    /// Fails if `selected` names a season that has no checkbox.
    pub fn from_selected(seasons: &[Season], selected: &[Season]) -> anyhow::Result<Self> {
        if let Some(unknown) = selected.iter().find(|s| !seasons.contains(*s)) {
            anyhow::bail!("season {unknown} does not occur in the dataset");
        }
        Ok(Self {
            checkboxes: seasons
                .iter()
                .map(|&season| SeasonCheckbox {
                    season,
                    selected: selected.contains(&season),
                })
                .collect(),
        })
    }

    pub fn checkboxes(&self) -> &[SeasonCheckbox] {
        &self.checkboxes
    }

    pub fn is_selected(&self, season: Season) -> bool {
        self.checkboxes
            .iter()
            .any(|c| c.season == season && c.selected)
    }

    pub fn all_selected(&self) -> bool {
        self.checkboxes.iter().all(|c| c.selected)
    }

    pub fn selected(&self) -> Vec<Season> {
        self.checkboxes
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.season)
            .collect()
    }
}

/// Rows whose date falls inside `range`.
pub fn filter_by_date(records: &[HourlyRecord], range: &DateRange) -> Vec<HourlyRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect()
}

/// Rows whose season is ticked in `selection`.
pub fn filter_by_season(
    records: &[HourlyRecord],
    selection: &SeasonSelection,
) -> Vec<HourlyRecord> {
    records
        .iter()
        .filter(|r| selection.is_selected(r.season))
        .copied()
        .collect()
}
