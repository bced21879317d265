//! CSV parser for the hourly bike-sharing usage log.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, info};

use crate::fetch::read_source;
use crate::record::{
    Encoding, HourlyRecord, Month, Season, SourceEncoding, WeatherSituation, Weekday, parse_flag,
    parse_year,
};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "dteday",
    "season",
    "yr",
    "mnth",
    "hr",
    "weekday",
    "workingday",
    "weathersit",
    "temp",
    "atemp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

/// A single CSV row before categorical columns are resolved.
#[derive(Debug, Deserialize)]
struct RawRow {
    dteday: String,
    season: String,
    yr: String,
    mnth: String,
    hr: u8,
    #[serde(default)]
    holiday: Option<String>,
    weekday: String,
    workingday: String,
    weathersit: String,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
    cnt: u32,
    #[serde(default)]
    weeknumber: Option<u32>,
}

impl RawRow {
    fn into_record(self) -> Result<HourlyRecord> {
        let date = parse_date(&self.dteday)?;
        anyhow::ensure!(self.hr < 24, "hour {} outside 0..=23", self.hr);

        let holiday = match self.holiday.as_deref() {
            Some(flag) if !flag.trim().is_empty() => parse_flag(flag).context("holiday")?,
            _ => false,
        };

        let record = HourlyRecord {
            date,
            season: self.season.parse::<Season>().context("season")?,
            year: parse_year(&self.yr).context("yr")?,
            month: self.mnth.parse::<Month>().context("mnth")?,
            hour: self.hr,
            weekday: self.weekday.parse::<Weekday>().context("weekday")?,
            holiday,
            working_day: parse_flag(&self.workingday).context("workingday")?,
            weather: self.weathersit.parse::<WeatherSituation>().context("weathersit")?,
            temp: self.temp,
            atemp: self.atemp,
            humidity: self.hum,
            windspeed: self.windspeed,
            casual: self.casual,
            registered: self.registered,
            count: self.cnt,
            week_number: self
                .weeknumber
                .unwrap_or_else(|| date.iso_week().week()),
            encoding: SourceEncoding {
                season: Encoding::detect(&self.season),
                month: Encoding::detect(&self.mnth),
                weather: Encoding::detect(&self.weathersit),
            },
        };

        anyhow::ensure!(
            record.counts_consistent(),
            "cnt {} does not equal casual {} + registered {}",
            record.count,
            record.casual,
            record.registered
        );

        Ok(record)
    }
}

/// Parses a calendar date in ISO form, with or without a time part.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").with_context(|| format!("unparseable date '{s}'"))
}

/// Decodes every row of a usage CSV into [`HourlyRecord`]s.
///
/// # Errors
///
/// Fails on the first missing column, malformed row, unknown label or row
/// whose counts do not add up. The error names the offending line.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<HourlyRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    anyhow::ensure!(missing.is_empty(), "missing required columns: {}", missing.join(", "));

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let line = idx + 2;
        let raw = result.with_context(|| format!("malformed CSV row at line {line}"))?;
        let record = raw
            .into_record()
            .with_context(|| format!("invalid usage record at line {line}"))?;
        records.push(record);
    }

    debug!(rows = records.len(), "Parsed usage records");
    Ok(records)
}

/// Loads the dataset from `source` and returns its records ordered by date.
///
/// The sort is stable, so rows within a day keep their file order.
#[tracing::instrument(skip_all, fields(source = %source))]
pub fn load_records(source: &str) -> Result<Vec<HourlyRecord>> {
    let bytes = read_source(source)?;
    let mut records =
        parse_records(bytes.as_slice()).with_context(|| format!("failed to parse {source}"))?;
    records.sort_by_key(|r| r.date);
    info!(rows = records.len(), "Dataset loaded");
    Ok(records)
}
