//! Row types of the derived tables.
//!
//! Each table is a `Vec` of one of these rows. Field names double as the
//! column names when a table is written out as CSV or JSON.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregators::bins::{TemperatureBin, WindBin};
use crate::record::{Month, Season, UserType, WeatherSituation, Weekday};

/// Per-date rider totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub count: u64,
    pub casual: u64,
    pub registered: u64,
}

/// Long-form seasonal total for one rider type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonUserTotal {
    pub season: Season,
    pub total_user: u64,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// Counts summed over one (date, season, year, month, weekday, working day,
/// weather) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageDay {
    pub date: NaiveDate,
    pub season: Season,
    pub year: i32,
    pub month: Month,
    pub weekday: Weekday,
    pub working_day: bool,
    pub weather: WeatherSituation,
    pub casual: u64,
    pub registered: u64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonDayCount {
    pub season: Season,
    pub day_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthDayCount {
    pub season: Season,
    pub month: Month,
    pub least_day_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherDayCount {
    pub season: Season,
    pub weather: WeatherSituation,
    pub least_day_count: usize,
}

/// Truncated mean of the hourly total for a weekday and hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayHourlyAvg {
    pub weekday: Weekday,
    pub hour: u8,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkingDayHourlyAvg {
    pub working_day: bool,
    pub hour: u8,
    pub count: i64,
}

/// Long-form truncated hourly mean for one rider type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTypeHourlyAvg {
    pub working_day: bool,
    pub hour: u8,
    pub avg_user: i64,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// Weather means and total riders for one day, truncated to integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub week_number: u32,
    pub temp: i64,
    pub atemp: i64,
    pub humidity: i64,
    pub windspeed: i64,
    pub count: i64,
}

/// Weekly means of the daily weather table, truncated to integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyWeather {
    pub week_number: u32,
    pub temp: i64,
    pub atemp: i64,
    pub humidity: i64,
    pub windspeed: i64,
    pub count: i64,
}

/// A week labelled with its temperature and wind bins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedWeek {
    pub week_number: u32,
    pub temp: i64,
    pub atemp: i64,
    pub humidity: i64,
    pub windspeed: i64,
    pub count: i64,
    pub temp_bin: Option<TemperatureBin>,
    pub wind_bin: Option<WindBin>,
    pub group: String,
}

/// Weekly counts summed over one weather group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub group: String,
    pub count: i64,
}
