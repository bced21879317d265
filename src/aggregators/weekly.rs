//! Weekly weather grouping.
//!
//! Hours collapse to days, days collapse to weeks, and each week is placed in
//! a temperature/wind group whose label keys the final totals.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::aggregators::bins::{group_label, temperature_bin, wind_bin};
use crate::aggregators::types::{DailyWeather, GroupTotal, GroupedWeek, WeeklyWeather};
use crate::aggregators::utility::{Mean, mean, truncate};
use crate::record::HourlyRecord;

#[derive(Default)]
struct DayAccumulator {
    temp: Mean,
    atemp: Mean,
    humidity: Mean,
    windspeed: Mean,
    count: u64,
}

/// Daily weather means and rider totals per (date, week number).
pub fn daily_weather(records: &[HourlyRecord]) -> Vec<DailyWeather> {
    let mut days: BTreeMap<(NaiveDate, u32), DayAccumulator> = BTreeMap::new();

    for r in records {
        let day = days.entry((r.date, r.week_number)).or_default();
        day.temp.push(r.temp);
        day.atemp.push(r.atemp);
        day.humidity.push(r.humidity);
        day.windspeed.push(r.windspeed);
        day.count += u64::from(r.count);
    }

    days.into_iter()
        .map(|((date, week_number), day)| DailyWeather {
            date,
            week_number,
            temp: day.temp.truncated(),
            atemp: day.atemp.truncated(),
            humidity: day.humidity.truncated(),
            windspeed: day.windspeed.truncated(),
            count: day.count as i64,
        })
        .collect()
}

/// Weekly means of the daily weather table.
pub fn weekly_weather(daily: &[DailyWeather]) -> Vec<WeeklyWeather> {
    let mut weeks: BTreeMap<u32, Vec<&DailyWeather>> = BTreeMap::new();
    for d in daily {
        weeks.entry(d.week_number).or_default().push(d);
    }

    weeks
        .into_iter()
        .map(|(week_number, days)| {
            let column = |f: fn(&DailyWeather) -> i64| -> i64 {
                let values: Vec<f64> = days.iter().map(|&d| f(d) as f64).collect();
                truncate(mean(&values))
            };
            WeeklyWeather {
                week_number,
                temp: column(|d| d.temp),
                atemp: column(|d| d.atemp),
                humidity: column(|d| d.humidity),
                windspeed: column(|d| d.windspeed),
                count: column(|d| d.count),
            }
        })
        .collect()
}

/// Attaches temperature and wind bins, plus their composite label, to each week.
pub fn group_weeks(weekly: &[WeeklyWeather]) -> Vec<GroupedWeek> {
    weekly
        .iter()
        .map(|w| {
            let temp_bin = temperature_bin(w.temp as f64);
            let wind_bin = wind_bin(w.windspeed as f64);
            GroupedWeek {
                week_number: w.week_number,
                temp: w.temp,
                atemp: w.atemp,
                humidity: w.humidity,
                windspeed: w.windspeed,
                count: w.count,
                temp_bin,
                wind_bin,
                group: group_label(temp_bin, wind_bin),
            }
        })
        .collect()
}

/// Sums weekly counts per group label, ordered by label.
pub fn total_by_group(grouped: &[GroupedWeek]) -> Vec<GroupTotal> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for w in grouped {
        *totals.entry(w.group.as_str()).or_default() += w.count;
    }
    totals
        .into_iter()
        .map(|(group, count)| GroupTotal {
            group: group.to_string(),
            count,
        })
        .collect()
}
