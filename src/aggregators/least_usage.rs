//! The least-used days and their breakdowns.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::aggregators::types::{MonthDayCount, SeasonDayCount, UsageDay, WeatherDayCount};
use crate::record::{HourlyRecord, Month, Season, SourceEncoding, WeatherSituation, Weekday};

/// How many of the lowest-usage groups are kept.
pub const LEAST_USAGE_LIMIT: usize = 20;

type DayKey = (NaiveDate, Season, i32, Month, Weekday, bool, WeatherSituation);

/// Sums riders per (date, season, year, month, weekday, working day,
/// weather). Weather is recorded hourly, so a day with changing weather
/// spans several groups.
pub fn usage_by_day(records: &[HourlyRecord]) -> Vec<UsageDay> {
    let mut groups: BTreeMap<DayKey, (u64, u64, u64)> = BTreeMap::new();

    for r in records {
        let key = (
            r.date,
            r.season,
            r.year,
            r.month,
            r.weekday,
            r.working_day,
            r.weather,
        );
        let (casual, registered, count) = groups.entry(key).or_default();
        *casual += u64::from(r.casual);
        *registered += u64::from(r.registered);
        *count += u64::from(r.count);
    }

    groups
        .into_iter()
        .map(|(key, (casual, registered, count))| {
            let (date, season, year, month, weekday, working_day, weather) = key;
            UsageDay {
                date,
                season,
                year,
                month,
                weekday,
                working_day,
                weather,
                casual,
                registered,
                count,
            }
        })
        .collect()
}

/// The [`LEAST_USAGE_LIMIT`] groups with the fewest riders.
///
/// Sorted ascending by count, ties broken by year, season, month and weather
/// in that order. A categorical column read as labels compares by label
/// text, one read as codes by code. The sort is stable, so remaining ties
/// keep group-key order.
pub fn least_usage_days(records: &[HourlyRecord]) -> Vec<UsageDay> {
    let encoding = SourceEncoding::of(records);
    let mut days = usage_by_day(records);
    days.sort_by(|a, b| {
        a.count
            .cmp(&b.count)
            .then(a.year.cmp(&b.year))
            .then(a.season.cmp_as(b.season, encoding.season))
            .then(a.month.cmp_as(b.month, encoding.month))
            .then(a.weather.cmp_as(b.weather, encoding.weather))
    });
    days.truncate(LEAST_USAGE_LIMIT);
    days
}

/// Number of least-usage groups per season.
pub fn least_by_season(days: &[UsageDay]) -> Vec<SeasonDayCount> {
    let mut counts: BTreeMap<Season, usize> = BTreeMap::new();
    for d in days {
        *counts.entry(d.season).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(season, day_count)| SeasonDayCount { season, day_count })
        .collect()
}

/// Number of least-usage groups per season and month.
pub fn least_by_month(days: &[UsageDay]) -> Vec<MonthDayCount> {
    let mut counts: BTreeMap<(Season, Month), usize> = BTreeMap::new();
    for d in days {
        *counts.entry((d.season, d.month)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((season, month), least_day_count)| MonthDayCount {
            season,
            month,
            least_day_count,
        })
        .collect()
}

/// Number of least-usage groups per season and weather situation.
pub fn least_by_weather(days: &[UsageDay]) -> Vec<WeatherDayCount> {
    let mut counts: BTreeMap<(Season, WeatherSituation), usize> = BTreeMap::new();
    for d in days {
        *counts.entry((d.season, d.weather)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((season, weather), least_day_count)| WeatherDayCount {
            season,
            weather,
            least_day_count,
        })
        .collect()
}
