//! Record builders shared by the unit tests.

use chrono::{Datelike, NaiveDate};

use crate::record::{HourlyRecord, Month, Season, SourceEncoding, WeatherSituation, Weekday};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A clear, mild working-day record with the given riders.
pub fn record(date: NaiveDate, hour: u8, casual: u32, registered: u32) -> HourlyRecord {
    HourlyRecord {
        date,
        season: Season::Winter,
        year: date.year(),
        month: Month::from_code(date.month() as u8).unwrap(),
        hour,
        weekday: Weekday::from_code(date.weekday().num_days_from_sunday() as u8).unwrap(),
        holiday: false,
        working_day: true,
        weather: WeatherSituation::Clear,
        temp: 10.0,
        atemp: 12.0,
        humidity: 50.0,
        windspeed: 8.0,
        casual,
        registered,
        count: casual + registered,
        week_number: date.iso_week().week(),
        encoding: SourceEncoding::default(),
    }
}

/// Two full days of 24 hourly records each; hour `h` has `h` casual and
/// `2h` registered riders on the first day, doubled on the second.
pub fn two_days() -> Vec<HourlyRecord> {
    let mut records = Vec::new();
    for (day, scale) in [(date(2011, 1, 3), 1), (date(2011, 1, 4), 2)] {
        for h in 0..24u8 {
            let h32 = u32::from(h);
            records.push(record(day, h, h32 * scale, 2 * h32 * scale));
        }
    }
    records
}
