use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::aggregators::types::DailyUsage;
use crate::record::HourlyRecord;

/// Sums casual, registered and total riders per calendar date.
pub fn daily_usage(records: &[HourlyRecord]) -> Vec<DailyUsage> {
    let mut by_date: BTreeMap<NaiveDate, DailyUsage> = BTreeMap::new();

    for r in records {
        let day = by_date.entry(r.date).or_insert_with(|| DailyUsage {
            date: r.date,
            count: 0,
            casual: 0,
            registered: 0,
        });
        day.count += u64::from(r.count);
        day.casual += u64::from(r.casual);
        day.registered += u64::from(r.registered);
    }

    by_date.into_values().collect()
}
