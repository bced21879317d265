//! Hour-of-day usage profiles. All averages are truncated, never rounded.

use std::collections::BTreeMap;

use crate::aggregators::types::{UserTypeHourlyAvg, WeekdayHourlyAvg, WorkingDayHourlyAvg};
use crate::aggregators::utility::{Mean, split_by_user_type};
use crate::record::{HourlyRecord, Weekday};

/// Mean hourly total per (weekday, hour).
pub fn weekday_hourly_avg(records: &[HourlyRecord]) -> Vec<WeekdayHourlyAvg> {
    let mut groups: BTreeMap<(Weekday, u8), Mean> = BTreeMap::new();
    for r in records {
        groups
            .entry((r.weekday, r.hour))
            .or_default()
            .push(f64::from(r.count));
    }
    groups
        .into_iter()
        .map(|((weekday, hour), mean)| WeekdayHourlyAvg {
            weekday,
            hour,
            count: mean.truncated(),
        })
        .collect()
}

/// Mean hourly total per (working day, hour).
pub fn working_day_hourly_avg(records: &[HourlyRecord]) -> Vec<WorkingDayHourlyAvg> {
    let mut groups: BTreeMap<(bool, u8), Mean> = BTreeMap::new();
    for r in records {
        groups
            .entry((r.working_day, r.hour))
            .or_default()
            .push(f64::from(r.count));
    }
    groups
        .into_iter()
        .map(|((working_day, hour), mean)| WorkingDayHourlyAvg {
            working_day,
            hour,
            count: mean.truncated(),
        })
        .collect()
}

/// Mean casual and registered riders per (working day, hour), in long form
/// with every casual row ahead of every registered row.
pub fn user_type_hourly_avg(records: &[HourlyRecord]) -> Vec<UserTypeHourlyAvg> {
    let mut groups: BTreeMap<(bool, u8), (Mean, Mean)> = BTreeMap::new();
    for r in records {
        let (casual, registered) = groups.entry((r.working_day, r.hour)).or_default();
        casual.push(f64::from(r.casual));
        registered.push(f64::from(r.registered));
    }

    let wide: Vec<((bool, u8), i64, i64)> = groups
        .into_iter()
        .map(|(key, (casual, registered))| (key, casual.truncated(), registered.truncated()))
        .collect();

    split_by_user_type(&wide, |(working_day, hour), avg_user, user_type| {
        UserTypeHourlyAvg {
            working_day,
            hour,
            avg_user,
            user_type,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::record::UserType;
    use crate::testing::{date, record, two_days};

    #[test]
    fn test_weekday_hourly_avg_truncates() {
        // mean of 5 and 6 at 08:00 on Mondays is 5.5
        let records = vec![
            record(date(2011, 1, 3), 8, 0, 5),
            record(date(2011, 1, 10), 8, 0, 6),
        ];
        let avg = weekday_hourly_avg(&records);
        assert_eq!(
            avg,
            vec![WeekdayHourlyAvg {
                weekday: Weekday::Mon,
                hour: 8,
                count: 5,
            }]
        );
    }

    #[test]
    fn test_weekday_hourly_avg_five_point_nine() {
        // nine Mondays with 6 riders and one with 5
        let mut records: Vec<HourlyRecord> = (0..9)
            .map(|w| record(date(2011, 1, 3) + Duration::weeks(w), 8, 0, 6))
            .collect();
        records.push(record(date(2011, 3, 7), 8, 0, 5));
        let avg = weekday_hourly_avg(&records);
        assert_eq!(avg[0].count, 5);
    }

    #[test]
    fn test_working_day_hourly_avg_groups() {
        let mut weekend = record(date(2011, 1, 8), 0, 10, 10);
        weekend.working_day = false;
        let mut records = two_days();
        records.push(weekend);

        let avg = working_day_hourly_avg(&records);
        // one weekend hour plus 24 working-day hours
        assert_eq!(avg.len(), 25);
        assert_eq!(
            avg[0],
            WorkingDayHourlyAvg {
                working_day: false,
                hour: 0,
                count: 20,
            }
        );
        // hour 1 on working days: counts 3 and 6
        assert_eq!(
            avg[2],
            WorkingDayHourlyAvg {
                working_day: true,
                hour: 1,
                count: 4,
            }
        );
    }

    #[test]
    fn test_user_type_hourly_avg_long_form() {
        let avg = user_type_hourly_avg(&two_days());
        assert_eq!(avg.len(), 48);
        assert!(avg[..24].iter().all(|r| r.user_type == UserType::Casual));
        assert!(avg[24..].iter().all(|r| r.user_type == UserType::Registered));

        // hour 3: casual 3 and 6, registered 6 and 12
        assert_eq!(avg[3].avg_user, 4);
        assert_eq!(avg[24 + 3].avg_user, 9);
    }

    #[test]
    fn test_hourly_profiles_empty() {
        assert!(weekday_hourly_avg(&[]).is_empty());
        assert!(working_day_hourly_avg(&[]).is_empty());
        assert!(user_type_hourly_avg(&[]).is_empty());
    }
}
