use std::collections::BTreeMap;

use crate::aggregators::types::SeasonUserTotal;
use crate::aggregators::utility::split_by_user_type;
use crate::record::{HourlyRecord, Season};

/// Sums casual and registered riders per season, in long form.
///
/// The result holds one `casual` row per season followed by one `registered`
/// row per season, both in season order.
pub fn season_usage(records: &[HourlyRecord]) -> Vec<SeasonUserTotal> {
    let mut by_season: BTreeMap<Season, (u64, u64)> = BTreeMap::new();

    for r in records {
        let (casual, registered) = by_season.entry(r.season).or_default();
        *casual += u64::from(r.casual);
        *registered += u64::from(r.registered);
    }

    let wide: Vec<(Season, u64, u64)> = by_season
        .into_iter()
        .map(|(season, (casual, registered))| (season, casual, registered))
        .collect();

    split_by_user_type(&wide, |season, total_user, user_type| SeasonUserTotal {
        season,
        total_user,
        user_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::UserType;
    use crate::testing::{date, record};

    fn seasonal_records() -> Vec<HourlyRecord> {
        let mut summer = record(date(2011, 7, 1), 9, 30, 70);
        summer.season = Season::Summer;
        let mut fall = record(date(2011, 10, 1), 9, 5, 15);
        fall.season = Season::Fall;
        vec![
            summer,
            record(date(2011, 1, 1), 9, 1, 2),
            fall,
            record(date(2011, 1, 2), 9, 3, 4),
        ]
    }

    #[test]
    fn test_season_usage_long_form_doubles_rows() {
        let long = season_usage(&seasonal_records());
        // three distinct seasons in the wide table
        assert_eq!(long.len(), 6);
    }

    #[test]
    fn test_season_usage_order() {
        let long = season_usage(&seasonal_records());
        let order: Vec<(Season, UserType)> = long.iter().map(|r| (r.season, r.user_type)).collect();
        assert_eq!(
            order,
            vec![
                (Season::Winter, UserType::Casual),
                (Season::Summer, UserType::Casual),
                (Season::Fall, UserType::Casual),
                (Season::Winter, UserType::Registered),
                (Season::Summer, UserType::Registered),
                (Season::Fall, UserType::Registered),
            ]
        );
    }

    #[test]
    fn test_season_usage_recovers_totals() {
        let records = seasonal_records();
        let long = season_usage(&records);

        for season in [Season::Winter, Season::Summer, Season::Fall] {
            let reshaped: u64 = long
                .iter()
                .filter(|r| r.season == season)
                .map(|r| r.total_user)
                .sum();
            let raw: u64 = records
                .iter()
                .filter(|r| r.season == season)
                .map(|r| u64::from(r.casual) + u64::from(r.registered))
                .sum();
            assert_eq!(reshaped, raw);
        }
    }

    #[test]
    fn test_season_usage_empty() {
        assert!(season_usage(&[]).is_empty());
    }
}
