//! Dashboard assembly: runs the aggregation pipeline over the filtered views
//! and pairs each derived table with its chart settings.

pub mod panel;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregators::daily::daily_usage;
use crate::aggregators::hourly::{user_type_hourly_avg, weekday_hourly_avg, working_day_hourly_avg};
use crate::aggregators::least_usage::{
    least_by_month, least_by_season, least_by_weather, least_usage_days,
};
use crate::aggregators::season::season_usage;
use crate::aggregators::types::{
    DailyUsage, GroupTotal, GroupedWeek, MonthDayCount, SeasonDayCount, SeasonUserTotal,
    UsageDay, UserTypeHourlyAvg, WeatherDayCount, WeekdayHourlyAvg, WorkingDayHourlyAvg,
};
use crate::aggregators::weekly::{daily_weather, group_weeks, total_by_group, weekly_weather};
use crate::context::DatasetContext;
use crate::filter::{DateRange, SeasonSelection, filter_by_date, filter_by_season};
use crate::record::{HourlyRecord, Month, Season, Weekday};
use panel::{BarMode, ChartKind, ChartOptions, Panel, PanelTable};

pub const TITLE: &str = "Bike Sharing Usage Dashboard";
pub const CAPTION: &str = "Hourly bike-sharing usage log";

const TURQUOISE: &[&str] = &["mediumturquoise"];
const WEATHER_GROUP_COLORS: &[&str] = &[
    "darkslategrey",
    "aquamarine",
    "lightseagreen",
    "darkkhaki",
    "tomato",
];
const SET3: &[&str] = &[
    "#8DD3C7", "#FFFFB3", "#BEBADA", "#FB8072", "#80B1D3", "#FDB462", "#B3DE69", "#FCCDE5",
    "#D9D9D9", "#BC80BD", "#CCEBC5", "#FFED6F",
];
const ANTIQUE: &[&str] = &[
    "rgb(133, 92, 117)",
    "rgb(217, 175, 107)",
    "rgb(175, 100, 88)",
    "rgb(115, 111, 76)",
    "rgb(82, 106, 131)",
    "rgb(98, 83, 119)",
    "rgb(104, 133, 92)",
    "rgb(156, 156, 94)",
    "rgb(160, 97, 119)",
    "rgb(140, 120, 93)",
    "rgb(124, 124, 124)",
];
const BIN_LEGEND: &str = "Temperature (°C): Cold 0-12, Warm 13-23, Hot 24-32. \
                          Wind Speed (km/h): Not Windy 0-13, Windy 14-20";

/// Every table the dashboard draws, derived from the two filtered views.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTables {
    pub daily: Vec<DailyUsage>,
    pub season_users: Vec<SeasonUserTotal>,
    pub least_usage: Vec<UsageDay>,
    pub least_by_season: Vec<SeasonDayCount>,
    pub least_by_month: Vec<MonthDayCount>,
    pub least_by_weather: Vec<WeatherDayCount>,
    pub weekday_hourly: Vec<WeekdayHourlyAvg>,
    pub working_day_hourly: Vec<WorkingDayHourlyAvg>,
    pub user_type_hourly: Vec<UserTypeHourlyAvg>,
    pub weekly_weather: Vec<GroupedWeek>,
    pub weather_groups: Vec<GroupTotal>,
}

impl DerivedTables {
    /// Runs the pipeline. The user-type profile reads `season_view`; every
    /// other table reads `date_view`.
    pub fn compute(date_view: &[HourlyRecord], season_view: &[HourlyRecord]) -> Self {
        let least_usage = least_usage_days(date_view);
        let weekly = group_weeks(&weekly_weather(&daily_weather(date_view)));
        let weather_groups = total_by_group(&weekly);

        Self {
            daily: daily_usage(date_view),
            season_users: season_usage(date_view),
            least_by_season: least_by_season(&least_usage),
            least_by_month: least_by_month(&least_usage),
            least_by_weather: least_by_weather(&least_usage),
            least_usage,
            weekday_hourly: weekday_hourly_avg(date_view),
            working_day_hourly: working_day_hourly_avg(date_view),
            user_type_hourly: user_type_hourly_avg(season_view),
            weekly_weather: weekly,
            weather_groups,
        }
    }
}

/// A headline number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub id: &'static str,
    pub label: &'static str,
    pub value: u64,
    pub display: String,
}

impl Metric {
    fn new(id: &'static str, label: &'static str, value: u64) -> Self {
        Self {
            id,
            label,
            value,
            display: format_thousands(value),
        }
    }
}

/// The assembled dashboard, ready for a display surface.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
    pub seasons: SeasonSelection,
    pub metrics: Vec<Metric>,
    pub panels: Vec<Panel>,
    pub caption: &'static str,
}

impl Dashboard {
    /// Filters the dataset and builds the metrics and every chart panel.
    #[tracing::instrument(skip_all, fields(start = %range.start, end = %range.end))]
    pub fn build(ctx: &DatasetContext, range: DateRange, seasons: SeasonSelection) -> Self {
        let date_view = filter_by_date(ctx.records(), &range);
        let season_view = filter_by_season(ctx.records(), &seasons);
        debug!(
            date_rows = date_view.len(),
            season_rows = season_view.len(),
            selected_seasons = ?seasons.selected(),
            "Filtered views ready"
        );

        let tables = DerivedTables::compute(&date_view, &season_view);
        let headline = metrics(&tables.daily);
        let charts = panels(tables);

        info!(panels = charts.len(), "Dashboard assembled");

        Self {
            title: TITLE,
            generated_at: Utc::now(),
            date_range: range,
            seasons,
            metrics: headline,
            panels: charts,
            caption: CAPTION,
        }
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_ids(&self) -> Vec<&'static str> {
        self.panels.iter().map(|p| p.id).collect()
    }
}

/// Total, casual and registered riders over the daily table.
pub fn metrics(daily: &[DailyUsage]) -> Vec<Metric> {
    let total = daily.iter().map(|d| d.count).sum();
    let casual = daily.iter().map(|d| d.casual).sum();
    let registered = daily.iter().map(|d| d.registered).sum();
    vec![
        Metric::new("total_users", "Total Users", total),
        Metric::new("casual_users", "Casual Users", casual),
        Metric::new("registered_users", "Registered Users", registered),
    ]
}

/// Formats an integer with `,` thousands separators, as in `en_US`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn season_order() -> Vec<&'static str> {
    Season::ALL.iter().map(|s| s.label()).collect()
}

fn panels(tables: DerivedTables) -> Vec<Panel> {
    const DAILY: &str = "Daily Usage";
    const SEASONAL: &str = "Usage Varies by Season";
    const LEAST: &str = "The Least Favorable Bike-Sharing Usage Time";
    const HOURLY: &str = "Bike-Sharing Hourly Usage";
    const USER_TYPE: &str = "User Type Behavior";
    const WEEKLY: &str = "Week Grouping based on Temperature and Wind Speed";

    vec![
        Panel {
            id: "daily_usage",
            section: DAILY,
            title: "Number of Daily Users",
            kind: ChartKind::Line,
            options: ChartOptions::new("date", "count")
                .colors(TURQUOISE)
                .labels(&[("date", "Date"), ("count", "Number of Daily User")])
                .size_px(800, 400),
            table: PanelTable::Daily(tables.daily),
        },
        Panel {
            id: "season_usage",
            section: SEASONAL,
            title: "Users per Season",
            kind: ChartKind::Bar,
            options: ChartOptions::new("season", "total_user")
                .color("type")
                .bar_mode(BarMode::Group)
                .colors(&["mediumaquamarine", "lightcyan"])
                .category_order("season", season_order())
                .labels(&[
                    ("season", "Season"),
                    ("total_user", "Total User"),
                    ("type", "User Type"),
                ])
                .horizontal_legend()
                .size_px(800, 400),
            table: PanelTable::SeasonUsers(tables.season_users),
        },
        Panel {
            id: "least_by_season",
            section: LEAST,
            title: "By Season",
            kind: ChartKind::Pie,
            options: ChartOptions::new("season", "day_count")
                .colors(&["skyblue", "khaki", "plum", "tan"])
                .horizontal_legend(),
            table: PanelTable::LeastBySeason(tables.least_by_season),
        },
        Panel {
            id: "least_by_weather",
            section: LEAST,
            title: "By Weather Situation",
            kind: ChartKind::Bar,
            options: ChartOptions::new("least_day_count", "season")
                .color("weather")
                .horizontal()
                .colors(SET3)
                .category_order("season", season_order())
                .labels(&[
                    ("season", "Season"),
                    ("least_day_count", "Number of Days"),
                    ("weather", "Weather Situation"),
                ])
                .horizontal_legend(),
            table: PanelTable::LeastByWeather(tables.least_by_weather),
        },
        Panel {
            id: "least_by_month",
            section: LEAST,
            title: "By Month",
            kind: ChartKind::Bar,
            options: ChartOptions::new("least_day_count", "season")
                .color("month")
                .horizontal()
                .colors(ANTIQUE)
                .category_order("season", season_order())
                .category_order("month", Month::ALL.iter().map(|m| m.label()).collect())
                .labels(&[
                    ("season", "Season"),
                    ("least_day_count", "Number of Days"),
                    ("month", "Month"),
                ])
                .horizontal_legend(),
            table: PanelTable::LeastByMonth(tables.least_by_month),
        },
        Panel {
            id: "weekday_hourly",
            section: HOURLY,
            title: "By Weekday",
            kind: ChartKind::Bar,
            options: ChartOptions::new("hour", "count")
                .facet_row("weekday")
                .bar_mode(BarMode::Group)
                .colors(TURQUOISE)
                .category_order("weekday", Weekday::ALL.iter().map(|d| d.label()).collect())
                .labels(&[("hour", "Hour (h)"), ("count", "Number of User")])
                .annotation("Average Number of User per Hour")
                .hourly_ticks()
                .size_px(1100, 800),
            table: PanelTable::WeekdayHourly(tables.weekday_hourly),
        },
        Panel {
            id: "working_day_hourly",
            section: HOURLY,
            title: "Working Day vs Off Day",
            kind: ChartKind::Bar,
            options: ChartOptions::new("hour", "count")
                .color("working_day")
                .bar_mode(BarMode::Group)
                .colors(&["lightcoral", "skyblue"])
                .labels(&[
                    ("hour", "Hour (h)"),
                    ("count", "Number of User"),
                    ("working_day", "Working Day"),
                ])
                .hourly_ticks()
                .horizontal_legend()
                .size_px(1100, 400),
            table: PanelTable::WorkingDayHourly(tables.working_day_hourly),
        },
        Panel {
            id: "user_type_hourly",
            section: USER_TYPE,
            title: "Casual vs Registered User Usage Difference",
            kind: ChartKind::Bar,
            options: ChartOptions::new("hour", "avg_user")
                .color("working_day")
                .facet_row("type")
                .bar_mode(BarMode::Group)
                .colors(&["lightcoral", "skyblue"])
                .labels(&[("hour", "Hour (h)"), ("avg_user", "Number of User")])
                .annotation("Average Number of User per hour")
                .hourly_ticks()
                .horizontal_legend()
                .size_px(1400, 500),
            table: PanelTable::UserTypeHourly(tables.user_type_hourly),
        },
        Panel {
            id: "weekly_weather",
            section: WEEKLY,
            title: "Weekly Temperature and Wind Speed",
            kind: ChartKind::Scatter3d,
            options: ChartOptions::new("temp", "windspeed")
                .z("week_number")
                .size("count")
                .color("group")
                .colors(WEATHER_GROUP_COLORS)
                .labels(&[
                    ("week_number", "Number of Week"),
                    ("temp", "Temperature (c)"),
                    ("windspeed", "Wind Speed (km/h)"),
                    ("group", "Weather Condition"),
                ])
                .annotation(BIN_LEGEND)
                .size_px(900, 600),
            table: PanelTable::WeeklyWeather(tables.weekly_weather),
        },
        Panel {
            id: "weather_groups",
            section: WEEKLY,
            title: "Average Daily Users per Weather Condition",
            kind: ChartKind::Bar,
            options: ChartOptions::new("group", "count")
                .color("group")
                .colors(WEATHER_GROUP_COLORS)
                .labels(&[
                    ("count", "Total Number of Average Daily User"),
                    ("group", "Weather Condition"),
                ])
                .size_px(500, 350),
            table: PanelTable::GroupTotals(tables.weather_groups),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, record, two_days};

    fn build_all(records: Vec<HourlyRecord>) -> Dashboard {
        let ctx = DatasetContext::new(records);
        let range = ctx.date_range(None, None).unwrap();
        let seasons = ctx.season_selection(&[]).unwrap();
        Dashboard::build(&ctx, range, seasons)
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(3292679), "3,292,679");
    }

    #[test]
    fn test_dashboard_has_ten_panels_and_three_metrics() {
        let dashboard = build_all(two_days());
        assert_eq!(dashboard.panels.len(), 10);
        assert_eq!(dashboard.metrics.len(), 3);

        let ids = dashboard.panel_ids();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_metrics_match_daily_totals() {
        let dashboard = build_all(two_days());
        let values: Vec<u64> = dashboard.metrics.iter().map(|m| m.value).collect();
        // casual 276 + 552, registered 552 + 1104
        assert_eq!(values, vec![2484, 828, 1656]);
        assert_eq!(dashboard.metrics[0].display, "2,484");
    }

    #[test]
    fn test_daily_panel_end_to_end() {
        let dashboard = build_all(two_days());
        let panel = dashboard.panel("daily_usage").unwrap();
        match &panel.table {
            PanelTable::Daily(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].count, 828);
                assert_eq!(rows[1].count, 1656);
            }
            other => panic!("unexpected table {other:?}"),
        }
    }

    #[test]
    fn test_user_type_panel_reads_season_view() {
        let mut summer = record(date(2011, 7, 1), 8, 10, 10);
        summer.season = Season::Summer;
        let mut records = two_days();
        records.push(summer);
        let ctx = DatasetContext::new(records);

        // the date filter keeps only January, the season filter only summer
        let range = DateRange::new(date(2011, 1, 3), date(2011, 1, 4)).unwrap();
        let seasons = ctx.season_selection(&[Season::Summer]).unwrap();
        let dashboard = Dashboard::build(&ctx, range, seasons);

        match &dashboard.panel("user_type_hourly").unwrap().table {
            PanelTable::UserTypeHourly(rows) => {
                assert_eq!(rows.len(), 2);
                assert!(rows.iter().all(|r| r.hour == 8 && r.avg_user == 10));
            }
            other => panic!("unexpected table {other:?}"),
        }
        match &dashboard.panel("season_usage").unwrap().table {
            PanelTable::SeasonUsers(rows) => {
                assert!(rows.iter().all(|r| r.season == Season::Winter));
            }
            other => panic!("unexpected table {other:?}"),
        }
    }

    #[test]
    fn test_empty_filter_results_degrade_to_empty_tables() {
        let ctx = DatasetContext::new(two_days());
        let range = ctx.date_range(None, None).unwrap();
        let seasons = SeasonSelection::from_selected(ctx.seasons(), &[]).unwrap();
        let dashboard = Dashboard::build(&ctx, range, seasons);

        assert!(dashboard.panel("user_type_hourly").unwrap().table.is_empty());
        assert!(!dashboard.panel("daily_usage").unwrap().table.is_empty());

        let ctx = DatasetContext::new(two_days());
        let range = DateRange::new(date(2011, 1, 3), date(2011, 1, 3)).unwrap();
        let seasons = ctx.season_selection(&[]).unwrap();
        let one_day = Dashboard::build(&ctx, range, seasons);
        assert_eq!(one_day.panel("daily_usage").unwrap().table.len(), 1);
    }

    #[test]
    fn test_empty_dataset_renders_empty_dashboard() {
        let ctx = DatasetContext::new(Vec::new());
        let range = ctx
            .date_range(Some(date(2011, 1, 1)), Some(date(2011, 1, 31)))
            .unwrap();
        let seasons = ctx.season_selection(&[]).unwrap();
        let dashboard = Dashboard::build(&ctx, range, seasons);

        assert_eq!(dashboard.panels.len(), 10);
        assert!(dashboard.panels.iter().all(|p| p.table.is_empty()));
        assert!(dashboard.metrics.iter().all(|m| m.value == 0));
    }

    #[test]
    fn test_least_usage_subset_within_dashboard() {
        let ctx = DatasetContext::new(two_days());
        let tables = DerivedTables::compute(ctx.records(), ctx.records());
        assert!(tables.least_usage.len() <= 20);
        let counted: usize = tables.least_by_season.iter().map(|s| s.day_count).sum();
        assert_eq!(counted, tables.least_usage.len());
    }
}
