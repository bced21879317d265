//! Chart panels: a derived table plus the static display options a chart
//! renderer needs to draw it.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::aggregators::types::{
    DailyUsage, GroupTotal, GroupedWeek, MonthDayCount, SeasonDayCount, SeasonUserTotal,
    UserTypeHourlyAvg, WeatherDayCount, WeekdayHourlyAvg, WorkingDayHourlyAvg,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter3d,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
}

/// Explicit ordering of the categories of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOrder {
    pub column: &'static str,
    pub values: Vec<&'static str>,
}

/// Static presentation settings for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub x: &'static str,
    pub y: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_row: Option<&'static str>,
    pub orientation: Orientation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    pub labels: BTreeMap<&'static str, &'static str>,
    pub colors: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_orders: Vec<CategoryOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_ticks: Option<Vec<u32>>,
    pub horizontal_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ChartOptions {
    pub fn new(x: &'static str, y: &'static str) -> Self {
        Self {
            x,
            y,
            z: None,
            color: None,
            size: None,
            facet_row: None,
            orientation: Orientation::Vertical,
            bar_mode: None,
            labels: BTreeMap::new(),
            colors: Vec::new(),
            category_orders: Vec::new(),
            x_ticks: None,
            horizontal_legend: false,
            annotation: None,
            width: None,
            height: None,
        }
    }

    pub fn z(mut self, column: &'static str) -> Self {
        self.z = Some(column);
        self
    }

    pub fn color(mut self, column: &'static str) -> Self {
        self.color = Some(column);
        self
    }

    pub fn size(mut self, column: &'static str) -> Self {
        self.size = Some(column);
        self
    }

    pub fn facet_row(mut self, column: &'static str) -> Self {
        self.facet_row = Some(column);
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn bar_mode(mut self, mode: BarMode) -> Self {
        self.bar_mode = Some(mode);
        self
    }

    pub fn labels(mut self, labels: &[(&'static str, &'static str)]) -> Self {
        self.labels.extend(labels.iter().copied());
        self
    }

    pub fn colors(mut self, colors: &[&'static str]) -> Self {
        self.colors = colors.to_vec();
        self
    }

    pub fn category_order(mut self, column: &'static str, values: Vec<&'static str>) -> Self {
        self.category_orders.push(CategoryOrder { column, values });
        self
    }

    /// Ticks at every hour of the day.
    pub fn hourly_ticks(mut self) -> Self {
        self.x_ticks = Some((0..24).collect());
        self
    }

    pub fn horizontal_legend(mut self) -> Self {
        self.horizontal_legend = true;
        self
    }

    pub fn annotation(mut self, text: &'static str) -> Self {
        self.annotation = Some(text);
        self
    }

    pub fn size_px(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// The derived table behind a panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelTable {
    Daily(Vec<DailyUsage>),
    SeasonUsers(Vec<SeasonUserTotal>),
    LeastBySeason(Vec<SeasonDayCount>),
    LeastByWeather(Vec<WeatherDayCount>),
    LeastByMonth(Vec<MonthDayCount>),
    WeekdayHourly(Vec<WeekdayHourlyAvg>),
    WorkingDayHourly(Vec<WorkingDayHourlyAvg>),
    UserTypeHourly(Vec<UserTypeHourlyAvg>),
    WeeklyWeather(Vec<GroupedWeek>),
    GroupTotals(Vec<GroupTotal>),
}

impl PanelTable {
    pub fn len(&self) -> usize {
        match self {
            PanelTable::Daily(rows) => rows.len(),
            PanelTable::SeasonUsers(rows) => rows.len(),
            PanelTable::LeastBySeason(rows) => rows.len(),
            PanelTable::LeastByWeather(rows) => rows.len(),
            PanelTable::LeastByMonth(rows) => rows.len(),
            PanelTable::WeekdayHourly(rows) => rows.len(),
            PanelTable::WorkingDayHourly(rows) => rows.len(),
            PanelTable::UserTypeHourly(rows) => rows.len(),
            PanelTable::WeeklyWeather(rows) => rows.len(),
            PanelTable::GroupTotals(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the rows as CSV with a header line. An empty table writes nothing.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        macro_rules! write_rows {
            ($rows:expr) => {
                for row in $rows {
                    wtr.serialize(row)?;
                }
            };
        }

        match self {
            PanelTable::Daily(rows) => write_rows!(rows),
            PanelTable::SeasonUsers(rows) => write_rows!(rows),
            PanelTable::LeastBySeason(rows) => write_rows!(rows),
            PanelTable::LeastByWeather(rows) => write_rows!(rows),
            PanelTable::LeastByMonth(rows) => write_rows!(rows),
            PanelTable::WeekdayHourly(rows) => write_rows!(rows),
            PanelTable::WorkingDayHourly(rows) => write_rows!(rows),
            PanelTable::UserTypeHourly(rows) => write_rows!(rows),
            PanelTable::WeeklyWeather(rows) => write_rows!(rows),
            PanelTable::GroupTotals(rows) => write_rows!(rows),
        }

        wtr.flush()?;
        Ok(())
    }
}

/// One chart on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: &'static str,
    pub section: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub options: ChartOptions,
    pub table: PanelTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ChartOptions::new("hr", "cnt")
            .color("type")
            .bar_mode(BarMode::Group)
            .labels(&[("hr", "Hour (h)")])
            .hourly_ticks();

        assert_eq!(options.color, Some("type"));
        assert_eq!(options.labels.get("hr"), Some(&"Hour (h)"));
        assert_eq!(options.x_ticks.as_ref().map(Vec::len), Some(24));
    }

    #[test]
    fn test_options_json_skips_unset() {
        let json = serde_json::to_value(ChartOptions::new("a", "b")).unwrap();
        assert!(json.get("z").is_none());
        assert_eq!(json["orientation"], "vertical");
    }

    #[test]
    fn test_write_csv_has_header_and_rows() {
        let table = PanelTable::GroupTotals(vec![
            GroupTotal {
                group: "cold, windy".into(),
                count: 10,
            },
            GroupTotal {
                group: "hot, not windy".into(),
                count: 20,
            },
        ]);
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["group,count", "\"cold, windy\",10", "\"hot, not windy\",20"]);
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let table = PanelTable::Daily(Vec::new());
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        assert!(table.is_empty());
        assert!(buf.is_empty());
    }
}
