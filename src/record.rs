//! Typed schema for the hourly usage log.
//!
//! Categorical columns in the source CSV come either as numeric codes or as
//! pre-labeled strings. Each one is modelled as a small enum that parses from
//! both forms, orders by its code and serializes as its label.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $code:literal => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Orders by code, or by label text for a column read as labels.
            pub fn cmp_as(self, other: Self, encoding: Encoding) -> Ordering {
                match encoding {
                    Encoding::Code => self.cmp(&other),
                    Encoding::Label => self.label().cmp(other.label()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> anyhow::Result<Self> {
                let s = s.trim();
                if let Ok(code) = s.parse::<u8>() {
                    return Self::from_code(code).ok_or_else(|| {
                        anyhow::anyhow!(concat!("unknown ", stringify!($name), " code {}"), code)
                    });
                }
                $(
                    if s.eq_ignore_ascii_case($label) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                anyhow::bail!(concat!("unknown ", stringify!($name), " label '{}'"), s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Meteorological season, coded 1..=4 starting from winter.
    Season {
        Winter = 1 => "Winter",
        Spring = 2 => "Spring",
        Summer = 3 => "Summer",
        Fall = 4 => "Fall" | "Autumn",
    }
}

labelled_enum! {
    Month {
        Jan = 1 => "Jan" | "January",
        Feb = 2 => "Feb" | "February",
        Mar = 3 => "Mar" | "March",
        Apr = 4 => "Apr" | "April",
        May = 5 => "May",
        Jun = 6 => "Jun" | "June",
        Jul = 7 => "Jul" | "July",
        Aug = 8 => "Aug" | "August",
        Sep = 9 => "Sep" | "September" | "Sept",
        Oct = 10 => "Oct" | "October",
        Nov = 11 => "Nov" | "November",
        Dec = 12 => "Dec" | "December",
    }
}

labelled_enum! {
    /// Day of week, coded 0 (Sunday) through 6 (Saturday).
    Weekday {
        Sun = 0 => "Sun" | "Sunday",
        Mon = 1 => "Mon" | "Monday",
        Tue = 2 => "Tue" | "Tuesday",
        Wed = 3 => "Wed" | "Wednesday",
        Thu = 4 => "Thu" | "Thursday",
        Fri = 5 => "Fri" | "Friday",
        Sat = 6 => "Sat" | "Saturday",
    }
}

labelled_enum! {
    /// Ambient conditions during the hour.
    WeatherSituation {
        Clear = 1 => "Clear" | "Clear/Partly Cloudy" | "Partly Cloudy",
        Mist = 2 => "Mist" | "Misty" | "Mist/Cloudy" | "Cloudy",
        LightPrecipitation = 3 => "Light Rain/Snow" | "Light Snow/Rain" | "Light Rain" | "Light Snow",
        HeavyPrecipitation = 4 => "Heavy Rain/Snow" | "Heavy Rain" | "Heavy Snow",
    }
}

labelled_enum! {
    /// Discriminator used when a casual/registered pair is reshaped to long form.
    UserType {
        Casual = 0 => "casual",
        Registered = 1 => "registered",
    }
}

/// How a categorical column was written in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Encoding {
    #[default]
    Code,
    Label,
}

impl Encoding {
    /// A value that reads as a number is a code, anything else a label.
    pub fn detect(s: &str) -> Self {
        if s.trim().parse::<u8>().is_ok() {
            Encoding::Code
        } else {
            Encoding::Label
        }
    }
}

/// Source encoding of the categorical columns used as sort keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceEncoding {
    pub season: Encoding,
    pub month: Encoding,
    pub weather: Encoding,
}

impl SourceEncoding {
    /// Encoding of a whole dataset. A column counts as labelled when any
    /// record read it as a label.
    pub fn of(records: &[HourlyRecord]) -> Self {
        records
            .iter()
            .fold(SourceEncoding::default(), |acc, r| SourceEncoding {
                season: acc.season.max(r.encoding.season),
                month: acc.month.max(r.encoding.month),
                weather: acc.weather.max(r.encoding.weather),
            })
    }
}

/// One row of the hourly usage log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub year: i32,
    pub month: Month,
    pub hour: u8,
    pub weekday: Weekday,
    pub holiday: bool,
    pub working_day: bool,
    pub weather: WeatherSituation,
    pub temp: f64,
    pub atemp: f64,
    pub humidity: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub count: u32,
    pub week_number: u32,
    #[serde(skip)]
    pub encoding: SourceEncoding,
}

impl HourlyRecord {
    /// Whether the total count equals casual plus registered riders.
    pub fn counts_consistent(&self) -> bool {
        u64::from(self.casual) + u64::from(self.registered) == u64::from(self.count)
    }
}

/// Parses a yes/no style flag given as `0`/`1`, `true`/`false` or `yes`/`no`.
pub fn parse_flag(s: &str) -> anyhow::Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}

/// Resolves the `yr` column. Small values are offsets from 2011, the first
/// year of the dataset; anything else is taken as a calendar year.
pub fn parse_year(s: &str) -> anyhow::Result<i32> {
    let value: i32 = s.trim().parse()?;
    if (0..100).contains(&value) {
        Ok(2011 + value)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parses_code_and_label() {
        assert_eq!("1".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!("Autumn".parse::<Season>().unwrap(), Season::Fall);
        assert!("5".parse::<Season>().is_err());
        assert!("Monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_weekday_codes_start_on_sunday() {
        assert_eq!(Weekday::from_code(0), Some(Weekday::Sun));
        assert_eq!("Saturday".parse::<Weekday>().unwrap(), Weekday::Sat);
        assert!(Weekday::Sun < Weekday::Mon);
    }

    #[test]
    fn test_month_order_follows_calendar() {
        let mut months = vec![Month::Dec, Month::Jan, Month::Jul];
        months.sort();
        assert_eq!(months, vec![Month::Jan, Month::Jul, Month::Dec]);
        assert_eq!(Month::ALL.len(), 12);
    }

    #[test]
    fn test_weather_aliases() {
        assert_eq!(
            "Light Snow/Rain".parse::<WeatherSituation>().unwrap(),
            WeatherSituation::LightPrecipitation
        );
        assert_eq!("2".parse::<WeatherSituation>().unwrap(), WeatherSituation::Mist);
    }

    #[test]
    fn test_labels_serialize_as_strings() {
        let json = serde_json::to_string(&(Season::Summer, UserType::Casual)).unwrap();
        assert_eq!(json, r#"["Summer","casual"]"#);
    }

    #[test]
    fn test_cmp_as_follows_encoding() {
        assert_eq!(Season::Fall.cmp_as(Season::Winter, Encoding::Code), Ordering::Greater);
        assert_eq!(Season::Fall.cmp_as(Season::Winter, Encoding::Label), Ordering::Less);
        assert_eq!(Month::Aug.cmp_as(Month::Apr, Encoding::Label), Ordering::Greater);
        assert_eq!(Month::Aug.cmp_as(Month::Jan, Encoding::Label), Ordering::Less);
        assert_eq!(
            WeatherSituation::Mist.cmp_as(WeatherSituation::HeavyPrecipitation, Encoding::Label),
            Ordering::Greater
        );
    }

    #[test]
    fn test_encoding_detect() {
        assert_eq!(Encoding::detect(" 3 "), Encoding::Code);
        assert_eq!(Encoding::detect("Summer"), Encoding::Label);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag(" No ").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("0").unwrap(), 2011);
        assert_eq!(parse_year("1").unwrap(), 2012);
        assert_eq!(parse_year("2012").unwrap(), 2012);
        assert!(parse_year("twenty").is_err());
    }
}
