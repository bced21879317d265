//! Ordered categorical bins for weekly temperature and wind speed.
//!
//! Bins are closed on the right, `(lo, hi]`, except the lowest bin which
//! also includes its lower edge. Values outside every bin get no bin.

use serde::{Serialize, Serializer};
use std::fmt;

/// Bin edges for temperature in °C.
pub const TEMPERATURE_EDGES: [f64; 4] = [0.0, 12.0, 23.0, 32.0];

/// Bin edges for wind speed in km/h.
pub const WIND_EDGES: [f64; 3] = [0.0, 13.0, 20.0];

/// Label used in a group key for a value that fell outside every bin.
pub const UNBINNED: &str = "nan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemperatureBin {
    Cold,
    Warm,
    Hot,
}

impl TemperatureBin {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureBin::Cold => "cold",
            TemperatureBin::Warm => "warm",
            TemperatureBin::Hot => "hot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindBin {
    NotWindy,
    Windy,
}

impl WindBin {
    pub fn label(self) -> &'static str {
        match self {
            WindBin::NotWindy => "not windy",
            WindBin::Windy => "windy",
        }
    }
}

impl fmt::Display for TemperatureBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for WindBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TemperatureBin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl Serialize for WindBin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Buckets a temperature into its bin.
///
/// | Range        | Bin  |
/// |--------------|------|
/// | [0, 12]      | cold |
/// | (12, 23]     | warm |
/// | (23, 32]     | hot  |
/// | otherwise    | none |
pub fn temperature_bin(t: f64) -> Option<TemperatureBin> {
    let [lo, cold, warm, hot] = TEMPERATURE_EDGES;
    match t {
        t if t >= lo && t <= cold => Some(TemperatureBin::Cold),
        t if t > cold && t <= warm => Some(TemperatureBin::Warm),
        t if t > warm && t <= hot => Some(TemperatureBin::Hot),
        _ => None,
    }
}

/// Buckets a wind speed into its bin.
///
/// | Range        | Bin       |
/// |--------------|-----------|
/// | [0, 13]      | not windy |
/// | (13, 20]     | windy     |
/// | otherwise    | none      |
pub fn wind_bin(w: f64) -> Option<WindBin> {
    let [lo, calm, windy] = WIND_EDGES;
    match w {
        w if w >= lo && w <= calm => Some(WindBin::NotWindy),
        w if w > calm && w <= windy => Some(WindBin::Windy),
        _ => None,
    }
}

/// Composite `"<temperature>, <wind>"` key for a pair of bins. A missing
/// bin is written as [`UNBINNED`], e.g. `"nan, windy"`.
pub fn group_label(temp: Option<TemperatureBin>, wind: Option<WindBin>) -> String {
    format!(
        "{}, {}",
        temp.map_or(UNBINNED, TemperatureBin::label),
        wind.map_or(UNBINNED, WindBin::label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_bin_boundaries() {
        assert_eq!(temperature_bin(0.0), Some(TemperatureBin::Cold));
        assert_eq!(temperature_bin(12.0), Some(TemperatureBin::Cold));
        assert_eq!(temperature_bin(13.0), Some(TemperatureBin::Warm));
        assert_eq!(temperature_bin(23.0), Some(TemperatureBin::Warm));
        assert_eq!(temperature_bin(24.0), Some(TemperatureBin::Hot));
        assert_eq!(temperature_bin(32.0), Some(TemperatureBin::Hot));
    }

    #[test]
    fn test_temperature_bin_out_of_range() {
        assert_eq!(temperature_bin(-1.0), None);
        assert_eq!(temperature_bin(33.0), None);
        assert_eq!(temperature_bin(f64::NAN), None);
    }

    #[test]
    fn test_wind_bin_boundaries() {
        assert_eq!(wind_bin(0.0), Some(WindBin::NotWindy));
        assert_eq!(wind_bin(13.0), Some(WindBin::NotWindy));
        assert_eq!(wind_bin(14.0), Some(WindBin::Windy));
        assert_eq!(wind_bin(20.0), Some(WindBin::Windy));
        assert_eq!(wind_bin(21.0), None);
    }

    #[test]
    fn test_group_label() {
        assert_eq!(
            group_label(Some(TemperatureBin::Warm), Some(WindBin::NotWindy)),
            "warm, not windy"
        );
        assert_eq!(group_label(Some(TemperatureBin::Hot), None), "hot, nan");
    }
}
