use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// How a call addresses a weather center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Free-text province name, optionally narrowed to one of its districts.
    ByName {
        province: String,
        district: Option<String>,
    },
    /// Upstream center id (`merkezId`); skips name resolution entirely.
    ById(u32),
}

impl Location {
    pub fn province(province: impl Into<String>) -> Self {
        Location::ByName {
            province: province.into(),
            district: None,
        }
    }

    pub fn district(province: impl Into<String>, district: impl Into<String>) -> Self {
        Location::ByName {
            province: province.into(),
            district: Some(district.into()),
        }
    }

    pub fn id(center_id: u32) -> Self {
        Location::ById(center_id)
    }

    /// Build a location from loosely typed input (command line, config).
    ///
    /// An all-digit `location` is a center id, anything else a province name.
    pub fn from_args(location: &str, district: Option<&str>) -> Result<Self, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::InvalidArgument(
                "location must be a province name or a numeric center id".to_string(),
            ));
        }

        let district = match district.map(str::trim) {
            Some("") => {
                return Err(WeatherError::InvalidArgument(
                    "district name must not be empty".to_string(),
                ));
            }
            other => other,
        };

        if location.chars().all(|c| c.is_ascii_digit()) {
            let id = location.parse::<u32>().map_err(|_| {
                WeatherError::InvalidArgument(format!("center id '{location}' is out of range"))
            })?;

            if let Some(district) = district {
                return Err(WeatherError::InvalidArgument(format!(
                    "district '{district}' cannot be combined with center id {id}"
                )));
            }

            return Ok(Location::ById(id));
        }

        Ok(Location::ByName {
            province: location.to_string(),
            district: district.map(str::to_string),
        })
    }
}

impl From<u32> for Location {
    fn from(center_id: u32) -> Self {
        Location::ById(center_id)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::ByName {
                province,
                district: Some(district),
            } => write!(f, "{province}/{district}"),
            Location::ByName { province, .. } => f.write_str(province),
            Location::ById(id) => write!(f, "center #{id}"),
        }
    }
}

/// A weather reporting center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterInfo {
    /// Zero-based province index: plate code minus one.
    pub province_id: u32,
    /// District (or center) name.
    pub name: String,
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters.
    pub altitude: f64,
    pub center_id: u32,
    /// Station used for hourly forecasts.
    pub hourly_id: Option<u32>,
    /// Station used for daily forecasts.
    pub daily_id: Option<u32>,
    /// Station used for latest observations.
    pub observation_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictEntry {
    pub name: String,
    pub center_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub lowest: f64,
    pub highest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// km/h
    pub speed: f64,
    /// Degrees, meteorological convention.
    pub direction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastDay {
    pub date: DateTime<Utc>,
    /// Upstream event code, e.g. "PB" (partly cloudy) or "Y" (rain).
    pub event: String,
    pub temperature: Range,
    pub humidity: Range,
    pub wind: Wind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyWind {
    pub speed: f64,
    pub max_speed: f64,
    pub direction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastPoint {
    pub date: DateTime<Utc>,
    pub event: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub wind: HourlyWind,
}

/// Precipitation totals (mm) over fixed lookback windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub now: f64,
    pub past_10_minutes: f64,
    pub past_hour: f64,
    pub past_6_hours: f64,
    pub past_12_hours: f64,
    pub past_24_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestEvent {
    pub temperature: f64,
    pub observed_at: DateTime<Utc>,
    pub event_code: String,
    pub humidity: f64,
    /// hPa; `None` when the station did not report it.
    pub pressure: Option<f64>,
    pub precipitation: Precipitation,
    pub wind: Wind,
}
