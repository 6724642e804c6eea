//! Human-readable and JSON rendering of client results.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use mgm_weather_core::{
    CenterInfo, DailyForecastDay, DistrictEntry, HourlyForecastPoint, LatestEvent,
};
use serde::Serialize;

/// Print `value` as pretty JSON or through its text renderer.
pub fn print<T: Serialize + ?Sized>(json: bool, value: &T, text: fn(&T) -> String) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
        println!("{rendered}");
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

pub fn provinces(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>2}  {name}\n", i + 1))
        .collect()
}

pub fn districts(districts: &[DistrictEntry]) -> String {
    districts
        .iter()
        .map(|d| format!("{:<8} {}\n", d.center_id, d.name))
        .collect()
}

pub fn center(center: &CenterInfo) -> String {
    let name = if center.name.is_empty() { &center.province } else { &center.name };
    format!(
        "{name}, {province} (center {id})\n\
         plate code: {plate}\n\
         location:   {lat:.4}, {lon:.4} at {alt} m\n",
        province = center.province,
        id = center.center_id,
        plate = center.province_id + 1,
        lat = center.latitude,
        lon = center.longitude,
        alt = center.altitude,
    )
}

pub fn latest(latest: &LatestEvent) -> String {
    let pressure = latest
        .pressure
        .map_or_else(|| "n/a".to_string(), |p| format!("{p:.1} hPa"));
    let rain = &latest.precipitation;

    format!(
        "observed:      {observed}\n\
         condition:     {condition}\n\
         temperature:   {temp:.1} °C\n\
         humidity:      {humidity:.0} %\n\
         pressure:      {pressure}\n\
         wind:          {speed:.1} km/h from {direction:.0}°\n\
         precipitation: now {now} mm, 10 min {m10} mm, 1 h {h1} mm, 6 h {h6} mm, 12 h {h12} mm, 24 h {h24} mm\n",
        observed = timestamp(&latest.observed_at),
        condition = describe(&latest.event_code),
        temp = latest.temperature,
        humidity = latest.humidity,
        speed = latest.wind.speed,
        direction = latest.wind.direction,
        now = rain.now,
        m10 = rain.past_10_minutes,
        h1 = rain.past_hour,
        h6 = rain.past_6_hours,
        h12 = rain.past_12_hours,
        h24 = rain.past_24_hours,
    )
}

pub fn daily(days: &[DailyForecastDay]) -> String {
    days.iter()
        .map(|day| {
            format!(
                "{date}  {low:>5.1} .. {high:>5.1} °C  {hlow:>3.0}-{hhigh:<3.0}%  {speed:>4.1} km/h  {condition}\n",
                date = local_date(&day.date),
                low = day.temperature.lowest,
                high = day.temperature.highest,
                hlow = day.humidity.lowest,
                hhigh = day.humidity.highest,
                speed = day.wind.speed,
                condition = describe(&day.event),
            )
        })
        .collect()
}

pub fn hourly(points: &[HourlyForecastPoint]) -> String {
    points
        .iter()
        .map(|p| {
            format!(
                "{time}  {temp:>5.1} °C (feels {feels:>5.1})  {humidity:>3.0}%  {speed:>4.1}/{gust:<4.1} km/h  {condition}\n",
                time = timestamp(&p.date),
                temp = p.temperature,
                feels = p.apparent_temperature,
                humidity = p.humidity,
                speed = p.wind.speed,
                gust = p.wind.max_speed,
                condition = describe(&p.event),
            )
        })
        .collect()
}

fn timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

// Turkey has been on UTC+3 all year since 2016.
const TURKEY_UTC_OFFSET_SECS: i32 = 3 * 3600;

fn turkey_time(time: &DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(TURKEY_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    time.with_timezone(&offset)
}

fn local_date(time: &DateTime<Utc>) -> String {
    turkey_time(time).format("%Y-%m-%d").to_string()
}

/// English description of an MGM event code, falling back to the code.
fn describe(code: &str) -> String {
    let text = match code {
        "A" => "Clear",
        "AB" => "Mostly clear",
        "PB" => "Partly cloudy",
        "CB" => "Cloudy",
        "HY" => "Light rain",
        "Y" => "Rain",
        "KY" => "Heavy rain",
        "KKY" => "Sleet",
        "HKY" => "Light snow",
        "K" => "Snow",
        "YKY" => "Heavy snow",
        "HSY" => "Light showers",
        "SY" => "Showers",
        "KSY" => "Heavy showers",
        "MSY" => "Local showers",
        "DY" => "Hail",
        "GSY" => "Thunderstorms",
        "KGSY" => "Severe thunderstorms",
        "SIS" => "Fog",
        "PUS" => "Haze",
        "DNM" => "Smoke",
        "KF" => "Dust storm",
        "R" => "Windy",
        "GKR" => "Strong southerly wind",
        "KKR" => "Strong northerly wind",
        "SCK" => "Hot",
        "SGK" => "Cold",
        _ => return code.to_string(),
    };
    format!("{text} ({code})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgm_weather_core::{Precipitation, Range, Wind};

    #[test]
    fn provinces_are_numbered_from_one() {
        let text = provinces(&["Adana".to_string(), "Adıyaman".to_string()]);
        assert_eq!(text, " 1  Adana\n 2  Adıyaman\n");
    }

    #[test]
    fn unknown_event_code_falls_back_to_code() {
        assert_eq!(describe("PB"), "Partly cloudy (PB)");
        assert_eq!(describe("XYZ"), "XYZ");
    }

    #[test]
    fn daily_date_uses_turkish_calendar_day() {
        let date = DateTime::parse_from_rfc3339("2024-03-01T21:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let day = DailyForecastDay {
            date,
            event: "A".to_string(),
            temperature: Range { lowest: 1.0, highest: 9.0 },
            humidity: Range { lowest: 40.0, highest: 80.0 },
            wind: Wind { speed: 5.0, direction: 90.0 },
        };

        let text = daily(&[day]);
        assert!(text.starts_with("2024-03-02"));
        assert!(text.contains("Clear (A)"));
    }

    #[test]
    fn turkey_time_carries_fixed_offset() {
        let time = DateTime::parse_from_rfc3339("2024-07-15T22:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let local = turkey_time(&time);
        assert_eq!(local.to_rfc3339(), "2024-07-16T01:30:00+03:00");
        assert_eq!(local, time);
    }

    #[test]
    fn missing_pressure_is_shown_as_not_available() {
        let event = LatestEvent {
            temperature: 3.0,
            observed_at: Utc::now(),
            event_code: "K".to_string(),
            humidity: 90.0,
            pressure: None,
            precipitation: Precipitation {
                now: 0.0,
                past_10_minutes: 0.0,
                past_hour: 0.0,
                past_6_hours: 0.0,
                past_12_hours: 0.0,
                past_24_hours: 0.0,
            },
            wind: Wind { speed: 1.0, direction: 0.0 },
        };

        assert!(latest(&event).contains("pressure:      n/a"));
    }
}
