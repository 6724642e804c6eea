//! Upstream record shapes and their translation into the public model.
//!
//! The `Raw*` types mirror the JSON the MGM service sends (Turkish field
//! names, flat day-indexed daily forecasts, `-9999` for unreported values).
//! Decoding happens at the serde boundary; the mapping functions below are
//! pure and cannot fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::model::{
    CenterInfo, DailyForecastDay, DistrictEntry, HourlyForecastPoint, HourlyWind, LatestEvent,
    Precipitation, Range, Wind,
};

/// Value the service reports for measurements a station did not take.
pub const MISSING_VALUE: f64 = -9999.0;

/// A row of `merkezler` / `merkezler?il=`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCenter {
    pub il: String,
    pub ilce: Option<String>,
    pub merkez_id: u32,
    pub il_plaka: u32,
    pub enlem: f64,
    pub boylam: f64,
    pub yukseklik: f64,
    pub saatlik_tahmin_ist_no: Option<u32>,
    pub gunluk_tahmin_ist_no: Option<u32>,
    pub sondurum_ist_no: Option<u32>,
}

/// A row of `merkezler/iller`; only the fields the listing needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProvince {
    pub il: String,
    pub il_plaka: u32,
}

/// A row of `merkezler/ililcesi`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDistrict {
    pub ilce: String,
    pub merkez_id: u32,
}

/// A row of `sondurumlar`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLatestEvents {
    pub sicaklik: f64,
    pub veri_zamani: DateTime<Utc>,
    pub hadise_kodu: String,
    pub nem: f64,
    pub aktuel_basinc: f64,
    #[serde(rename = "yagis00Now")]
    pub yagis_now: f64,
    #[serde(rename = "yagis10Dk")]
    pub yagis_10_dk: f64,
    #[serde(rename = "yagis1Saat")]
    pub yagis_1_saat: f64,
    #[serde(rename = "yagis6Saat")]
    pub yagis_6_saat: f64,
    #[serde(rename = "yagis12Saat")]
    pub yagis_12_saat: f64,
    #[serde(rename = "yagis24Saat")]
    pub yagis_24_saat: f64,
    pub ruzgar_hiz: f64,
    pub ruzgar_yon: f64,
}

/// A row of `tahminler/saatlik`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHourlyForecast {
    pub tahmin: Vec<RawHourlyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHourlyEntry {
    pub tarih: DateTime<Utc>,
    pub hadise: String,
    pub sicaklik: f64,
    pub hissedilen_sicaklik: f64,
    pub nem: f64,
    pub ruzgar_yonu: f64,
    pub ruzgar_hizi: f64,
    pub maksimum_ruzgar_hizi: f64,
}

/// A row of `tahminler/gunluk`, regrouped into one entry per day.
///
/// Upstream sends the five days as parallel `...Gun1` .. `...Gun5` fields;
/// they are picked apart with [`DAY_FIELDS`] while decoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RawDailyForecast {
    pub days: [RawDay; 5],
}

#[derive(Debug, Clone)]
pub struct RawDay {
    pub date: DateTime<Utc>,
    pub event: String,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub humidity_low: f64,
    pub humidity_high: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
}

/// Upstream field names making up one forecast day.
#[derive(Debug, Clone, Copy)]
pub struct DayFields {
    pub date: &'static str,
    pub event: &'static str,
    pub temperature_low: &'static str,
    pub temperature_high: &'static str,
    pub humidity_low: &'static str,
    pub humidity_high: &'static str,
    pub wind_speed: &'static str,
    pub wind_direction: &'static str,
}

/// Field groups for day 1 through day 5, in order.
pub const DAY_FIELDS: [DayFields; 5] = [
    DayFields {
        date: "tarihGun1",
        event: "hadiseGun1",
        temperature_low: "enDusukGun1",
        temperature_high: "enYuksekGun1",
        humidity_low: "enDusukNemGun1",
        humidity_high: "enYuksekNemGun1",
        wind_speed: "ruzgarHizGun1",
        wind_direction: "ruzgarYonGun1",
    },
    DayFields {
        date: "tarihGun2",
        event: "hadiseGun2",
        temperature_low: "enDusukGun2",
        temperature_high: "enYuksekGun2",
        humidity_low: "enDusukNemGun2",
        humidity_high: "enYuksekNemGun2",
        wind_speed: "ruzgarHizGun2",
        wind_direction: "ruzgarYonGun2",
    },
    DayFields {
        date: "tarihGun3",
        event: "hadiseGun3",
        temperature_low: "enDusukGun3",
        temperature_high: "enYuksekGun3",
        humidity_low: "enDusukNemGun3",
        humidity_high: "enYuksekNemGun3",
        wind_speed: "ruzgarHizGun3",
        wind_direction: "ruzgarYonGun3",
    },
    DayFields {
        date: "tarihGun4",
        event: "hadiseGun4",
        temperature_low: "enDusukGun4",
        temperature_high: "enYuksekGun4",
        humidity_low: "enDusukNemGun4",
        humidity_high: "enYuksekNemGun4",
        wind_speed: "ruzgarHizGun4",
        wind_direction: "ruzgarYonGun4",
    },
    DayFields {
        date: "tarihGun5",
        event: "hadiseGun5",
        temperature_low: "enDusukGun5",
        temperature_high: "enYuksekGun5",
        humidity_low: "enDusukNemGun5",
        humidity_high: "enYuksekNemGun5",
        wind_speed: "ruzgarHizGun5",
        wind_direction: "ruzgarYonGun5",
    },
];

impl TryFrom<Map<String, Value>> for RawDailyForecast {
    type Error = String;

    fn try_from(mut record: Map<String, Value>) -> Result<Self, Self::Error> {
        let [d1, d2, d3, d4, d5] = DAY_FIELDS.map(|fields| RawDay::take(&mut record, &fields));

        Ok(Self {
            days: [d1?, d2?, d3?, d4?, d5?],
        })
    }
}

impl RawDay {
    fn take(record: &mut Map<String, Value>, fields: &DayFields) -> Result<Self, String> {
        Ok(Self {
            date: take_field(record, fields.date)?,
            event: take_field(record, fields.event)?,
            temperature_low: take_field(record, fields.temperature_low)?,
            temperature_high: take_field(record, fields.temperature_high)?,
            humidity_low: take_field(record, fields.humidity_low)?,
            humidity_high: take_field(record, fields.humidity_high)?,
            wind_speed: take_field(record, fields.wind_speed)?,
            wind_direction: take_field(record, fields.wind_direction)?,
        })
    }
}

fn take_field<T: DeserializeOwned>(record: &mut Map<String, Value>, key: &str) -> Result<T, String> {
    let value = record
        .remove(key)
        .ok_or_else(|| format!("missing field `{key}`"))?;

    serde_json::from_value(value).map_err(|e| format!("invalid field `{key}`: {e}"))
}

pub fn center_info(raw: &RawCenter) -> CenterInfo {
    CenterInfo {
        province_id: raw.il_plaka.saturating_sub(1),
        name: raw.ilce.clone().unwrap_or_default(),
        province: raw.il.clone(),
        latitude: raw.enlem,
        longitude: raw.boylam,
        altitude: raw.yukseklik,
        center_id: raw.merkez_id,
        hourly_id: raw.saatlik_tahmin_ist_no,
        daily_id: raw.gunluk_tahmin_ist_no,
        observation_id: raw.sondurum_ist_no,
    }
}

pub fn district(raw: &RawDistrict) -> DistrictEntry {
    DistrictEntry {
        name: raw.ilce.clone(),
        center_id: raw.merkez_id,
    }
}

pub fn daily_forecast(raw: &RawDailyForecast) -> [DailyForecastDay; 5] {
    raw.days.each_ref().map(|day| DailyForecastDay {
        date: day.date,
        event: day.event.clone(),
        temperature: Range {
            lowest: day.temperature_low,
            highest: day.temperature_high,
        },
        humidity: Range {
            lowest: day.humidity_low,
            highest: day.humidity_high,
        },
        wind: Wind {
            speed: day.wind_speed,
            direction: day.wind_direction,
        },
    })
}

pub fn hourly_forecast(raw: &RawHourlyForecast) -> Vec<HourlyForecastPoint> {
    raw.tahmin
        .iter()
        .map(|entry| HourlyForecastPoint {
            date: entry.tarih,
            event: entry.hadise.clone(),
            temperature: entry.sicaklik,
            apparent_temperature: entry.hissedilen_sicaklik,
            humidity: entry.nem,
            wind: HourlyWind {
                speed: entry.ruzgar_hizi,
                max_speed: entry.maksimum_ruzgar_hizi,
                direction: entry.ruzgar_yonu,
            },
        })
        .collect()
}

pub fn latest_events(raw: &RawLatestEvents) -> LatestEvent {
    LatestEvent {
        temperature: raw.sicaklik,
        observed_at: raw.veri_zamani,
        event_code: raw.hadise_kodu.clone(),
        humidity: raw.nem,
        pressure: (raw.aktuel_basinc != MISSING_VALUE).then_some(raw.aktuel_basinc),
        precipitation: Precipitation {
            now: raw.yagis_now,
            past_10_minutes: raw.yagis_10_dk,
            past_hour: raw.yagis_1_saat,
            past_6_hours: raw.yagis_6_saat,
            past_12_hours: raw.yagis_12_saat,
            past_24_hours: raw.yagis_24_saat,
        },
        wind: Wind {
            speed: raw.ruzgar_hiz,
            direction: raw.ruzgar_yon,
        },
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    pub fn center(il: &str, ilce: &str, merkez_id: u32, il_plaka: u32) -> Value {
        json!({
            "il": il,
            "ilce": ilce,
            "merkezId": merkez_id,
            "ilPlaka": il_plaka,
            "enlem": 41.0027,
            "boylam": 39.7168,
            "yukseklik": 30,
            "saatlikTahminIstNo": 17037,
            "gunlukTahminIstNo": 90601,
            "sondurumIstNo": 17037,
            "oncelik": 1,
            "alternatifHadiseIstNo": null,
            "aciklama": "",
            "modelId": 1,
            "gps": 0
        })
    }

    pub fn latest_events(pressure: f64) -> Value {
        json!({
            "istNo": 17037,
            "sicaklik": 14.2,
            "veriZamani": "2024-03-02T09:10:00.000Z",
            "hadiseKodu": "PB",
            "nem": 71,
            "aktuelBasinc": pressure,
            "denizeIndirgenmisBasinc": 1016.4,
            "yagis00Now": 0,
            "yagis10Dk": 0.2,
            "yagis1Saat": 1.1,
            "yagis6Saat": 3.4,
            "yagis12Saat": 5.0,
            "yagis24Saat": 9.8,
            "ruzgarHiz": 12.6,
            "ruzgarYon": 225,
            "rasatMetar": "-9999"
        })
    }

    pub fn daily_forecast() -> Value {
        let mut record = serde_json::Map::new();
        record.insert("istNo".into(), json!(90601));
        for day in 1..=5u8 {
            let n = f64::from(day);
            record.insert(format!("tarihGun{day}"), json!(format!("2024-03-0{}T00:00:00.000Z", day + 1)));
            record.insert(format!("hadiseGun{day}"), json!(format!("E{day}")));
            record.insert(format!("enDusukGun{day}"), json!(n));
            record.insert(format!("enYuksekGun{day}"), json!(n + 10.0));
            record.insert(format!("enDusukNemGun{day}"), json!(40.0 + n));
            record.insert(format!("enYuksekNemGun{day}"), json!(80.0 + n));
            record.insert(format!("ruzgarHizGun{day}"), json!(5.0 * n));
            record.insert(format!("ruzgarYonGun{day}"), json!(45.0 * n));
        }
        Value::Object(record)
    }

    pub fn hourly_forecast(hours: &[(&str, f64)]) -> Value {
        let tahmin: Vec<Value> = hours
            .iter()
            .map(|(tarih, sicaklik)| {
                json!({
                    "tarih": tarih,
                    "hadise": "A",
                    "sicaklik": sicaklik,
                    "hissedilenSicaklik": sicaklik - 2.0,
                    "nem": 60,
                    "ruzgarYonu": 180,
                    "ruzgarHizi": 8,
                    "maksimumRuzgarHizi": 17
                })
            })
            .collect();

        json!({
            "baslangicZamani": "2024-03-02T09:00:00.000Z",
            "istNo": 17037,
            "merkez": "TRABZON",
            "tahmin": tahmin
        })
    }
}
