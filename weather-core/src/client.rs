//! Name resolution and the read operations of the MGM web API.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::{
    config::ClientConfig,
    error::{TransportError, WeatherError},
    http::{HttpFetch, ReqwestFetcher},
    model::{CenterInfo, DailyForecastDay, DistrictEntry, HourlyForecastPoint, LatestEvent, Location},
    normalize::{compare_names, normalize},
    translate::{
        self, RawCenter, RawDailyForecast, RawDistrict, RawHourlyForecast, RawLatestEvents,
        RawProvince,
    },
};

/// Client for the MGM web API.
///
/// Holds nothing but its transport; every call issues fresh requests. Name
/// based lookups cost one extra request to resolve the center id first.
#[derive(Debug, Clone)]
pub struct MgmClient<F = ReqwestFetcher> {
    http: F,
}

impl MgmClient<ReqwestFetcher> {
    pub fn new(config: &ClientConfig) -> Result<Self, WeatherError> {
        Ok(Self::with_fetcher(ReqwestFetcher::new(config)?))
    }

    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(&ClientConfig::default())
    }
}

impl<F: HttpFetch> MgmClient<F> {
    pub fn with_fetcher(http: F) -> Self {
        Self { http }
    }

    /// All province names, ordered by plate code.
    #[instrument(skip(self))]
    pub async fn list_provinces(&self) -> Result<Vec<String>, WeatherError> {
        let mut provinces: Vec<RawProvince> = self.fetch_all("merkezler/iller").await?;
        provinces.sort_by_key(|p| p.il_plaka);

        Ok(provinces.into_iter().map(|p| p.il).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_center_info(&self, location: &Location) -> Result<CenterInfo, WeatherError> {
        let path = match location {
            Location::ById(id) => format!("merkezler?merkezid={id}"),
            Location::ByName { province, district } => {
                let mut path = format!("merkezler?il={}", encode(&normalize(province)?));
                if let Some(district) = district {
                    path.push_str(&format!("&ilce={}", encode(&normalize(district)?)));
                }
                path
            }
        };

        let raw: RawCenter = self
            .fetch_first(&path, || format!("no center matches {location}"))
            .await?;

        Ok(translate::center_info(&raw))
    }

    /// Districts of a province, in Turkish alphabetical order by name.
    #[instrument(skip(self))]
    pub async fn get_districts(&self, province: &str) -> Result<Vec<DistrictEntry>, WeatherError> {
        let path = format!("merkezler/ililcesi?il={}", encode(&normalize(province)?));

        let raw: Vec<RawDistrict> = self.fetch_all(&path).await?;
        if raw.is_empty() {
            return Err(WeatherError::NotFound(format!(
                "no districts for province '{province}'"
            )));
        }

        let mut districts: Vec<DistrictEntry> = raw.iter().map(translate::district).collect();
        districts.sort_by(|a, b| {
            compare_names(&a.name, &b.name).then(a.center_id.cmp(&b.center_id))
        });

        Ok(districts)
    }

    #[instrument(skip(self))]
    pub async fn get_latest_events(&self, location: &Location) -> Result<LatestEvent, WeatherError> {
        let id = self.resolve_center_id(location).await?;

        let raw: RawLatestEvents = self
            .fetch_first(&format!("sondurumlar?merkezid={id}"), || {
                format!("no observations for {location}")
            })
            .await?;

        Ok(translate::latest_events(&raw))
    }

    /// Forecast for the next five days, day 1 first.
    #[instrument(skip(self))]
    pub async fn get_daily_forecast(
        &self,
        location: &Location,
    ) -> Result<[DailyForecastDay; 5], WeatherError> {
        let id = self.resolve_center_id(location).await?;

        let raw: RawDailyForecast = self
            .fetch_first(&format!("tahminler/gunluk?merkezid={id}"), || {
                format!("no daily forecast for {location}")
            })
            .await?;

        Ok(translate::daily_forecast(&raw))
    }

    /// Hourly forecast points in upstream order.
    #[instrument(skip(self))]
    pub async fn get_hourly_forecast(
        &self,
        location: &Location,
    ) -> Result<Vec<HourlyForecastPoint>, WeatherError> {
        let id = self.resolve_center_id(location).await?;

        let raw: RawHourlyForecast = self
            .fetch_first(&format!("tahminler/saatlik?merkezid={id}"), || {
                format!("no hourly forecast for {location}")
            })
            .await?;

        Ok(translate::hourly_forecast(&raw))
    }

    async fn resolve_center_id(&self, location: &Location) -> Result<u32, WeatherError> {
        match location {
            Location::ById(id) => Ok(*id),
            Location::ByName { .. } => {
                let center = self.get_center_info(location).await?;
                debug!(center_id = center.center_id, "resolved {location}");
                Ok(center.center_id)
            }
        }
    }

    /// Records of an array response. `null` counts as no records.
    async fn fetch_records(&self, path: &str) -> Result<Vec<Value>, WeatherError> {
        match self.http.get_json(path).await? {
            Value::Null => Ok(Vec::new()),
            Value::Array(records) => Ok(records),
            _ => Err(TransportError::Decode {
                path: path.to_string(),
                message: "expected a JSON array of records".to_string(),
            }
            .into()),
        }
    }

    async fn fetch_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, WeatherError> {
        self.fetch_records(path)
            .await?
            .into_iter()
            .map(|record| decode(path, record))
            .collect()
    }

    async fn fetch_first<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: impl FnOnce() -> String,
    ) -> Result<T, WeatherError> {
        let record = self
            .fetch_records(path)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(not_found()))?;

        decode(path, record)
    }
}

fn decode<T: DeserializeOwned>(path: &str, record: Value) -> Result<T, WeatherError> {
    serde_json::from_value(record).map_err(|e| {
        TransportError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
