//! Core library for the `mgm-weather` CLI.
//!
//! A typed client for the undocumented web API of the Turkish State
//! Meteorological Service (MGM). This crate defines:
//! - Name normalization for province / district lookups
//! - Translation of the Turkish upstream records into English-named types
//! - The client resolving locations and issuing the read calls
//! - Configuration handling for the HTTP transport
//!
//! It is used by `mgm-weather-cli`, but can also be reused by other binaries or services.
//!
//! ```no_run
//! # async fn run() -> Result<(), mgm_weather_core::WeatherError> {
//! use mgm_weather_core::{Location, MgmClient};
//!
//! let client = MgmClient::with_defaults()?;
//! let days = client.get_daily_forecast(&Location::district("Trabzon", "Ortahisar")).await?;
//! println!("{}: {}..{}", days[0].date, days[0].temperature.lowest, days[0].temperature.highest);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod normalize;
pub mod translate;

pub use client::MgmClient;
pub use config::{ClientConfig, Config};
pub use error::{ErrorKind, TransportError, WeatherError};
pub use http::{HttpFetch, ReqwestFetcher};
pub use model::{
    CenterInfo, DailyForecastDay, DistrictEntry, HourlyForecastPoint, HourlyWind, LatestEvent,
    Location, Precipitation, Range, Wind,
};
pub use normalize::normalize;
