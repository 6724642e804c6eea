use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mgm_weather_core::{Config, Location, MgmClient};
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "mgm-weather", version, about = "Turkish State Meteorological Service (MGM) weather CLI")]
pub struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// A province name or numeric center id, optionally narrowed to a district.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Province name (e.g. "Trabzon") or numeric center id.
    pub location: String,

    /// District within the province.
    #[arg(long, short)]
    pub district: Option<String>,
}

impl LocationArgs {
    fn to_location(&self) -> Result<Location> {
        Ok(Location::from_args(&self.location, self.district.as_deref())?)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the connection settings.
    Configure,

    /// List all provinces ordered by plate code.
    Provinces,

    /// List the districts of a province.
    Districts {
        /// Province name.
        province: String,
    },

    /// Show details of a weather center.
    Center(LocationArgs),

    /// Show the latest observation.
    Latest(LocationArgs),

    /// Show the five-day forecast.
    Daily(LocationArgs),

    /// Show the hourly forecast.
    Hourly(LocationArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let json = self.json;

        match self.command {
            Command::Configure => configure(config),
            Command::Provinces => {
                let provinces = connect(&config)?.list_provinces().await?;
                output::print(json, provinces.as_slice(), output::provinces)
            }
            Command::Districts { province } => {
                let districts = connect(&config)?.get_districts(&province).await?;
                output::print(json, districts.as_slice(), output::districts)
            }
            Command::Center(args) => {
                let center = connect(&config)?.get_center_info(&args.to_location()?).await?;
                output::print(json, &center, output::center)
            }
            Command::Latest(args) => {
                let latest = connect(&config)?.get_latest_events(&args.to_location()?).await?;
                output::print(json, &latest, output::latest)
            }
            Command::Daily(args) => {
                let days = connect(&config)?.get_daily_forecast(&args.to_location()?).await?;
                output::print(json, days.as_slice(), output::daily)
            }
            Command::Hourly(args) => {
                let points = connect(&config)?.get_hourly_forecast(&args.to_location()?).await?;
                output::print(json, points.as_slice(), output::hourly)
            }
        }
    }
}

fn connect(config: &Config) -> Result<MgmClient> {
    MgmClient::new(&config.client).context("Failed to set up HTTP client")
}

fn configure(mut config: Config) -> Result<()> {
    let base_url = inquire::Text::new("Base URL:")
        .with_default(&config.client.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    let timeout_secs = inquire::CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.client.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    if base_url != config.client.base_url {
        debug!(%base_url, "switching base URL, dropping Host override");
        config.client.host.clear();
    }
    config.client.base_url = base_url;
    config.client.timeout_secs = timeout_secs;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_location_with_district() {
        let cli = Cli::try_parse_from(["mgm-weather", "daily", "Trabzon", "--district", "Ortahisar"])
            .expect("valid arguments");

        let Command::Daily(args) = cli.command else {
            panic!("expected daily command");
        };
        assert_eq!(
            args.to_location().unwrap(),
            Location::district("Trabzon", "Ortahisar")
        );
    }

    #[test]
    fn numeric_location_is_center_id() {
        let cli = Cli::try_parse_from(["mgm-weather", "--json", "latest", "96101"])
            .expect("valid arguments");

        assert!(cli.json);
        let Command::Latest(args) = cli.command else {
            panic!("expected latest command");
        };
        assert_eq!(args.to_location().unwrap(), Location::id(96101));
    }

    #[test]
    fn center_id_with_district_is_rejected() {
        let cli = Cli::try_parse_from(["mgm-weather", "center", "96101", "-d", "Ortahisar"])
            .expect("valid arguments");

        let Command::Center(args) = cli.command else {
            panic!("expected center command");
        };
        let err = args.to_location().unwrap_err();
        assert!(err.to_string().contains("cannot be combined"));
    }
}
