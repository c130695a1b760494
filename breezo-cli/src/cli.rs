use anyhow::{Result, anyhow};
use breezo_core::{Breezometer, Config, DEFAULT_FORECAST_HOURS, DEFAULT_POLLEN_DAYS};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "breezo", version, about = "BreezoMeter air quality & pollen CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Location flags shared by every data command.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude; overrides the configured default location.
    #[arg(long)]
    pub lat: Option<String>,

    /// Longitude; overrides the configured default location.
    #[arg(long)]
    pub lon: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the BreezoMeter API key and an optional default location.
    Configure,

    /// Check connectivity to the API and print the HTTP status code.
    Ping {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show current air-quality conditions.
    Current {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the hourly air-quality forecast.
    Forecast {
        /// Hours to look ahead (max 96).
        #[arg(long, default_value_t = DEFAULT_FORECAST_HOURS)]
        hours: u32,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the daily pollen forecast.
    Pollen {
        /// Days to look ahead (1 to 3).
        #[arg(long, default_value_t = DEFAULT_POLLEN_DAYS)]
        days: u32,

        #[command(flatten)]
        location: LocationArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Ping { location } => {
                let status = client_from_config(&location)?.test_connection().await?;
                println!("{status}");
                Ok(())
            }
            Command::Current { location } => {
                let current = client_from_config(&location)?.current_air_quality().await?;
                print_json(&current)
            }
            Command::Forecast { hours, location } => {
                let forecast =
                    client_from_config(&location)?.air_quality_forecast(hours).await?;
                print_json(&forecast)
            }
            Command::Pollen { days, location } => {
                let forecast = client_from_config(&location)?.pollen_forecast(days).await?;
                print_json(&forecast)
            }
        }
    }
}

/// Interactive configuration: API key, then an optional default location.
fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let api_key = inquire::Password::new("BreezoMeter API key:")
        .without_confirmation()
        .prompt()?;
    cfg.set_api_key(api_key);

    let store_location = inquire::Confirm::new("Store a default location?")
        .with_default(true)
        .prompt()?;
    if store_location {
        let lat = inquire::Text::new("Latitude:").prompt()?;
        let lon = inquire::Text::new("Longitude:").prompt()?;
        cfg.set_location(lat, lon);
    }

    cfg.save()?;
    println!("Configuration written to {}", Config::config_file_path()?.display());
    Ok(())
}

fn client_from_config(location: &LocationArgs) -> Result<Breezometer> {
    let cfg = Config::load()?;
    let api_key = cfg.api_key()?.to_owned();
    let (lat, lon) = resolve_location(location, &cfg)?;

    Ok(Breezometer::new(lat, lon, api_key))
}

fn resolve_location(args: &LocationArgs, cfg: &Config) -> Result<(String, String)> {
    match (&args.lat, &args.lon) {
        (Some(lat), Some(lon)) => Ok((lat.clone(), lon.clone())),
        (None, None) => cfg
            .location()
            .map(|loc| (loc.latitude.clone(), loc.longitude.clone()))
            .ok_or_else(|| {
                anyhow!(
                    "No location given.\n\
                     Hint: pass --lat/--lon, or run `breezo configure` to store a default."
                )
            }),
        _ => Err(anyhow!("--lat and --lon must be given together")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
