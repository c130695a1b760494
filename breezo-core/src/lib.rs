//! Core library for the `breezo` CLI.
//!
//! This crate defines:
//! - The [`Breezometer`] client for the BreezoMeter air quality & pollen API
//! - Error types for transport, remote-status and decode failures
//! - Configuration & credentials handling
//!
//! It is used by `breezo-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{Breezometer, DEFAULT_FORECAST_HOURS, DEFAULT_POLLEN_DAYS};
pub use config::{Config, LocationConfig};
pub use error::{Error, Result};
pub use model::{CurrentConditions, HourlyForecastEntry, PollenForecastEntry};
