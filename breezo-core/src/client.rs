use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::model::{CurrentConditions, Envelope, HourlyForecastEntry, PollenForecastEntry};

const BASE_URL: &str = "https://api.breezometer.com";

const CURRENT_CONDITIONS_PATH: &str = "/air-quality/v2/current-conditions";
const HOURLY_FORECAST_PATH: &str = "/air-quality/v2/forecast/hourly";
const POLLEN_FORECAST_PATH: &str = "/pollen/v2/forecast/daily";

/// Feature set requested for every air-quality call.
const AQI_FEATURES: &str = "breezometer_aqi,local_aqi,health_recommendations,\
                            pollutants_concentrations,pollutants_aqi_information";

/// Feature set requested for every pollen call.
const POLLEN_FEATURES: &str = "types_information,plants_information";

/// The hourly forecast endpoint serves at most 96 hours (4 days).
pub const DEFAULT_FORECAST_HOURS: u32 = 96;

/// The pollen endpoint serves 1 to 3 days (today and up to two more).
pub const DEFAULT_POLLEN_DAYS: u32 = 3;

/// Client for the BreezoMeter air quality & pollen API, tied to one location.
///
/// Latitude, longitude and the API key are stored verbatim; no validation and
/// no network activity happens at construction. Each fetching method issues
/// exactly one GET and either returns the decoded `data` payload or fails
/// with a distinct [`Error`] variant. The most recent successful result of
/// each call kind is additionally kept on the client for later inspection.
#[derive(Debug, Clone)]
pub struct Breezometer {
    latitude: String,
    longitude: String,
    api_key: String,
    base_url: String,
    http: Client,
    current_aqi: Option<CurrentConditions>,
    aqi_forecast: Option<Vec<HourlyForecastEntry>>,
    pollen_forecast: Option<Vec<PollenForecastEntry>>,
}

impl Breezometer {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_base_url(latitude, longitude, api_key, BASE_URL)
    }

    /// Like [`Breezometer::new`], but pointed at a custom host.
    ///
    /// Primarily intended for tests against a mock server.
    pub fn with_base_url(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: Client::new(),
            current_aqi: None,
            aqi_forecast: None,
            pollen_forecast: None,
        }
    }

    /// Like [`Breezometer::new`], with an explicit per-request timeout
    /// instead of the transport default.
    pub fn with_timeout(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, ..Self::new(latitude, longitude, api_key) })
    }

    /// Probes connectivity to the API and returns the raw HTTP status code.
    ///
    /// Any status is a normal return value here, error statuses included;
    /// only a transport-level failure (DNS, timeout, connection refused)
    /// makes this call fail.
    pub async fn test_connection(&self) -> Result<u16> {
        let url = format!("{}{}", self.base_url, CURRENT_CONDITIONS_PATH);
        debug!(%url, "probing BreezoMeter connectivity");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", self.latitude.as_str()),
                ("lon", self.longitude.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        Ok(res.status().as_u16())
    }

    /// Fetches current air-quality conditions for the client's location.
    ///
    /// Includes the BreezoMeter and local AQIs, health recommendations and
    /// pollutant data. On success the result is also stored on the client;
    /// see [`Breezometer::cached_current_air_quality`].
    pub async fn current_air_quality(&mut self) -> Result<CurrentConditions> {
        let params = [("features", AQI_FEATURES.to_string())];
        let data: CurrentConditions =
            self.fetch_data(CURRENT_CONDITIONS_PATH, &params).await?;

        self.current_aqi = Some(data.clone());
        Ok(data)
    }

    /// Fetches hourly air-quality forecasts, one entry per hour.
    ///
    /// `hours` is how far ahead to look; the endpoint serves at most
    /// [`DEFAULT_FORECAST_HOURS`]. Out-of-range values are left for the
    /// remote service to reject.
    pub async fn air_quality_forecast(
        &mut self,
        hours: u32,
    ) -> Result<Vec<HourlyForecastEntry>> {
        let params =
            [("hours", hours.to_string()), ("features", AQI_FEATURES.to_string())];
        let data: Vec<HourlyForecastEntry> =
            self.fetch_data(HOURLY_FORECAST_PATH, &params).await?;

        self.aqi_forecast = Some(data.clone());
        Ok(data)
    }

    /// Fetches daily pollen forecasts, one entry per day.
    ///
    /// `days` ranges conceptually from 1 to [`DEFAULT_POLLEN_DAYS`]; as with
    /// `hours`, bounds are the remote service's concern.
    pub async fn pollen_forecast(
        &mut self,
        days: u32,
    ) -> Result<Vec<PollenForecastEntry>> {
        let params =
            [("days", days.to_string()), ("features", POLLEN_FEATURES.to_string())];
        let data: Vec<PollenForecastEntry> =
            self.fetch_data(POLLEN_FORECAST_PATH, &params).await?;

        self.pollen_forecast = Some(data.clone());
        Ok(data)
    }

    /// Result of the last successful [`Breezometer::current_air_quality`] call.
    pub fn cached_current_air_quality(&self) -> Option<&CurrentConditions> {
        self.current_aqi.as_ref()
    }

    /// Result of the last successful [`Breezometer::air_quality_forecast`] call.
    pub fn cached_air_quality_forecast(&self) -> Option<&[HourlyForecastEntry]> {
        self.aqi_forecast.as_deref()
    }

    /// Result of the last successful [`Breezometer::pollen_forecast`] call.
    pub fn cached_pollen_forecast(&self) -> Option<&[PollenForecastEntry]> {
        self.pollen_forecast.as_deref()
    }

    /// Shared request path for the three data-fetching calls: one GET with
    /// the location/key params plus `extra`, a strict 200 check, then decode
    /// of the `data` field out of the response envelope.
    async fn fetch_data<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut params: Vec<(&str, String)> = vec![
            ("lat", self.latitude.clone()),
            ("lon", self.longitude.clone()),
            ("key", self.api_key.clone()),
        ];
        params.extend(extra.iter().cloned());

        debug!(%url, "requesting BreezoMeter data");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            error!(status = status.as_u16(), %url, "BreezoMeter returned an error status");
            return Err(Error::RemoteStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                body: truncate_body(&body),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so multi-byte content can't panic the cut.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
