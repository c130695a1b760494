use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common wrapper around every BreezoMeter v2 response body.
///
/// Only the `data` field is of interest; `error` and `metadata` are ignored.
/// A body without `data` fails to deserialize, which surfaces as a decode
/// error to the caller.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Current-conditions payload from `/air-quality/v2/current-conditions`.
///
/// The shape is owned by the remote service and passed through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CurrentConditions(pub Value);

/// One hourly entry from `/air-quality/v2/forecast/hourly`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HourlyForecastEntry(pub Value);

/// One daily entry from `/pollen/v2/forecast/daily`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PollenForecastEntry(pub Value);
