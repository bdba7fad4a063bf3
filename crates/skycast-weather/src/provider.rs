//! 7Timer! civil light client.

use crate::forecast::RawDay;
use crate::types::ForecastError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const PRODUCT: &str = "civillight";
const OUTPUT: &str = "json";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_url: String,
}

impl ForecastClient {
    /// Build a client for `api_url`. Without `timeout` the HTTP stack default applies.
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ForecastError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_url: api_url.into(),
        })
    }

    /// Fetch the daily series for a location. One request, no retry.
    pub async fn fetch(&self, lat: &str, lon: &str) -> Result<Vec<RawDay>, ForecastError> {
        tracing::debug!("GET {} lat={} lon={}", self.api_url, lat, lon);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("lon", lon), ("lat", lat), ("product", PRODUCT), ("output", OUTPUT)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast request failed with status {}", status);
            return Err(ForecastError::Http {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ForecastError::Parse(e.to_string()))?;

        let series = match body.get("dataseries") {
            Some(Value::Array(series)) if !series.is_empty() => series.clone(),
            _ => return Err(ForecastError::NoDataseries),
        };

        let days: Vec<RawDay> = serde_json::from_value(Value::Array(series))
            .map_err(|e| ForecastError::Parse(e.to_string()))?;

        tracing::info!("Received {} forecast entries", days.len());
        Ok(days)
    }
}
