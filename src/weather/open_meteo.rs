//! Open-Meteo client for place search and daily forecasts
//!
//! Both APIs are key-free. Forecast temperatures are requested in Fahrenheit
//! so the summary can be handed to the packing engine as is.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use crate::cache::ResponseCache;
use crate::config::WeatherConfig;
use crate::models::location::rounded_coordinates;
use crate::models::{DailyWeather, GeocodingResult, WeatherSummary};
use crate::{PackwiseError, Result};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,apparent_temperature_max,apparent_temperature_min,precipitation_sum,precipitation_probability_max";

const GEOCODING_FAILED: &str = "Geocoding request failed";
const GEOCODING_UNEXPECTED: &str = "Unexpected geocoding API response";
const FORECAST_FAILED: &str = "Weather API request failed";
const FORECAST_UNEXPECTED: &str = "Unexpected weather API response";

const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Geocoding response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<Place>>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<Place> for GeocodingResult {
    fn from(place: Place) -> Self {
        Self {
            name: place.name,
            country: place.country.unwrap_or_default(),
            latitude: place.latitude,
            longitude: place.longitude,
            admin1: place.admin1,
        }
    }
}

/// Forecast response from Open-Meteo
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

/// Daily weather columns, one entry per day in `time`
#[derive(Debug, Deserialize)]
struct DailyData {
    time: Option<Vec<NaiveDate>>,
    #[serde(rename = "temperature_2m_max", default)]
    temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    temperature_min: Vec<Option<f64>>,
    #[serde(rename = "precipitation_sum", default)]
    precipitation: Vec<Option<f64>>,
    #[serde(rename = "precipitation_probability_max", default)]
    precipitation_probability: Vec<Option<f64>>,
}

fn value_at(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten()
}

impl DailyData {
    /// Convert the columnar response into a summary.
    ///
    /// Every day needs a high and a low; missing precipitation values
    /// count as dry.
    fn into_summary(self) -> Result<WeatherSummary> {
        let unexpected = || PackwiseError::unexpected_response(FORECAST_UNEXPECTED);
        let dates = self.time.as_deref().ok_or_else(unexpected)?;
        if dates.is_empty() {
            return Err(unexpected());
        }

        let days = dates
            .iter()
            .enumerate()
            .map(|(i, date)| -> Result<DailyWeather> {
                let temp_max = value_at(&self.temperature_max, i).ok_or_else(unexpected)?;
                let temp_min = value_at(&self.temperature_min, i).ok_or_else(unexpected)?;
                let precipitation = value_at(&self.precipitation, i).unwrap_or(0.0).max(0.0);
                // round up so a fractional 50.3% still counts as a rainy day
                let probability = value_at(&self.precipitation_probability, i)
                    .map_or(0, |p| p.clamp(0.0, 100.0).ceil() as u8);
                Ok(DailyWeather::new(
                    *date,
                    temp_max,
                    temp_min,
                    precipitation,
                    probability,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(WeatherSummary::from_daily(days))
    }
}

/// HTTP client for the Open-Meteo geocoding and forecast APIs
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    geocoding_base_url: String,
    forecast_base_url: String,
    result_count: u32,
    cache: Option<Arc<ResponseCache>>,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("packwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PackwiseError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
            result_count: config.geocoding_result_count,
            cache: None,
        })
    }

    /// Serve repeated lookups from `cache`
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn fetch(&self, url: &str, failure: &'static str) -> Result<Response> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Open-Meteo request failed");
            PackwiseError::upstream(failure)
        })?;

        let status = response.status();
        let elapsed = start_time.elapsed();
        if elapsed > SLOW_RESPONSE {
            warn!("Slow Open-Meteo response: {:.3}s", elapsed.as_secs_f64());
        }

        if !status.is_success() {
            warn!(%status, "Open-Meteo answered with an error status");
            return Err(PackwiseError::upstream(failure));
        }

        debug!(%status, "Open-Meteo response received in {:.3}s", elapsed.as_secs_f64());
        Ok(response)
    }

    async fn cached<T: serde::de::DeserializeOwned + Send + 'static>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(error = %e, key, "Cache lookup failed, fetching fresh data");
                None
            }
        }
    }

    async fn store<T: serde::Serialize + Send + std::fmt::Debug + 'static>(&self, key: &str, value: T) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(key, value).await {
                warn!(error = %e, key, "Failed to cache response");
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    /// Names shorter than two characters return no matches without a request
    #[instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let name = name.trim();
        if name.chars().count() < 2 {
            return Ok(Vec::new());
        }

        let key = format!("geocode:{}:{}", name.to_lowercase(), self.result_count);
        if let Some(hit) = self.cached::<Vec<GeocodingResult>>(&key).await {
            debug!("Serving geocoding results for '{}' from cache", name);
            return Ok(hit);
        }

        let start_time = Instant::now();
        let url = format!(
            "{}/search?name={}&count={}&language=en&format=json",
            self.geocoding_base_url,
            urlencoding::encode(name),
            self.result_count
        );

        let response: GeocodingResponse = self
            .fetch(&url, GEOCODING_FAILED)
            .await?
            .json()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to parse geocoding response");
                PackwiseError::unexpected_response(GEOCODING_UNEXPECTED)
            })?;

        let results: Vec<GeocodingResult> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(GeocodingResult::from)
            .collect();

        if results.is_empty() {
            warn!("No results found for location '{}'", name);
        } else {
            info!(
                "Found {} geocoding results for '{}' in {:.3}s",
                results.len(),
                name,
                start_time.elapsed().as_secs_f64()
            );
        }

        self.store(&key, results.clone()).await;
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherSummary> {
        let (lat, lon) = rounded_coordinates(latitude, longitude, 2);
        let key = format!("forecast:{lat:.2}:{lon:.2}:{start}:{end}");
        if let Some(hit) = self.cached::<WeatherSummary>(&key).await {
            debug!("Serving forecast from cache");
            return Ok(hit);
        }

        let start_time = Instant::now();
        let url = format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&daily={DAILY_FIELDS}&temperature_unit=fahrenheit&start_date={start}&end_date={end}&timezone=auto",
            self.forecast_base_url
        );

        let response: ForecastResponse = self
            .fetch(&url, FORECAST_FAILED)
            .await?
            .json()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to parse forecast response");
                PackwiseError::unexpected_response(FORECAST_UNEXPECTED)
            })?;

        let summary = response
            .daily
            .ok_or_else(|| PackwiseError::unexpected_response(FORECAST_UNEXPECTED))?
            .into_summary()?;

        info!(
            "Retrieved {}-day forecast in {:.3}s (avg high {:.1}°F, {} rainy days)",
            summary.day_count(),
            start_time.elapsed().as_secs_f64(),
            summary.avg_high,
            summary.total_precip_days
        );

        self.store(&key, summary.clone()).await;
        Ok(summary)
    }
}
