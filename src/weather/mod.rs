//! Weather data sources
//!
//! The packing engine only needs a [`WeatherSummary`]; anything that can
//! search places and summarize a daily forecast can serve it.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::Result;
use crate::models::{GeocodingResult, WeatherSummary};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Place search and daily forecast provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Find places matching `name`, best match first
    async fn geocode(&self, name: &str) -> Result<Vec<GeocodingResult>>;

    /// Summarize the daily forecast between `start` and `end` (inclusive),
    /// temperatures in Fahrenheit
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherSummary>;
}
