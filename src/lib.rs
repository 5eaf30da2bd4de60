//! `packwise` - weather-aware packing lists for upcoming trips
//!
//! This library provides place search, multi-day forecast aggregation, and
//! the rule engine that turns a forecast summary into a packing checklist.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod packing;
pub mod planner;
pub mod units;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use cache::ResponseCache;
pub use config::PackwiseConfig;
pub use error::PackwiseError;
pub use models::{DailyWeather, GeocodingResult, TripPlan, TripRequest, WeatherSummary};
pub use packing::{PackingCategory, Reason, RenderedCategory, suggest};
pub use planner::TripPlanner;
pub use units::TempUnit;
pub use weather::{OpenMeteoClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PackwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
