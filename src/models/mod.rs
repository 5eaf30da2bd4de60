//! Data models for the packwise application
//!
//! This module contains the domain models organized by concern:
//! - Location: places matched by name search
//! - Weather: daily forecast records and the trip summary
//! - Trip: requested date ranges and assembled trip plans

pub mod location;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use location::GeocodingResult;
pub use trip::{TripPlan, TripRequest};
pub use weather::{DailyWeather, WeatherSummary};
