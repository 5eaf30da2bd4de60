//! Destination model returned by place-name search

use serde::{Deserialize, Serialize};

/// A place matched by name search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodingResult {
    /// Place name (city, town, etc.)
    pub name: String,
    /// Country name
    #[serde(default)]
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// First-level administrative area (state, province)
    #[serde(default)]
    pub admin1: Option<String>,
}

impl GeocodingResult {
    /// Create a result without an administrative area
    #[must_use]
    pub fn new(name: String, country: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country,
            latitude,
            longitude,
            admin1: None,
        }
    }

    /// Human-readable label, e.g. "Portland, Oregon, United States"
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(admin1) = self.admin1.as_deref().filter(|a| !a.is_empty()) {
            parts.push(admin1);
        }
        if !self.country.is_empty() {
            parts.push(&self.country);
        }
        parts.join(", ")
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Round coordinates for cache key generation
#[must_use]
pub fn rounded_coordinates(latitude: f64, longitude: f64, precision: u32) -> (f64, f64) {
    let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
    let lat = (latitude * multiplier).round() / multiplier;
    let lon = (longitude * multiplier).round() / multiplier;
    (lat, lon)
}
