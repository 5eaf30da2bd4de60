//! Temperature units and display conversion
//!
//! All weather data and packing thresholds are kept in Fahrenheit. Conversion
//! happens only when values are rendered for display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PackwiseError;

/// Display unit for temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TempUnit {
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TempUnit {
    /// Unit suffix used after the degree sign
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            TempUnit::Fahrenheit => "F",
            TempUnit::Celsius => "C",
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TempUnit {
    type Err = PackwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(TempUnit::Fahrenheit),
            "c" | "celsius" => Ok(TempUnit::Celsius),
            other => Err(PackwiseError::validation(format!(
                "Unknown temperature unit '{other}'. Use F or C"
            ))),
        }
    }
}

/// Round to one decimal place
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a Fahrenheit reading into `unit`, rounded to one decimal place
#[must_use]
pub fn convert_temp(fahrenheit: f64, unit: TempUnit) -> f64 {
    match unit {
        TempUnit::Celsius => round1((fahrenheit - 32.0) * 5.0 / 9.0),
        TempUnit::Fahrenheit => round1(fahrenheit),
    }
}

/// Convert a Fahrenheit temperature difference into `unit`.
///
/// Differences have no offset, so 30°F of swing is 17°C, not -1°C.
#[must_use]
pub fn convert_delta(fahrenheit_delta: f64, unit: TempUnit) -> f64 {
    match unit {
        TempUnit::Celsius => round1(fahrenheit_delta * 5.0 / 9.0),
        TempUnit::Fahrenheit => round1(fahrenheit_delta),
    }
}

/// Format a Fahrenheit reading as a whole-degree string, e.g. `"72°F"`
#[must_use]
pub fn format_temp(fahrenheit: f64, unit: TempUnit) -> String {
    // adding zero turns -0 into 0
    let degrees = convert_temp(fahrenheit, unit).round() + 0.0;
    format!("{degrees}°{unit}")
}
