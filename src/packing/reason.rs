//! Justification attached to each packing category
//!
//! A `Reason` keeps the numbers it mentions, so it can be rendered in either
//! temperature unit. Its `Display` form is the Fahrenheit sentence, with every
//! temperature written as `<integer>°F`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::units::{TempUnit, convert_delta, format_temp};

#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    /// "Highs around 72°F — {advice}"
    HighsAround { high_f: f64, advice: &'static str },
    /// "Highs above 90°F — {advice}"
    HighsAbove { threshold_f: f64, advice: &'static str },
    /// "3 days with rain expected"
    RainyDays { days: u32 },
    /// "Temperature swings of 30°F — layers are key"
    TemperatureSwing { swing_f: f64 },
    /// Fixed text for the catch-all category
    Essentials,
}

impl Reason {
    /// Render the sentence with temperatures in `unit`.
    ///
    /// Absolute readings are converted with the freezing-point offset; the
    /// temperature swing is a difference and is only scaled.
    #[must_use]
    pub fn render(&self, unit: TempUnit) -> String {
        match self {
            Reason::HighsAround { high_f, advice } => {
                format!("Highs around {} — {advice}", format_temp(high_f.round(), unit))
            }
            Reason::HighsAbove { threshold_f, advice } => {
                format!("Highs above {} — {advice}", format_temp(*threshold_f, unit))
            }
            Reason::RainyDays { days } => {
                let noun = if *days == 1 { "day" } else { "days" };
                format!("{days} {noun} with rain expected")
            }
            Reason::TemperatureSwing { swing_f } => {
                let swing = convert_delta(swing_f.round(), unit).round();
                format!("Temperature swings of {swing}°{unit} — layers are key")
            }
            Reason::Essentials => "Essential items for any trip".to_string(),
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(TempUnit::Fahrenheit))
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
