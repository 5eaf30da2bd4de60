//! Packing recommendations
//!
//! Turns a trip's [`WeatherSummary`](crate::models::WeatherSummary) into an
//! ordered list of packing categories:
//! - exactly one temperature band, chosen from the average high
//! - rain gear when any day is likely to be rainy
//! - layering essentials when highs and lows are far apart
//! - the always-pack list, which is always last

pub mod reason;
pub mod rules;

use serde::Serialize;

use crate::units::TempUnit;

pub use reason::Reason;
pub use rules::{TemperatureBand, suggest};

/// A named group of recommended items with the reason it was chosen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingCategory {
    /// Short label, unique within one list
    pub name: String,
    /// Single glyph identifying the category
    pub icon: String,
    pub items: Vec<String>,
    pub reason: Reason,
}

impl PackingCategory {
    fn new(name: &str, icon: &str, items: &[&str], reason: Reason) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            items: items.iter().map(|item| (*item).to_string()).collect(),
            reason,
        }
    }

    /// Copy of this category with the reason rendered in `unit`
    #[must_use]
    pub fn render(&self, unit: TempUnit) -> RenderedCategory {
        RenderedCategory {
            name: self.name.clone(),
            icon: self.icon.clone(),
            items: self.items.clone(),
            reason: self.reason.render(unit),
        }
    }
}

/// Display-ready packing category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCategory {
    pub name: String,
    pub icon: String,
    pub items: Vec<String>,
    pub reason: String,
}
