//! Packing rule engine
//!
//! Thresholds are fixed in Fahrenheit and never reinterpreted for display.

use crate::models::WeatherSummary;

use super::{PackingCategory, Reason};

/// Swing between average high and low (°F) above which layering is advised
pub const LAYERING_SWING_F: f64 = 25.0;

const HOT_THRESHOLD_F: f64 = 90.0;

/// Temperature band selected from the average daily high
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    /// below 32°F
    Freezing,
    /// 32°F up to 50°F
    Cold,
    /// 50°F up to 65°F
    Cool,
    /// 65°F up to 78°F
    Mild,
    /// 78°F up to 90°F
    Warm,
    /// 90°F and above
    Hot,
}

impl TemperatureBand {
    /// Classify an average high. Each band includes its lower bound.
    #[must_use]
    pub fn from_avg_high(avg_high_f: f64) -> Self {
        if avg_high_f < 32.0 {
            Self::Freezing
        } else if avg_high_f < 50.0 {
            Self::Cold
        } else if avg_high_f < 65.0 {
            Self::Cool
        } else if avg_high_f < 78.0 {
            Self::Mild
        } else if avg_high_f < HOT_THRESHOLD_F {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Freezing => "Freezing Cold Essentials",
            Self::Cold => "Cold Weather Gear",
            Self::Cool => "Cool Weather Layers",
            Self::Mild => "Mild Weather Clothing",
            Self::Warm => "Warm Weather Essentials",
            Self::Hot => "Hot Weather Must-Haves",
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Freezing => "🥶",
            Self::Cold => "🧥",
            Self::Cool => "🧣",
            Self::Mild => "👕",
            Self::Warm => "☀️",
            Self::Hot => "🔥",
        }
    }

    #[must_use]
    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Self::Freezing => &[
                "Heavy winter coat",
                "Thermal underwear",
                "Warm hat / beanie",
                "Insulated gloves",
                "Scarf / neck gaiter",
                "Insulated boots",
                "Thick wool socks",
            ],
            Self::Cold => &[
                "Winter jacket",
                "Sweaters",
                "Long pants",
                "Warm layers",
                "Closed-toe shoes",
                "Warm socks",
            ],
            Self::Cool => &[
                "Light jacket",
                "Long-sleeve shirts",
                "Jeans / long pants",
                "Light layers",
                "Comfortable walking shoes",
            ],
            Self::Mild => &[
                "T-shirts",
                "Light pants / chinos",
                "Light sweater for evenings",
                "Comfortable shoes",
            ],
            Self::Warm => &[
                "Shorts",
                "T-shirts / tank tops",
                "Sundresses",
                "Sandals",
                "Sunscreen",
                "Sunglasses",
                "Sun hat",
            ],
            Self::Hot => &[
                "Lightweight breathable clothing",
                "Moisture-wicking fabrics",
                "Sun protection (hat, sunscreen)",
                "Sunglasses",
                "Reusable water bottle",
                "Sandals / breathable shoes",
            ],
        }
    }

    /// The hot band quotes its fixed threshold, every other band quotes the high
    #[must_use]
    pub fn reason(&self, avg_high_f: f64) -> Reason {
        let advice = match self {
            Self::Freezing => "bundle up for freezing conditions",
            Self::Cold => "dress warmly in layers",
            Self::Cool => "layer up for cool weather",
            Self::Mild => "mild and comfortable",
            Self::Warm => "pack light and stay cool",
            Self::Hot => {
                return Reason::HighsAbove {
                    threshold_f: HOT_THRESHOLD_F,
                    advice: "protect yourself from the heat",
                };
            }
        };
        Reason::HighsAround {
            high_f: avg_high_f,
            advice,
        }
    }

    fn category(&self, avg_high_f: f64) -> PackingCategory {
        PackingCategory::new(
            self.name(),
            self.icon(),
            self.items(),
            self.reason(avg_high_f),
        )
    }
}

fn rain_gear(rainy_days: u32) -> PackingCategory {
    PackingCategory::new(
        "Rain Gear",
        "☔",
        &[
            "Rain jacket / waterproof shell",
            "Compact umbrella",
            "Waterproof shoes or shoe covers",
        ],
        Reason::RainyDays { days: rainy_days },
    )
}

fn layering_essentials(swing_f: f64) -> PackingCategory {
    PackingCategory::new(
        "Layering Essentials",
        "🔄",
        &[
            "Removable layers (zip-up hoodie, cardigan)",
            "Versatile base layers",
            "Light scarf or wrap",
        ],
        Reason::TemperatureSwing { swing_f },
    )
}

fn always_pack() -> PackingCategory {
    PackingCategory::new(
        "Always Pack",
        "🎒",
        &[
            "Comfortable walking shoes",
            "Phone charger",
            "Toiletries",
            "Medications",
            "Travel documents",
        ],
        Reason::Essentials,
    )
}

/// Build the packing list for a trip's weather.
///
/// Output order is fixed: temperature band, rain gear (if any rainy day),
/// layering essentials (if the swing exceeds 25°F), always-pack.
#[must_use]
pub fn suggest(weather: &WeatherSummary) -> Vec<PackingCategory> {
    let avg_high = weather.avg_high;
    let temp_swing = weather.temperature_swing();

    let mut categories = Vec::with_capacity(4);
    categories.push(TemperatureBand::from_avg_high(avg_high).category(avg_high));

    if weather.has_rainy_days() {
        categories.push(rain_gear(weather.total_precip_days));
    }

    if temp_swing > LAYERING_SWING_F {
        categories.push(layering_essentials(temp_swing));
    }

    categories.push(always_pack());
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(avg_high: f64, avg_low: f64, total_precip_days: u32) -> WeatherSummary {
        WeatherSummary {
            daily: Vec::new(),
            avg_high,
            avg_low,
            avg_mean: (avg_high + avg_low) / 2.0,
            avg_precipitation: 0.0,
            total_precip_days,
        }
    }

    #[test]
    fn test_band_item_counts() {
        let counts: Vec<usize> = [
            TemperatureBand::Freezing,
            TemperatureBand::Cold,
            TemperatureBand::Cool,
            TemperatureBand::Mild,
            TemperatureBand::Warm,
            TemperatureBand::Hot,
        ]
        .iter()
        .map(|band| band.items().len())
        .collect();
        assert_eq!(counts, vec![7, 6, 5, 4, 7, 6]);
    }

    #[test]
    fn test_band_lower_bounds_are_inclusive() {
        assert_eq!(TemperatureBand::from_avg_high(31.9), TemperatureBand::Freezing);
        assert_eq!(TemperatureBand::from_avg_high(32.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::from_avg_high(90.0), TemperatureBand::Hot);
    }

    #[test]
    fn test_layering_needs_swing_above_threshold() {
        let at_threshold = suggest(&summary(70.0, 45.0, 0));
        assert!(at_threshold.iter().all(|c| c.name != "Layering Essentials"));

        let above = suggest(&summary(70.0, 44.9, 0));
        assert!(above.iter().any(|c| c.name == "Layering Essentials"));
    }

    #[test]
    fn test_layering_reason_rounds_swing() {
        let categories = suggest(&summary(80.4, 52.0, 0));
        let layering = categories
            .iter()
            .find(|c| c.name == "Layering Essentials")
            .unwrap();
        assert_eq!(
            layering.reason.to_string(),
            "Temperature swings of 28°F — layers are key"
        );
    }

    #[test]
    fn test_hot_reason_ignores_actual_high() {
        let categories = suggest(&summary(104.3, 80.0, 0));
        assert_eq!(
            categories[0].reason.to_string(),
            "Highs above 90°F — protect yourself from the heat"
        );
    }
}
