//! Daily forecast records and the aggregated trip weather summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::units::round1;

/// A day counts as rainy when its precipitation probability exceeds this percentage
pub const RAINY_DAY_PROBABILITY: u8 = 50;

/// One calendar day of forecast data. Temperatures are in Fahrenheit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeather {
    /// Calendar date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Daily high in °F
    pub temp_max: f64,
    /// Daily low in °F
    pub temp_min: f64,
    /// Midpoint of high and low in °F
    pub temp_mean: f64,
    /// Total precipitation in mm
    pub precipitation: f64,
    /// Maximum precipitation probability during the day, 0-100
    pub precipitation_probability: u8,
}

impl DailyWeather {
    /// Create a daily record, deriving the mean temperature from high and low
    #[must_use]
    pub fn new(
        date: NaiveDate,
        temp_max: f64,
        temp_min: f64,
        precipitation: f64,
        precipitation_probability: u8,
    ) -> Self {
        Self {
            date,
            temp_max,
            temp_min,
            temp_mean: (temp_max + temp_min) / 2.0,
            precipitation,
            precipitation_probability: precipitation_probability.min(100),
        }
    }

    /// Whether rain is more likely than not on this day
    #[must_use]
    pub fn is_rainy(&self) -> bool {
        self.precipitation_probability > RAINY_DAY_PROBABILITY
    }
}

/// Aggregate weather statistics for one queried date range
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    /// Per-day records in ascending date order
    pub daily: Vec<DailyWeather>,
    /// Mean of daily highs, one decimal
    pub avg_high: f64,
    /// Mean of daily lows, one decimal
    pub avg_low: f64,
    /// Mean of daily means, one decimal
    pub avg_mean: f64,
    /// Mean daily precipitation in mm, one decimal
    pub avg_precipitation: f64,
    /// Number of days with precipitation probability above 50%
    pub total_precip_days: u32,
}

impl WeatherSummary {
    /// Build a summary from daily records.
    ///
    /// Records are sorted by date. An empty input produces zeroed averages.
    #[must_use]
    pub fn from_daily(mut daily: Vec<DailyWeather>) -> Self {
        daily.sort_by_key(|d| d.date);

        let mean = |field: fn(&DailyWeather) -> f64| -> f64 {
            if daily.is_empty() {
                return 0.0;
            }
            let sum: f64 = daily.iter().map(field).sum();
            round1(sum / daily.len() as f64)
        };

        let avg_high = mean(|d| d.temp_max);
        let avg_low = mean(|d| d.temp_min);
        let avg_mean = mean(|d| d.temp_mean);
        let avg_precipitation = mean(|d| d.precipitation);
        let total_precip_days = daily.iter().filter(|d| d.is_rainy()).count() as u32;

        Self {
            daily,
            avg_high,
            avg_low,
            avg_mean,
            avg_precipitation,
            total_precip_days,
        }
    }

    /// Difference between average high and average low, in °F
    #[must_use]
    pub fn temperature_swing(&self) -> f64 {
        self.avg_high - self.avg_low
    }

    /// Whether at least one day is expected to be rainy
    #[must_use]
    pub fn has_rainy_days(&self) -> bool {
        self.total_precip_days > 0
    }

    /// Number of forecast days covered
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.daily.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, max: f64, min: f64, precip: f64, prob: u8) -> DailyWeather {
        DailyWeather::new(
            NaiveDate::from_ymd_opt(2026, 7, d).unwrap(),
            max,
            min,
            precip,
            prob,
        )
    }

    #[test]
    fn test_daily_mean_is_midpoint() {
        let d = day(1, 80.0, 61.0, 0.0, 10);
        assert_eq!(d.temp_mean, 70.5);
    }

    #[test]
    fn test_rainy_day_threshold_is_strict() {
        assert!(!day(1, 70.0, 50.0, 1.0, 50).is_rainy());
        assert!(day(1, 70.0, 50.0, 1.0, 51).is_rainy());
    }

    #[test]
    fn test_summary_averages_are_rounded() {
        let summary = WeatherSummary::from_daily(vec![
            day(1, 70.0, 50.0, 0.0, 10),
            day(2, 71.0, 51.0, 2.5, 60),
            day(3, 72.3, 52.1, 0.4, 80),
        ]);

        assert_eq!(summary.avg_high, 71.1);
        assert_eq!(summary.avg_low, 51.0);
        assert_eq!(summary.avg_mean, 61.1);
        assert_eq!(summary.avg_precipitation, 1.0);
        assert_eq!(summary.total_precip_days, 2);
        assert_eq!(summary.day_count(), 3);
    }

    #[test]
    fn test_summary_sorts_days() {
        let summary = WeatherSummary::from_daily(vec![
            day(3, 70.0, 50.0, 0.0, 0),
            day(1, 70.0, 50.0, 0.0, 0),
            day(2, 70.0, 50.0, 0.0, 0),
        ]);
        let days: Vec<u32> = summary
            .daily
            .iter()
            .map(|d| chrono::Datelike::day(&d.date))
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_summary_is_zeroed() {
        let summary = WeatherSummary::from_daily(Vec::new());
        assert_eq!(summary.avg_high, 0.0);
        assert_eq!(summary.avg_low, 0.0);
        assert_eq!(summary.total_precip_days, 0);
        assert!(!summary.has_rainy_days());
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = WeatherSummary::from_daily(vec![day(1, 80.0, 60.0, 1.2, 55)]);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["avgHigh"], 80.0);
        assert_eq!(json["totalPrecipDays"], 1);
        assert_eq!(json["daily"][0]["date"], "2026-07-01");
        assert_eq!(json["daily"][0]["tempMean"], 70.0);
        assert_eq!(json["daily"][0]["precipitationProbability"], 55);
    }
}
