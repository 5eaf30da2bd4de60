//! Trip request validation and the assembled trip plan

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{GeocodingResult, WeatherSummary};
use crate::packing::{PackingCategory, RenderedCategory};
use crate::units::TempUnit;
use crate::{PackwiseError, Result};

/// Date range the traveller asked about
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TripRequest {
    #[must_use]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Check the range against the forecast horizon starting at `today`.
    ///
    /// The start may not lie in the past, the end may not lie beyond
    /// `today + max_lookahead_days`, and the end may not precede the start.
    pub fn validate(&self, today: NaiveDate, max_lookahead_days: u32) -> Result<()> {
        let max_date = today
            .checked_add_days(Days::new(u64::from(max_lookahead_days)))
            .unwrap_or(NaiveDate::MAX);

        if self.start_date < today {
            return Err(PackwiseError::validation("Start date cannot be in the past"));
        }

        if self.end_date > max_date {
            return Err(PackwiseError::validation(format!(
                "End date must be within the next {max_lookahead_days} days"
            )));
        }

        if self.end_date < self.start_date {
            return Err(PackwiseError::validation(
                "End date must be on or after start date",
            ));
        }

        Ok(())
    }

    /// Number of calendar days in the trip, both ends inclusive
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Forecast and packing list for one destination and date range
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub destination: GeocodingResult,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weather: WeatherSummary,
    pub packing: Vec<PackingCategory>,
}

impl TripPlan {
    /// Packing categories with reasons rendered in `unit`
    #[must_use]
    pub fn rendered_packing(&self, unit: TempUnit) -> Vec<RenderedCategory> {
        self.packing.iter().map(|c| c.render(unit)).collect()
    }
}
