//! Trip planning service
//!
//! Ties the pieces together: validate the requested dates, fetch the
//! forecast summary for the destination, and derive the packing list.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::models::{GeocodingResult, TripPlan, TripRequest, WeatherSummary};
use crate::packing;
use crate::weather::WeatherProvider;
use crate::{PackwiseError, Result};

/// Service for producing trip plans from a weather provider
pub struct TripPlanner {
    provider: Arc<dyn WeatherProvider>,
    max_lookahead_days: u32,
}

impl TripPlanner {
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, max_lookahead_days: u32) -> Self {
        Self {
            provider,
            max_lookahead_days,
        }
    }

    /// Search places by name
    pub async fn search(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        self.provider.geocode(name).await
    }

    /// Validate the dates against `today` and fetch the forecast summary
    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        request: TripRequest,
        today: NaiveDate,
    ) -> Result<WeatherSummary> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(PackwiseError::validation(format!(
                "Coordinates out of range: {latitude}, {longitude}"
            )));
        }

        request.validate(today, self.max_lookahead_days)?;
        debug!(
            "Fetching {}-day forecast for ({:.4}, {:.4})",
            request.day_count(),
            latitude,
            longitude
        );

        self.provider
            .daily_forecast(latitude, longitude, request.start_date, request.end_date)
            .await
    }

    /// Build the full plan for an already resolved destination
    pub async fn plan(
        &self,
        destination: GeocodingResult,
        request: TripRequest,
        today: NaiveDate,
    ) -> Result<TripPlan> {
        let weather = self
            .forecast(destination.latitude, destination.longitude, request, today)
            .await?;
        let packing = packing::suggest(&weather);

        info!(
            destination = %destination.display_name(),
            categories = packing.len(),
            "Built packing list"
        );

        Ok(TripPlan {
            destination,
            start_date: request.start_date,
            end_date: request.end_date,
            weather,
            packing,
        })
    }

    /// Resolve `name` to its best match and build the plan for it
    pub async fn plan_for_name(
        &self,
        name: &str,
        request: TripRequest,
        today: NaiveDate,
    ) -> Result<TripPlan> {
        let destination = self
            .search(name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PackwiseError::validation(format!("Location not found: {name}")))?;

        debug!(
            "Resolved '{}' to {} ({})",
            name,
            destination.display_name(),
            destination.format_coordinates()
        );

        self.plan(destination, request, today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyWeather;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider {
        forecast_calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        async fn geocode(&self, name: &str) -> Result<Vec<GeocodingResult>> {
            if name == "Nowhere" {
                return Ok(Vec::new());
            }
            Ok(vec![GeocodingResult::new(
                name.to_string(),
                "Testland".to_string(),
                10.0,
                20.0,
            )])
        }

        async fn daily_forecast(
            &self,
            _latitude: f64,
            _longitude: f64,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<WeatherSummary> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherSummary::from_daily(vec![
                DailyWeather::new(start, 85.0, 55.0, 3.0, 80),
                DailyWeather::new(start.succ_opt().unwrap(), 85.0, 55.0, 0.0, 10),
            ]))
        }
    }

    fn planner() -> (Arc<FixedProvider>, TripPlanner) {
        let provider = Arc::new(FixedProvider {
            forecast_calls: AtomicUsize::new(0),
        });
        let planner = TripPlanner::new(provider.clone(), 16);
        (provider, planner)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn test_plan_for_name() {
        let (_, planner) = planner();
        let plan = planner
            .plan_for_name("Sevilla", TripRequest::new(date(20), date(21)), date(18))
            .await
            .unwrap();

        assert_eq!(plan.destination.name, "Sevilla");
        let names: Vec<&str> = plan.packing.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Warm Weather Essentials",
                "Rain Gear",
                "Layering Essentials",
                "Always Pack"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_destination() {
        let (_, planner) = planner();
        let err = planner
            .plan_for_name("Nowhere", TripRequest::new(date(20), date(21)), date(18))
            .await
            .unwrap_err();
        assert!(err.is_user_error());
    }

    #[tokio::test]
    async fn test_invalid_dates_skip_upstream() {
        let (provider, planner) = planner();
        let err = planner
            .forecast(10.0, 20.0, TripRequest::new(date(10), date(12)), date(18))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Start date cannot be in the past");
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates() {
        let (_, planner) = planner();
        let err = planner
            .forecast(95.0, 20.0, TripRequest::new(date(20), date(21)), date(18))
            .await
            .unwrap_err();
        assert!(err.is_user_error());
    }
}
