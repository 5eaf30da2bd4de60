use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    PackwiseError, TripPlanner, VERSION,
    models::{GeocodingResult, TripRequest, WeatherSummary},
    packing::{self, RenderedCategory},
    units::TempUnit,
};

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(planner: TripPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}

/// Error response: `{"error": "..."}` with a status matching the failure class
pub struct ApiError(PackwiseError);

impl From<PackwiseError> for ApiError {
    fn from(err: PackwiseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_user_error() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_dependency_error() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Rejected request");
        }

        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnitParams {
    pub unit: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/geocode", get(geocode))
        .route("/weather", get(weather))
        .route("/packing", post(packing_list))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Vec<GeocodingResult>>, ApiError> {
    let Some(name) = params.name else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(state.planner.search(&name).await?))
}

fn parse_coordinate(value: &str, label: &str) -> Result<f64, PackwiseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PackwiseError::validation(format!("Invalid {label}: {value}")))
}

fn parse_date(value: &str, label: &str) -> Result<NaiveDate, PackwiseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        PackwiseError::validation(format!("Invalid {label} '{value}', expected YYYY-MM-DD"))
    })
}

async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let (Some(lat), Some(lon), Some(start), Some(end)) = (
        params.lat.as_deref().filter(|s| !s.is_empty()),
        params.lon.as_deref().filter(|s| !s.is_empty()),
        params.start_date.as_deref().filter(|s| !s.is_empty()),
        params.end_date.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(PackwiseError::validation(
            "Missing required parameters: lat, lon, startDate, endDate",
        )
        .into());
    };

    let latitude = parse_coordinate(lat, "latitude")?;
    let longitude = parse_coordinate(lon, "longitude")?;
    let request = TripRequest::new(
        parse_date(start, "startDate")?,
        parse_date(end, "endDate")?,
    );

    let today = Local::now().date_naive();
    let summary = state
        .planner
        .forecast(latitude, longitude, request, today)
        .await?;
    Ok(Json(summary))
}

async fn packing_list(
    Query(params): Query<UnitParams>,
    Json(weather): Json<WeatherSummary>,
) -> Result<Json<Vec<RenderedCategory>>, ApiError> {
    let unit = match params.unit.as_deref() {
        Some(unit) => unit.parse::<TempUnit>()?,
        None => TempUnit::Fahrenheit,
    };

    let categories = packing::suggest(&weather)
        .iter()
        .map(|category| category.render(unit))
        .collect();
    Ok(Json(categories))
}
