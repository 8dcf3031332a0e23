use super::common::{created_response, map_service_error, success_response, validate_input};
use crate::{
    dto::forecast::{
        CategoriesResponse, CategoryFactor, CreateStoredForecastRequest, ForecastExplanation,
        ForecastRequest, ForecastResponse, StoredForecastQuery, StoredForecastResponse,
    },
    errors::ApiError,
    handlers::AppState,
    repositories::food_forecast_repository::NewFoodForecast,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

fn validate_forecast_request(request: &ForecastRequest) -> Result<(), ApiError> {
    validate_input(&request.event_details)?;
    for (index, item) in request.historical_data.iter().enumerate() {
        validate_input(item).map_err(|err| match err {
            ApiError::ValidationError(msg) => {
                ApiError::ValidationError(format!("historicalData[{}]: {}", index, msg))
            }
            other => other,
        })?;
    }
    Ok(())
}

fn log_request(request: &ForecastRequest) {
    let details = &request.event_details;
    info!(
        event_type = %details.event_type,
        audience_profile = %details.audience_profile,
        footfall = details.footfall,
        event_date = %details.date,
        historical_items = request.historical_data.len(),
        "Received forecast request"
    );
}

/// Forecast how much food to prepare for an event
#[utoipa::path(
    post,
    path = "/api/forecast",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Forecast computed", body = ForecastResponse,
            headers(("X-Request-Id" = String, description = "Unique request id for tracing"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn create_forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    validate_forecast_request(&payload)?;
    log_request(&payload);

    let breakdown = state
        .forecasting
        .forecast(&payload.event_context(), &payload.history());

    Ok(success_response(ForecastResponse::from(breakdown.result)))
}

/// Forecast with the intermediate factors that produced it
#[utoipa::path(
    post,
    path = "/api/forecast/explain",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Forecast and its factors", body = ForecastExplanation),
        (status = 400, description = "Invalid or malformed request", body = crate::errors::ErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn explain_forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    validate_forecast_request(&payload)?;
    log_request(&payload);

    let history = payload.history();
    let history_used = history
        .iter()
        .filter(|record| record.consumption_ratio().is_some())
        .count();
    let breakdown = state.forecasting.forecast(&payload.event_context(), &history);

    Ok(success_response(ForecastExplanation::new(
        breakdown,
        history_used,
    )))
}

/// Event types and audience profiles with their multipliers
#[utoipa::path(
    get,
    path = "/api/forecast/categories",
    responses(
        (status = 200, description = "Known categories", body = CategoriesResponse)
    ),
    tag = "forecast"
)]
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let to_factors = |entries: Vec<(&'static str, f64)>| {
        entries
            .into_iter()
            .map(|(name, factor)| CategoryFactor {
                name: name.to_string(),
                factor,
            })
            .collect()
    };

    let (event_types, audience_profiles) = state.forecasting.categories();
    success_response(CategoriesResponse {
        event_types: to_factors(event_types),
        audience_profiles: to_factors(audience_profiles),
    })
}

/// Store a forecast for an item and date
#[utoipa::path(
    post,
    path = "/api/forecast/records",
    request_body = CreateStoredForecastRequest,
    responses(
        (status = 201, description = "Forecast stored", body = StoredForecastResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn create_record(
    State(state): State<AppState>,
    payload: Result<Json<CreateStoredForecastRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    validate_input(&payload)?;

    let stored = state
        .forecasting
        .record_forecast(NewFoodForecast {
            item_name: payload.item_name,
            expected_footfall: payload.expected_footfall,
            quantity_recommended: payload.quantity_recommended,
            date: payload.date,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(StoredForecastResponse::from(stored)))
}

/// Stored forecasts for an item on a date
#[utoipa::path(
    get,
    path = "/api/forecast/records",
    params(StoredForecastQuery),
    responses(
        (status = 200, description = "Stored forecasts", body = [StoredForecastResponse]),
        (status = 400, description = "Invalid query", body = crate::errors::ErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn list_records(
    State(state): State<AppState>,
    query: Result<Query<StoredForecastQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let records = state
        .forecasting
        .find_forecasts(&query.item_name, query.date)
        .await
        .map_err(map_service_error)?;

    let body: Vec<StoredForecastResponse> =
        records.into_iter().map(StoredForecastResponse::from).collect();
    Ok(success_response(body))
}

pub fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_forecast))
        .route("/explain", post(explain_forecast))
        .route("/categories", get(list_categories))
        .route("/records", post(create_record).get(list_records))
}
