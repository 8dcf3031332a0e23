use chrono::NaiveDate;
use metrics::{counter, histogram};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    entities::food_forecast,
    errors::ServiceError,
    forecasting::{self, adjustments, EventContext, ForecastBreakdown, HistoricalRecord},
    repositories::{food_forecast_repository::NewFoodForecast, FoodForecastRepository},
};

/// Application service around the food forecasting rules and the stored
/// forecast history.
#[derive(Debug, Clone)]
pub struct ForecastingService {
    repository: FoodForecastRepository,
}

impl ForecastingService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repository: FoodForecastRepository::new(db),
        }
    }

    /// Forecast for `event` given past consumption records.
    #[instrument(skip(self, event, history), fields(event_type = %event.event_type, footfall = event.footfall))]
    pub fn forecast(&self, event: &EventContext, history: &[HistoricalRecord]) -> ForecastBreakdown {
        let breakdown = forecasting::forecast_breakdown(
            history,
            &event.event_type,
            &event.audience_profile,
            event.footfall,
        );

        debug!(
            base_estimate = breakdown.base_estimate,
            event_type_factor = breakdown.event_type_factor,
            audience_profile_factor = breakdown.audience_profile_factor,
            feedback_factor = breakdown.feedback_factor,
            "forecast computed"
        );

        counter!("smartserve.forecasts.computed", 1);
        histogram!(
            "smartserve.forecasts.predicted_quantity",
            f64::from(breakdown.result.predicted_quantity)
        );
        histogram!(
            "smartserve.forecasts.waste_reduction_potential",
            f64::from(breakdown.result.waste_reduction_potential)
        );

        breakdown
    }

    /// Known categories and their multipliers, as `(event types, audience profiles)`.
    pub fn categories(&self) -> (Vec<(&'static str, f64)>, Vec<(&'static str, f64)>) {
        (
            adjustments::event_types().collect(),
            adjustments::audience_profiles().collect(),
        )
    }

    #[instrument(skip(self, forecast), fields(item_name = %forecast.item_name, date = %forecast.date))]
    pub async fn record_forecast(
        &self,
        forecast: NewFoodForecast,
    ) -> Result<food_forecast::Model, ServiceError> {
        if forecast.item_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "item name must not be blank".to_string(),
            ));
        }

        let stored = self.repository.create(forecast).await?;
        counter!("smartserve.forecasts.recorded", 1);
        info!(id = stored.id, "Stored food forecast");
        Ok(stored)
    }

    pub async fn find_forecasts(
        &self,
        item_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<food_forecast::Model>, ServiceError> {
        self.repository
            .find_by_item_name_and_date(item_name, date)
            .await
    }
}
