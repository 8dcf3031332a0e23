use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::entities::food_forecast;
use crate::forecasting::{EventContext, ForecastBreakdown, ForecastResult, HistoricalRecord};

/// Event to forecast, as sent by the dashboard.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "eventType": "Holiday Party",
    "audienceProfile": "Families",
    "footfall": 100,
    "date": "2024-12-20"
}))]
pub struct EventDetails {
    pub event_type: String,
    pub audience_profile: String,
    /// Expected number of attendees
    #[validate(range(min = 0, message = "footfall must not be negative"))]
    pub footfall: i32,
    pub date: String,
}

/// Consumption figures of a past event.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataItem {
    pub date: String,
    pub event_type: String,
    pub audience_profile: String,
    /// Actual attendees; items without positive footfall are ignored by the forecast
    pub footfall: i32,
    #[validate(range(min = 0, message = "foodPrepared must not be negative"))]
    pub food_prepared: i32,
    #[validate(range(min = 0, message = "foodConsumed must not be negative"))]
    pub food_consumed: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub event_details: EventDetails,
    #[serde(default)]
    pub historical_data: Vec<HistoricalDataItem>,
}

impl ForecastRequest {
    pub fn event_context(&self) -> EventContext {
        self.event_details.clone().into()
    }

    pub fn history(&self) -> Vec<HistoricalRecord> {
        self.historical_data
            .iter()
            .cloned()
            .map(HistoricalRecord::from)
            .collect()
    }
}

impl From<EventDetails> for EventContext {
    fn from(details: EventDetails) -> Self {
        Self {
            event_type: details.event_type,
            audience_profile: details.audience_profile,
            footfall: details.footfall,
            date: details.date,
        }
    }
}

impl From<HistoricalDataItem> for HistoricalRecord {
    fn from(item: HistoricalDataItem) -> Self {
        Self {
            date: item.date,
            event_type: item.event_type,
            audience_profile: item.audience_profile,
            footfall: item.footfall,
            food_prepared: item.food_prepared,
            food_consumed: item.food_consumed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "predictedFoodQuantity": 148,
    "wasteReductionPotential": 52
}))]
pub struct ForecastResponse {
    /// Recommended number of food units to prepare
    pub predicted_food_quantity: u32,
    /// Units saved compared with preparing two units per attendee
    pub waste_reduction_potential: u32,
}

impl From<ForecastResult> for ForecastResponse {
    fn from(result: ForecastResult) -> Self {
        Self {
            predicted_food_quantity: result.predicted_quantity,
            waste_reduction_potential: result.waste_reduction_potential,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastExplanation {
    pub predicted_food_quantity: u32,
    pub waste_reduction_potential: u32,
    pub base_estimate: f64,
    pub event_type_factor: f64,
    pub audience_profile_factor: f64,
    pub feedback_factor: f64,
    pub naive_estimate: i64,
    /// Historical items that contributed to the feedback factor
    pub history_used: usize,
}

impl ForecastExplanation {
    pub fn new(breakdown: ForecastBreakdown, history_used: usize) -> Self {
        Self {
            predicted_food_quantity: breakdown.result.predicted_quantity,
            waste_reduction_potential: breakdown.result.waste_reduction_potential,
            base_estimate: breakdown.base_estimate,
            event_type_factor: breakdown.event_type_factor,
            audience_profile_factor: breakdown.audience_profile_factor,
            feedback_factor: breakdown.feedback_factor,
            naive_estimate: breakdown.naive_estimate,
            history_used,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct CategoryFactor {
    pub name: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub event_types: Vec<CategoryFactor>,
    pub audience_profiles: Vec<CategoryFactor>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoredForecastRequest {
    #[validate(length(min = 1, max = 255, message = "itemName must be 1-255 characters"))]
    pub item_name: String,
    #[validate(range(min = 0))]
    pub expected_footfall: i32,
    #[validate(range(min = 0))]
    pub quantity_recommended: i32,
    #[schema(value_type = String, format = Date, example = "2024-12-20")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StoredForecastQuery {
    pub item_name: String,
    #[param(value_type = String, format = Date)]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredForecastResponse {
    pub id: i32,
    pub item_name: String,
    pub expected_footfall: i32,
    pub quantity_recommended: i32,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

impl From<food_forecast::Model> for StoredForecastResponse {
    fn from(model: food_forecast::Model) -> Self {
        Self {
            id: model.id,
            item_name: model.item_name,
            expected_footfall: model.expected_footfall,
            quantity_recommended: model.quantity_recommended,
            date: model.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case_and_defaults_history() {
        let request: ForecastRequest = serde_json::from_value(json!({
            "eventDetails": {
                "eventType": "Corporate Lunch",
                "audienceProfile": "Professionals",
                "footfall": 80,
                "date": "2024-01-15"
            }
        }))
        .unwrap();

        assert!(request.historical_data.is_empty());
        let event = request.event_context();
        assert_eq!(event.event_type, "Corporate Lunch");
        assert_eq!(event.footfall, 80);
    }

    #[test]
    fn history_items_convert_to_records() {
        let request: ForecastRequest = serde_json::from_value(json!({
            "eventDetails": {"eventType": "Other", "audienceProfile": "Mixed", "footfall": 50, "date": "2024-03-01"},
            "historicalData": [
                {"date": "2024-01-01", "eventType": "Holiday Party", "audienceProfile": "Mixed",
                 "footfall": 150, "foodPrepared": 200, "foodConsumed": 180}
            ]
        }))
        .unwrap();

        let history = request.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].food_prepared, 200);
        assert_eq!(history[0].food_consumed, 180);
    }

    #[test]
    fn negative_footfall_fails_validation() {
        let details = EventDetails {
            event_type: "Other".into(),
            audience_profile: "Mixed".into(),
            footfall: -1,
            date: "2024-01-01".into(),
        };
        let errors = details.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("footfall"));
    }

    #[test]
    fn response_serializes_camel_case_field_names() {
        let body = serde_json::to_value(ForecastResponse {
            predicted_food_quantity: 148,
            waste_reduction_potential: 52,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"predictedFoodQuantity": 148, "wasteReductionPotential": 52})
        );
    }
}
