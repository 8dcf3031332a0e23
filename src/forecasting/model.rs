use serde::{Deserialize, Serialize};

/// Consumption figures recorded for a past event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub date: String,
    pub event_type: String,
    pub audience_profile: String,
    pub footfall: i32,
    pub food_prepared: i32,
    pub food_consumed: i32,
}

impl HistoricalRecord {
    /// Food consumed per attendee, or `None` when footfall is not positive.
    pub fn consumption_ratio(&self) -> Option<f64> {
        if self.footfall > 0 {
            Some(f64::from(self.food_consumed) / f64::from(self.footfall))
        } else {
            None
        }
    }
}

/// The upcoming event being forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    pub event_type: String,
    pub audience_profile: String,
    pub footfall: i32,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predicted_quantity: u32,
    pub waste_reduction_potential: u32,
}

/// Intermediate values of a single forecast run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastBreakdown {
    pub base_estimate: f64,
    pub event_type_factor: f64,
    pub audience_profile_factor: f64,
    pub feedback_factor: f64,
    pub naive_estimate: i64,
    pub result: ForecastResult,
}
