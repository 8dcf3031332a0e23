/*!
 * # Forecasting
 *
 * Rule-based estimate of how much food to prepare for an event.
 *
 * The estimate starts from a footfall-proportional baseline, is scaled by
 * the event type and audience profile multipliers, then by the mean
 * consumption ratio observed in past events. The result is rounded half
 * away from zero and clamped at zero. A waste-reduction figure compares it
 * against a deliberately oversized naive rule of two units per attendee.
 *
 * Every function here is pure and can be called concurrently.
 */

pub mod adjustments;
pub mod feedback;
pub mod model;

pub use adjustments::{audience_profile_factor, event_type_factor, NEUTRAL_FACTOR};
pub use feedback::{feedback_factor, DEFAULT_FEEDBACK_FACTOR};
pub use model::{EventContext, ForecastBreakdown, ForecastResult, HistoricalRecord};

/// Units prepared per expected attendee before any adjustment.
pub const BASE_UNITS_PER_ATTENDEE: f64 = 1.2;

/// Units per attendee assumed by the naive comparison rule.
pub const NAIVE_UNITS_PER_ATTENDEE: f64 = 2.0;

/// Footfall-proportional starting quantity.
pub fn base_estimate(footfall: i32) -> f64 {
    f64::from(footfall) * BASE_UNITS_PER_ATTENDEE
}

/// Rounds half away from zero and clamps into `0..=u32::MAX`.
fn round_quantity(estimate: f64) -> u32 {
    let rounded = estimate.round();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else {
        // saturates above u32::MAX
        rounded as u32
    }
}

pub fn naive_estimate(footfall: i32) -> i64 {
    (f64::from(footfall) * NAIVE_UNITS_PER_ATTENDEE).round() as i64
}

/// Gap between the naive estimate and the forecast, never negative.
pub fn waste_reduction_potential(footfall: i32, predicted_quantity: u32) -> u32 {
    let gap = naive_estimate(footfall) - i64::from(predicted_quantity);
    u32::try_from(gap.max(0)).unwrap_or(u32::MAX)
}

/// Runs the full estimation pipeline and keeps every intermediate value.
pub fn forecast_breakdown(
    history: &[HistoricalRecord],
    event_type: &str,
    audience_profile: &str,
    footfall: i32,
) -> ForecastBreakdown {
    let base = base_estimate(footfall);
    let event_type_factor = event_type_factor(event_type);
    let audience_profile_factor = audience_profile_factor(audience_profile);
    let feedback_factor = feedback_factor(history);

    let estimate = base * event_type_factor * audience_profile_factor * feedback_factor;
    let predicted_quantity = round_quantity(estimate);

    ForecastBreakdown {
        base_estimate: base,
        event_type_factor,
        audience_profile_factor,
        feedback_factor,
        naive_estimate: naive_estimate(footfall),
        result: ForecastResult {
            predicted_quantity,
            waste_reduction_potential: waste_reduction_potential(footfall, predicted_quantity),
        },
    }
}

/// Recommended quantity and waste-reduction potential for an event.
pub fn forecast(
    history: &[HistoricalRecord],
    event_type: &str,
    audience_profile: &str,
    footfall: i32,
) -> ForecastResult {
    forecast_breakdown(history, event_type, audience_profile, footfall).result
}

/// [`forecast`] for a prepared [`EventContext`].
pub fn forecast_event(history: &[HistoricalRecord], event: &EventContext) -> ForecastResult {
    forecast(
        history,
        &event.event_type,
        &event.audience_profile,
        event.footfall,
    )
}
