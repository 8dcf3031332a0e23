//! Category multipliers for event types and audience profiles.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Factor applied to any category missing from a table.
pub const NEUTRAL_FACTOR: f64 = 1.0;

static EVENT_TYPE_FACTORS: Lazy<BTreeMap<&'static str, f64>> = Lazy::new(|| {
    BTreeMap::from([
        ("Holiday Party", 1.15),
        ("Corporate Lunch", 0.95),
        ("Weekend Brunch", 1.08),
        ("Birthday Celebration", 1.00),
        ("Other", 1.00),
    ])
});

static AUDIENCE_PROFILE_FACTORS: Lazy<BTreeMap<&'static str, f64>> = Lazy::new(|| {
    BTreeMap::from([
        ("Families", 1.07),
        ("Professionals", 0.98),
        ("Young Adults", 1.05),
        ("Students", 1.10),
        ("Mixed", 1.00),
    ])
});

/// Multiplier for an event type. Matching is exact and case-sensitive.
pub fn event_type_factor(event_type: &str) -> f64 {
    EVENT_TYPE_FACTORS
        .get(event_type)
        .copied()
        .unwrap_or(NEUTRAL_FACTOR)
}

/// Multiplier for an audience profile. Matching is exact and case-sensitive.
pub fn audience_profile_factor(audience_profile: &str) -> f64 {
    AUDIENCE_PROFILE_FACTORS
        .get(audience_profile)
        .copied()
        .unwrap_or(NEUTRAL_FACTOR)
}

pub fn event_types() -> impl Iterator<Item = (&'static str, f64)> {
    EVENT_TYPE_FACTORS.iter().map(|(name, factor)| (*name, *factor))
}

pub fn audience_profiles() -> impl Iterator<Item = (&'static str, f64)> {
    AUDIENCE_PROFILE_FACTORS
        .iter()
        .map(|(name, factor)| (*name, *factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Holiday Party", 1.15)]
    #[case("Corporate Lunch", 0.95)]
    #[case("Weekend Brunch", 1.08)]
    #[case("Birthday Celebration", 1.00)]
    #[case("Other", 1.00)]
    fn known_event_types(#[case] key: &str, #[case] expected: f64) {
        assert_eq!(event_type_factor(key), expected);
    }

    #[rstest]
    #[case("Families", 1.07)]
    #[case("Professionals", 0.98)]
    #[case("Young Adults", 1.05)]
    #[case("Students", 1.10)]
    #[case("Mixed", 1.00)]
    fn known_audience_profiles(#[case] key: &str, #[case] expected: f64) {
        assert_eq!(audience_profile_factor(key), expected);
    }

    #[rstest]
    #[case("Wedding")]
    #[case("holiday party")]
    #[case("")]
    fn unknown_categories_are_neutral(#[case] key: &str) {
        assert_eq!(event_type_factor(key), NEUTRAL_FACTOR);
        assert_eq!(audience_profile_factor(key), NEUTRAL_FACTOR);
    }

    #[test]
    fn tables_list_every_category() {
        assert_eq!(event_types().count(), 5);
        assert_eq!(audience_profiles().count(), 5);
        assert!(event_types().any(|(name, _)| name == "Weekend Brunch"));
    }
}
