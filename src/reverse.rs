//! Reverse goal solver: the 5 km time needed for a target finish time

use tracing::{debug, warn};

use crate::error::{CalculationError, Result};
use crate::format::{format_duration, format_pace};
use crate::models::{ReverseResult, TargetGoal};
use crate::prediction::RIEGEL_EXPONENT;

/// Invert the Riegel model to find the 5 km time equivalent to `target_seconds`.
///
/// `target_distance_km` must be positive; [`solve_goal`] checks it first.
pub fn solve_required_5k(target_distance_km: f64, target_seconds: f64) -> f64 {
    debug_assert!(target_distance_km > 0.0, "target distance must be positive");
    target_seconds / (target_distance_km / 5.0).powf(RIEGEL_EXPONENT)
}

/// Required 5 km time and paces for a goal.
///
/// Returns `Ok(None)` when the target time is zero, i.e. nothing was entered.
pub fn solve_goal(goal: &TargetGoal) -> Result<Option<ReverseResult>> {
    if goal.seconds == 0.0 {
        return Ok(None);
    }
    if !goal.seconds.is_finite() || goal.seconds < 0.0 {
        warn!(seconds = goal.seconds, "Rejected reverse goal time");
        return Err(CalculationError::invalid("reverse_goal", "seconds", goal.seconds).into());
    }
    if !goal.distance_km.is_finite() || goal.distance_km <= 0.0 {
        warn!(distance_km = goal.distance_km, "Rejected reverse goal distance");
        return Err(
            CalculationError::invalid("reverse_goal", "distance_km", goal.distance_km).into(),
        );
    }

    let required = solve_required_5k(goal.distance_km, goal.seconds);
    debug!(
        distance_km = goal.distance_km,
        target_seconds = goal.seconds,
        required_5k_seconds = required,
        "Reverse goal solved"
    );

    Ok(Some(ReverseResult {
        required_5k_seconds: required,
        required_5k: format_duration(required),
        required_pace: format_pace(required / 5.0),
        target_pace: format_pace(goal.seconds / goal.distance_km),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::predict_time;

    #[test]
    fn test_sub_four_marathon() {
        let goal = TargetGoal {
            distance_km: 42.195,
            seconds: 4.0 * 3600.0,
        };
        let result = solve_goal(&goal).unwrap().unwrap();

        assert_eq!(result.required_5k, "25:01");
        assert_eq!(result.required_pace, "5:00");
        assert_eq!(result.target_pace, "5:41");
    }

    #[test]
    fn test_zero_target_produces_nothing() {
        let goal = TargetGoal {
            distance_km: 21.1,
            seconds: 0.0,
        };
        assert!(solve_goal(&goal).unwrap().is_none());
    }

    #[test]
    fn test_invalid_goal() {
        let zero_distance = TargetGoal {
            distance_km: 0.0,
            seconds: 3600.0,
        };
        assert!(solve_goal(&zero_distance).is_err());

        let negative = TargetGoal {
            distance_km: 10.0,
            seconds: -60.0,
        };
        assert!(solve_goal(&negative).is_err());
    }

    #[test]
    fn test_five_k_goal_is_identity() {
        assert!((solve_required_5k(5.0, 1234.0) - 1234.0).abs() < 1e-9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "target distance must be positive")]
    fn test_solver_requires_positive_distance() {
        solve_required_5k(0.0, 3600.0);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_reverse_round_trip(
            five_k in 900.0f64..3600.0,
            distance in 0.5f64..100.0
        ) {
            let predicted = predict_time(five_k, 5.0, distance);
            let recovered = solve_required_5k(distance, predicted);
            prop_assert!((recovered - five_k).abs() < 1e-6);
        }
    }
}
