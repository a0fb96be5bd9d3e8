//! Training paces derived from 5 km race pace
//!
//! Each intensity is a fixed ratio of current 5 km pace: above 1.0 is slower
//! (easy and long running), below 1.0 faster (intervals and repetitions).

use crate::format::format_pace;
use crate::models::TrainingPaceRow;

/// A named training intensity relative to 5 km race pace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingIntensity {
    pub name: &'static str,
    pub description: &'static str,
    pub multiplier: f64,
}

pub const TRAINING_INTENSITIES: [TrainingIntensity; 6] = [
    TrainingIntensity {
        name: "Recovery (Easy)",
        description: "Relaxed, conversational pace",
        multiplier: 1.35,
    },
    TrainingIntensity {
        name: "Long run",
        description: "Comfortable",
        multiplier: 1.25,
    },
    TrainingIntensity {
        name: "Marathon pace",
        description: "Steady",
        multiplier: 1.15,
    },
    TrainingIntensity {
        name: "Threshold",
        description: "Comfortably hard",
        multiplier: 1.08,
    },
    TrainingIntensity {
        name: "Interval (VO2max)",
        description: "1 km or 4 min repeats",
        multiplier: 0.95,
    },
    TrainingIntensity {
        name: "Repetition (Speed)",
        description: "200 m / 400 m sprints",
        multiplier: 0.88,
    },
];

/// Pace shown for sessions when no usable 5 km time is known
pub const UNKNOWN_PACE: &str = "00:00";

/// Seconds per kilometre at 5 km race pace
pub fn pace_5k(seconds_5k: f64) -> f64 {
    seconds_5k / 5.0
}

/// All six training paces for a 5 km time
pub fn compute_training_paces(seconds_5k: f64) -> Vec<TrainingPaceRow> {
    let base = pace_5k(seconds_5k);
    TRAINING_INTENSITIES
        .iter()
        .map(|intensity| TrainingPaceRow {
            name: intensity.name.to_string(),
            description: intensity.description.to_string(),
            multiplier: intensity.multiplier,
            pace: format_pace(base * intensity.multiplier),
        })
        .collect()
}

/// Single pace string for `multiplier` times 5 km pace.
///
/// Returns [`UNKNOWN_PACE`] when the 5 km time is zero.
pub fn training_pace(seconds_5k: f64, multiplier: f64) -> String {
    if !(seconds_5k > 0.0) {
        return UNKNOWN_PACE.to_string();
    }
    format_pace(pace_5k(seconds_5k) * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_paces_for_25_minute_5k() {
        let rows = compute_training_paces(1500.0);
        let paces: Vec<&str> = rows.iter().map(|row| row.pace.as_str()).collect();

        // 5k pace 300 s/km
        assert_eq!(paces, vec!["6:45", "6:15", "5:45", "5:24", "4:45", "4:24"]);
        assert_eq!(rows[0].multiplier, 1.35);
    }

    #[test]
    fn test_training_pace_single() {
        assert_eq!(training_pace(1500.0, 1.0), "5:00");
        assert_eq!(training_pace(1500.0, 1.3), "6:30");
        assert_eq!(training_pace(0.0, 1.3), UNKNOWN_PACE);
    }

    #[test]
    fn test_paces_ordered_slow_to_fast() {
        let rows = compute_training_paces(1320.0);
        let seconds: Vec<f64> = TRAINING_INTENSITIES
            .iter()
            .map(|i| pace_5k(1320.0) * i.multiplier)
            .collect();
        assert!(seconds.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(rows.len(), 6);
    }
}
