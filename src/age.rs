//! Age-adjusted performance potential
//!
//! Endurance performance is assumed to peak at 28 and to decline by 0.6% per year
//! after that. Dividing the current 5 km by the decline factor gives the time the
//! athlete could have run at peak age.

use crate::format::format_duration;
use crate::models::AgePotential;
use crate::prediction::{predict_time, HALF_MARATHON_KM, MARATHON_KM};

/// Age of peak endurance performance
pub const PEAK_AGE: i32 = 28;

/// Fractional performance loss per year past peak
pub const ANNUAL_DECLINE: f64 = 0.006;

/// Decline factor for `age`; 1.0 at or before peak
pub fn age_factor(age: i32) -> f64 {
    if age > PEAK_AGE {
        1.0 + f64::from(age - PEAK_AGE) * ANNUAL_DECLINE
    } else {
        1.0
    }
}

pub fn compute_age_potential(seconds_5k: f64, age: i32) -> AgePotential {
    let factor = age_factor(age);
    let potential_5k = seconds_5k / factor;

    AgePotential {
        age,
        age_factor: factor,
        at_peak: age <= PEAK_AGE,
        potential_5k_seconds: potential_5k,
        potential_5k: format_duration(potential_5k),
        potential_half_marathon: format_duration(predict_time(potential_5k, 5.0, HALF_MARATHON_KM)),
        potential_marathon: format_duration(predict_time(potential_5k, 5.0, MARATHON_KM)),
    }
}
