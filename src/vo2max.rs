//! VO2max estimation module
//!
//! Estimates maximal oxygen uptake (ml/kg/min) from a 5 km race time using the
//! Daniels/Gilbert regression. The numerator is the oxygen cost of running at race
//! velocity; the denominator is the fraction of VO2max sustainable for the race
//! duration.

/// Race distance the regression is evaluated over, in metres
const RACE_METRES: f64 = 5000.0;

/// Estimate VO2max from a 5 km time in seconds, rounded to one decimal.
///
/// Returns `0.0` when the time is zero or negative.
pub fn calculate_vo2max(seconds_5k: f64) -> f64 {
    if !(seconds_5k > 0.0) {
        return 0.0;
    }

    let minutes = seconds_5k / 60.0;
    let velocity = RACE_METRES / minutes; // m/min

    let oxygen_cost = -4.60 + 0.182258 * velocity + 0.000104 * velocity * velocity;
    let sustainable_fraction = 0.8
        + 0.1894393 * (-0.012778 * minutes).exp()
        + 0.2989558 * (-0.1932605 * minutes).exp();

    ((oxygen_cost / sustainable_fraction) * 10.0).round() / 10.0
}
