//! Weight-sensitivity table
//!
//! Scales the 5 km baseline by `(new_weight / weight)^0.732` for each whole-kilogram
//! change in -5..=5 and reports how far the 5 km, half marathon and marathon
//! predictions move.

use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::format::format_duration;
use crate::models::WeightSensitivityRow;
use crate::prediction::{predict_time, HALF_MARATHON_KM, MARATHON_KM};

/// Allometric exponent relating body mass to running time
pub const WEIGHT_EXPONENT: f64 = 0.732;

/// Largest weight change, in kg, listed in either direction
pub const MAX_WEIGHT_DELTA_KG: i32 = 5;

/// 5 km time after changing body weight from `current_weight_kg` to `new_weight_kg`
pub fn adjusted_5k_seconds(seconds_5k: f64, current_weight_kg: f64, new_weight_kg: f64) -> f64 {
    seconds_5k * (new_weight_kg / current_weight_kg).powf(WEIGHT_EXPONENT)
}

/// Ten rows, one per weight delta in -5..=5 excluding zero
pub fn compute_weight_sensitivity(
    seconds_5k: f64,
    current_weight_kg: f64,
) -> Result<Vec<WeightSensitivityRow>> {
    if !current_weight_kg.is_finite() || current_weight_kg <= f64::from(MAX_WEIGHT_DELTA_KG) {
        return Err(CalculationError::invalid(
            "weight_sensitivity",
            "weight_kg",
            current_weight_kg,
        )
        .into());
    }
    if !seconds_5k.is_finite() || seconds_5k <= 0.0 {
        return Err(
            CalculationError::invalid("weight_sensitivity", "seconds_5k", seconds_5k).into(),
        );
    }

    let current_half = predict_time(seconds_5k, 5.0, HALF_MARATHON_KM);
    let current_marathon = predict_time(seconds_5k, 5.0, MARATHON_KM);

    let rows: Vec<WeightSensitivityRow> = (-MAX_WEIGHT_DELTA_KG..=MAX_WEIGHT_DELTA_KG)
        .filter(|&delta| delta != 0)
        .map(|delta| {
            let new_weight = current_weight_kg + f64::from(delta);
            let new_5k = adjusted_5k_seconds(seconds_5k, current_weight_kg, new_weight);
            let new_half = predict_time(new_5k, 5.0, HALF_MARATHON_KM);
            let new_marathon = predict_time(new_5k, 5.0, MARATHON_KM);

            WeightSensitivityRow {
                weight_delta_kg: delta,
                resulting_weight_kg: new_weight,
                diff_5k: format_duration((seconds_5k - new_5k).abs()),
                diff_half_marathon: format_duration((current_half - new_half).abs()),
                diff_marathon: format_duration((current_marathon - new_marathon).abs()),
                faster: delta < 0,
            }
        })
        .collect();

    debug!(weight_kg = current_weight_kg, rows = rows.len(), "Weight sensitivity computed");
    Ok(rows)
}
