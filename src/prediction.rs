//! Forward race-time prediction
//!
//! Race times across distances follow Riegel's power law
//! `t2 = t1 * (d2 / d1)^1.06`. Forward predictions are additionally scaled by a
//! heat penalty above 12 °C. The [`PredictionEngine`] composes every calculator
//! section (predictions, training paces, energy, VO2max, weight table, heart-rate
//! zones and age potential) into one [`ForwardPredictionResult`].

use tracing::{debug, instrument, warn};

use crate::age::compute_age_potential;
use crate::energy::{compute_energy, ENERGY_DISPLAY_DISTANCES};
use crate::error::Result;
use crate::format::{format_duration, format_pace};
use crate::models::{
    CalculatorInput, ForwardPredictionResult, HeartRateSummary, PredictionRow,
};
use crate::training::compute_training_paces;
use crate::vo2max::calculate_vo2max;
use crate::weight::compute_weight_sensitivity;
use crate::zones::{compute_heart_rate_zones, resolve_max_hr};

/// Riegel fatigue exponent
pub const RIEGEL_EXPONENT: f64 = 1.06;

/// Temperature at and below which no heat penalty applies (°C)
pub const IDEAL_TEMPERATURE_C: f64 = 12.0;

/// Slowdown per degree above the ideal temperature
pub const HEAT_PENALTY_PER_DEGREE: f64 = 0.003;

/// Distances (km) reported by the forward pipeline
pub const RACE_DISTANCES: [f64; 7] = [5.0, 10.0, 15.0, 21.1, 25.0, 30.0, 42.195];

pub const HALF_MARATHON_KM: f64 = 21.1;
pub const MARATHON_KM: f64 = 42.195;

/// Predict the time over `target_distance_km` from a performance over `base_distance_km`.
///
/// `base_distance_km` must be positive and `target_distance_km` non-negative;
/// the pipelines validate both before calling.
pub fn predict_time(base_seconds: f64, base_distance_km: f64, target_distance_km: f64) -> f64 {
    debug_assert!(base_distance_km > 0.0, "base distance must be positive");
    debug_assert!(target_distance_km >= 0.0, "target distance must not be negative");
    base_seconds * (target_distance_km / base_distance_km).powf(RIEGEL_EXPONENT)
}

/// Multiplicative heat penalty for a race at `temperature_c`
pub fn weather_factor(temperature_c: f64) -> f64 {
    if temperature_c <= IDEAL_TEMPERATURE_C {
        return 1.0;
    }
    1.0 + (temperature_c - IDEAL_TEMPERATURE_C) * HEAT_PENALTY_PER_DEGREE
}

/// Predicted time and pace for each of `distances`, scaled by `weather`
pub fn predict_distances(
    base_seconds: f64,
    base_distance_km: f64,
    distances: &[f64],
    weather: f64,
) -> Vec<PredictionRow> {
    distances
        .iter()
        .map(|&distance_km| {
            let seconds = predict_time(base_seconds, base_distance_km, distance_km) * weather;
            PredictionRow {
                distance_km,
                seconds,
                time: format_duration(seconds),
                pace: format_pace(seconds / distance_km),
            }
        })
        .collect()
}

/// Runs the complete forward pipeline for one calculator submit
pub struct PredictionEngine;

impl PredictionEngine {
    /// Compute every calculator section from a validated input
    pub fn forecast(input: &CalculatorInput) -> Result<ForwardPredictionResult> {
        Self::forecast_with(input, &ENERGY_DISPLAY_DISTANCES)
    }

    /// Like [`PredictionEngine::forecast`], listing energy rows for `energy_distances` only
    #[instrument(skip_all, fields(baseline_seconds = input.baseline.seconds))]
    pub fn forecast_with(
        input: &CalculatorInput,
        energy_distances: &[f64],
    ) -> Result<ForwardPredictionResult> {
        if let Err(err) = input
            .baseline
            .validate()
            .and_then(|_| input.environment.validate())
        {
            warn!(error = %err, "Rejected forward prediction input");
            return Err(err);
        }

        let baseline = &input.baseline;
        let profile = &input.profile;
        let five_k_seconds = baseline.five_k_seconds();
        let weather = weather_factor(input.environment.temperature_c);

        let predictions = predict_distances(
            baseline.seconds,
            baseline.distance_km,
            &RACE_DISTANCES,
            weather,
        );

        let energy = RACE_DISTANCES
            .iter()
            .filter(|distance| energy_distances.contains(distance))
            .map(|&distance| compute_energy(distance, profile.weight_kg))
            .collect::<Result<Vec<_>>>()?;

        let age = profile.age_at(input.reference_year);
        let max_hr = resolve_max_hr(profile.max_hr, age)?;
        let zones = compute_heart_rate_zones(max_hr, profile.resting_hr)?;

        let result = ForwardPredictionResult {
            weather_factor: weather,
            predictions,
            training_paces: compute_training_paces(five_k_seconds),
            energy,
            vo2max: calculate_vo2max(five_k_seconds),
            weight_sensitivity: compute_weight_sensitivity(five_k_seconds, profile.weight_kg)?,
            heart_rate: HeartRateSummary {
                max_hr,
                resting_hr: profile.resting_hr,
                zones,
            },
            age_potential: compute_age_potential(five_k_seconds, age),
        };

        debug!(
            weather_factor = weather,
            vo2max = result.vo2max,
            max_hr,
            age,
            "Forward prediction computed"
        );

        Ok(result)
    }
}
