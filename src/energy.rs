//! Energy cost of running, expressed as food equivalents ("chocolate index")

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CalculationError, Result};
use crate::models::EnergyRow;

/// Running energy cost per kilogram of body weight per kilometre
pub const KCAL_PER_KG_PER_KM: f64 = 1.036;

/// kcal in a 100 g chocolate bar
const KCAL_PER_CHOCOLATE_BAR: f64 = 540.0;

/// kcal in one banana
const KCAL_PER_BANANA: f64 = 100.0;

/// Distances (km) shown in the energy section by default
pub const ENERGY_DISPLAY_DISTANCES: [f64; 3] = [10.0, 21.1, 42.195];

/// `total_kcal / kcal_per_item` to one decimal.
///
/// The quotient is rounded as the binary double it is stored as, so 995 / 100
/// (9.9499...) gives 9.9. Only exact ties round up.
fn food_equivalent(total_kcal: u32, kcal_per_item: f64) -> Result<Decimal> {
    let quotient = f64::from(total_kcal) / kcal_per_item;
    Decimal::from_f64_retain(quotient)
        .map(|exact| exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| CalculationError::invalid("energy", "kcal_per_item", kcal_per_item).into())
}

/// Total energy and food equivalents for running `distance_km` at `weight_kg`
pub fn compute_energy(distance_km: f64, weight_kg: f64) -> Result<EnergyRow> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(CalculationError::invalid("energy", "weight_kg", weight_kg).into());
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(CalculationError::invalid("energy", "distance_km", distance_km).into());
    }

    let kcal_per_km = weight_kg * KCAL_PER_KG_PER_KM;
    let total_kcal = (distance_km * kcal_per_km).round() as u32;

    Ok(EnergyRow {
        distance_km,
        total_kcal,
        chocolate_bars: food_equivalent(total_kcal, KCAL_PER_CHOCOLATE_BAR)?,
        bananas: food_equivalent(total_kcal, KCAL_PER_BANANA)?,
    })
}
