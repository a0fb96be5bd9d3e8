use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, Result};

/// Gender collected by the calculator form.
///
/// Kept on the profile for display; none of the prediction formulas read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Man,
    Woman,
    Other,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "man" | "male" | "m" => Ok(Gender::Man),
            "woman" | "female" | "f" | "w" => Ok(Gender::Woman),
            "other" | "x" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// Athlete data used by a single calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Year of birth, used to derive age against the reference year
    pub birth_year: i32,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Collected but unused in formulas
    pub gender: Gender,

    /// Resting heart rate in bpm; enables the Karvonen method
    pub resting_hr: Option<u16>,

    /// Measured maximum heart rate in bpm; otherwise 220 - age
    pub max_hr: Option<u16>,
}

impl AthleteProfile {
    /// Age in whole years at `reference_year`
    pub fn age_at(&self, reference_year: i32) -> i32 {
        reference_year - self.birth_year
    }
}

/// A reference performance, canonically the athlete's current 5 km time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBaseline {
    /// Finish time in seconds
    pub seconds: f64,
    /// Distance in kilometres
    pub distance_km: f64,
}

impl PerformanceBaseline {
    pub const FIVE_K: f64 = 5.0;

    /// Baseline over the canonical 5 km
    pub fn five_k(seconds: f64) -> Self {
        Self {
            seconds,
            distance_km: Self::FIVE_K,
        }
    }

    /// Reject zero, negative or non-finite baselines
    pub fn validate(&self) -> Result<()> {
        if !self.seconds.is_finite() || self.seconds <= 0.0 {
            return Err(CalculationError::invalid("baseline", "seconds", self.seconds).into());
        }
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err(
                CalculationError::invalid("baseline", "distance_km", self.distance_km).into(),
            );
        }
        Ok(())
    }

    /// Equivalent 5 km time for this baseline
    pub fn five_k_seconds(&self) -> f64 {
        crate::prediction::predict_time(self.seconds, self.distance_km, Self::FIVE_K)
    }
}

/// Ambient conditions for a forward prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentContext {
    /// Temperature in degrees Celsius
    pub temperature_c: f64,
}

impl Default for EnvironmentContext {
    fn default() -> Self {
        Self { temperature_c: 15.0 }
    }
}

impl EnvironmentContext {
    /// Reject temperatures that would turn every prediction into NaN or infinity
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_c.is_finite() {
            return Err(
                CalculationError::invalid("weather", "temperature_c", self.temperature_c).into(),
            );
        }
        Ok(())
    }
}

/// Target race for the reverse solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetGoal {
    pub distance_km: f64,
    pub seconds: f64,
}

/// Everything the forward pipeline needs for one submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    pub profile: AthleteProfile,
    pub baseline: PerformanceBaseline,
    pub environment: EnvironmentContext,
    /// Calendar year used to derive age
    pub reference_year: i32,
}

/// Predicted race result for one distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub distance_km: f64,
    pub seconds: f64,
    pub time: String,
    pub pace: String,
}

/// One named training intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPaceRow {
    pub name: String,
    pub description: String,
    pub multiplier: f64,
    pub pace: String,
}

/// One heart-rate training zone with its computed bpm range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZone {
    pub name: String,
    pub min_percent: f64,
    pub max_percent: f64,
    pub description: String,
    pub min_bpm: u16,
    pub max_bpm: u16,
}

impl HeartRateZone {
    /// Range as shown to the user, e.g. `125 - 138`
    pub fn range(&self) -> String {
        format!("{} - {}", self.min_bpm, self.max_bpm)
    }
}

/// Heart-rate section of a forward result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSummary {
    pub max_hr: u16,
    pub resting_hr: Option<u16>,
    pub zones: Vec<HeartRateZone>,
}

/// Effect of a body-weight change on predicted race times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSensitivityRow {
    pub weight_delta_kg: i32,
    pub resulting_weight_kg: f64,
    pub diff_5k: String,
    pub diff_half_marathon: String,
    pub diff_marathon: String,
    pub faster: bool,
}

/// Energy cost of running a distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRow {
    pub distance_km: f64,
    pub total_kcal: u32,
    /// 100 g chocolate bars, one decimal
    pub chocolate_bars: rust_decimal::Decimal,
    /// Bananas, one decimal
    pub bananas: rust_decimal::Decimal,
}

/// Age-adjusted peak potential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgePotential {
    pub age: i32,
    pub age_factor: f64,
    pub at_peak: bool,
    pub potential_5k_seconds: f64,
    pub potential_5k: String,
    pub potential_half_marathon: String,
    pub potential_marathon: String,
}

/// Complete output of the forward prediction pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardPredictionResult {
    pub weather_factor: f64,
    pub predictions: Vec<PredictionRow>,
    pub training_paces: Vec<TrainingPaceRow>,
    pub energy: Vec<EnergyRow>,
    pub vo2max: f64,
    pub weight_sensitivity: Vec<WeightSensitivityRow>,
    pub heart_rate: HeartRateSummary,
    pub age_potential: AgePotential,
}

/// Output of the reverse goal solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseResult {
    pub required_5k_seconds: f64,
    pub required_5k: String,
    pub required_pace: String,
    pub target_pace: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_validation() {
        assert!(EnvironmentContext::default().validate().is_ok());
        assert!(EnvironmentContext { temperature_c: -12.0 }.validate().is_ok());
        assert!(EnvironmentContext { temperature_c: f64::NAN }.validate().is_err());
        assert!(EnvironmentContext { temperature_c: f64::INFINITY }.validate().is_err());
    }

    #[test]
    fn test_baseline_validation() {
        assert!(PerformanceBaseline::five_k(1500.0).validate().is_ok());
        assert!(PerformanceBaseline::five_k(0.0).validate().is_err());
        assert!(PerformanceBaseline::five_k(f64::NAN).validate().is_err());

        let zero_distance = PerformanceBaseline {
            seconds: 1500.0,
            distance_km: 0.0,
        };
        assert!(zero_distance.validate().is_err());
    }

    #[test]
    fn test_five_k_equivalent() {
        let baseline = PerformanceBaseline::five_k(1500.0);
        assert!((baseline.five_k_seconds() - 1500.0).abs() < 1e-9);

        let ten_k = PerformanceBaseline {
            seconds: 3000.0,
            distance_km: 10.0,
        };
        assert!(ten_k.five_k_seconds() < 1500.0);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Woman".parse::<Gender>().unwrap(), Gender::Woman);
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Man);
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn test_age_at() {
        let profile = AthleteProfile {
            birth_year: 1990,
            weight_kg: 70.0,
            gender: Gender::Man,
            resting_hr: None,
            max_hr: None,
        };
        assert_eq!(profile.age_at(2026), 36);
    }

    #[test]
    fn test_zone_range_format() {
        let zone = HeartRateZone {
            name: "Z1".to_string(),
            min_percent: 0.5,
            max_percent: 0.6,
            description: String::new(),
            min_bpm: 125,
            max_bpm: 138,
        };
        assert_eq!(zone.range(), "125 - 138");
    }
}
