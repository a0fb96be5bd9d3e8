use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::HeartRateZone;

/// Constant of the Haskell-Fox age formula, `max HR = 220 - age`
pub const HASKELL_FOX_CONSTANT: i32 = 220;

/// Heart rate zone calculation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HRZoneMethod {
    /// Percentage of heart-rate reserve (requires resting HR)
    Karvonen { resting_hr: u16 },
    /// Plain percentage of maximum heart rate
    MaxHR,
}

impl HRZoneMethod {
    /// Karvonen when a non-zero resting heart rate is known
    pub fn for_resting_hr(resting_hr: Option<u16>) -> Self {
        match resting_hr {
            Some(resting_hr) if resting_hr > 0 => HRZoneMethod::Karvonen { resting_hr },
            _ => HRZoneMethod::MaxHR,
        }
    }

    fn bpm(&self, max_hr: u16, percent: f64) -> u16 {
        let bpm = match *self {
            HRZoneMethod::Karvonen { resting_hr } => {
                let reserve = f64::from(max_hr) - f64::from(resting_hr);
                reserve * percent + f64::from(resting_hr)
            }
            HRZoneMethod::MaxHR => f64::from(max_hr) * percent,
        };
        bpm.round() as u16
    }
}

/// Fixed zone band as a fraction of maximum (or reserve) heart rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDefinition {
    pub name: &'static str,
    pub min_percent: f64,
    pub max_percent: f64,
    pub description: &'static str,
}

/// Five-zone model:
/// - Z1: 50-60% (Recovery)
/// - Z2: 60-70% (Endurance)
/// - Z3: 70-80% (Aerobic)
/// - Z4: 80-90% (Threshold)
/// - Z5: 90-100% (Maximal)
pub const ZONE_DEFINITIONS: [ZoneDefinition; 5] = [
    ZoneDefinition {
        name: "Z1 (Recovery)",
        min_percent: 0.50,
        max_percent: 0.60,
        description: "Warming up, cooling down",
    },
    ZoneDefinition {
        name: "Z2 (Endurance)",
        min_percent: 0.60,
        max_percent: 0.70,
        description: "Easy, fat burning",
    },
    ZoneDefinition {
        name: "Z3 (Aerobic)",
        min_percent: 0.70,
        max_percent: 0.80,
        description: "Moderate, building fitness",
    },
    ZoneDefinition {
        name: "Z4 (Threshold)",
        min_percent: 0.80,
        max_percent: 0.90,
        description: "Hard, anaerobic threshold",
    },
    ZoneDefinition {
        name: "Z5 (Maximal)",
        min_percent: 0.90,
        max_percent: 1.00,
        description: "Sprints, intervals, exhaustion",
    },
];

/// Measured maximum heart rate, or the age-predicted one when none was measured
pub fn resolve_max_hr(measured: Option<u16>, age: i32) -> Result<u16> {
    if let Some(max_hr) = measured.filter(|&hr| hr > 0) {
        return Ok(max_hr);
    }

    let predicted = HASKELL_FOX_CONSTANT - age;
    if age < 0 || predicted <= 0 {
        return Err(CalculationError::invalid("max_heart_rate", "age", age).into());
    }
    Ok(predicted as u16)
}

/// Heart-rate zones for `max_hr`, using Karvonen when `resting_hr` is known
pub fn compute_heart_rate_zones(max_hr: u16, resting_hr: Option<u16>) -> Result<Vec<HeartRateZone>> {
    if max_hr == 0 {
        return Err(CalculationError::invalid("heart_rate_zones", "max_hr", max_hr).into());
    }

    let method = HRZoneMethod::for_resting_hr(resting_hr);
    if let HRZoneMethod::Karvonen { resting_hr } = method {
        if resting_hr >= max_hr {
            return Err(
                CalculationError::invalid("heart_rate_zones", "resting_hr", resting_hr).into(),
            );
        }
    }

    debug!(max_hr, ?method, "Computing heart rate zones");

    Ok(ZONE_DEFINITIONS
        .iter()
        .map(|zone| HeartRateZone {
            name: zone.name.to_string(),
            min_percent: zone.min_percent,
            max_percent: zone.max_percent,
            description: zone.description.to_string(),
            min_bpm: method.bpm(max_hr, zone.min_percent),
            max_bpm: method.bpm(max_hr, zone.max_percent),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_karvonen_zones() {
        let zones = compute_heart_rate_zones(190, Some(60)).unwrap();
        assert_eq!(zones.len(), 5);
        assert_eq!(zones[0].range(), "125 - 138");
        assert_eq!(zones[3].range(), "164 - 177");
        assert_eq!(zones[4].max_bpm, 190);
    }

    #[test]
    fn test_percent_of_max_zones() {
        let zones = compute_heart_rate_zones(190, None).unwrap();
        assert_eq!(zones[0].range(), "95 - 114");
        assert_eq!(zones[2].range(), "133 - 152");
        assert_eq!(zones[4].range(), "171 - 190");
    }

    #[test]
    fn test_zero_resting_hr_uses_max_method() {
        assert_eq!(HRZoneMethod::for_resting_hr(Some(0)), HRZoneMethod::MaxHR);
        assert_eq!(
            compute_heart_rate_zones(180, Some(0)).unwrap(),
            compute_heart_rate_zones(180, None).unwrap()
        );
    }

    #[test]
    fn test_zones_are_contiguous() {
        let zones = compute_heart_rate_zones(185, Some(52)).unwrap();
        for pair in zones.windows(2) {
            assert_eq!(pair[0].max_bpm, pair[1].min_bpm);
        }
    }

    #[test]
    fn test_resolve_max_hr() {
        assert_eq!(resolve_max_hr(Some(195), 40).unwrap(), 195);
        assert_eq!(resolve_max_hr(None, 40).unwrap(), 180);
        assert_eq!(resolve_max_hr(Some(0), 30).unwrap(), 190);
        assert!(resolve_max_hr(None, 230).is_err());
        assert!(resolve_max_hr(None, -1).is_err());
    }

    #[test]
    fn test_invalid_heart_rates() {
        assert!(compute_heart_rate_zones(0, None).is_err());
        assert!(compute_heart_rate_zones(150, Some(150)).is_err());
        assert!(compute_heart_rate_zones(150, Some(170)).is_err());
    }
}
