//! Rendering calculator results as terminal tables, CSV or JSON

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::error::{RacePaceError, Result};
use crate::models::{
    EnergyRow, ForwardPredictionResult, HeartRateZone, PredictionRow, TrainingPaceRow,
    WeightSensitivityRow,
};
use crate::training_plan::PersonalizedPlan;

/// Output format for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = RacePaceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(RacePaceError::Validation(format!("Unsupported output format: {}", s))),
        }
    }
}

#[derive(Tabled)]
struct PredictionLine {
    #[tabled(rename = "Distance (km)")]
    distance: f64,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Pace (min/km)")]
    pace: String,
}

impl From<&PredictionRow> for PredictionLine {
    fn from(row: &PredictionRow) -> Self {
        Self {
            distance: row.distance_km,
            time: row.time.clone(),
            pace: row.pace.clone(),
        }
    }
}

#[derive(Tabled)]
struct PaceLine {
    #[tabled(rename = "Training")]
    name: String,
    #[tabled(rename = "Feel")]
    description: String,
    #[tabled(rename = "Pace (min/km)")]
    pace: String,
}

impl From<&TrainingPaceRow> for PaceLine {
    fn from(row: &TrainingPaceRow) -> Self {
        Self {
            name: row.name.clone(),
            description: row.description.clone(),
            pace: row.pace.clone(),
        }
    }
}

#[derive(Tabled)]
struct EnergyLine {
    #[tabled(rename = "Distance (km)")]
    distance: f64,
    #[tabled(rename = "kcal")]
    kcal: u32,
    #[tabled(rename = "Chocolate (100 g)")]
    chocolate: String,
    #[tabled(rename = "Bananas")]
    bananas: String,
}

impl From<&EnergyRow> for EnergyLine {
    fn from(row: &EnergyRow) -> Self {
        Self {
            distance: row.distance_km,
            kcal: row.total_kcal,
            chocolate: row.chocolate_bars.to_string(),
            bananas: row.bananas.to_string(),
        }
    }
}

#[derive(Tabled)]
struct WeightLine {
    #[tabled(rename = "Change (kg)")]
    change: String,
    #[tabled(rename = "Weight (kg)")]
    weight: f64,
    #[tabled(rename = "5k")]
    five_k: String,
    #[tabled(rename = "Half marathon")]
    half: String,
    #[tabled(rename = "Marathon")]
    marathon: String,
}

impl From<&WeightSensitivityRow> for WeightLine {
    fn from(row: &WeightSensitivityRow) -> Self {
        let sign = if row.faster { "-" } else { "+" };
        Self {
            change: format!("{:+}", row.weight_delta_kg),
            weight: row.resulting_weight_kg,
            five_k: format!("{}{}", sign, row.diff_5k),
            half: format!("{}{}", sign, row.diff_half_marathon),
            marathon: format!("{}{}", sign, row.diff_marathon),
        }
    }
}

#[derive(Tabled)]
struct ZoneLine {
    #[tabled(rename = "Zone")]
    name: String,
    #[tabled(rename = "Band (%)")]
    band: String,
    #[tabled(rename = "BPM")]
    range: String,
    #[tabled(rename = "Purpose")]
    description: String,
}

impl From<&HeartRateZone> for ZoneLine {
    fn from(zone: &HeartRateZone) -> Self {
        Self {
            name: zone.name.clone(),
            band: format!(
                "{:.0}-{:.0}",
                zone.min_percent * 100.0,
                zone.max_percent * 100.0
            ),
            range: zone.range(),
            description: zone.description.clone(),
        }
    }
}

#[derive(Tabled)]
struct SessionLine {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Session")]
    kind: String,
    #[tabled(rename = "Workout")]
    detail: String,
    #[tabled(rename = "Pace")]
    pace: String,
}

fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn predictions_table(rows: &[PredictionRow]) -> String {
    table(rows.iter().map(PredictionLine::from))
}

pub fn training_paces_table(rows: &[TrainingPaceRow]) -> String {
    table(rows.iter().map(PaceLine::from))
}

pub fn energy_table(rows: &[EnergyRow]) -> String {
    table(rows.iter().map(EnergyLine::from))
}

pub fn weight_table(rows: &[WeightSensitivityRow]) -> String {
    table(rows.iter().map(WeightLine::from))
}

pub fn zones_table(zones: &[HeartRateZone]) -> String {
    table(zones.iter().map(ZoneLine::from))
}

pub fn plan_table(plan: &PersonalizedPlan) -> String {
    table(plan.weeks.iter().flat_map(|week| {
        week.sessions.iter().map(move |session| SessionLine {
            week: week.week,
            kind: session.kind.clone(),
            detail: session.detail.clone(),
            pace: if session.is_timed {
                format!("{} min/km", session.pace)
            } else {
                session.pace.clone()
            },
        })
    }))
}

/// Serialize any result as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize rows as CSV with a header line
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RacePaceError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RacePaceError::Export(e.to_string()))
}

/// Forward result as CSV: one line per predicted distance
pub fn forecast_csv(result: &ForwardPredictionResult) -> Result<String> {
    to_csv(&result.predictions)
}
