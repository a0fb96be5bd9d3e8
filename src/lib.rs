// Library interface for RacePace modules
// This allows integration tests to access the core functionality

pub mod age;
pub mod config;
pub mod energy;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod prediction;
pub mod report;
pub mod reverse;
pub mod runs;
pub mod training;
pub mod training_plan;
pub mod vo2max;
pub mod weight;
pub mod zones;

// Re-export commonly used types for convenience
pub use models::*;
pub use prediction::PredictionEngine;
pub use reverse::solve_goal;
pub use training_plan::{PlanGoal, TrainingPlanGenerator};
pub use runs::{Run, RunDraft, RunFilter, RunService};
pub use error::{RacePaceError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
