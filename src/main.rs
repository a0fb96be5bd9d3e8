use anyhow::{anyhow, bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use racepace::config::AppConfig;
use racepace::format::{parse_duration, seconds_from_parts};
use racepace::logging::init_logging;
use racepace::models::{
    AthleteProfile, CalculatorInput, EnvironmentContext, ForwardPredictionResult, Gender,
    PerformanceBaseline, TargetGoal,
};
use racepace::report::{self, OutputFormat};
use racepace::zones::{compute_heart_rate_zones, resolve_max_hr};
use racepace::{LogLevel, PlanGoal, PredictionEngine, TrainingPlanGenerator};

/// RacePace - Race Prediction & Training Pace CLI
///
/// Predicts race times from a recent 5 km result and derives training paces,
/// heart-rate zones, energy use and weight/age effects.
#[derive(Parser)]
#[command(name = "racepace")]
#[command(author = "RacePace Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Race Prediction & Training Pace CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format (table, json, csv)
    #[arg(short = 'o', long, default_value = "table", global = true)]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict race times and every derived section from a 5 km time
    Predict {
        /// Current 5 km time (M:SS or H:MM:SS)
        #[arg(short = 't', long)]
        time: Option<String>,

        /// Year of birth
        #[arg(short, long)]
        birth_year: Option<i32>,

        /// Body weight in kg
        #[arg(short, long)]
        weight: Option<f64>,

        /// Gender (man, woman, other)
        #[arg(short, long)]
        gender: Option<String>,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting_hr: Option<u16>,

        /// Maximum heart rate in bpm
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        max_hr: Option<u16>,

        /// Race-day temperature in °C
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<f64>,
    },

    /// Compute the 5 km time needed for a goal race
    Reverse {
        /// Goal distance in km
        #[arg(short, long)]
        distance: f64,

        /// Goal hours
        #[arg(long)]
        hours: Option<u32>,

        /// Goal minutes
        #[arg(long)]
        minutes: Option<u32>,

        /// Goal seconds
        #[arg(long)]
        seconds: Option<u32>,
    },

    /// Show a training plan with personalised paces
    Plan {
        /// Plan goal (5k, 10k)
        #[arg(short, long, default_value = "5k")]
        goal: String,

        /// Current 5 km time (M:SS or H:MM:SS)
        #[arg(short = 't', long)]
        time: Option<String>,
    },

    /// Show heart-rate training zones
    Zones {
        /// Year of birth
        #[arg(short, long)]
        birth_year: Option<i32>,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting_hr: Option<u16>,

        /// Maximum heart rate in bpm
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        max_hr: Option<u16>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load_or_default(Some(config_path.as_path()))?;

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(log_config.level, cli.verbose);
    init_logging(&log_config)?;

    let format: OutputFormat = cli.format.parse().map_err(|e| anyhow!("{}", e))?;
    let reference_year = chrono::Local::now().year();

    match cli.command {
        Commands::Predict {
            time,
            birth_year,
            weight,
            gender,
            resting_hr,
            max_hr,
            temperature,
        } => {
            let athlete = &config.athlete;
            let seconds = five_k_seconds(time.as_deref().or(athlete.five_k_time.as_deref()))?;
            let gender = match gender {
                Some(text) => text.parse::<Gender>().map_err(|e| anyhow!(e))?,
                None => athlete.gender,
            };

            let input = CalculatorInput {
                profile: AthleteProfile {
                    birth_year: birth_year
                        .or(athlete.birth_year)
                        .context("A birth year is required (--birth-year or athlete.birth_year)")?,
                    weight_kg: weight
                        .or(athlete.weight_kg)
                        .context("A weight is required (--weight or athlete.weight_kg)")?,
                    gender,
                    resting_hr: resting_hr.or(athlete.resting_hr),
                    max_hr: max_hr.or(athlete.max_hr),
                },
                baseline: PerformanceBaseline::five_k(seconds),
                environment: EnvironmentContext {
                    temperature_c: temperature.unwrap_or(config.calculator.default_temperature_c),
                },
                reference_year,
            };

            let result =
                PredictionEngine::forecast_with(&input, &config.calculator.energy_distances)
                    .map_err(|e| anyhow!(e.user_message()))?;

            match format {
                OutputFormat::Table => print_forecast(&result, input.environment.temperature_c),
                OutputFormat::Json => println!("{}", report::to_json(&result)?),
                OutputFormat::Csv => print!("{}", report::forecast_csv(&result)?),
            }
        }

        Commands::Reverse {
            distance,
            hours,
            minutes,
            seconds,
        } => {
            let goal = TargetGoal {
                distance_km: distance,
                seconds: seconds_from_parts(hours, minutes, seconds),
            };

            let Some(result) = racepace::solve_goal(&goal).map_err(|e| anyhow!(e.user_message()))?
            else {
                println!("{}", "Enter a goal time to see the required 5 km time.".yellow());
                return Ok(());
            };

            match format {
                OutputFormat::Table => {
                    println!("{}", format!("Goal: {} km", distance).cyan().bold());
                    println!("  Required 5 km time: {}", result.required_5k.green().bold());
                    println!("  Required 5 km pace: {} min/km", result.required_pace);
                    println!("  Goal race pace:     {} min/km", result.target_pace);
                }
                OutputFormat::Json => println!("{}", report::to_json(&result)?),
                OutputFormat::Csv => print!("{}", report::to_csv(std::slice::from_ref(&result))?),
            }
        }

        Commands::Plan { goal, time } => {
            let goal: PlanGoal = goal.parse().map_err(|e| anyhow!("{}", e))?;
            let seconds = match time.as_deref().or(config.athlete.five_k_time.as_deref()) {
                Some(text) => parse_duration(text)?,
                None => 0.0,
            };
            let plan = TrainingPlanGenerator::personalize(goal, seconds);

            match format {
                OutputFormat::Table => {
                    println!("{}", plan.title.cyan().bold());
                    println!("{}", plan.description.dimmed());
                    println!("{}", report::plan_table(&plan));
                }
                OutputFormat::Json => println!("{}", report::to_json(&plan)?),
                OutputFormat::Csv => bail!("CSV output is not available for training plans"),
            }
        }

        Commands::Zones {
            birth_year,
            resting_hr,
            max_hr,
        } => {
            let athlete = &config.athlete;
            // A stored max HR of 0 means "not measured"
            let measured = max_hr.or(athlete.max_hr.filter(|&hr| hr > 0));
            let age = match (measured, birth_year.or(athlete.birth_year)) {
                (Some(_), year) => year.map(|y| reference_year - y).unwrap_or(0),
                (None, Some(year)) => reference_year - year,
                (None, None) => bail!("Either a maximum heart rate or a birth year is required"),
            };
            let max_hr = resolve_max_hr(measured, age)?;
            let zones = compute_heart_rate_zones(max_hr, resting_hr.or(athlete.resting_hr))?;

            match format {
                OutputFormat::Table => {
                    println!("{}", format!("Max HR: {} bpm", max_hr).red().bold());
                    println!("{}", report::zones_table(&zones));
                }
                OutputFormat::Json => println!("{}", report::to_json(&zones)?),
                OutputFormat::Csv => print!("{}", report::to_csv(&zones)?),
            }
        }

        Commands::Config { list, set, get } => {
            if list {
                println!("{}", format!("Configuration: {}", config_path.display()).bold());
                for key in AppConfig::keys() {
                    println!("  {} = {}", key.cyan(), config.get(key)?);
                }
            } else if let Some(key_value) = set {
                let (key, value) = key_value
                    .split_once('=')
                    .context("Expected key=value")?;
                config.set(key.trim(), value)?;
                config.save_to_file(&config_path)?;
                println!("{}", format!("✓ {} updated", key.trim()).green());
            } else if let Some(key) = get {
                println!("{}", config.get(&key)?);
            } else {
                println!("Use --list, --get <key> or --set <key=value>");
            }
        }
    }

    Ok(())
}

fn five_k_seconds(text: Option<&str>) -> Result<f64> {
    let text = text.context("A 5 km time is required (--time or athlete.five_k_time)")?;
    parse_duration(text).map_err(|e| anyhow!(e.user_message()))
}

fn print_forecast(result: &ForwardPredictionResult, temperature_c: f64) {
    println!("{}", "Race predictions".cyan().bold());
    if result.weather_factor > 1.0 {
        println!(
            "{}",
            format!(
                "  Adjusted for {:.0}°C (+{:.1}%)",
                temperature_c,
                (result.weather_factor - 1.0) * 100.0
            )
            .yellow()
        );
    }
    println!("{}", report::predictions_table(&result.predictions));

    println!("{}", "Training paces".cyan().bold());
    println!("{}", report::training_paces_table(&result.training_paces));

    println!("{} {}", "VO2max:".cyan().bold(), format!("{:.1}", result.vo2max).green());

    let potential = &result.age_potential;
    if potential.at_peak {
        println!("{}", format!("Age {}: you are at your physical peak", potential.age).green());
    } else {
        println!(
            "{}",
            format!(
                "Potential at peak age (now {}): 5k {}, half {}, marathon {}",
                potential.age,
                potential.potential_5k,
                potential.potential_half_marathon,
                potential.potential_marathon
            )
            .green()
        );
    }

    if !result.energy.is_empty() {
        println!("{}", "Energy".cyan().bold());
        println!("{}", report::energy_table(&result.energy));
    }

    println!("{}", "Weight sensitivity".cyan().bold());
    println!("{}", report::weight_table(&result.weight_sensitivity));

    println!(
        "{}",
        format!("Heart-rate zones (max {} bpm)", result.heart_rate.max_hr)
            .cyan()
            .bold()
    );
    println!("{}", report::zones_table(&result.heart_rate.zones));
}
