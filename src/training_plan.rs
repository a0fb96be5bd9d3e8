//! Static eight-week training plans personalised with the athlete's 5 km time
//!
//! Session paces are either descriptive ("Easy") or a ratio of 5 km race pace,
//! resolved through [`crate::training::training_pace`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RacePaceError;
use crate::training::training_pace;

/// Available plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanGoal {
    /// Couch to a continuous 5 km
    FiveK,
    /// From 5 km to 10 km
    TenK,
}

impl std::str::FromStr for PlanGoal {
    type Err = RacePaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "5k" | "5" | "five-k" => Ok(Self::FiveK),
            "10k" | "10" | "ten-k" => Ok(Self::TenK),
            _ => Err(RacePaceError::Validation(format!("Unknown training plan: {}", s))),
        }
    }
}

/// How a session's pace is expressed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionPace {
    /// Descriptive effort, shown as-is
    Fixed(&'static str),
    /// Multiple of 5 km race pace
    Relative(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionTemplate {
    pub kind: &'static str,
    pub detail: &'static str,
    pub pace: SessionPace,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekTemplate {
    pub week: u32,
    pub focus: &'static str,
    pub sessions: &'static [SessionTemplate],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanTemplate {
    pub goal: PlanGoal,
    pub title: &'static str,
    pub description: &'static str,
    pub weeks: &'static [WeekTemplate],
}

const fn session(kind: &'static str, detail: &'static str, pace: SessionPace) -> SessionTemplate {
    SessionTemplate { kind, detail, pace }
}

const FIVE_K_WEEKS: &[WeekTemplate] = &[
    WeekTemplate {
        week: 1,
        focus: "Getting used to moving",
        sessions: &[
            session("Walk/Jog", "8x (1 min jog, 2 min walk)", SessionPace::Fixed("Easy")),
            session("Walk/Jog", "6x (2 min jog, 2 min walk)", SessionPace::Fixed("Easy")),
            session("Easy run", "15 min brisk walking", SessionPace::Fixed("Walk")),
        ],
    },
    WeekTemplate {
        week: 2,
        focus: "The first steps",
        sessions: &[
            session("Walk/Jog", "5x (3 min jog, 2 min walk)", SessionPace::Fixed("Easy")),
            session("Walk/Jog", "4x (4 min jog, 2 min walk)", SessionPace::Fixed("Easy")),
            session("Easy run", "20 min alternating jog/walk", SessionPace::Fixed("Own feel")),
        ],
    },
    WeekTemplate {
        week: 8,
        focus: "The finale",
        sessions: &[
            session("Recovery", "20 min jogging", SessionPace::Relative(1.3)),
            session("Sharpener", "2 km jogging, 5 min walking", SessionPace::Relative(1.2)),
            session("RACE", "5 km non-stop!", SessionPace::Relative(1.0)),
        ],
    },
];

const TEN_K_WEEKS: &[WeekTemplate] = &[
    WeekTemplate {
        week: 1,
        focus: "Building volume",
        sessions: &[
            session("Long run", "5 km easy", SessionPace::Relative(1.35)),
            session("Interval", "6x 400 m fast (2 min rest)", SessionPace::Relative(0.95)),
            session("Long run", "7 km easy", SessionPace::Relative(1.35)),
        ],
    },
    WeekTemplate {
        week: 2,
        focus: "Adding speed",
        sessions: &[
            session("Recovery", "4 km very easy", SessionPace::Relative(1.45)),
            session("Tempo", "3 km at tempo", SessionPace::Relative(1.10)),
            session("Long run", "8 km easy", SessionPace::Relative(1.35)),
        ],
    },
    WeekTemplate {
        week: 8,
        focus: "Taper & race",
        sessions: &[
            session("Shake-out", "30 min very easy", SessionPace::Relative(1.40)),
            session("Sharpener", "2 km at race pace", SessionPace::Relative(1.05)),
            // 10k race pace sits a little slower than 5k pace
            session("RACE", "10 km all out!", SessionPace::Relative(1.05)),
        ],
    },
];

pub const FIVE_K_PLAN: PlanTemplate = PlanTemplate {
    goal: PlanGoal::FiveK,
    title: "Start to Run (0 to 5 km)",
    description: "From the couch to a continuous 5 kilometres in 8 weeks.",
    weeks: FIVE_K_WEEKS,
};

pub const TEN_K_PLAN: PlanTemplate = PlanTemplate {
    goal: PlanGoal::TenK,
    title: "On to 10 km",
    description: "For runners who already have the 5 km under control.",
    weeks: TEN_K_WEEKS,
};

impl PlanGoal {
    pub fn template(&self) -> &'static PlanTemplate {
        match self {
            Self::FiveK => &FIVE_K_PLAN,
            Self::TenK => &TEN_K_PLAN,
        }
    }
}

/// A session with its pace resolved for one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSession {
    pub kind: String,
    pub detail: String,
    pub pace: String,
    /// Whether `pace` is a min/km value rather than a description
    pub is_timed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWeek {
    pub week: u32,
    pub focus: String,
    pub sessions: Vec<PlannedSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedPlan {
    pub goal: PlanGoal,
    pub title: String,
    pub description: String,
    pub weeks: Vec<PlannedWeek>,
}

/// Training plan personaliser
pub struct TrainingPlanGenerator;

impl TrainingPlanGenerator {
    /// Resolve every session pace of `goal`'s plan against `seconds_5k`
    pub fn personalize(goal: PlanGoal, seconds_5k: f64) -> PersonalizedPlan {
        let template = goal.template();
        debug!(?goal, seconds_5k, "Personalising training plan");

        PersonalizedPlan {
            goal,
            title: template.title.to_string(),
            description: template.description.to_string(),
            weeks: template
                .weeks
                .iter()
                .map(|week| PlannedWeek {
                    week: week.week,
                    focus: week.focus.to_string(),
                    sessions: week
                        .sessions
                        .iter()
                        .map(|s| Self::resolve_session(s, seconds_5k))
                        .collect(),
                })
                .collect(),
        }
    }

    fn resolve_session(session: &SessionTemplate, seconds_5k: f64) -> PlannedSession {
        let (pace, is_timed) = match session.pace {
            SessionPace::Fixed(text) => (text.to_string(), false),
            SessionPace::Relative(multiplier) => (training_pace(seconds_5k, multiplier), true),
        };
        PlannedSession {
            kind: session.kind.to_string(),
            detail: session.detail.to_string(),
            pace,
            is_timed,
        }
    }
}
