use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Persona intensity label attached to each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Personality {
    Mild,
    Medium,
    Upset,
    Serious,
    Angry,
    Tired,
}

impl Personality {
    /// Moods offered by the `mood ?` menu, in menu order.
    pub const SELECTABLE: [Personality; 5] = [
        Personality::Mild,
        Personality::Upset,
        Personality::Serious,
        Personality::Angry,
        Personality::Tired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Mild => "mild",
            Personality::Medium => "medium",
            Personality::Upset => "upset",
            Personality::Serious => "serious",
            Personality::Angry => "angry",
            Personality::Tired => "tired",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Personality::Mild => "Mild",
            Personality::Medium => "Medium",
            Personality::Upset => "Upset",
            Personality::Serious => "Serious",
            Personality::Angry => "Angry",
            Personality::Tired => "Tired",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Personality::Mild => "Tired and snarky, moderately bitter about current events",
            Personality::Medium | Personality::Upset => {
                "More vocal and frustrated, drawing historical parallels"
            }
            Personality::Serious => "Darker and philosophical, worried about democracy",
            Personality::Angry => "Fully engaged and intensely passionate, no longer holding back",
            Personality::Tired => "Exhausted and ready to end conversation, low energy",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Personality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(Personality::Mild),
            "medium" => Ok(Personality::Medium),
            "upset" => Ok(Personality::Upset),
            "serious" => Ok(Personality::Serious),
            "angry" => Ok(Personality::Angry),
            "tired" => Ok(Personality::Tired),
            other => Err(ConfigError::UnknownMood(other.to_string())),
        }
    }
}

/// One slice of a progression profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub id: &'static str,
    pub start_turn: u32,
    pub personality: Personality,
    pub reply_words_min: u32,
    pub reply_words_max: u32,
}

const fn stage(
    id: &'static str,
    start_turn: u32,
    personality: Personality,
    reply_words_min: u32,
    reply_words_max: u32,
) -> Stage {
    Stage {
        id,
        start_turn,
        personality,
        reply_words_min,
        reply_words_max,
    }
}

// Ids are spaced so stages can be inserted later (e.g. stage_15).
static SLOW_STAGES: [Stage; 6] = [
    stage("stage_10", 0, Personality::Mild, 30, 40),
    stage("stage_20", 1, Personality::Mild, 15, 85),
    stage("stage_30", 5, Personality::Upset, 30, 105),
    stage("stage_40", 8, Personality::Serious, 30, 125),
    stage("stage_50", 10, Personality::Angry, 30, 145),
    stage("stage_90", 15, Personality::Tired, 30, 85),
];

static FAST_STAGES: [Stage; 6] = [
    stage("stage_10", 0, Personality::Mild, 30, 40),
    stage("stage_20", 1, Personality::Mild, 15, 85),
    stage("stage_30", 3, Personality::Medium, 30, 105),
    stage("stage_40", 5, Personality::Serious, 30, 125),
    stage("stage_50", 7, Personality::Angry, 30, 145),
    stage("stage_90", 12, Personality::Tired, 30, 85),
];

/// Named progression profile controlling how quickly the persona escalates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProgressionSpeed {
    #[default]
    Slow,
    Fast,
}

impl ProgressionSpeed {
    pub const ALL: [ProgressionSpeed; 2] = [ProgressionSpeed::Slow, ProgressionSpeed::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressionSpeed::Slow => "slow",
            ProgressionSpeed::Fast => "fast",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProgressionSpeed::Slow => "Slow Progression",
            ProgressionSpeed::Fast => "Fast Progression",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProgressionSpeed::Slow => "Game advance gradually over 25+ turns",
            ProgressionSpeed::Fast => "Game reaches final stage quickly over 12+ turns",
        }
    }

    /// Stages of this profile, ordered by strictly increasing `start_turn`.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            ProgressionSpeed::Slow => &SLOW_STAGES,
            ProgressionSpeed::Fast => &FAST_STAGES,
        }
    }
}

impl fmt::Display for ProgressionSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressionSpeed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(ProgressionSpeed::Slow),
            "fast" => Ok(ProgressionSpeed::Fast),
            other => Err(ConfigError::UnknownSpeed(other.to_string())),
        }
    }
}

/// Resolve the last stage reached at `turn_count`.
///
/// Pure in `(turn_count, speed)`. Every profile starts with a stage at turn 0,
/// so the first stage is returned when nothing later has been reached.
pub fn resolve_stage(turn_count: u32, speed: ProgressionSpeed) -> &'static Stage {
    let stages = speed.stages();
    stages
        .iter()
        .rev()
        .find(|s| turn_count >= s.start_turn)
        .unwrap_or(&stages[0])
}
