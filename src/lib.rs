//! Toucan tournament MVP calculator
//!
//! Scores every player of a multi-sport tournament from per-match result
//! files and picks the Most Valuable Player.

pub mod data;
pub mod discipline;
pub mod matches;
pub mod player;
pub mod report;
pub mod tournament;

pub use discipline::Discipline;
pub use matches::{MatchOutcome, MatchRecord};
pub use player::{Player, PlayerRegistry};
pub use tournament::Tournament;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Bonus awarded to every player of the winning team
pub const DEFAULT_WINNER_BONUS: i64 = 10;

/// Application-wide errors
#[derive(Debug, Error)]
pub enum MvpError {
    #[error(
        "The provided discipline name '{name}' is not implemented. \
         Consider adding it to the discipline rule table."
    )]
    UnknownDiscipline { name: String },

    #[error(
        "Problems retrieving evaluation parameters for '{discipline}' in position '{position}'"
    )]
    MissingPositionRules { discipline: String, position: String },

    #[error(
        "Evaluation parameters for '{discipline}' in position '{position}' do not match \
         the marks given: expected {expected}, found {found}"
    )]
    MarksArityMismatch {
        discipline: String,
        position: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "Failed to process tournament... error on match file '{record}' \
         line {line_number}: '{line}'"
    )]
    MalformedMatchLine {
        record: String,
        line_number: usize,
        line: String,
    },

    #[error("Match file '{record}' has no discipline line")]
    EmptyMatchRecord { record: String },

    #[error("Match file '{record}' must have exactly two teams, found {}: {teams:?}", .teams.len())]
    InvalidTeamCount { record: String, teams: Vec<String> },

    #[error(
        "Matches cannot end in a draw: '{team_a}' and '{team_b}' tied at {score} in '{record}'"
    )]
    DrawNotAllowed {
        record: String,
        team_a: String,
        team_b: String,
        score: i64,
    },

    #[error("The provided directory path {} is not a directory: {reason}", .path.display())]
    InvalidInputSource { path: PathBuf, reason: String },

    #[error("Score of {subject} does not fit in a 64-bit integer")]
    ScoreOverflow { subject: String },

    #[error("Player '{nickname}' has no recorded match to amend")]
    NoMatchRecorded { nickname: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MvpError>;

/// Application configuration loaded from toucan.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub tournament: TournamentConfig,
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    pub data_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points added to the latest match of each winning player
    pub winner_bonus: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// One of table, json or csv
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tournament: TournamentConfig {
                name: "Toucan Tournament".to_string(),
                data_dir: "data/tournament".to_string(),
            },
            scoring: ScoringConfig {
                winner_bonus: DEFAULT_WINNER_BONUS,
            },
            report: ReportConfig {
                format: "table".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MvpError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| MvpError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MvpError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
