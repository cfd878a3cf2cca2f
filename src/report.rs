//! Rendering tournament results as text, JSON or CSV

use serde::Serialize;

use crate::{MvpError, Player, Result, Tournament};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

/// Serializable view of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub rank: usize,
    pub name: String,
    pub nickname: String,
    pub points: Vec<i64>,
    pub total_points: i64,
}

impl PlayerSummary {
    fn new(rank: usize, player: &Player) -> Self {
        PlayerSummary {
            rank,
            name: player.name().to_string(),
            nickname: player.nickname().to_string(),
            points: player.points().to_vec(),
            total_points: player.total_points(),
        }
    }
}

/// Serializable view of a processed tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentReport {
    pub tournament: String,
    pub matches_processed: usize,
    pub mvp: Option<PlayerSummary>,
    pub standings: Vec<PlayerSummary>,
}

impl TournamentReport {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        let standings: Vec<PlayerSummary> = tournament
            .standings()
            .into_iter()
            .enumerate()
            .map(|(i, p)| PlayerSummary::new(i + 1, p))
            .collect();

        let mvp = tournament.mvp().and_then(|mvp| {
            standings
                .iter()
                .find(|s| s.nickname == mvp.nickname())
                .cloned()
        });

        TournamentReport {
            tournament: tournament.name().to_string(),
            matches_processed: tournament.matches_processed(),
            mvp,
            standings,
        }
    }
}

/// Render the MVP announcement
pub fn render_mvp(tournament: &Tournament, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!("Tournament: {}\n", tournament.name()));
            out.push_str(&format!(
                "Matches:    {}\n\n",
                tournament.matches_processed()
            ));
            match tournament.mvp() {
                Some(mvp) => {
                    out.push_str("And the MVP is...\n\n");
                    out.push_str(&format!("{}\n", mvp));
                }
                None => out.push_str("No MVP: the tournament has no players\n"),
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let report = TournamentReport::from_tournament(tournament);
            to_json(&report.mvp)
        }
        OutputFormat::Csv => {
            let report = TournamentReport::from_tournament(tournament);
            Ok(to_csv(report.mvp.iter()))
        }
    }
}

/// Render the full standings
pub fn render_standings(tournament: &Tournament, format: OutputFormat) -> Result<String> {
    let report = TournamentReport::from_tournament(tournament);
    match format {
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!(
                "{:<5} {:<24} {:<16} {:>7} {:>8}\n",
                "Rank", "Name", "Nickname", "Matches", "Points"
            ));
            out.push_str(&format!("{}\n", "-".repeat(64)));
            for s in &report.standings {
                out.push_str(&format!(
                    "{:<5} {:<24} {:<16} {:>7} {:>8}\n",
                    s.rank,
                    s.name,
                    s.nickname,
                    s.points.len(),
                    s.total_points
                ));
            }
            Ok(out)
        }
        OutputFormat::Json => to_json(&report),
        OutputFormat::Csv => Ok(to_csv(report.standings.iter())),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| MvpError::Serialization(e.to_string()))
}

fn to_csv<'a>(rows: impl Iterator<Item = &'a PlayerSummary>) -> String {
    let mut out = String::from("rank,name,nickname,matches,total_points\n");
    for s in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            s.rank,
            csv_field(&s.name),
            csv_field(&s.nickname),
            s.points.len(),
            s.total_points
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
