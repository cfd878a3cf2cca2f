//! Tournament orchestration and MVP selection

use crate::data::MatchSource;
use crate::matches::process_match;
use crate::{MatchOutcome, MatchRecord, Player, PlayerRegistry, Result, DEFAULT_WINNER_BONUS};

/// A Toucan tournament: its players and the outcome of every match
#[derive(Debug, Clone)]
pub struct Tournament {
    name: String,
    players: PlayerRegistry,
    outcomes: Vec<MatchOutcome>,
    /// Registry index of the MVP, set once all matches are processed
    mvp: Option<usize>,
    winner_bonus: i64,
}

impl Tournament {
    pub fn new(name: impl Into<String>) -> Self {
        Tournament {
            name: name.into(),
            players: PlayerRegistry::new(),
            outcomes: Vec::new(),
            mvp: None,
            winner_bonus: DEFAULT_WINNER_BONUS,
        }
    }

    /// Override the bonus given to winning players
    pub fn with_winner_bonus(mut self, bonus: i64) -> Self {
        self.winner_bonus = bonus;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mvp(&self) -> Option<&Player> {
        self.mvp.and_then(|idx| self.players.as_slice().get(idx))
    }

    /// All players in the order they were first seen
    pub fn players(&self) -> &[Player] {
        self.players.as_slice()
    }

    pub fn player(&self, nickname: &str) -> Option<&Player> {
        self.players.get(nickname)
    }

    pub fn outcomes(&self) -> &[MatchOutcome] {
        &self.outcomes
    }

    pub fn matches_processed(&self) -> usize {
        self.outcomes.len()
    }

    /// Load every record of `source` and process them.
    ///
    /// An invalid source is reported before any player is touched.
    pub fn process_source<S: MatchSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        log::info!("Processing tournament '{}' from {}", self.name, source.describe());
        let records = source.load()?;
        self.process_all(&records)
    }

    /// Process match records in the given order, then pick the MVP
    pub fn process_all(&mut self, records: &[MatchRecord]) -> Result<()> {
        for record in records {
            let outcome = process_match(record, &mut self.players, self.winner_bonus)?;
            log::debug!(
                "  {}: {} wins, {} new players",
                outcome.source,
                outcome.winner,
                outcome.new_players.len()
            );
            self.outcomes.push(outcome);
        }

        self.mvp = select_mvp(self.players.as_slice());
        if let Some(mvp) = self.mvp() {
            log::info!(
                "MVP of '{}' is {} with {} points",
                self.name,
                mvp.nickname(),
                mvp.total_points()
            );
        } else {
            log::warn!("Tournament '{}' has no players", self.name);
        }
        Ok(())
    }

    /// Players by total points, highest first; earlier players win ties
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        // sort_by is stable, so insertion order survives among equals
        ranked.sort_by(|a, b| b.total_points().cmp(&a.total_points()));
        ranked
    }
}

/// Index of the player with the strictly highest total, first one on ties
fn select_mvp(players: &[Player]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (idx, player) in players.iter().enumerate() {
        let total = player.total_points();
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((idx, total)),
        }
    }
    best.map(|(idx, _)| idx)
}
