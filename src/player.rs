//! Player rating accumulation
//!
//! Per-match rating points for each participant, plus the insertion-ordered
//! registry that owns every player of a tournament.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{Discipline, MvpError, Result, DEFAULT_WINNER_BONUS};

/// A tournament participant, identified by nickname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    nickname: String,
    /// Rating points per match, in processing order
    points: Vec<i64>,
}

impl Player {
    pub fn new(name: impl Into<String>, nickname: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            nickname: nickname.into(),
            points: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn points(&self) -> &[i64] {
        &self.points
    }

    pub fn matches_played(&self) -> usize {
        self.points.len()
    }

    pub fn total_points(&self) -> i64 {
        // every mutation keeps the running total within range
        self.points.iter().sum()
    }

    fn checked_total(&self) -> Option<i64> {
        self.points
            .iter()
            .try_fold(0i64, |acc, &points| acc.checked_add(points))
    }

    fn overflow(&self) -> MvpError {
        MvpError::ScoreOverflow {
            subject: format!("player '{}'", self.nickname),
        }
    }

    /// Score the marks of one match and append them to the player's record.
    ///
    /// The position's flat extra points are folded into the same entry.
    pub fn record_match(
        &mut self,
        marks: &[i64],
        discipline: Discipline,
        position: &str,
    ) -> Result<()> {
        let multipliers =
            discipline
                .multipliers(position)
                .ok_or_else(|| MvpError::MissingPositionRules {
                    discipline: discipline.name().to_string(),
                    position: position.to_string(),
                })?;

        if multipliers.len() != marks.len() {
            return Err(MvpError::MarksArityMismatch {
                discipline: discipline.name().to_string(),
                position: position.to_string(),
                expected: multipliers.len(),
                found: marks.len(),
            });
        }

        let rating = marks
            .iter()
            .zip(multipliers)
            .try_fold(0i64, |acc, (m, k)| acc.checked_add(m.checked_mul(*k)?))
            .and_then(|r| r.checked_add(discipline.position_bonus(position)))
            .ok_or_else(|| self.overflow())?;

        self.points.push(rating);
        if self.checked_total().is_none() {
            self.points.pop();
            return Err(self.overflow());
        }
        Ok(())
    }

    /// Signed contribution of these marks to the player's team score
    pub fn team_contribution(&self, marks: &[i64], discipline: Discipline) -> Result<i64> {
        if marks.len() != discipline.stat_count() {
            return Err(MvpError::MarksArityMismatch {
                discipline: discipline.name().to_string(),
                position: "any".to_string(),
                expected: discipline.stat_count(),
                found: marks.len(),
            });
        }

        discipline
            .score_contribution()
            .iter()
            .try_fold(0i64, |acc, &(idx, is_addition)| {
                if is_addition {
                    acc.checked_add(marks[idx])
                } else {
                    acc.checked_sub(marks[idx])
                }
            })
            .ok_or_else(|| self.overflow())
    }

    /// Add the winner bonus to the most recent match
    pub fn apply_bonus(&mut self, amount: i64) -> Result<()> {
        self.amend_latest(amount)
    }

    pub fn apply_default_bonus(&mut self) -> Result<()> {
        self.apply_bonus(DEFAULT_WINNER_BONUS)
    }

    fn amend_latest(&mut self, amount: i64) -> Result<()> {
        let last = match self.points.len().checked_sub(1) {
            Some(last) => last,
            None => {
                return Err(MvpError::NoMatchRecorded {
                    nickname: self.nickname.clone(),
                })
            }
        };
        let previous = self.points[last];
        let amended = previous.checked_add(amount).ok_or_else(|| self.overflow())?;
        self.points[last] = amended;

        if self.checked_total().is_none() {
            self.points[last] = previous;
            return Err(self.overflow());
        }
        Ok(())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player")?;
        writeln!(f, "......")?;
        writeln!(f, "Name:        {}", self.name)?;
        writeln!(f, "Nickname:    {}", self.nickname)?;
        write!(f, "Points:      {}", self.total_points())
    }
}

/// Nickname-keyed player collection that remembers insertion order
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    index: HashMap<String, usize>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the player with `nickname`, creating it on first sight.
    ///
    /// Returns the player and whether it was just created. An existing
    /// player keeps the name it was first registered with.
    pub fn get_or_insert(&mut self, name: &str, nickname: &str) -> (&mut Player, bool) {
        match self.index.get(nickname).copied() {
            Some(idx) => (&mut self.players[idx], false),
            None => {
                let idx = self.players.len();
                self.players.push(Player::new(name, nickname));
                self.index.insert(nickname.to_string(), idx);
                (&mut self.players[idx], true)
            }
        }
    }

    pub fn get(&self, nickname: &str) -> Option<&Player> {
        self.index.get(nickname).map(|&idx| &self.players[idx])
    }

    pub fn get_mut(&mut self, nickname: &str) -> Option<&mut Player> {
        let idx = self.index.get(nickname).copied()?;
        self.players.get_mut(idx)
    }

    /// Players in the order they were first registered
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
