//! Discipline rule table
//!
//! Static rule sets for every sport played in a Toucan tournament: how a
//! match line is laid out, how marks turn into rating points per position,
//! which marks feed the team score, and the flat per-position extras.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{MvpError, Result};

/// Plain-data rule set for one discipline
#[derive(Debug)]
pub struct RuleSet {
    /// Canonical uppercase name
    pub name: &'static str,
    /// Grammar of a player line: name;nickname;number;team;position;stats...
    pub pattern: &'static str,
    /// Multiplier per mark, keyed by position
    pub multipliers: &'static [(&'static str, &'static [i64])],
    /// (mark index, is addition) pairs making up the team score
    pub score_contribution: &'static [(usize, bool)],
    /// Flat rating points per position
    pub position_bonus: &'static [(&'static str, i64)],
}

// Marks: scored points, rebounds, assists
static BASKETBALL: RuleSet = RuleSet {
    name: "BASKETBALL",
    pattern: r"^([^;]+);([^;]+);([0-9]+);([^;]+);([a-zA-Z]);([0-9]+);([0-9]+);([0-9]+)$",
    multipliers: &[("G", &[2, 3, 1]), ("F", &[2, 2, 2]), ("C", &[2, 1, 3])],
    score_contribution: &[(0, true)],
    position_bonus: &[("G", 0), ("F", 0), ("C", 0)],
};

// Marks: goals made, goals received
static HANDBALL: RuleSet = RuleSet {
    name: "HANDBALL",
    pattern: r"^([^;]+);([^;]+);([0-9]+);([^;]+);([a-zA-Z]);([0-9]+);([0-9]+)$",
    multipliers: &[("G", &[5, -2]), ("F", &[1, -1])],
    score_contribution: &[(0, true), (1, false)],
    position_bonus: &[("G", 50), ("F", 20)],
};

static BASKETBALL_GRAMMAR: Lazy<Regex> = Lazy::new(|| compile(BASKETBALL.pattern));
static HANDBALL_GRAMMAR: Lazy<Regex> = Lazy::new(|| compile(HANDBALL.pattern));

fn compile(pattern: &str) -> Regex {
    // Patterns are compile-time constants covered by tests
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid line grammar {}: {}", pattern, e))
}

/// Sports discipline of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    Basketball,
    Handball,
}

impl Discipline {
    pub const ALL: [Discipline; 2] = [Discipline::Basketball, Discipline::Handball];

    /// Resolve a discipline by name, ignoring case and surrounding whitespace
    pub fn lookup(name: &str) -> Result<Self> {
        let wanted = name.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| MvpError::UnknownDiscipline {
                name: name.to_string(),
            })
    }

    pub fn rules(&self) -> &'static RuleSet {
        match self {
            Discipline::Basketball => &BASKETBALL,
            Discipline::Handball => &HANDBALL,
        }
    }

    pub fn name(&self) -> &'static str {
        self.rules().name
    }

    /// Compiled grammar for a player line of this discipline
    pub fn line_grammar(&self) -> &'static Regex {
        match self {
            Discipline::Basketball => &BASKETBALL_GRAMMAR,
            Discipline::Handball => &HANDBALL_GRAMMAR,
        }
    }

    /// Multipliers applied to the marks of a player in `position`
    pub fn multipliers(&self, position: &str) -> Option<&'static [i64]> {
        self.rules()
            .multipliers
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, m)| *m)
    }

    pub fn score_contribution(&self) -> &'static [(usize, bool)] {
        self.rules().score_contribution
    }

    /// Flat rating points for `position`, 0 when none are defined
    pub fn position_bonus(&self, position: &str) -> i64 {
        self.rules()
            .position_bonus
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }

    pub fn positions(&self) -> impl Iterator<Item = &'static str> {
        self.rules().multipliers.iter().map(|(p, _)| *p)
    }

    /// Number of marks on each player line
    pub fn stat_count(&self) -> usize {
        self.rules()
            .multipliers
            .first()
            .map(|(_, m)| m.len())
            .unwrap_or(0)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        for discipline in Discipline::ALL {
            let name = discipline.name();
            assert_eq!(Discipline::lookup(name).unwrap(), discipline);
            assert_eq!(Discipline::lookup(&name.to_lowercase()).unwrap(), discipline);
        }
        assert_eq!(
            Discipline::lookup("BaSkETBAll").unwrap(),
            Discipline::Basketball
        );
        assert_eq!(Discipline::lookup("handball ").unwrap(), Discipline::Handball);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = Discipline::lookup("mysport").unwrap_err();
        match err {
            MvpError::UnknownDiscipline { name } => assert_eq!(name, "mysport"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_multiplier_arity_matches_stats() {
        for discipline in Discipline::ALL {
            let count = discipline.line_grammar().captures_len() - 1 - 5;
            assert_eq!(discipline.stat_count(), count);
            for position in discipline.positions() {
                assert_eq!(discipline.multipliers(position).unwrap().len(), count);
            }
            for (idx, _) in discipline.score_contribution() {
                assert!(*idx < count);
            }
        }
    }

    #[test]
    fn test_handball_rules() {
        let handball = Discipline::Handball;
        assert_eq!(handball.multipliers("G"), Some(&[5, -2][..]));
        assert_eq!(handball.multipliers("C"), None);
        assert_eq!(handball.position_bonus("G"), 50);
        assert_eq!(handball.position_bonus("F"), 20);
        assert_eq!(handball.position_bonus("X"), 0);
        assert_eq!(handball.score_contribution(), &[(0usize, true), (1, false)]);
    }

    #[test]
    fn test_line_grammar() {
        let grammar = Discipline::Basketball.line_grammar();
        assert!(grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;G;10;2;7"));
        // position must be a single letter
        assert!(!grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;GG;10;2;7"));
        assert!(!grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;1;10;2;7"));
        // marks must be numbers
        assert!(!grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;G;ten;2;7"));
        assert!(!grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;G;;2;7"));
        // wrong field count
        assert!(!grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;G;10;2"));

        let grammar = Discipline::Handball.line_grammar();
        assert!(grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;G;10;2"));
        assert!(!grammar.is_match("Roberto Pastor;RobPasMue;4;Team A;G;10;2;7"));
    }
}
