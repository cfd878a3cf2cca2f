//! Match file processing
//!
//! Turns the lines of one match record into rating points for every
//! participant, tallies both team scores and rewards the winning side.

use serde::{Deserialize, Serialize};

use crate::{Discipline, MvpError, PlayerRegistry, Result};

/// Raw lines of one match, as read from its file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Where the record came from (usually the file path)
    pub source: String,
    pub lines: Vec<String>,
}

impl MatchRecord {
    pub fn new(source: impl Into<String>, lines: Vec<String>) -> Self {
        MatchRecord {
            source: source.into(),
            lines,
        }
    }

    pub fn from_text(source: impl Into<String>, text: &str) -> Self {
        Self::new(source, text.lines().map(str::to_string).collect())
    }
}

/// Score tally of one team within a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub score: i64,
    /// Nicknames of the players who played for the team, in line order
    pub players: Vec<String>,
}

/// Summary of a processed match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub source: String,
    pub discipline: Discipline,
    /// Both teams, in order of first appearance
    pub teams: Vec<TeamScore>,
    pub winner: String,
    /// Nicknames registered for the first time by this match
    pub new_players: Vec<String>,
}

/// One decoded player line
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlayerLine {
    name: String,
    nickname: String,
    team: String,
    position: String,
    marks: Vec<i64>,
}

fn parse_line(
    discipline: Discipline,
    source: &str,
    line_number: usize,
    line: &str,
) -> Result<PlayerLine> {
    let malformed = || MvpError::MalformedMatchLine {
        record: source.to_string(),
        line_number,
        line: line.to_string(),
    };

    let caps = discipline.line_grammar().captures(line).ok_or_else(malformed)?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();

    // jersey number (group 3) is checked by the grammar and dropped
    let marks = (6..caps.len())
        .map(|i| field(i).parse::<i64>().map_err(|_| malformed()))
        .collect::<Result<Vec<_>>>()?;

    Ok(PlayerLine {
        name: field(1).to_string(),
        nickname: field(2).to_string(),
        team: field(4).to_string(),
        position: field(5).to_string(),
        marks,
    })
}

/// Process one match record against the tournament's player registry.
///
/// Every participant gets the rating points of the match; players of the
/// strictly higher-scoring team then receive `winner_bonus` on top.
pub fn process_match(
    record: &MatchRecord,
    registry: &mut PlayerRegistry,
    winner_bonus: i64,
) -> Result<MatchOutcome> {
    let header = record
        .lines
        .first()
        .ok_or_else(|| MvpError::EmptyMatchRecord {
            record: record.source.clone(),
        })?;
    let discipline = Discipline::lookup(header)?;

    log::debug!("Processing {} match {}", discipline, record.source);

    let mut teams: Vec<TeamScore> = Vec::with_capacity(2);
    let mut new_players = Vec::new();

    for (offset, line) in record.lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_line(discipline, &record.source, offset + 1, line)?;

        let (player, created) = registry.get_or_insert(&entry.name, &entry.nickname);
        if created {
            new_players.push(entry.nickname.clone());
        }

        player.record_match(&entry.marks, discipline, &entry.position)?;
        let contribution = player.team_contribution(&entry.marks, discipline)?;

        let team = match teams.iter().position(|t| t.name == entry.team) {
            Some(idx) => &mut teams[idx],
            None => {
                teams.push(TeamScore {
                    name: entry.team.clone(),
                    score: 0,
                    players: Vec::new(),
                });
                let last = teams.len() - 1;
                &mut teams[last]
            }
        };
        team.score = team
            .score
            .checked_add(contribution)
            .ok_or_else(|| MvpError::ScoreOverflow {
                subject: format!("team '{}' in '{}'", team.name, record.source),
            })?;
        team.players.push(entry.nickname);
    }

    let (team_a, team_b) = match teams.as_slice() {
        [a, b] => (a, b),
        _ => {
            return Err(MvpError::InvalidTeamCount {
                record: record.source.clone(),
                teams: teams.iter().map(|t| t.name.clone()).collect(),
            })
        }
    };

    let winner = match team_a.score.cmp(&team_b.score) {
        std::cmp::Ordering::Greater => team_a,
        std::cmp::Ordering::Less => team_b,
        std::cmp::Ordering::Equal => {
            return Err(MvpError::DrawNotAllowed {
                record: record.source.clone(),
                team_a: team_a.name.clone(),
                team_b: team_b.name.clone(),
                score: team_a.score,
            })
        }
    };

    for nickname in &winner.players {
        let player = registry
            .get_mut(nickname)
            .ok_or_else(|| MvpError::NoMatchRecorded {
                nickname: nickname.clone(),
            })?;
        player.apply_bonus(winner_bonus)?;
    }

    log::debug!(
        "  {} {} - {} {}, winner: {}",
        team_a.name,
        team_a.score,
        team_b.score,
        team_b.name,
        winner.name
    );

    let winner = winner.name.clone();
    Ok(MatchOutcome {
        source: record.source.clone(),
        discipline,
        teams,
        winner,
        new_players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_WINNER_BONUS;

    fn record(text: &str) -> MatchRecord {
        MatchRecord::from_text("match.txt", text)
    }

    #[test]
    fn test_basketball_match() {
        let mut registry = PlayerRegistry::new();
        let m = record(
            "BASKETBALL\n\
             player 1;nick1;4;Team A;G;10;2;7\n\
             player 2;nick2;8;Team B;F;0;10;0\n",
        );

        let outcome = process_match(&m, &mut registry, DEFAULT_WINNER_BONUS).unwrap();

        assert_eq!(outcome.discipline, Discipline::Basketball);
        assert_eq!(outcome.winner, "Team A");
        assert_eq!(outcome.teams[0].score, 10);
        assert_eq!(outcome.teams[1].score, 0);
        assert_eq!(outcome.new_players, vec!["nick1", "nick2"]);

        // 45 plus winner bonus
        assert_eq!(registry.get("nick1").unwrap().total_points(), 55);
        assert_eq!(registry.get("nick2").unwrap().total_points(), 20);
    }

    #[test]
    fn test_handball_match_and_case_insensitive_header() {
        let mut registry = PlayerRegistry::new();
        let m = record(
            "handball\n\
             player 1;nick1;4;Team A;G;0;20\n\
             player 2;nick2;8;Team B;F;15;20\n\
             player 3;nick3;15;Team B;F;10;20\n",
        );

        let outcome = process_match(&m, &mut registry, DEFAULT_WINNER_BONUS).unwrap();

        // Team A: -20, Team B: -5 + -10
        assert_eq!(outcome.winner, "Team B");
        assert_eq!(outcome.teams[0].score, -20);
        assert_eq!(outcome.teams[1].score, -15);
        assert_eq!(registry.get("nick1").unwrap().points(), &[10]);
        assert_eq!(registry.get("nick2").unwrap().points(), &[25]);
        assert_eq!(registry.get("nick3").unwrap().points(), &[20]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut registry = PlayerRegistry::new();
        let m = record("BASKETBALL\n\np1;n1;1;A;G;1;0;0\n\np2;n2;2;B;G;0;0;0\n\n");
        let outcome = process_match(&m, &mut registry, 10).unwrap();
        assert_eq!(outcome.winner, "A");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_existing_player_keeps_first_name() {
        let mut registry = PlayerRegistry::new();
        registry.get_or_insert("Original Name", "nick1");
        let m = record("BASKETBALL\nOther Name;nick1;4;A;G;10;2;7\np2;n2;2;B;G;0;0;0");

        let outcome = process_match(&m, &mut registry, 10).unwrap();

        assert_eq!(outcome.new_players, vec!["n2"]);
        assert_eq!(registry.get("nick1").unwrap().name(), "Original Name");
    }

    #[test]
    fn test_malformed_line() {
        let mut registry = PlayerRegistry::new();
        let m = record("BASKETBALL\np1;n1;1;A;G;1;0;0\np2;n2;2;B;GK;0;0;0");

        let err = process_match(&m, &mut registry, 10).unwrap_err();
        match err {
            MvpError::MalformedMatchLine {
                record,
                line_number,
                line,
            } => {
                assert_eq!(record, "match.txt");
                assert_eq!(line_number, 3);
                assert_eq!(line, "p2;n2;2;B;GK;0;0;0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_wrong_stat_count_for_discipline() {
        let mut registry = PlayerRegistry::new();
        let m = record("HANDBALL\np1;n1;1;A;G;1;0;0\np2;n2;2;B;G;0;0");
        let err = process_match(&m, &mut registry, 10).unwrap_err();
        assert!(matches!(err, MvpError::MalformedMatchLine { line_number: 2, .. }));
    }

    #[test]
    fn test_unknown_discipline() {
        let mut registry = PlayerRegistry::new();
        let m = record("CURLING\np1;n1;1;A;G;1;0;0");
        let err = process_match(&m, &mut registry, 10).unwrap_err();
        assert!(matches!(err, MvpError::UnknownDiscipline { ref name } if name == "CURLING"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_record() {
        let mut registry = PlayerRegistry::new();
        let err = process_match(&record(""), &mut registry, 10).unwrap_err();
        assert!(matches!(err, MvpError::EmptyMatchRecord { .. }));
    }

    #[test]
    fn test_unknown_position() {
        let mut registry = PlayerRegistry::new();
        let m = record("HANDBALL\np1;n1;1;A;C;1;0\np2;n2;2;B;G;0;0");
        let err = process_match(&m, &mut registry, 10).unwrap_err();
        assert!(matches!(err, MvpError::MissingPositionRules { .. }));
    }

    #[test]
    fn test_draw_not_allowed() {
        let mut registry = PlayerRegistry::new();
        let m = record("BASKETBALL\np1;n1;1;A;G;5;0;0\np2;n2;2;B;C;5;9;9");
        let err = process_match(&m, &mut registry, 10).unwrap_err();
        match err {
            MvpError::DrawNotAllowed {
                team_a,
                team_b,
                score,
                ..
            } => {
                assert_eq!(team_a, "A");
                assert_eq!(team_b, "B");
                assert_eq!(score, 5);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_team_count_must_be_two() {
        let mut registry = PlayerRegistry::new();
        let one_team = record("BASKETBALL\np1;n1;1;A;G;5;0;0\np2;n2;2;A;C;5;9;9");
        let err = process_match(&one_team, &mut registry, 10).unwrap_err();
        assert!(matches!(err, MvpError::InvalidTeamCount { ref teams, .. } if teams.len() == 1));

        let three_teams =
            record("BASKETBALL\np1;n1;1;A;G;5;0;0\np2;n2;2;B;C;5;9;9\np3;n3;3;C;C;1;1;1");
        let err = process_match(&three_teams, &mut registry, 10).unwrap_err();
        assert!(matches!(err, MvpError::InvalidTeamCount { ref teams, .. } if teams.len() == 3));
    }

    #[test]
    fn test_player_listed_twice_gets_bonus_twice() {
        let mut registry = PlayerRegistry::new();
        let m = record("BASKETBALL\np1;n1;1;A;G;1;0;0\np1;n1;1;A;G;1;0;0\np2;n2;2;B;G;0;0;0");
        process_match(&m, &mut registry, 10).unwrap();
        assert_eq!(registry.get("n1").unwrap().points(), &[2, 22]);
    }

    #[test]
    fn test_jersey_number_is_not_range_checked() {
        let mut registry = PlayerRegistry::new();
        let m = record("BASKETBALL\na;a;99999999999;X;G;1;0;0\nb;b;2;Y;G;0;0;0");
        let outcome = process_match(&m, &mut registry, 10).unwrap();
        assert_eq!(outcome.winner, "X");
        assert_eq!(registry.get("a").unwrap().points(), &[12]);
    }

    #[test]
    fn test_oversized_mark_is_an_error() {
        let mut registry = PlayerRegistry::new();
        let m = record("BASKETBALL\na;a;1;X;G;9223372036854775807;0;0\nb;b;2;Y;G;0;0;0");
        let err = process_match(&m, &mut registry, 10).unwrap_err();
        assert!(matches!(
            err,
            MvpError::ScoreOverflow { ref subject } if subject.contains("'a'")
        ));
    }

    #[test]
    fn test_team_score_overflow_is_an_error() {
        let mut registry = PlayerRegistry::new();
        // each rating fits, the summed goals do not
        let m = record(
            "HANDBALL\n\
             a;a;1;X;F;9223372036854775000;0\n\
             b;b;2;X;F;9223372036854775000;0\n\
             c;c;3;Y;F;0;0",
        );
        let err = process_match(&m, &mut registry, 10).unwrap_err();
        assert!(matches!(
            err,
            MvpError::ScoreOverflow { ref subject } if subject.contains("team 'X'")
        ));
    }
}
