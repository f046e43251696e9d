//! Match records & match result parsing
//!
//! This module provides the match record definition which is persisted
//! by the [`store`](crate::store), along with a parser for the free-form
//! match results given on the command line, e.g. `"Lions 3, Snakes 3"`.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Match result parsing errors
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(thiserror::Error)]
pub enum MatchError {
    /// One (or both) of the comma-separated teams is missing
    #[error("You must provide two teams")]
    MissingTeam,

    /// One (or both) of the teams lack a valid score
    #[error("You must provide the score for both teams")]
    NoScore,

    /// Both teams have the same name
    #[error("Teams should be different, please try again!")]
    SameTeam,
}

/// A team taking part in a match, along with its goal count
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub goals: u32,
}

impl Team {
    /// Create a new team reference
    pub fn new(name: impl Into<String>, goals: u32) -> Self {
        Self {
            name: name.into(),
            goals,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name.is_empty() {
            true => write!(f, "{}", self.goals),
            false => write!(f, "{} {}", self.name, self.goals),
        }
    }
}

/// A single recorded match result
///
/// Records are never modified once they have been parsed; the order of
/// `team_1` and `team_2` is the order in which they were given.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Match {
    pub team_1: Team,
    pub team_2: Team,
}

impl Match {
    /// Create a new match record from two teams
    pub fn new(team_1: Team, team_2: Team) -> Self {
        Self { team_1, team_2 }
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.team_1, self.team_2)
    }
}

impl TryFrom<&str> for Match {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl FromStr for Match {
    type Err = MatchError;

    /// Parse a match result such as `"Lions 3, Snakes 3"`
    ///
    /// The input is split on the first comma into two teams, and the last
    /// whitespace-separated word of each team is taken as its score. Team
    /// names are compared verbatim, so `"lions"` and `"Lions"` are two
    /// different teams.
    ///
    /// Note that a bare score (e.g. `"3, Snakes 2"`) is accepted and yields
    /// a team with an empty name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s.split_once(',').unwrap_or((s, ""));
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() {
            return Err(MatchError::MissingTeam);
        }

        let team_1 = parse_team(first)?;
        let team_2 = parse_team(second)?;
        if team_1.name == team_2.name {
            return Err(MatchError::SameTeam);
        }
        Ok(Self::new(team_1, team_2))
    }
}

/// Parse a single (trimmed, non-empty) `"<name> <score>"` segment
fn parse_team(segment: &str) -> Result<Team, MatchError> {
    let words = segment.split_whitespace().collect::<Vec<_>>();
    let (score, name) = words.split_last().ok_or(MatchError::MissingTeam)?;
    let goals = parse_goals(score).ok_or(MatchError::NoScore)?;
    Ok(Team::new(name.join(" "), goals))
}

/// Parse a goal count, accepting only plain ASCII digits
fn parse_goals(word: &str) -> Option<u32> {
    match !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
        true => word.parse().ok(),
        false => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_draw() {
        assert_eq!(
            Match::from_str("Lions 3, Snakes 3"),
            Ok(Match {
                team_1: Team::new("Lions", 3),
                team_2: Team::new("Snakes", 3),
            })
        );
    }

    #[test]
    fn parse_multi_word_names() {
        assert_eq!(
            Match::from_str("  FC   awesome 1 ,Tarantulas 0  "),
            Ok(Match {
                team_1: Team::new("FC awesome", 1),
                team_2: Team::new("Tarantulas", 0),
            })
        );
    }

    #[test]
    fn parse_missing_team() {
        assert_eq!(Match::from_str("Lions 1,"), Err(MatchError::MissingTeam));
        assert_eq!(Match::from_str(", Lions 1"), Err(MatchError::MissingTeam));
        assert_eq!(Match::from_str("Lions 1"), Err(MatchError::MissingTeam));
        assert_eq!(Match::from_str(" ,  "), Err(MatchError::MissingTeam));
        assert_eq!(Match::from_str(""), Err(MatchError::MissingTeam));
    }

    #[test]
    fn parse_no_score() {
        assert_eq!(
            Match::from_str("Lions aa, Giants 4"),
            Err(MatchError::NoScore)
        );
        assert_eq!(Match::from_str("Lions, Giants 4"), Err(MatchError::NoScore));
        assert_eq!(Match::from_str("Lions -1, Giants 4"), Err(MatchError::NoScore));
        assert_eq!(Match::from_str("Lions 1.5, Giants 4"), Err(MatchError::NoScore));
        assert_eq!(Match::from_str("Lions 1, Giants +4"), Err(MatchError::NoScore));
        assert_eq!(
            Match::from_str("Lions 99999999999, Giants 4"),
            Err(MatchError::NoScore)
        );
    }

    #[test]
    fn parse_same_team() {
        assert_eq!(
            Match::from_str("Lions 1, Lions 1"),
            Err(MatchError::SameTeam)
        );
        assert_eq!(
            Match::from_str("Lions  FC 1, Lions FC 2"),
            Err(MatchError::SameTeam)
        );
        assert_eq!(Match::from_str("1, 2"), Err(MatchError::SameTeam));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            Match::from_str("Lions 1, lions 2"),
            Ok(Match {
                team_1: Team::new("Lions", 1),
                team_2: Team::new("lions", 2),
            })
        );
    }

    #[test]
    fn parse_splits_on_first_comma() {
        assert_eq!(
            Match::from_str("Lions 1, Snakes, Inc. 2"),
            Ok(Match {
                team_1: Team::new("Lions", 1),
                team_2: Team::new("Snakes, Inc.", 2),
            })
        );
    }

    #[test]
    fn parse_bare_score() {
        assert_eq!(
            Match::from_str("3, Snakes 2"),
            Ok(Match {
                team_1: Team::new("", 3),
                team_2: Team::new("Snakes", 2),
            })
        );
    }

    #[test]
    fn parse_is_pure() {
        let input = "Lions 4, Grouches 0";
        assert_eq!(Match::try_from(input), Match::try_from(input));
    }

    #[test]
    fn display() {
        let parsed = Match::from_str("FC awesome 1, Lions 1").unwrap();
        assert_eq!(parsed.to_string(), "FC awesome 1, Lions 1");
        assert_eq!(Team::new("", 3).to_string(), "3");
    }

    #[test]
    fn json_layout() -> Result<(), serde_json::Error> {
        let parsed = Match::from_str("Lions 3, Snakes 1").unwrap();
        assert_eq!(
            serde_json::to_value(&parsed)?,
            serde_json::json!({
                "team_1": {"name": "Lions", "goals": 3},
                "team_2": {"name": "Snakes", "goals": 1},
            })
        );
        Ok(())
    }

    #[test]
    fn json_rejects_negative_goals() {
        let result = serde_json::from_str::<Match>(
            r#"{"team_1": {"name": "Lions", "goals": -1}, "team_2": {"name": "Snakes", "goals": 1}}"#,
        );
        assert!(result.is_err());
    }
}
