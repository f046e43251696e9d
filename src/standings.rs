//! League standings computation
use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;

use crate::matches::Match;

/// Points awarded for a win
pub const WIN_POINTS: u32 = 3;

/// Points awarded (to each team) for a draw
pub const DRAW_POINTS: u32 = 1;

/// A single row of the standings table
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Standing {
    pub team: String,
    pub points: u32,
}

/// A ranked standings table
///
/// Teams are ordered by points (descending), with ties broken by team
/// name (ascending, case-sensitive). Every team referenced by at least
/// one match is included, even if it has no points.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Standings(Vec<Standing>);

impl Standings {
    /// Compute the standings table from a set of match records
    ///
    /// The result does not depend on the order of `matches`.
    pub fn compute<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let points = matches
            .into_iter()
            .fold(HashMap::<&str, u32>::new(), |mut points, m| {
                let (points_1, points_2) = match m.team_1.goals.cmp(&m.team_2.goals) {
                    Ordering::Greater => (WIN_POINTS, 0),
                    Ordering::Less => (0, WIN_POINTS),
                    Ordering::Equal => (DRAW_POINTS, DRAW_POINTS),
                };
                *points.entry(&m.team_1.name).or_default() += points_1;
                *points.entry(&m.team_2.name).or_default() += points_2;
                points
            });
        Self(
            points
                .into_iter()
                .sorted_by(|(l_team, l_points), (r_team, r_points)| {
                    r_points.cmp(l_points).then_with(|| l_team.cmp(r_team))
                })
                .map(|(team, points)| Standing {
                    team: team.to_owned(),
                    points,
                })
                .collect(),
        )
    }

    /// Look up the points of a given team
    #[cfg(test)]
    pub(crate) fn points(&self, team: &str) -> Option<u32> {
        self.0.iter().find(|s| s.team == team).map(|s| s.points)
    }

    /// Iterate over the table, in ranking order
    pub fn iter(&self) -> std::slice::Iter<'_, Standing> {
        self.0.iter()
    }

    /// The number of teams in the table
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Standings {
    type Item = Standing;
    type IntoIter = std::vec::IntoIter<Standing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Standings {
    type Item = &'a Standing;
    type IntoIter = std::slice::Iter<'a, Standing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
