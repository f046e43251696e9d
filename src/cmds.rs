//! Command-line interface implementations
use comfy_table::Table;

use crate::matches::Match;
use crate::standings::Standings;

/// Generate a `Table` containing the given `matches`
///
/// This function generates a [comfy-table] `Table` listing all matches in
/// the order they were given, numbered starting at 1. The numbers are for
/// display only, and are not stored anywhere.
///
/// [comfy-table]: https://docs.rs/comfy-table/latest/comfy_table/
pub fn list_matches<'a, I>(matches: I) -> Table
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut table = Table::new();
    table.set_header(vec![
        "#",      // index
        "Team 1", // team_1.name
        "Team 2", // team_2.name
        "Score",  // team_1.goals - team_2.goals
    ]);
    matches
        .into_iter()
        .enumerate()
        .fold(table, |mut table, (idx, game)| {
            table.add_row(vec![
                (idx + 1).to_string(),
                game.team_1.name.clone(),
                game.team_2.name.clone(),
                format!("{} - {}", game.team_1.goals, game.team_2.goals),
            ]);
            table
        })
}

/// Generate a `Table` containing the given `standings`
///
/// This function generates a [comfy-table] `Table` with one row per team,
/// in ranking order.
///
/// [comfy-table]: https://docs.rs/comfy-table/latest/comfy_table/
pub fn standings(standings: &Standings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#",      // position
        "Team",   // standing.team
        "Points", // standing.points
    ]);
    standings
        .iter()
        .enumerate()
        .fold(table, |mut table, (idx, standing)| {
            table.add_row(vec![
                (idx + 1).to_string(),
                standing.team.clone(),
                standing.points.to_string(),
            ]);
            table
        })
}
