use std::collections::HashMap;

use crate::bootstrap_fetch::{Bootstrap, Element};
use crate::error::{PipelineError, Result};

/// One row of the flat player table. Ids are already resolved to names, the
/// textual stat columns are parsed, and `now_cost` is rendered in millions.
/// `pct_of_team_points` starts at zero and is filled once the team aggregates
/// exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub first_name: String,
    pub second_name: String,
    pub photo: String,
    pub team: String,
    pub position: String,
    pub selected_by_percent: String,
    pub now_cost: String,
    pub minutes: i64,
    pub transfers_in: i64,
    pub value_season: String,
    pub value_form: f64,
    pub points_per_game: f64,
    pub total_points: i64,
    pub form: f64,
    pub goals_scored: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub yellow_cards: i64,
    pub bonus: i64,
    pub bps: i64,
    pub influence: f64,
    pub creativity: f64,
    pub threat: f64,
    pub starts: f64,
    pub expected_goals: f64,
    pub expected_assists: f64,
    pub expected_goal_involvements: f64,
    pub expected_goals_conceded: f64,
    pub expected_goals_per_90: f64,
    pub expected_assists_per_90: f64,
    pub expected_goal_involvements_per_90: f64,
    pub expected_goals_conceded_per_90: f64,
    pub saves: i64,
    pub penalties_saved: i64,
    pub goals_conceded: i64,
    pub saves_per_90: f64,
    pub goals_conceded_per_90: f64,
    pub clean_sheets_per_90: f64,
    pub starts_per_90: f64,
    pub chance_of_playing_this_round: Option<f64>,
    pub chance_of_playing_next_round: Option<f64>,
    pub news: String,
    pub penalties_order: Option<i64>,
    pub corners_and_indirect_freekicks_order: Option<i64>,
    pub pct_of_team_points: f64,
}

/// Flattens the feed into per-player rows and drops everyone without minutes
/// on the pitch. Every row is resolved and parsed before the filter so a bad
/// id or stat string fails the build even on a benched player.
pub fn build_player_table(bootstrap: &Bootstrap) -> Result<Vec<PlayerRecord>> {
    let team_names: HashMap<i64, &str> = bootstrap
        .teams
        .iter()
        .map(|t| (t.id, t.name.as_str()))
        .collect();
    let position_names: HashMap<i64, &str> = bootstrap
        .element_types
        .iter()
        .map(|et| (et.id, et.singular_name.as_str()))
        .collect();

    let mut rows = Vec::with_capacity(bootstrap.elements.len());
    for element in &bootstrap.elements {
        rows.push(build_row(element, &team_names, &position_names)?);
    }
    rows.retain(|row| row.minutes != 0);
    Ok(rows)
}

fn build_row(
    element: &Element,
    team_names: &HashMap<i64, &str>,
    position_names: &HashMap<i64, &str>,
) -> Result<PlayerRecord> {
    let team = team_names
        .get(&element.team)
        .ok_or_else(|| PipelineError::Lookup {
            entity: "team",
            key: element.team.to_string(),
        })?;
    let position = position_names
        .get(&element.element_type)
        .ok_or_else(|| PipelineError::Lookup {
            entity: "position",
            key: element.element_type.to_string(),
        })?;

    Ok(PlayerRecord {
        name: format!("{} {}", element.first_name, element.second_name),
        first_name: element.first_name.clone(),
        second_name: element.second_name.clone(),
        photo: element.photo.clone(),
        team: (*team).to_string(),
        position: (*position).to_string(),
        selected_by_percent: element.selected_by_percent.clone(),
        now_cost: format!("{:.1}", element.now_cost as f64 / 10.0),
        minutes: element.minutes,
        transfers_in: element.transfers_in,
        value_season: element.value_season.clone(),
        value_form: parse_stat("value_form", &element.value_form)?,
        points_per_game: parse_stat("points_per_game", &element.points_per_game)?,
        total_points: element.total_points,
        form: parse_stat("form", &element.form)?,
        goals_scored: element.goals_scored,
        assists: element.assists,
        clean_sheets: element.clean_sheets,
        yellow_cards: element.yellow_cards,
        bonus: element.bonus,
        bps: element.bps,
        influence: parse_stat("influence", &element.influence)?,
        creativity: parse_stat("creativity", &element.creativity)?,
        threat: parse_stat("threat", &element.threat)?,
        starts: element.starts as f64,
        expected_goals: parse_stat("expected_goals", &element.expected_goals)?,
        expected_assists: parse_stat("expected_assists", &element.expected_assists)?,
        expected_goal_involvements: parse_stat(
            "expected_goal_involvements",
            &element.expected_goal_involvements,
        )?,
        expected_goals_conceded: parse_stat(
            "expected_goals_conceded",
            &element.expected_goals_conceded,
        )?,
        expected_goals_per_90: element.expected_goals_per_90,
        expected_assists_per_90: element.expected_assists_per_90,
        expected_goal_involvements_per_90: element.expected_goal_involvements_per_90,
        expected_goals_conceded_per_90: element.expected_goals_conceded_per_90,
        saves: element.saves,
        penalties_saved: element.penalties_saved,
        goals_conceded: element.goals_conceded,
        saves_per_90: element.saves_per_90,
        goals_conceded_per_90: element.goals_conceded_per_90,
        clean_sheets_per_90: element.clean_sheets_per_90,
        starts_per_90: element.starts_per_90,
        chance_of_playing_this_round: element.chance_of_playing_this_round,
        chance_of_playing_next_round: element.chance_of_playing_next_round,
        news: element.news.clone(),
        penalties_order: element.penalties_order,
        corners_and_indirect_freekicks_order: element.corners_and_indirect_freekicks_order,
        pct_of_team_points: 0.0,
    })
}

fn parse_stat(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::Conversion {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap_fetch::{ElementType, Team};

    fn element(first: &str, second: &str, minutes: i64) -> Element {
        Element {
            first_name: first.to_string(),
            second_name: second.to_string(),
            team: 1,
            element_type: 4,
            minutes,
            now_cost: 55,
            selected_by_percent: "3.4".to_string(),
            value_season: "12.1".to_string(),
            value_form: "0.4".to_string(),
            points_per_game: "4.2".to_string(),
            form: "3.8".to_string(),
            influence: "250.4".to_string(),
            creativity: "110.0".to_string(),
            threat: "380.2".to_string(),
            expected_goals: "7.50".to_string(),
            expected_assists: "2.10".to_string(),
            expected_goal_involvements: "9.60".to_string(),
            expected_goals_conceded: "14.00".to_string(),
            ..Element::default()
        }
    }

    fn bootstrap(elements: Vec<Element>) -> Bootstrap {
        Bootstrap {
            events: Vec::new(),
            teams: vec![Team {
                id: 1,
                name: "Arsenal".to_string(),
            }],
            total_players: 0,
            elements,
            element_types: vec![
                ElementType {
                    id: 1,
                    singular_name: "Goalkeeper".to_string(),
                },
                ElementType {
                    id: 4,
                    singular_name: "Forward".to_string(),
                },
            ],
        }
    }

    #[test]
    fn resolves_names_and_formats_cost() {
        let table = build_player_table(&bootstrap(vec![element("Kai", "Havertz", 900)])).unwrap();
        assert_eq!(table.len(), 1);
        let row = &table[0];
        assert_eq!(row.name, "Kai Havertz");
        assert_eq!(row.team, "Arsenal");
        assert_eq!(row.position, "Forward");
        assert_eq!(row.now_cost, "5.5");
        assert_eq!(row.expected_goals, 7.5);
        assert_eq!(row.pct_of_team_points, 0.0);
    }

    #[test]
    fn cost_keeps_one_decimal_for_round_millions() {
        let mut el = element("Erling", "Haaland", 900);
        el.now_cost = 140;
        let table = build_player_table(&bootstrap(vec![el])).unwrap();
        assert_eq!(table[0].now_cost, "14.0");
    }

    #[test]
    fn zero_minute_rows_are_dropped() {
        let table = build_player_table(&bootstrap(vec![
            element("Kai", "Havertz", 900),
            element("Karl", "Hein", 0),
        ]))
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].name, "Kai Havertz");
    }

    #[test]
    fn unknown_team_id_is_a_lookup_error() {
        let mut el = element("Kai", "Havertz", 900);
        el.team = 99;
        let err = build_player_table(&bootstrap(vec![el])).unwrap_err();
        match err {
            PipelineError::Lookup { entity, key } => {
                assert_eq!(entity, "team");
                assert_eq!(key, "99");
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_position_id_is_a_lookup_error() {
        let mut el = element("Kai", "Havertz", 900);
        el.element_type = 7;
        let err = build_player_table(&bootstrap(vec![el])).unwrap_err();
        match err {
            PipelineError::Lookup { entity, key } => {
                assert_eq!(entity, "position");
                assert_eq!(key, "7");
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_stat_text_is_a_conversion_error() {
        let mut el = element("Kai", "Havertz", 900);
        el.influence = "n/a".to_string();
        let err = build_player_table(&bootstrap(vec![el])).unwrap_err();
        match err {
            PipelineError::Conversion { field, value } => {
                assert_eq!(field, "influence");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected conversion error, got {other:?}"),
        }
    }

    #[test]
    fn bad_stat_on_a_benched_player_still_fails() {
        let mut el = element("Karl", "Hein", 0);
        el.form = "-".to_string();
        assert!(build_player_table(&bootstrap(vec![el])).is_err());
    }

    #[test]
    fn starts_becomes_numeric() {
        let mut el = element("Kai", "Havertz", 900);
        el.starts = 11;
        let table = build_player_table(&bootstrap(vec![el])).unwrap();
        assert_eq!(table[0].starts, 11.0);
    }
}
