use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::player_table::PlayerRecord;
use crate::scaling::min_max_scale;

/// Season totals for one club, summed over its players with minutes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStats {
    pub name: String,
    pub total_points: i64,
    pub bonus: i64,
    pub goals_scored: i64,
    pub assists: i64,
    pub expected_goals: f64,
    pub expected_assists: f64,
    pub performance_xg: f64,
    pub performance_xga: f64,
}

/// Groups the player table by club and sorts by total points, best first.
/// Accumulation keeps first-seen order and the sort is stable, so clubs on
/// equal points stay in encounter order.
pub fn compute_team_stats(players: &[PlayerRecord]) -> Vec<TeamStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut teams: Vec<TeamStats> = Vec::new();

    for player in players {
        let slot = *index.entry(player.team.as_str()).or_insert_with(|| {
            teams.push(TeamStats {
                name: player.team.clone(),
                ..TeamStats::default()
            });
            teams.len() - 1
        });
        let team = &mut teams[slot];
        team.total_points += player.total_points;
        team.bonus += player.bonus;
        team.goals_scored += player.goals_scored;
        team.assists += player.assists;
        team.expected_goals += player.expected_goals;
        team.expected_assists += player.expected_assists;
    }

    for team in &mut teams {
        team.performance_xg = team.goals_scored as f64 - team.expected_goals;
        team.performance_xga = team.assists as f64 - team.expected_assists;
    }

    teams.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    teams
}

/// Final enrichment of the player table: influence, creativity and threat are
/// rescaled to [0, 1] across the whole league, and each player's share of
/// club points is filled in. Players of a club on zero points get a 0.0
/// share.
pub fn apply_metrics(players: &mut [PlayerRecord], teams: &[TeamStats]) -> Result<()> {
    let club_points: HashMap<&str, i64> = teams
        .iter()
        .map(|t| (t.name.as_str(), t.total_points))
        .collect();

    let influence: Vec<f64> = players.iter().map(|p| p.influence).collect();
    let creativity: Vec<f64> = players.iter().map(|p| p.creativity).collect();
    let threat: Vec<f64> = players.iter().map(|p| p.threat).collect();
    let influence = min_max_scale(&influence);
    let creativity = min_max_scale(&creativity);
    let threat = min_max_scale(&threat);

    for (i, player) in players.iter_mut().enumerate() {
        player.influence = influence[i];
        player.creativity = creativity[i];
        player.threat = threat[i];

        let club_total = club_points
            .get(player.team.as_str())
            .copied()
            .ok_or_else(|| PipelineError::Lookup {
                entity: "team aggregate",
                key: player.team.clone(),
            })?;
        player.pct_of_team_points = if club_total == 0 {
            0.0
        } else {
            player.total_points as f64 / club_total as f64 * 100.0
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, team: &str, points: i64) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            team: team.to_string(),
            total_points: points,
            ..PlayerRecord::default()
        }
    }

    #[test]
    fn sums_stats_per_club() {
        let mut a = player("A", "Arsenal", 100);
        a.bonus = 10;
        a.goals_scored = 9;
        a.assists = 3;
        a.expected_goals = 7.5;
        a.expected_assists = 2.5;
        let mut b = player("B", "Arsenal", 50);
        b.bonus = 5;
        b.goals_scored = 1;
        b.assists = 2;
        b.expected_goals = 2.5;
        b.expected_assists = 1.5;

        let teams = compute_team_stats(&[a, b]);
        assert_eq!(teams.len(), 1);
        let arsenal = &teams[0];
        assert_eq!(arsenal.total_points, 150);
        assert_eq!(arsenal.bonus, 15);
        assert_eq!(arsenal.goals_scored, 10);
        assert_eq!(arsenal.assists, 5);
        assert_eq!(arsenal.expected_goals, 10.0);
        assert_eq!(arsenal.expected_assists, 4.0);
        assert_eq!(arsenal.performance_xg, 0.0);
        assert_eq!(arsenal.performance_xga, 1.0);
    }

    #[test]
    fn orders_clubs_by_points_descending() {
        let teams = compute_team_stats(&[
            player("A", "Brentford", 40),
            player("B", "Arsenal", 120),
            player("C", "Chelsea", 80),
        ]);
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Arsenal", "Chelsea", "Brentford"]);
    }

    #[test]
    fn equal_points_keep_first_seen_order() {
        let teams = compute_team_stats(&[
            player("A", "Chelsea", 60),
            player("B", "Arsenal", 60),
            player("C", "Brentford", 90),
        ]);
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Brentford", "Chelsea", "Arsenal"]);
    }

    #[test]
    fn fills_share_of_club_points() {
        let mut players = vec![
            player("A", "Arsenal", 30),
            player("B", "Arsenal", 70),
            player("C", "Chelsea", 50),
        ];
        let teams = compute_team_stats(&players);
        apply_metrics(&mut players, &teams).unwrap();
        assert!((players[0].pct_of_team_points - 30.0).abs() < 1e-9);
        assert!((players[1].pct_of_team_points - 70.0).abs() < 1e-9);
        assert!((players[2].pct_of_team_points - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_point_club_gets_zero_shares() {
        let mut players = vec![player("A", "Arsenal", 0), player("B", "Arsenal", 0)];
        let teams = compute_team_stats(&players);
        apply_metrics(&mut players, &teams).unwrap();
        assert_eq!(players[0].pct_of_team_points, 0.0);
        assert_eq!(players[1].pct_of_team_points, 0.0);
    }

    #[test]
    fn rescales_influence_creativity_threat() {
        let mut players = vec![player("A", "Arsenal", 10), player("B", "Arsenal", 20)];
        players[0].influence = 100.0;
        players[1].influence = 300.0;
        players[0].creativity = 50.0;
        players[1].creativity = 50.0;
        players[0].threat = 0.0;
        players[1].threat = 10.0;
        let teams = compute_team_stats(&players);
        apply_metrics(&mut players, &teams).unwrap();
        assert_eq!(players[0].influence, 0.0);
        assert_eq!(players[1].influence, 1.0);
        assert_eq!(players[0].creativity, 0.0);
        assert_eq!(players[1].creativity, 0.0);
        assert_eq!(players[1].threat, 1.0);
    }

    #[test]
    fn missing_aggregate_row_is_a_lookup_error() {
        let mut players = vec![player("A", "Arsenal", 10)];
        let err = apply_metrics(&mut players, &[]).unwrap_err();
        match err {
            PipelineError::Lookup { entity, key } => {
                assert_eq!(entity, "team aggregate");
                assert_eq!(key, "Arsenal");
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }
}
