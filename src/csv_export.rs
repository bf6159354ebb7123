use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::position_views::{Position, PositionTables};
use crate::snapshot::Snapshot;
use crate::team_stats::TeamStats;
use crate::watchlists::{InjuryRow, TakerRow};

pub const TEAMS_FILE: &str = "teams.csv";
pub const INJURIES_FILE: &str = "injuries.csv";
pub const PENALTY_FILE: &str = "penalty_taker.csv";
pub const SET_PIECE_FILE: &str = "setpiece.csv";

/// Data row counts per file after a successful export.
#[derive(Debug)]
pub struct ExportReport {
    pub dir: PathBuf,
    pub teams: usize,
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
    pub injuries: usize,
    pub penalty_takers: usize,
    pub set_piece_takers: usize,
}

/// Writes eight CSV files into `dir`, creating the directory if needed:
/// the club aggregates, the four role views and the three watchlists.
pub fn export_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<ExportReport> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create export dir {}", dir.display()))?;

    write_csv(&dir.join(TEAMS_FILE), &teams_table(&snapshot.teams))?;
    for position in Position::ALL {
        write_csv(
            &dir.join(format!("{}.csv", position.file_stem())),
            &position_table(&snapshot.positions, position),
        )?;
    }
    write_csv(&dir.join(INJURIES_FILE), &injuries_table(&snapshot.injuries))?;
    write_csv(
        &dir.join(PENALTY_FILE),
        &takers_table(&snapshot.penalty_takers, "penalties_order"),
    )?;
    write_csv(
        &dir.join(SET_PIECE_FILE),
        &takers_table(
            &snapshot.set_piece_takers,
            "corners_and_indirect_freekicks_order",
        ),
    )?;

    Ok(ExportReport {
        dir: dir.to_path_buf(),
        teams: snapshot.teams.len(),
        goalkeepers: snapshot.positions.goalkeepers.len(),
        defenders: snapshot.positions.defenders.len(),
        midfielders: snapshot.positions.midfielders.len(),
        forwards: snapshot.positions.forwards.len(),
        injuries: snapshot.injuries.len(),
        penalty_takers: snapshot.penalty_takers.len(),
        set_piece_takers: snapshot.set_piece_takers.len(),
    })
}

pub fn teams_table(teams: &[TeamStats]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "team_name".to_string(),
        "team_total_points".to_string(),
        "team_bonus".to_string(),
        "team_goals_scored".to_string(),
        "team_assists".to_string(),
        "team_expected_goals".to_string(),
        "team_expected_assists".to_string(),
        "team_performance_xG".to_string(),
        "team_performance_xGa".to_string(),
    ]];
    for team in teams {
        rows.push(team_row(team));
    }
    rows
}

fn team_row(team: &TeamStats) -> Vec<String> {
    vec![
        team.name.clone(),
        team.total_points.to_string(),
        team.bonus.to_string(),
        team.goals_scored.to_string(),
        team.assists.to_string(),
        team.expected_goals.to_string(),
        team.expected_assists.to_string(),
        team.performance_xg.to_string(),
        team.performance_xga.to_string(),
    ]
}

pub fn position_table(tables: &PositionTables, position: Position) -> Vec<Vec<String>> {
    let mut rows = vec![position.headers().iter().map(|h| h.to_string()).collect()];
    for row in tables.rows(position) {
        rows.push(row.cells(position));
    }
    rows
}

pub fn injuries_table(injuries: &[InjuryRow]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "team".to_string(),
        "chance_of_playing_this_round".to_string(),
        "news".to_string(),
    ]];
    for injury in injuries {
        rows.push(vec![
            injury.player.clone(),
            injury.team.clone(),
            injury.chance_of_playing.to_string(),
            injury.news.clone(),
        ]);
    }
    rows
}

pub fn takers_table(takers: &[TakerRow], order_header: &str) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "team".to_string(),
        order_header.to_string(),
    ]];
    for taker in takers {
        rows.push(vec![
            taker.player.clone(),
            taker.team.clone(),
            taker.order.to_string(),
        ]);
    }
    rows
}

fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;
    for row in rows {
        wtr.write_record(row)
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
