use chrono::{DateTime, Utc};

use crate::bootstrap_fetch::{Bootstrap, Event};
use crate::error::Result;
use crate::player_table::{PlayerRecord, build_player_table};
use crate::position_views::PositionTables;
use crate::team_stats::{TeamStats, apply_metrics, compute_team_stats};
use crate::watchlists::{
    InjuryRow, TakerRow, injury_rows, penalty_taker_rows, set_piece_taker_rows,
};

/// Where the season stands, pulled from the feed's event list. All fields are
/// optional so a pre-season payload still builds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundInfo {
    pub current: Option<String>,
    pub next: Option<String>,
    pub next_deadline: Option<String>,
}

pub fn round_info(events: &[Event]) -> RoundInfo {
    let current = events.iter().find(|e| e.is_current).map(|e| e.name.clone());
    let next_event = events.iter().find(|e| e.is_next);
    let next = next_event.map(|e| e.name.clone());
    let next_deadline = next_event
        .and_then(|e| e.deadline_time.as_deref())
        .and_then(format_deadline);
    RoundInfo {
        current,
        next,
        next_deadline,
    }
}

fn format_deadline(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let dt = DateTime::parse_from_rfc3339(trimmed).ok()?;
    Some(dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
}

/// Everything one feed pull produces, ready for the dashboard or the files.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_players: u64,
    pub round: RoundInfo,
    pub players: Vec<PlayerRecord>,
    pub teams: Vec<TeamStats>,
    pub positions: PositionTables,
    pub injuries: Vec<InjuryRow>,
    pub penalty_takers: Vec<TakerRow>,
    pub set_piece_takers: Vec<TakerRow>,
}

/// Runs the whole chain over one payload: flatten, aggregate, enrich, then
/// slice into the role views and watchlists. The same payload always yields
/// the same snapshot.
pub fn build_snapshot(bootstrap: &Bootstrap) -> Result<Snapshot> {
    let mut players = build_player_table(bootstrap)?;
    let teams = compute_team_stats(&players);
    apply_metrics(&mut players, &teams)?;

    let positions = PositionTables::split(&players);
    let injuries = injury_rows(&players);
    let penalty_takers = penalty_taker_rows(&players);
    let set_piece_takers = set_piece_taker_rows(&players);

    Ok(Snapshot {
        total_players: bootstrap.total_players,
        round: round_info(&bootstrap.events),
        players,
        teams,
        positions,
        injuries,
        penalty_takers,
        set_piece_takers,
    })
}
