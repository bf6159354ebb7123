use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::http_client::http_client;

const BOOTSTRAP_URL: &str = "https://fantasy.premierleague.com/api/bootstrap-static/";
const RETRY_DELAY_MS: u64 = 300;

pub fn bootstrap_url() -> String {
    std::env::var("FPL_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| BOOTSTRAP_URL.to_string())
}

/// Pulls the bootstrap feed. Transport errors and 5xx responses get a single
/// retry after a short pause; a 4xx fails straight away.
pub fn fetch_bootstrap() -> Result<Bootstrap> {
    let client = http_client()?;
    let url = bootstrap_url();

    let body = match request_body(client, &url) {
        Ok(body) => body,
        Err(err) if retryable(&err) => {
            std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS));
            request_body(client, &url)?
        }
        Err(err) => return Err(err),
    };

    parse_bootstrap_json(&body)
}

fn request_body(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(PipelineError::FetchStatus(status.as_u16()));
    }
    Ok(resp.text()?)
}

fn retryable(err: &PipelineError) -> bool {
    match err {
        PipelineError::Transport(_) => true,
        PipelineError::FetchStatus(code) => *code >= 500,
        _ => false,
    }
}

pub fn parse_bootstrap_json(raw: &str) -> Result<Bootstrap> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(PipelineError::Schema("empty bootstrap payload".into()));
    }
    serde_json::from_str(trimmed).map_err(|err| PipelineError::Schema(err.to_string()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub events: Vec<Event>,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub total_players: u64,
    pub elements: Vec<Element>,
    pub element_types: Vec<ElementType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub deadline_time: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementType {
    pub id: i64,
    pub singular_name: String,
}

/// One player as served by the feed. Stat columns the feed serialises as
/// strings stay `String` here; coercion happens in the table build.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Element {
    pub first_name: String,
    pub second_name: String,
    pub photo: String,
    pub team: i64,
    pub element_type: i64,
    pub selected_by_percent: String,
    pub now_cost: i64,
    pub minutes: i64,
    pub transfers_in: i64,
    pub value_season: String,
    pub value_form: String,
    pub points_per_game: String,
    pub total_points: i64,
    pub form: String,
    pub goals_scored: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub yellow_cards: i64,
    pub bonus: i64,
    pub bps: i64,
    pub influence: String,
    pub creativity: String,
    pub threat: String,
    pub starts: i64,
    pub expected_goals: String,
    pub expected_assists: String,
    pub expected_goal_involvements: String,
    pub expected_goals_conceded: String,
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
}
