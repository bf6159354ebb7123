use crate::player_table::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Matches the feed's `singular_name` labels. Anything else (the feed
    /// also lists managers) belongs to no view.
    pub fn from_label(label: &str) -> Option<Position> {
        match label {
            "Goalkeeper" => Some(Position::Goalkeeper),
            "Defender" => Some(Position::Defender),
            "Midfielder" => Some(Position::Midfielder),
            "Forward" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeepers",
            Position::Defender => "defenders",
            Position::Midfielder => "midfielders",
            Position::Forward => "forwards",
        }
    }

    fn delta_header(self) -> &'static str {
        match self {
            Position::Goalkeeper | Position::Defender => "performance_xG_def",
            Position::Midfielder | Position::Forward => "performance_xG_off",
        }
    }

    /// Column headers of this position's view, delta column last.
    pub fn headers(self) -> Vec<&'static str> {
        let mut headers: Vec<&'static str> = match self {
            Position::Goalkeeper => vec![
                "Player",
                "team",
                "position",
                "selected_by_percent",
                "starts_per_90",
                "total_points",
                "bonus",
                "points_per_game",
                "form",
                "saves",
                "saves_per_90",
                "expected_goals_conceded",
                "goals_conceded",
                "clean_sheets_per_90",
                "value_season",
                "value_form",
                "now_cost",
                "clean_sheets",
                "penalties_saved",
                "yellow_cards",
                "%of_team_points",
            ],
            Position::Defender | Position::Midfielder => vec![
                "Player",
                "team",
                "position",
                "selected_by_percent",
                "starts_per_90",
                "total_points",
                "bonus",
                "points_per_game",
                "expected_goals_conceded",
                "goals_conceded",
                "clean_sheets_per_90",
                "expected_goals",
                "goals_scored",
                "expected_goal_involvements_per_90",
                "value_season",
                "value_form",
                "now_cost",
                "clean_sheets",
                "yellow_cards",
                "%of_team_points",
                "influence",
                "creativity",
                "threat",
                "penalties_order",
                "corners_and_indirect_freekicks_order",
            ],
            Position::Forward => vec![
                "Player",
                "team",
                "position",
                "selected_by_percent",
                "starts_per_90",
                "total_points",
                "bonus",
                "points_per_game",
                "expected_goals",
                "goals_scored",
                "expected_goal_involvements_per_90",
                "value_season",
                "value_form",
                "now_cost",
                "clean_sheets",
                "yellow_cards",
                "%of_team_points",
                "influence",
                "creativity",
                "threat",
                "penalties_order",
                "corners_and_indirect_freekicks_order",
            ],
        };
        headers.push(self.delta_header());
        headers
    }
}

/// One view row: the underlying record plus the position's xG delta.
/// Goalkeepers and defenders carry goals conceded over expectation, the
/// attacking roles carry goals scored over expectation.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub player: PlayerRecord,
    pub performance_delta: f64,
}

impl PositionRow {
    fn new(position: Position, player: PlayerRecord) -> PositionRow {
        let performance_delta = match position {
            Position::Goalkeeper | Position::Defender => {
                player.goals_conceded as f64 - player.expected_goals_conceded
            }
            Position::Midfielder | Position::Forward => {
                player.goals_scored as f64 - player.expected_goals
            }
        };
        PositionRow {
            player,
            performance_delta,
        }
    }

    /// Cell values aligned with `Position::headers`. Missing set piece and
    /// penalty orders render as empty cells.
    pub fn cells(&self, position: Position) -> Vec<String> {
        let p = &self.player;
        let mut cells = match position {
            Position::Goalkeeper => vec![
                p.name.clone(),
                p.team.clone(),
                p.position.clone(),
                p.selected_by_percent.clone(),
                p.starts_per_90.to_string(),
                p.total_points.to_string(),
                p.bonus.to_string(),
                p.points_per_game.to_string(),
                p.form.to_string(),
                p.saves.to_string(),
                p.saves_per_90.to_string(),
                p.expected_goals_conceded.to_string(),
                p.goals_conceded.to_string(),
                p.clean_sheets_per_90.to_string(),
                p.value_season.clone(),
                p.value_form.to_string(),
                p.now_cost.clone(),
                p.clean_sheets.to_string(),
                p.penalties_saved.to_string(),
                p.yellow_cards.to_string(),
                p.pct_of_team_points.to_string(),
            ],
            Position::Defender | Position::Midfielder => vec![
                p.name.clone(),
                p.team.clone(),
                p.position.clone(),
                p.selected_by_percent.clone(),
                p.starts_per_90.to_string(),
                p.total_points.to_string(),
                p.bonus.to_string(),
                p.points_per_game.to_string(),
                p.expected_goals_conceded.to_string(),
                p.goals_conceded.to_string(),
                p.clean_sheets_per_90.to_string(),
                p.expected_goals.to_string(),
                p.goals_scored.to_string(),
                p.expected_goal_involvements_per_90.to_string(),
                p.value_season.clone(),
                p.value_form.to_string(),
                p.now_cost.clone(),
                p.clean_sheets.to_string(),
                p.yellow_cards.to_string(),
                p.pct_of_team_points.to_string(),
                p.influence.to_string(),
                p.creativity.to_string(),
                p.threat.to_string(),
                opt_to_string(p.penalties_order),
                opt_to_string(p.corners_and_indirect_freekicks_order),
            ],
            Position::Forward => vec![
                p.name.clone(),
                p.team.clone(),
                p.position.clone(),
                p.selected_by_percent.clone(),
                p.starts_per_90.to_string(),
                p.total_points.to_string(),
                p.bonus.to_string(),
                p.points_per_game.to_string(),
                p.expected_goals.to_string(),
                p.goals_scored.to_string(),
                p.expected_goal_involvements_per_90.to_string(),
                p.value_season.clone(),
                p.value_form.to_string(),
                p.now_cost.clone(),
                p.clean_sheets.to_string(),
                p.yellow_cards.to_string(),
                p.pct_of_team_points.to_string(),
                p.influence.to_string(),
                p.creativity.to_string(),
                p.threat.to_string(),
                opt_to_string(p.penalties_order),
                opt_to_string(p.corners_and_indirect_freekicks_order),
            ],
        };
        cells.push(self.performance_delta.to_string());
        cells
    }
}

/// The four role tables. Rows keep the relative order of the player table
/// they were split from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTables {
    pub goalkeepers: Vec<PositionRow>,
    pub defenders: Vec<PositionRow>,
    pub midfielders: Vec<PositionRow>,
    pub forwards: Vec<PositionRow>,
}

impl PositionTables {
    pub fn split(players: &[PlayerRecord]) -> PositionTables {
        let mut tables = PositionTables::default();
        for player in players {
            let Some(position) = Position::from_label(&player.position) else {
                continue;
            };
            tables
                .rows_mut(position)
                .push(PositionRow::new(position, player.clone()));
        }
        tables
    }

    pub fn rows(&self, position: Position) -> &[PositionRow] {
        match position {
            Position::Goalkeeper => &self.goalkeepers,
            Position::Defender => &self.defenders,
            Position::Midfielder => &self.midfielders,
            Position::Forward => &self.forwards,
        }
    }

    fn rows_mut(&mut self, position: Position) -> &mut Vec<PositionRow> {
        match position {
            Position::Goalkeeper => &mut self.goalkeepers,
            Position::Defender => &mut self.defenders,
            Position::Midfielder => &mut self.midfielders,
            Position::Forward => &mut self.forwards,
        }
    }

    pub fn total_rows(&self) -> usize {
        Position::ALL.iter().map(|p| self.rows(*p).len()).sum()
    }
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
