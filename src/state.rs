use std::collections::VecDeque;

use crate::position_views::{Position, PositionRow};
use crate::snapshot::Snapshot;

// Player and team stay on screen while the stat columns pan.
pub const PINNED_COLUMNS: usize = 2;

#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Position,
    pub snapshot: Option<Snapshot>,
    pub row_offset: usize,
    pub col_offset: usize,
    pub status: String,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tab: Position::Goalkeeper,
            snapshot: None,
            row_offset: 0,
            col_offset: 0,
            status: "no data".to_string(),
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    /// Swaps in a freshly built snapshot. Scroll offsets are clamped rather
    /// than reset so a refresh keeps the user roughly where they were.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.status = format!(
            "{} players / {} clubs",
            snapshot.players.len(),
            snapshot.teams.len()
        );
        self.snapshot = Some(snapshot);
        self.clamp_offsets();
    }

    pub fn rows(&self) -> &[PositionRow] {
        self.snapshot
            .as_ref()
            .map(|s| s.positions.rows(self.tab))
            .unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.tab.headers()
    }

    pub fn column_count(&self) -> usize {
        self.headers().len()
    }

    pub fn select_tab(&mut self, tab: Position) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        self.row_offset = 0;
        self.col_offset = 0;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(match self.tab {
            Position::Goalkeeper => Position::Defender,
            Position::Defender => Position::Midfielder,
            Position::Midfielder => Position::Forward,
            Position::Forward => Position::Goalkeeper,
        });
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(match self.tab {
            Position::Goalkeeper => Position::Forward,
            Position::Defender => Position::Goalkeeper,
            Position::Midfielder => Position::Defender,
            Position::Forward => Position::Midfielder,
        });
    }

    pub fn scroll_row_down(&mut self) {
        let total = self.row_count();
        if total == 0 {
            self.row_offset = 0;
            return;
        }
        if self.row_offset < total - 1 {
            self.row_offset += 1;
        }
    }

    pub fn scroll_row_up(&mut self) {
        self.row_offset = self.row_offset.saturating_sub(1);
    }

    pub fn scroll_col_right(&mut self) {
        let scrollable = self.column_count().saturating_sub(PINNED_COLUMNS);
        if scrollable == 0 {
            self.col_offset = 0;
            return;
        }
        if self.col_offset < scrollable - 1 {
            self.col_offset += 1;
        }
    }

    pub fn scroll_col_left(&mut self) {
        self.col_offset = self.col_offset.saturating_sub(1);
    }

    pub fn clamp_offsets(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            self.row_offset = 0;
        } else if self.row_offset >= rows {
            self.row_offset = rows - 1;
        }
        let scrollable = self.column_count().saturating_sub(PINNED_COLUMNS);
        if scrollable == 0 {
            self.col_offset = 0;
        } else if self.col_offset >= scrollable {
            self.col_offset = scrollable - 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
