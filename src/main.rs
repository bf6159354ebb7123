use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use fpl_terminal::bootstrap_fetch::fetch_bootstrap;
use fpl_terminal::csv_export::export_snapshot;
use fpl_terminal::position_views::Position;
use fpl_terminal::snapshot::{build_snapshot, Snapshot};
use fpl_terminal::state::{AppState, PINNED_COLUMNS};

const PLAYER_COL_WIDTH: u16 = 24;
const TEAM_COL_WIDTH: u16 = 14;
const STAT_COL_WIDTH: u16 = 18;

struct App {
    state: AppState,
    should_quit: bool,
    out_dir: PathBuf,
}

impl App {
    fn new() -> Self {
        let out_dir = std::env::var("FPL_OUT_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| ".".to_string());
        Self {
            state: AppState::new(),
            should_quit: false,
            out_dir: PathBuf::from(out_dir),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.select_tab(Position::Goalkeeper),
            KeyCode::Char('2') => self.state.select_tab(Position::Defender),
            KeyCode::Char('3') => self.state.select_tab(Position::Midfielder),
            KeyCode::Char('4') => self.state.select_tab(Position::Forward),
            KeyCode::Tab | KeyCode::Right => self.state.next_tab(),
            KeyCode::BackTab | KeyCode::Left => self.state.prev_tab(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_row_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_row_up(),
            KeyCode::Char('l') => self.state.scroll_col_right(),
            KeyCode::Char('h') => self.state.scroll_col_left(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    // Fetch and rebuild in one go. The draw loop stalls for the duration of
    // the request; on failure the previous snapshot stays on screen.
    fn refresh(&mut self) {
        self.state.push_log("[INFO] Refreshing from the bootstrap feed");
        match fetch_bootstrap().and_then(|bootstrap| build_snapshot(&bootstrap)) {
            Ok(snapshot) => {
                self.state
                    .push_log(format!("[INFO] Loaded {} players", snapshot.players.len()));
                self.state.set_snapshot(snapshot);
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Refresh failed: {err}"));
            }
        }
    }

    fn export(&mut self) {
        let Some(snapshot) = self.state.snapshot.as_ref() else {
            self.state.push_log("[INFO] No snapshot to export yet");
            return;
        };
        match export_snapshot(&self.out_dir, snapshot) {
            Ok(report) => {
                let player_rows =
                    report.goalkeepers + report.defenders + report.midfielders + report.forwards;
                self.state.push_log(format!(
                    "[INFO] Wrote 8 files to {} ({player_rows} player rows)",
                    report.dir.display()
                ));
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Export failed: {err}"));
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut app = App::new();
    match fetch_bootstrap().and_then(|bootstrap| build_snapshot(&bootstrap)) {
        Ok(snapshot) => {
            app.state
                .push_log(format!("[INFO] Loaded {} players", snapshot.players.len()));
            app.state.set_snapshot(snapshot);
        }
        Err(err) => {
            app.state.push_log(format!("[WARN] Initial fetch failed: {err}"));
            app.state.push_log("[INFO] Press r to retry");
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], &app.state);

    let footer = Paragraph::new(footer_text()).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let tabs = Position::ALL
        .iter()
        .map(|position| {
            if *position == state.tab {
                format!("[{}]", position.plural())
            } else {
                position.plural().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let line1 = format!("FPL TERMINAL | {} | {}", tabs, state.status);
    let line2 = match state.snapshot.as_ref() {
        Some(snapshot) => round_line(snapshot),
        None => "No snapshot loaded".to_string(),
    };
    format!("{line1}\n{line2}")
}

fn round_line(snapshot: &Snapshot) -> String {
    let current = snapshot.round.current.as_deref().unwrap_or("-");
    let next = snapshot.round.next.as_deref().unwrap_or("-");
    let deadline = snapshot.round.next_deadline.as_deref().unwrap_or("TBC");
    format!(
        "{} managers | current: {current} | next: {next} (deadline {deadline})",
        snapshot.total_players
    )
}

fn footer_text() -> String {
    "1-4/Tab/←/→ View | j/k/↑/↓ Rows | h/l Columns | r Refresh | e Export CSV | ? Help | q Quit"
        .to_string()
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    render_table(frame, rows[0], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[1]);
}

// Maps each on-screen column slot to an index into the view's header/cell
// lists: the two pinned columns first, then the stat columns from col_offset
// onward, as many as the width allows.
fn table_layout(state: &AppState, width: u16) -> (Vec<Constraint>, Vec<usize>) {
    let mut constraints = vec![
        Constraint::Length(PLAYER_COL_WIDTH),
        Constraint::Length(TEAM_COL_WIDTH),
    ];
    let mut indices = vec![0, 1];

    let avail = width.saturating_sub(PLAYER_COL_WIDTH + TEAM_COL_WIDTH);
    let visible_stats = (avail / STAT_COL_WIDTH) as usize;
    let first = PINNED_COLUMNS + state.col_offset;
    let last = state.column_count().min(first + visible_stats);
    for idx in first..last {
        constraints.push(Constraint::Length(STAT_COL_WIDTH));
        indices.push(idx);
    }
    (constraints, indices)
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let (widths, indices) = table_layout(state, area.width);
    render_table_header(frame, sections[0], state, &widths, &indices);

    let list_area = sections[1];
    let rows = state.rows();
    if rows.is_empty() {
        let empty =
            Paragraph::new("No players for this view").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.row_offset, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths.clone())
            .split(row_area);

        let cells = rows[idx].cells(state.tab);
        for (slot, header_idx) in indices.iter().enumerate() {
            if let Some(cell) = cells.get(*header_idx) {
                render_cell_text(frame, cols[slot], cell, Style::default());
            }
        }
    }
}

fn render_table_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    widths: &[Constraint],
    indices: &[usize],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.to_vec())
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    let headers = state.headers();
    for (slot, header_idx) in indices.iter().enumerate() {
        if let Some(name) = headers.get(*header_idx) {
            render_cell_text(frame, cols[slot], name, style);
        }
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(offset: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }
    let start = offset.min(total - visible);
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "FPL Terminal - Help",
        "",
        "Views:",
        "  1            Goalkeepers",
        "  2            Defenders",
        "  3            Midfielders",
        "  4            Forwards",
        "  Tab / ← →    Cycle view",
        "",
        "Table:",
        "  j/k or ↑/↓   Scroll rows",
        "  h/l          Pan stat columns",
        "",
        "Data:",
        "  r            Refresh from the API",
        "  e            Export the eight CSV files",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
