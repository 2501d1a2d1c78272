use crate::app::App;
use crate::console::{CellMetrics, LayoutMode, Viewport};
use crate::ui::console::render_console;
use crate::ui::content::render_content;
use crate::ui::sidebar::render_sidebar;

pub mod console;
pub mod content;
pub mod sidebar;
pub mod syntax;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const STATUS_BAR_ROWS: u16 = 1;
const SIDEBAR_COLS: u16 = 34;
const MIN_CONTENT_COLS: u16 = 30;
const MIN_CONTENT_ROWS: u16 = 4;

/// Geometry viewport for a `cols` x `rows` terminal: everything above the
/// status bar.
pub fn main_viewport(cells: &CellMetrics, cols: u16, rows: u16) -> Viewport {
    cells.viewport(cols, rows.saturating_sub(STATUS_BAR_ROWS))
}

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_BAR_ROWS)])
        .split(area);

    match app.layout_mode() {
        LayoutMode::Wide => render_wide(f, app, rows[0]),
        LayoutMode::Narrow => render_narrow(f, app, rows[0]),
    }

    render_status_bar(f, app, rows[1]);

    if app.show_help {
        render_help(f, app);
    }
}

fn render_wide(f: &mut Frame, app: &mut App, area: Rect) {
    let max_console = area
        .width
        .saturating_sub(SIDEBAR_COLS + MIN_CONTENT_COLS)
        .max(1);
    let console_cols = app.cells.cols(app.console.shown.width).clamp(1, max_console);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_COLS),
            Constraint::Min(MIN_CONTENT_COLS),
            Constraint::Length(console_cols),
        ])
        .split(area);

    render_sidebar(f, app, chunks[0]);
    render_content(f, app, chunks[1]);
    render_console(f, app, chunks[2]);
}

fn render_narrow(f: &mut Frame, app: &mut App, area: Rect) {
    let max_console = area.height.saturating_sub(1 + MIN_CONTENT_ROWS).max(1);
    let console_rows = app.cells.rows(app.console.shown.height).clamp(1, max_console);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(MIN_CONTENT_ROWS),
            Constraint::Length(console_rows),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_content(f, app, chunks[1]);
    render_console(f, app, chunks[2]);

    if app.mobile_menu_open {
        let below_header = Rect {
            y: chunks[1].y,
            height: area.height.saturating_sub(1),
            ..area
        };
        let menu = Rect {
            width: SIDEBAR_COLS.min(below_header.width),
            ..below_header
        };
        f.render_widget(Clear, menu);
        render_sidebar(f, app, menu);
    } else {
        // The panel is hidden, so nothing in it can be clicked.
        app.regions.nav_items.clear();
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let endpoint = app.active_endpoint();
    let icon = if app.mobile_menu_open { " ✕ " } else { " ☰ " };
    let line = Line::from(vec![
        Span::styled(
            icon,
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "CoreAPI ",
            Style::default()
                .fg(app.theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(app.theme.border)),
        Span::styled(
            format!("{} ", endpoint.method.as_str()),
            Style::default().fg(app.theme.method(endpoint.method)),
        ),
        Span::styled(
            endpoint.path.clone(),
            Style::default().fg(app.theme.text_secondary),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.background)),
        area,
    );
}

/// Columns left between the left-hand spans and the right-aligned hints.
fn status_padding(left: &[Span], hints: &str, width: u16) -> usize {
    let left_len: usize = left.iter().map(|s| s.content.width()).sum();
    (width as usize).saturating_sub(left_len + hints.width())
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (mode, mode_style) = match app.layout_mode() {
        LayoutMode::Wide => (
            "WIDE",
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        LayoutMode::Narrow => (
            "NARROW",
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    };
    let tracking = if app.is_tracking() { "AUTO" } else { "MANUAL" };

    let mut left_side = vec![
        Span::styled(format!(" {} ", mode), mode_style),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", app.active_endpoint().path),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", tracking),
            Style::default().fg(app.theme.accent),
        ),
    ];

    let in_flight = app.results.in_flight();
    if in_flight > 0 {
        left_side.push(Span::styled(
            format!(
                " {} {} running ",
                SPINNER[app.spinner_state % SPINNER.len()],
                in_flight
            ),
            Style::default().fg(app.theme.text_secondary),
        ));
    }
    if app.console.is_dragging() {
        left_side.push(Span::styled(
            " RESIZING ",
            Style::default().fg(app.theme.border_focus),
        ));
    }
    if let Some(msg) = &app.popup_message {
        left_side.push(Span::styled(
            format!(" {} ", msg),
            Style::default()
                .fg(app.theme.success)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let hints = " ?:Help │ j/k:Nav │ Enter:Execute │ y:Copy │ q:Quit ";
    let padding = status_padding(&left_side, hints, area.width);

    let mut spans = left_side;
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(
            hints,
            Style::default().fg(app.theme.text_secondary),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background)),
        area,
    );
}

pub const KEY_HINTS: [(&str, &str); 14] = [
    ("j / k, ↑ / ↓", "Previous / next endpoint"),
    ("Enter, x", "Execute the active endpoint"),
    ("PgUp / PgDn", "Scroll the document"),
    ("J / K", "Scroll the response"),
    ("y", "Copy the response as JSON"),
    ("o", "Open the primary link"),
    ("1-9", "Open the nth link"),
    ("m", "Toggle the navigation menu"),
    ("[ / ]", "Shrink / grow the console"),
    ("drag border", "Resize the console"),
    ("t", "Cycle theme"),
    ("?", "Toggle this help"),
    ("Esc", "Close popup or menu"),
    ("q, Ctrl-C", "Quit"),
];

fn render_help(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_bottom(" Esc: Close ")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .style(
            Style::default()
                .fg(app.theme.accent)
                .bg(app.theme.background),
        );

    let lines: Vec<Line> = KEY_HINTS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<16}", keys),
                    Style::default()
                        .fg(app.theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(app.theme.text_secondary)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
