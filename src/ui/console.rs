use crate::app::App;
use crate::clipboard::CopyFeedback;
use crate::console::LayoutMode;
use crate::execution::ExecutionResult;
use crate::ui::SPINNER;
use crate::ui::syntax;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub const PLACEHOLDER: &str = "Awaiting Input";

/// One-line status for the console title: status code and latency once
/// settled, a spinner while in flight.
pub fn status_text(result: &ExecutionResult, spinner_state: usize) -> Option<String> {
    match result {
        ExecutionResult::Idle => None,
        ExecutionResult::Executing => Some(format!(
            "{} Requesting...",
            SPINNER[spinner_state % SPINNER.len()]
        )),
        ExecutionResult::Settled {
            status, latency_ms, ..
        } => Some(format!("{} OK  {}ms", status, latency_ms)),
        ExecutionResult::Failed { .. } => Some("✗ Failed".to_string()),
    }
}

fn copy_indicator(feedback: &CopyFeedback) -> &'static str {
    match feedback {
        CopyFeedback::None => " y:Copy ",
        CopyFeedback::Copied(_) => " ✓ Copied ",
        CopyFeedback::Failed(_) => " ✗ Copy failed ",
    }
}

pub fn render_console(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let endpoint = app.active_endpoint();
    let result = app.active_result();
    let dragging = app.console.is_dragging();

    let border_style = if dragging {
        Style::default()
            .fg(theme.border_focus)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };

    let status = status_text(result, app.spinner_state);
    let status_style = match result {
        ExecutionResult::Settled { .. } => Style::default().fg(theme.success),
        ExecutionResult::Failed { .. } => Style::default().fg(theme.error),
        _ => Style::default().fg(theme.text_secondary),
    };

    let copy_style = match app.copy_feedback {
        CopyFeedback::Copied(_) => Style::default().fg(theme.success),
        CopyFeedback::Failed(_) => Style::default().fg(theme.error),
        CopyFeedback::None => Style::default().fg(theme.text_secondary),
    };

    let mut block = Block::default()
        .title(format!(" Response Payload / {} ", endpoint.label))
        .title_bottom(Line::from(Span::styled(
            " Content-Type: application/json ",
            Style::default().fg(theme.text_secondary),
        )))
        .borders(Borders::ALL)
        .border_type(if dragging {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(border_style)
        .style(Style::default().bg(theme.background));
    if let Some(status) = status {
        block = block.title(
            Line::from(Span::styled(format!(" {} ", status), status_style))
                .alignment(Alignment::Right),
        );
    }
    if result.response().is_some() {
        block = block.title_bottom(
            Line::from(Span::styled(copy_indicator(&app.copy_feedback), copy_style))
                .alignment(Alignment::Right),
        );
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut payload_lines = 0;
    match result {
        ExecutionResult::Idle => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(40),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(inner);
            let hint = Paragraph::new(vec![
                Line::from(Span::styled(
                    PLACEHOLDER,
                    Style::default()
                        .fg(theme.text_secondary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::raw(""),
                Line::from(Span::styled(
                    "Press Enter to execute this endpoint",
                    Style::default().fg(theme.text_secondary),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(hint, chunks[1]);
        }
        ExecutionResult::Executing => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(45), Constraint::Min(0)])
                .split(inner);
            let spinner = Paragraph::new(Line::from(vec![
                Span::styled(
                    SPINNER[app.spinner_state % SPINNER.len()],
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    format!(" {} {}", endpoint.method.as_str(), endpoint.path),
                    Style::default().fg(theme.text_secondary),
                ),
            ]))
            .alignment(Alignment::Center);
            f.render_widget(spinner, chunks[1]);
        }
        ExecutionResult::Settled { response, .. } => {
            let lines = syntax::highlight_json(response);
            payload_lines = lines.len();
            let max = payload_lines.saturating_sub(inner.height as usize);
            let scroll = (app.console_scroll as usize).min(max) as u16;
            f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
        }
        ExecutionResult::Failed { error } => {
            let body = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Request failed",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::raw(""),
                Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(theme.text_primary),
                )),
                Line::raw(""),
                Line::from(Span::styled(
                    "Press Enter to try again",
                    Style::default().fg(theme.text_secondary),
                )),
            ]);
            f.render_widget(body, inner);
        }
    }

    app.set_console_extent(payload_lines, inner.height);
    app.regions.console = area;
    app.regions.console_handle = match app.layout_mode() {
        LayoutMode::Wide => Rect::new(area.x, area.y, 1, area.height),
        LayoutMode::Narrow => Rect::new(area.x, area.y, area.width, 1),
    };
}
