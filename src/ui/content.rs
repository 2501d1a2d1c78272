use crate::app::App;
use crate::catalog::EndpointDescriptor;
use crate::execution::ExecutionResult;
use crate::tracking::SectionSpan;
use crate::ui::SPINNER;
use crate::ui::syntax;
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const EXECUTE_LABEL: &str = "[ ▶ Execute Full Endpoint ]";
pub const EXECUTING_LABEL: &str = "Requesting...";

/// Rendered lines of one endpoint section.
pub struct SectionView {
    pub lines: Vec<Line<'static>>,
    /// Row of the execute button, relative to the section top.
    pub execute_row: usize,
}

/// Greedy word wrap by display width; words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            for piece in split_to_width(word, width) {
                let piece_width = piece.width();
                if line_width > 0 && line_width + 1 + piece_width > width {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                if line_width > 0 {
                    line.push(' ');
                    line_width += 1;
                }
                line.push_str(&piece);
                line_width += piece_width;
            }
        }
        out.push(line);
    }
    out
}

/// Cuts `word` into chunks no wider than `width` columns. A single char wider
/// than `width` still gets a chunk of its own.
fn split_to_width(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text.to_uppercase(),
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn build_section(
    endpoint: &EndpointDescriptor,
    result: &ExecutionResult,
    is_active: bool,
    spinner_state: usize,
    theme: &Theme,
    width: u16,
) -> SectionView {
    let width = width as usize;
    let secondary = Style::default().fg(theme.text_secondary);
    let mut lines: Vec<Line<'static>> = Vec::new();

    let mut header = vec![
        Span::styled(
            format!(" {} ", endpoint.method.as_str()),
            Style::default()
                .bg(theme.method(endpoint.method))
                .fg(ratatui::style::Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            endpoint.path.clone(),
            Style::default()
                .fg(if is_active {
                    theme.accent
                } else {
                    theme.text_primary
                })
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(link) = endpoint.project_link() {
        header.push(Span::styled(
            format!("   [{} {}]", link.kind.glyph(), link.label),
            Style::default().fg(theme.accent),
        ));
    }
    lines.push(Line::from(header));
    for l in wrap(&endpoint.description, width) {
        lines.push(Line::from(Span::styled(
            l,
            secondary.add_modifier(Modifier::ITALIC),
        )));
    }

    if let Some(intro) = &endpoint.intro {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            intro.title.clone(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            intro.subtitle.clone(),
            Style::default().fg(theme.accent),
        )));
        if let Some(content) = intro.content.as_deref().filter(|c| !c.is_empty()) {
            lines.push(Line::raw(""));
            for l in wrap(content, width) {
                lines.push(Line::from(Span::styled(
                    l,
                    Style::default().fg(theme.text_primary),
                )));
            }
        }
        if !intro.highlights.is_empty() {
            lines.push(Line::raw(""));
            let label_width = intro
                .highlights
                .iter()
                .map(|h| h.label.to_uppercase().width())
                .max()
                .unwrap_or(0);
            for item in &intro.highlights {
                lines.push(Line::from(vec![
                    Span::styled(
                        {
                            let label = item.label.to_uppercase();
                            let pad = label_width.saturating_sub(label.width());
                            format!(" {}{} ", label, " ".repeat(pad))
                        },
                        secondary.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("│ ", Style::default().fg(theme.border)),
                    Span::styled(item.value.clone(), Style::default().fg(theme.text_primary)),
                ]));
            }
        }
    }

    if !endpoint.links.is_empty() && !endpoint.is_project() {
        lines.push(Line::raw(""));
        if endpoint.intro.is_none() {
            lines.push(heading("Resources", theme));
        }
        for (i, link) in endpoint.links.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(theme.accent)),
                Span::styled(
                    format!("{} {}", link.kind.glyph(), link.label),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", link.url), secondary),
            ]));
        }
    }

    lines.push(Line::raw(""));
    let rule = "─".repeat(width.saturating_sub(24));
    lines.push(Line::from(Span::styled(
        format!("REQUEST SPECIFICATION {}", rule),
        secondary,
    )));
    lines.push(heading("Request Parameters", theme));
    lines.push(Line::from(Span::styled(
        format!(" {:<14}{:<10}{:<9}{}", "Name", "Location", "Type", "Required"),
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::UNDERLINED),
    )));
    let mut params = vec!["Accept"];
    if endpoint.method.has_body() {
        params.push("Content-Type");
    }
    for name in params {
        lines.push(Line::from(Span::styled(
            format!(" {:<14}{:<10}{:<9}{}", name, "header", "string", "true"),
            Style::default().fg(theme.text_primary),
        )));
    }

    if let Some(body) = &endpoint.request_body {
        lines.push(Line::raw(""));
        lines.push(heading("Payload", theme));
        lines.extend(syntax::highlight_json(body));
    }

    lines.push(Line::raw(""));
    let execute_row = lines.len();
    let button = if result.is_executing() {
        Span::styled(
            format!("[ {} {} ]", SPINNER[spinner_state % SPINNER.len()], EXECUTING_LABEL),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            EXECUTE_LABEL,
            Style::default()
                .fg(theme.method(endpoint.method))
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(vec![
        button,
        Span::styled("  simulates a request and returns JSON", secondary),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "·".repeat(width),
        Style::default().fg(theme.border),
    )));
    lines.push(Line::raw(""));

    SectionView { lines, execute_row }
}

pub fn render_content(f: &mut Frame, app: &mut App, area: Rect) {
    let inner = Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    };

    let theme = app.theme.clone();
    let active = app.active_index();
    let mut all_lines: Vec<Line<'static>> = Vec::new();
    let mut spans = Vec::with_capacity(app.catalog.len());
    let mut buttons = Vec::new();

    for (idx, endpoint) in app.catalog.iter().enumerate() {
        let section = build_section(
            endpoint,
            app.result(idx),
            idx == active,
            app.spinner_state,
            &theme,
            inner.width,
        );
        let top = all_lines.len() as u32;
        buttons.push((top + section.execute_row as u32, idx));
        spans.push(SectionSpan {
            id: endpoint.id.clone(),
            top,
            height: section.lines.len() as u32,
        });
        all_lines.extend(section.lines);
    }

    app.set_layout(spans, inner.height as u32);
    let offset = app.scroll.offset;

    app.regions.content = area;
    app.regions.execute_buttons = buttons
        .into_iter()
        .filter(|(row, _)| *row >= offset && *row < offset + inner.height as u32)
        .map(|(row, idx)| {
            let y = inner.y + (row - offset) as u16;
            let w = (EXECUTE_LABEL.width() as u16).min(inner.width);
            (Rect::new(inner.x, y, w, 1), idx)
        })
        .collect();

    let paragraph = Paragraph::new(all_lines)
        .style(Style::default().bg(theme.background))
        .scroll((offset.min(u16::MAX as u32) as u16, 0));
    f.render_widget(paragraph, inner);
}
