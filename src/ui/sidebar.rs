use crate::app::App;
use crate::catalog::Catalog;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// One visual row group of the navigation panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavRow<'a> {
    Group(&'a str),
    Item(usize),
}

/// Group headers followed by their members, in first-seen group order.
pub fn nav_rows(catalog: &Catalog) -> Vec<NavRow<'_>> {
    catalog
        .groups()
        .into_iter()
        .flat_map(|(name, members)| {
            std::iter::once(NavRow::Group(name)).chain(members.into_iter().map(NavRow::Item))
        })
        .collect()
}

pub fn render_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let block = Block::default()
        .title(" CoreAPI ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.mobile_menu_open {
            theme.border_focus
        } else {
            theme.border
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut hits = Vec::new();

    if let Some(intro) = &app.catalog.first().intro {
        lines.push(Line::from(Span::styled(
            format!(" {}", intro.title),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled(" ● ", Style::default().fg(Color::Green)),
            Span::styled(
                "OPEN FOR OPPORTUNITIES",
                Style::default().fg(theme.text_secondary),
            ),
        ]));
        lines.push(Line::raw(""));
    }

    let active = app.active_index();
    let mut first_group = true;
    for row in nav_rows(&app.catalog) {
        match row {
            NavRow::Group(name) => {
                if !first_group {
                    lines.push(Line::raw(""));
                }
                first_group = false;
                lines.push(Line::from(Span::styled(
                    format!(" {}", name.to_uppercase()),
                    Style::default()
                        .fg(theme.text_secondary)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            NavRow::Item(idx) => {
                let Some(endpoint) = app.catalog.at(idx) else {
                    continue;
                };
                let is_active = idx == active;
                let row_style = if is_active {
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(theme.text_primary)
                };

                let top = inner.y + lines.len() as u16;
                lines.push(Line::from(vec![
                    Span::raw(if is_active { "▸" } else { " " }),
                    Span::styled(
                        format!(" {:<6}", endpoint.method.as_str()),
                        Style::default()
                            .fg(theme.method(endpoint.method))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(endpoint.path.clone(), row_style),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("         {}", endpoint.label),
                    Style::default().fg(theme.text_secondary),
                )));

                if top + 1 < inner.y + inner.height {
                    hits.push((Rect::new(inner.x, top, inner.width, 2), idx));
                }
            }
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!(" v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled("  ● API ACTIVE", Style::default().fg(Color::Green)),
    ]));

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.background)),
        inner,
    );
    app.regions.nav_items = hits;
}
