use crate::clipboard::payload_text;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color as SyntectColor, Theme as SyntectTheme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

// Loading syntect's defaults is slow; do it once per process.
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

const THEME_NAME: &str = "base16-ocean.dark";

pub fn init() {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines);
    THEME_SET.get_or_init(ThemeSet::load_defaults);
}

fn theme(ts: &ThemeSet) -> Option<&SyntectTheme> {
    ts.themes
        .get(THEME_NAME)
        .or_else(|| ts.themes.values().next())
}

/// Pretty-prints `value` with two-space indentation and colors it as JSON.
pub fn highlight_json(value: &Value) -> Vec<Line<'static>> {
    highlight(&payload_text(value), "json")
}

/// Highlights `text` using the grammar for `extension`. Falls back to plain
/// lines when no theme is available.
pub fn highlight(text: &str, extension: &str) -> Vec<Line<'static>> {
    let ps = SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines);
    let ts = THEME_SET.get_or_init(ThemeSet::load_defaults);

    let Some(theme) = theme(ts) else {
        return text.lines().map(|l| Line::from(l.to_string())).collect();
    };

    let syntax = ps
        .find_syntax_by_extension(extension)
        .unwrap_or_else(|| ps.find_syntax_plain_text());
    let mut h = HighlightLines::new(syntax, theme);

    LinesWithEndings::from(text)
        .map(|line| {
            let ranges = h.highlight_line(line, ps).unwrap_or_default();
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, content)| {
                    Span::styled(
                        content.trim_end_matches(['\n', '\r']).to_string(),
                        Style::default().fg(to_ratatui_color(style.foreground)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn to_ratatui_color(c: SyntectColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_highlighted_text_matches_copy_payload() {
        let value = json!({"name": "Rowan", "tags": ["a", "b"], "n": 1});
        let lines = highlight_json(&value);
        assert_eq!(plain(&lines).join("\n"), payload_text(&value));
    }

    #[test]
    fn test_colors_are_applied() {
        let lines = highlight_json(&json!({"ok": true}));
        let colored = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .any(|s| matches!(s.style.fg, Some(Color::Rgb(..))));
        assert!(colored);
    }
}
