use crate::catalog::Method;
use ratatui::style::Color;

pub const THEME_NAMES: [&str; 4] = ["default", "matrix", "cyberpunk", "dracula"];

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub border: Color,
    pub border_focus: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub get: Color,
    pub post: Color,
    pub put: Color,
    pub delete: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Theme {
            name: "default",
            background: Color::Reset,
            border: Color::DarkGray,
            border_focus: Color::Blue,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::LightBlue,
            success: Color::Green,
            error: Color::Red,
            get: Color::LightBlue,
            post: Color::LightGreen,
            put: Color::Yellow,
            delete: Color::LightRed,
        }
    }

    pub fn matrix() -> Self {
        Theme {
            name: "matrix",
            background: Color::Black,
            border: Color::DarkGray,
            border_focus: Color::Green,
            text_primary: Color::Green,
            text_secondary: Color::DarkGray,
            accent: Color::LightGreen,
            success: Color::Green,
            error: Color::Red,
            get: Color::LightGreen,
            post: Color::Green,
            put: Color::LightGreen,
            delete: Color::Red,
        }
    }

    pub fn cyberpunk() -> Self {
        Theme {
            name: "cyberpunk",
            background: Color::Black,
            border: Color::Magenta,
            border_focus: Color::Yellow,
            text_primary: Color::Cyan,
            text_secondary: Color::Magenta,
            accent: Color::LightCyan,
            success: Color::LightGreen,
            error: Color::Red,
            get: Color::LightCyan,
            post: Color::Yellow,
            put: Color::LightMagenta,
            delete: Color::Red,
        }
    }

    pub fn dracula() -> Self {
        Theme {
            name: "dracula",
            background: Color::Rgb(40, 42, 54),
            border: Color::Rgb(98, 114, 164),
            border_focus: Color::Rgb(189, 147, 249),
            text_primary: Color::Rgb(248, 248, 242),
            text_secondary: Color::Rgb(98, 114, 164),
            accent: Color::Rgb(139, 233, 253),
            success: Color::Rgb(80, 250, 123),
            error: Color::Rgb(255, 85, 85),
            get: Color::Rgb(139, 233, 253),
            post: Color::Rgb(80, 250, 123),
            put: Color::Rgb(241, 250, 140),
            delete: Color::Rgb(255, 85, 85),
        }
    }

    /// Unknown names fall back to the default palette.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "matrix" => Theme::matrix(),
            "cyberpunk" => Theme::cyberpunk(),
            "dracula" => Theme::dracula(),
            _ => Theme::default_theme(),
        }
    }

    pub fn next(&self) -> Self {
        let idx = THEME_NAMES
            .iter()
            .position(|n| *n == self.name)
            .unwrap_or(0);
        Theme::by_name(THEME_NAMES[(idx + 1) % THEME_NAMES.len()])
    }

    pub fn method(&self, method: Method) -> Color {
        match method {
            Method::Get => self.get,
            Method::Post => self.post,
            Method::Put => self.put,
            Method::Delete => self.delete,
        }
    }
}
