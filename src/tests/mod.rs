use crate::app::{Action, App};
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::console::Viewport;
use crate::tracking::SectionSpan;
use std::time::Instant;

mod navigation;

/// 200x50 cells at the default cell size.
pub fn wide_viewport() -> Viewport {
    Viewport::new(1600.0, 800.0)
}

/// 100x60 cells at the default cell size.
pub fn narrow_viewport() -> Viewport {
    Viewport::new(800.0, 960.0)
}

pub fn app_with(auto_track: bool, viewport: Viewport) -> App {
    let settings = Settings {
        auto_track,
        ..Settings::default()
    };
    App::new(Catalog::bundled().unwrap(), &settings, viewport)
}

pub fn two_entry_catalog() -> Catalog {
    Catalog::from_json(
        r#"[
  { "id": "a", "path": "/a", "method": "GET", "label": "A", "description": "first",
    "group": "G", "response": { "name": "alpha", "n": 1 } },
  { "id": "b", "path": "/b", "method": "GET", "label": "B", "description": "second",
    "group": "G", "response": { "name": "beta", "tags": ["x", "y"] } }
]"#,
    )
    .unwrap()
}

/// Lays every section out at `height` rows, as a render would.
pub fn uniform_layout(app: &mut App, height: u32, viewport_rows: u32) {
    let spans = app
        .catalog
        .iter()
        .enumerate()
        .map(|(i, e)| SectionSpan {
            id: e.id.clone(),
            top: i as u32 * height,
            height,
        })
        .collect();
    app.set_layout(spans, viewport_rows);
}

/// Ticks until any programmatic scroll has landed.
pub fn settle_scroll(app: &mut App) {
    for _ in 0..200 {
        app.dispatch(Action::Tick(Instant::now()));
        if !app.scroll.is_animating() {
            return;
        }
    }
    panic!("scroll never settled");
}
