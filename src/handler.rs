use crate::app::{Action, App, RESIZE_STEP};
use crate::console::LayoutMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Rows moved per wheel notch.
const WHEEL_STEP: i32 = 3;

fn hit(regions: &[(Rect, usize)], col: u16, row: u16) -> Option<usize> {
    regions
        .iter()
        .find(|(rect, _)| rect.contains(Position::new(col, row)))
        .map(|(_, idx)| *idx)
}

pub fn key_action(key_event: KeyEvent, app: &App) -> Option<Action> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    // While help is up only closing keys do anything.
    if app.show_help {
        return match key_event.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    let page = (app.regions.content.height as i32 - 2).max(1);
    match key_event.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateBy(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateBy(-1)),
        KeyCode::Home | KeyCode::Char('g') => app
            .catalog
            .at(0)
            .map(|e| Action::Navigate(e.id.clone())),
        KeyCode::End | KeyCode::Char('G') => app
            .catalog
            .at(app.catalog.len().saturating_sub(1))
            .map(|e| Action::Navigate(e.id.clone())),
        KeyCode::Enter | KeyCode::Char('x') => Some(Action::ExecuteActive),
        KeyCode::PageDown => Some(Action::ScrollBy(page)),
        KeyCode::PageUp => Some(Action::ScrollBy(-page)),
        KeyCode::Char('J') => Some(Action::ScrollConsole(1)),
        KeyCode::Char('K') => Some(Action::ScrollConsole(-1)),
        KeyCode::Char('y') => Some(Action::CopyResponse),
        KeyCode::Char('o') => Some(Action::OpenLink(None)),
        KeyCode::Char(c @ '1'..='9') => Some(Action::OpenLink(Some(c as usize - '1' as usize))),
        KeyCode::Char('m') => Some(Action::ToggleMobileMenu),
        KeyCode::Char('[') => Some(Action::ResizeBy(-RESIZE_STEP)),
        KeyCode::Char(']') => Some(Action::ResizeBy(RESIZE_STEP)),
        KeyCode::Char('t') => Some(Action::CycleTheme),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Dismiss),
        _ => None,
    }
}

pub fn mouse_action(mouse: MouseEvent, app: &App) -> Option<Action> {
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_help {
                return Some(Action::ToggleHelp);
            }
            if let Some(idx) = hit(&app.regions.nav_items, col, row) {
                return app.catalog.at(idx).map(|e| Action::Navigate(e.id.clone()));
            }
            if app.mobile_menu_open && app.layout_mode() == LayoutMode::Narrow {
                // Clicking outside the open menu closes it.
                return Some(Action::ToggleMobileMenu);
            }
            if app
                .regions
                .console_handle
                .contains(Position::new(col, row))
            {
                return Some(Action::ResizeStart);
            }
            hit(&app.regions.execute_buttons, col, row)
                .and_then(|idx| app.catalog.at(idx))
                .map(|e| Action::Execute(e.id.clone()))
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            if !app.console.is_dragging() {
                return None;
            }
            let (x, y) = app.cells.point(col, row);
            Some(Action::PointerMove { x, y })
        }
        MouseEventKind::Up(_) => app.console.is_dragging().then_some(Action::PointerUp),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            let delta = if mouse.kind == MouseEventKind::ScrollDown {
                WHEEL_STEP
            } else {
                -WHEEL_STEP
            };
            if app.regions.console.contains(Position::new(col, row)) {
                Some(Action::ScrollConsole(delta))
            } else {
                Some(Action::ScrollBy(delta))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{app_with, wide_viewport};
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_basic_keys() {
        let app = app_with(true, wide_viewport());
        assert!(matches!(key_action(key(KeyCode::Char('q')), &app), Some(Action::Quit)));
        assert!(matches!(
            key_action(key(KeyCode::Enter), &app),
            Some(Action::ExecuteActive)
        ));
        assert!(matches!(
            key_action(key(KeyCode::Char('3')), &app),
            Some(Action::OpenLink(Some(2)))
        ));
        assert!(matches!(
            key_action(key(KeyCode::Down), &app),
            Some(Action::NavigateBy(1))
        ));

        let ctrl_c = KeyEvent {
            kind: KeyEventKind::Press,
            ..KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        };
        assert!(matches!(key_action(ctrl_c, &app), Some(Action::Quit)));
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app_with(true, wide_viewport());
        app.show_help = true;
        assert!(key_action(key(KeyCode::Enter), &app).is_none());
        assert!(matches!(
            key_action(key(KeyCode::Esc), &app),
            Some(Action::ToggleHelp)
        ));
    }

    #[test]
    fn test_clicks_route_through_regions() {
        let mut app = app_with(true, wide_viewport());
        app.regions.nav_items = vec![(Rect::new(0, 5, 30, 2), 2)];
        app.regions.execute_buttons = vec![(Rect::new(40, 20, 27, 1), 1)];
        app.regions.console_handle = Rect::new(100, 0, 1, 40);

        let nav = mouse_action(mouse(MouseEventKind::Down(MouseButton::Left), 3, 6), &app);
        let expected = app.catalog.at(2).unwrap().id.clone();
        assert!(matches!(nav, Some(Action::Navigate(id)) if id == expected));

        let exec = mouse_action(mouse(MouseEventKind::Down(MouseButton::Left), 45, 20), &app);
        let expected = app.catalog.at(1).unwrap().id.clone();
        assert!(matches!(exec, Some(Action::Execute(id)) if id == expected));

        let grab = mouse_action(mouse(MouseEventKind::Down(MouseButton::Left), 100, 10), &app);
        assert!(matches!(grab, Some(Action::ResizeStart)));

        let miss = mouse_action(mouse(MouseEventKind::Down(MouseButton::Left), 70, 2), &app);
        assert!(miss.is_none());
    }

    #[test]
    fn test_wheel_over_console_scrolls_response() {
        let mut app = app_with(true, wide_viewport());
        app.regions.console = Rect::new(120, 0, 80, 49);

        let over_console = mouse_action(mouse(MouseEventKind::ScrollDown, 150, 10), &app);
        assert!(matches!(over_console, Some(Action::ScrollConsole(3))));
        let over_content = mouse_action(mouse(MouseEventKind::ScrollUp, 60, 10), &app);
        assert!(matches!(over_content, Some(Action::ScrollBy(-3))));
        assert!(matches!(
            key_action(key(KeyCode::Char('K')), &app),
            Some(Action::ScrollConsole(-1))
        ));
    }

    #[test]
    fn test_pointer_moves_only_while_dragging() {
        let mut app = app_with(true, wide_viewport());
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 90, 10);
        assert!(mouse_action(drag, &app).is_none());
        assert!(mouse_action(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &app).is_none());

        app.dispatch(Action::ResizeStart);
        let moved = mouse_action(drag, &app);
        assert!(matches!(moved, Some(Action::PointerMove { x, y }) if x == 720.0 && y == 160.0));
        assert!(matches!(
            mouse_action(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &app),
            Some(Action::PointerUp)
        ));
    }
}
