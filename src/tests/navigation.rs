use super::{app_with, narrow_viewport, settle_scroll, uniform_layout, wide_viewport};
use crate::app::Action;
use crate::executor::ExecError;
use crate::tracking::VisibilityEvent;
use std::time::Instant;

#[test]
fn test_navigation_becomes_active_after_scroll_settles() {
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 20);
    let target = app.catalog.at(4).unwrap().id.clone();

    app.dispatch(Action::Navigate(target.clone()));
    // selection goes through observation, not directly
    assert_eq!(app.active_index(), 0);

    settle_scroll(&mut app);
    assert_eq!(app.active_id(), target);
    assert_eq!(app.scroll.offset, 80);
}

#[test]
fn test_reselect_is_idempotent() {
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 20);
    let target = app.catalog.at(3).unwrap().id.clone();

    app.dispatch(Action::Navigate(target.clone()));
    settle_scroll(&mut app);
    let offset = app.scroll.offset;

    app.dispatch(Action::Navigate(target.clone()));
    settle_scroll(&mut app);
    assert_eq!(app.active_id(), target);
    assert_eq!(app.scroll.offset, offset);
}

#[test]
fn test_landing_wins_over_neighbour_in_view() {
    // two sections fit on screen, so the one below the target is also visible
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 40);
    let target = app.catalog.at(2).unwrap().id.clone();

    app.dispatch(Action::Navigate(target.clone()));
    settle_scroll(&mut app);
    assert_eq!(app.active_id(), target);
}

#[test]
fn test_last_section_reachable_when_clamped() {
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 30);
    let last = app.catalog.len() - 1;
    let target = app.catalog.at(last).unwrap().id.clone();

    app.dispatch(Action::Navigate(target.clone()));
    settle_scroll(&mut app);
    assert_eq!(app.scroll.offset, app.scroll.max_offset());
    assert_eq!(app.active_id(), target);
}

#[test]
fn test_user_scroll_updates_active() {
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 20);
    app.dispatch(Action::Tick(Instant::now()));

    app.dispatch(Action::ScrollBy(60));
    assert_eq!(app.active_index(), 3);

    app.dispatch(Action::ScrollBy(-40));
    assert_eq!(app.active_index(), 1);
}

#[test]
fn test_user_scroll_cancels_programmatic_scroll() {
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 20);
    app.dispatch(Action::Navigate(app.catalog.at(6).unwrap().id.clone()));
    app.dispatch(Action::Tick(Instant::now()));

    app.dispatch(Action::ScrollBy(1));
    assert!(!app.scroll.is_animating());
}

#[test]
fn test_hidden_events_do_not_change_active() {
    let mut app = app_with(true, wide_viewport());
    let id = app.catalog.at(2).unwrap().id.clone();

    app.dispatch(Action::SectionVisibility(VisibilityEvent {
        id: id.clone(),
        visible: false,
    }));
    assert_eq!(app.active_index(), 0);

    app.dispatch(Action::SectionVisibility(VisibilityEvent { id, visible: true }));
    assert_eq!(app.active_index(), 2);
}

#[test]
fn test_manual_mode_selects_directly() {
    let mut app = app_with(false, wide_viewport());
    assert!(!app.is_tracking());
    uniform_layout(&mut app, 20, 20);
    let target = app.catalog.at(5).unwrap().id.clone();

    app.dispatch(Action::Navigate(target.clone()));
    assert_eq!(app.active_id(), target);

    // scrolling never moves the selection without an observer
    settle_scroll(&mut app);
    app.dispatch(Action::ScrollBy(-100));
    assert_eq!(app.active_id(), target);
}

#[test]
fn test_navigation_before_first_layout() {
    let mut app = app_with(true, wide_viewport());
    let target = app.catalog.at(1).unwrap().id.clone();
    app.dispatch(Action::Navigate(target.clone()));
    assert_eq!(app.active_id(), target);
}

#[test]
fn test_navigate_by_clamps_to_catalog() {
    let mut app = app_with(false, wide_viewport());
    app.dispatch(Action::NavigateBy(-1));
    assert_eq!(app.active_index(), 0);

    app.dispatch(Action::NavigateBy(100));
    assert_eq!(app.active_index(), app.catalog.len() - 1);
}

#[test]
fn test_repeated_steps_accumulate_while_scrolling() {
    let mut app = app_with(true, wide_viewport());
    uniform_layout(&mut app, 20, 20);

    app.dispatch(Action::NavigateBy(1));
    app.dispatch(Action::NavigateBy(1));
    settle_scroll(&mut app);
    assert_eq!(app.active_index(), 2);

    app.dispatch(Action::NavigateBy(-1));
    app.dispatch(Action::Tick(Instant::now()));
    app.dispatch(Action::NavigateBy(-1));
    settle_scroll(&mut app);
    assert_eq!(app.active_index(), 0);
}

#[test]
fn test_console_scroll_resets_on_new_selection() {
    let mut app = app_with(false, wide_viewport());
    app.set_console_extent(40, 10);
    app.dispatch(Action::ScrollConsole(12));
    assert_eq!(app.console_scroll, 12);

    // same entry again keeps the position
    app.dispatch(Action::Navigate(app.catalog.first().id.clone()));
    assert_eq!(app.console_scroll, 12);

    app.dispatch(Action::NavigateBy(1));
    assert_eq!(app.console_scroll, 0);

    app.dispatch(Action::ScrollConsole(100));
    assert_eq!(app.console_scroll, 30);
    let id = app.active_id().to_string();
    app.dispatch(Action::Execute(id.clone()));
    app.dispatch(Action::Settle {
        id,
        outcome: Err(ExecError::Timeout(5000)),
    });
    assert_eq!(app.console_scroll, 0);
}

#[test]
fn test_unknown_id_is_ignored() {
    let mut app = app_with(true, wide_viewport());
    app.dispatch(Action::Navigate("nope".into()));
    assert_eq!(app.active_index(), 0);
    assert!(app.dispatch(Action::Execute("nope".into())).is_empty());
}

#[test]
fn test_navigation_closes_mobile_menu() {
    let mut app = app_with(true, narrow_viewport());
    app.dispatch(Action::ToggleMobileMenu);
    assert!(app.mobile_menu_open);

    app.dispatch(Action::Navigate(app.catalog.at(1).unwrap().id.clone()));
    assert!(!app.mobile_menu_open);

    app.dispatch(Action::ToggleMobileMenu);
    app.dispatch(Action::NavigateBy(1));
    assert!(!app.mobile_menu_open);
}

#[test]
fn test_dismiss_closes_topmost_overlay() {
    let mut app = app_with(true, narrow_viewport());
    app.dispatch(Action::ToggleMobileMenu);
    app.dispatch(Action::ToggleHelp);

    app.dispatch(Action::Dismiss);
    assert!(!app.show_help);
    assert!(app.mobile_menu_open);

    app.dispatch(Action::Dismiss);
    assert!(!app.mobile_menu_open);
}
