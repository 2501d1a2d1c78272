use crate::catalog::{Catalog, EndpointDescriptor};
use crate::clipboard::{self, CopyFeedback};
use crate::config::Settings;
use crate::console::{CellMetrics, ConsoleState, LayoutMode, Viewport};
use crate::execution::{ExecutionResult, ExecutionTable};
use crate::executor::{Completion, ExecError, ExecRequest};
use crate::tracking::{
    ScrollState, SectionGeometry, SectionSpan, ThresholdObserver, VisibilityEvent,
    VisibilityObserver,
};
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

static IDLE: ExecutionResult = ExecutionResult::Idle;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);
const SPINNER_FRAMES: usize = 10;
/// Keyboard resize step, in units.
pub const RESIZE_STEP: f32 = 40.0;

#[derive(Debug)]
pub enum Action {
    /// Select an endpoint from the navigation panel.
    Navigate(String),
    /// Move the selection up or down the catalog.
    NavigateBy(i32),
    Execute(String),
    ExecuteActive,
    Settle {
        id: String,
        outcome: Result<Completion, ExecError>,
    },
    SectionVisibility(VisibilityEvent),
    ScrollBy(i32),
    /// Scroll the response payload in the console.
    ScrollConsole(i32),
    ToggleMobileMenu,
    Dismiss,
    ResizeStart,
    PointerMove { x: f32, y: f32 },
    PointerUp,
    ResizeBy(f32),
    ViewportResized(Viewport),
    CopyResponse,
    CopyFinished { ok: bool, at: Instant },
    /// `None` opens the primary link, `Some(n)` the nth link (0-based).
    OpenLink(Option<usize>),
    Notify(String),
    CycleTheme,
    ToggleHelp,
    Tick(Instant),
    Quit,
}

/// Side effects the store asks the runtime to perform.
#[derive(Debug, PartialEq)]
pub enum Effect {
    Execute(ExecRequest),
    WriteClipboard(String),
    OpenUrl(String),
}

/// Screen areas recorded during render, used to route mouse clicks.
#[derive(Clone, Debug, Default)]
pub struct HitRegions {
    pub nav_items: Vec<(Rect, usize)>,
    pub execute_buttons: Vec<(Rect, usize)>,
    pub console_handle: Rect,
    pub console: Rect,
    pub content: Rect,
}

pub struct App {
    pub catalog: Catalog,
    active: usize,
    pub results: ExecutionTable,
    pub mobile_menu_open: bool,

    pub viewport: Viewport,
    pub cells: CellMetrics,
    pub console: ConsoleState,
    pub console_scroll: u16,
    console_max_scroll: u16,
    pub scroll: ScrollState,
    sections: Vec<SectionSpan>,
    viewport_rows: u32,
    observer: Option<Box<dyn VisibilityObserver>>,

    pub copy_feedback: CopyFeedback,
    pub popup_message: Option<String>,
    pub notification_time: Option<Instant>,
    pub show_help: bool,
    pub spinner_state: usize,
    pub theme: Theme,
    pub regions: HitRegions,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, settings: &Settings, viewport: Viewport) -> App {
        let observer: Option<Box<dyn VisibilityObserver>> = if settings.auto_track {
            Some(Box::new(ThresholdObserver::default()))
        } else {
            None
        };
        Self::with_observer(catalog, settings, viewport, observer)
    }

    pub fn with_observer(
        catalog: Catalog,
        settings: &Settings,
        viewport: Viewport,
        observer: Option<Box<dyn VisibilityObserver>>,
    ) -> App {
        let results = ExecutionTable::new(catalog.len());
        App {
            catalog,
            active: 0,
            results,
            mobile_menu_open: false,
            viewport,
            cells: CellMetrics::new(settings.cell_width, settings.cell_height),
            console: ConsoleState::new(viewport),
            console_scroll: 0,
            console_max_scroll: 0,
            scroll: ScrollState::default(),
            sections: Vec::new(),
            viewport_rows: 0,
            observer,
            copy_feedback: CopyFeedback::None,
            popup_message: None,
            notification_time: None,
            show_help: false,
            spinner_state: 0,
            theme: Theme::by_name(&settings.theme),
            regions: HitRegions::default(),
            should_quit: false,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_id(&self) -> &str {
        &self.active_endpoint().id
    }

    pub fn active_endpoint(&self) -> &EndpointDescriptor {
        &self.catalog.endpoints()[self.active]
    }

    pub fn result(&self, index: usize) -> &ExecutionResult {
        self.results.get(index).unwrap_or(&IDLE)
    }

    pub fn result_for(&self, id: &str) -> Option<&ExecutionResult> {
        self.catalog.index_of(id).and_then(|idx| self.results.get(idx))
    }

    pub fn active_result(&self) -> &ExecutionResult {
        self.result(self.active)
    }

    pub fn is_tracking(&self) -> bool {
        self.observer.is_some()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.viewport.layout()
    }

    pub fn show_notification(&mut self, msg: String) {
        self.popup_message = Some(msg);
        self.notification_time = Some(Instant::now());
    }

    /// Records the content layout produced by the last render.
    pub fn set_layout(&mut self, sections: Vec<SectionSpan>, viewport_height: u32) {
        let content_height = sections
            .last()
            .map(|s| s.top + s.height)
            .unwrap_or_default();
        self.sections = sections;
        self.scroll.set_bounds(content_height, viewport_height);
        self.viewport_rows = viewport_height;
    }

    /// Records how many payload lines the console holds and how many rows
    /// it can show.
    pub fn set_console_extent(&mut self, lines: usize, rows: u16) {
        let max = lines.saturating_sub(rows as usize).min(u16::MAX as usize);
        self.console_max_scroll = max as u16;
        self.console_scroll = self.console_scroll.min(self.console_max_scroll);
    }

    pub fn section_geometry(&self) -> SectionGeometry {
        SectionGeometry {
            sections: self.sections.clone(),
            offset: self.scroll.offset,
            viewport_height: self.viewport_rows,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Navigate(id) => self.navigate(&id),
            Action::NavigateBy(delta) => {
                // Step from the target of a scroll still in flight.
                let from = self
                    .scroll
                    .target_id()
                    .and_then(|id| self.catalog.index_of(id))
                    .unwrap_or(self.active);
                let len = self.catalog.len() as i64;
                let next = (from as i64 + delta as i64).clamp(0, len - 1) as usize;
                if let Some(id) = self.catalog.at(next).map(|e| e.id.clone()) {
                    self.navigate(&id);
                }
            }
            Action::Execute(id) => return self.execute(&id),
            Action::ExecuteActive => {
                let id = self.active_id().to_string();
                return self.execute(&id);
            }
            Action::Settle { id, outcome } => self.settle(&id, outcome),
            Action::SectionVisibility(event) => self.apply_visibility(event),
            Action::ScrollBy(delta) => {
                self.scroll.scroll_by(delta);
                self.observe_sections(None);
            }
            Action::ScrollConsole(delta) => {
                let next = self.console_scroll as i32 + delta;
                self.console_scroll = next.clamp(0, self.console_max_scroll as i32) as u16;
            }
            Action::ToggleMobileMenu => self.mobile_menu_open = !self.mobile_menu_open,
            Action::Dismiss => {
                if self.show_help {
                    self.show_help = false;
                } else if self.mobile_menu_open {
                    self.mobile_menu_open = false;
                } else {
                    self.popup_message = None;
                    self.notification_time = None;
                }
            }
            Action::ResizeStart => self.console.begin_drag(self.viewport),
            Action::PointerMove { x, y } => {
                self.console.drag_to(x, y, self.viewport);
            }
            Action::PointerUp => self.console.end_drag(),
            Action::ResizeBy(delta) => self.console.nudge(delta, self.viewport),
            Action::ViewportResized(viewport) => {
                self.viewport = viewport;
                self.console.on_viewport_resized(viewport);
            }
            Action::CopyResponse => {
                if let Some(value) = self.active_result().response() {
                    return vec![Effect::WriteClipboard(clipboard::payload_text(value))];
                }
                self.show_notification("Nothing to copy yet, execute the endpoint first".into());
            }
            Action::CopyFinished { ok, at } => {
                self.copy_feedback = CopyFeedback::from_outcome(ok, at);
            }
            Action::OpenLink(which) => {
                let endpoint = self.active_endpoint();
                let url = match which {
                    None => endpoint.primary_link(),
                    Some(n) => endpoint.links.get(n),
                }
                .map(|link| link.url.clone());
                match url {
                    Some(url) => return vec![Effect::OpenUrl(url)],
                    None => {
                        let msg = format!("No link for {}", endpoint.path);
                        self.show_notification(msg);
                    }
                }
            }
            Action::Notify(msg) => self.show_notification(msg),
            Action::CycleTheme => {
                self.theme = self.theme.next();
                self.show_notification(format!("Theme: {}", self.theme.name));
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Tick(now) => self.tick(now),
            Action::Quit => {
                self.console.end_drag();
                self.should_quit = true;
            }
        }
        Vec::new()
    }

    fn navigate(&mut self, id: &str) {
        let Some(index) = self.catalog.index_of(id) else {
            log::warn!("navigation to unknown endpoint {}", id);
            return;
        };
        self.mobile_menu_open = false;

        let top = self.sections.iter().find(|s| s.id == id).map(|s| s.top);
        if let Some(top) = top {
            self.scroll.scroll_to(top, id);
        }
        // Without observation, or before the first layout, selection is direct.
        if self.observer.is_none() || top.is_none() {
            self.select(index);
        }
    }

    fn execute(&mut self, id: &str) -> Vec<Effect> {
        let Some(index) = self.catalog.index_of(id) else {
            log::warn!("execute for unknown endpoint {}", id);
            return Vec::new();
        };
        let Some(slot) = self.results.get_mut(index) else {
            return Vec::new();
        };
        if !slot.begin() {
            log::debug!("{} already executing, ignoring", id);
            return Vec::new();
        }

        let endpoint = &self.catalog.endpoints()[index];
        log::info!("execute {} {}", endpoint.method.as_str(), endpoint.path);
        vec![Effect::Execute(ExecRequest::for_endpoint(endpoint))]
    }

    fn settle(&mut self, id: &str, outcome: Result<Completion, ExecError>) {
        let Some(index) = self.catalog.index_of(id) else {
            log::warn!("completion for unknown endpoint {}", id);
            return;
        };
        let Some(slot) = self.results.get_mut(index) else {
            return;
        };
        if !slot.settle(outcome) {
            log::warn!("completion for {} arrived while not executing", id);
            return;
        }
        if index == self.active {
            self.console_scroll = 0;
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.active {
            self.active = index;
            self.console_scroll = 0;
        }
    }

    fn apply_visibility(&mut self, event: VisibilityEvent) {
        if !event.visible {
            return;
        }
        if let Some(index) = self.catalog.index_of(&event.id) {
            self.select(index);
        }
    }

    /// Runs the observer over the current geometry; `landed` is the target of
    /// a programmatic scroll that just finished.
    fn observe_sections(&mut self, landed: Option<String>) {
        let geometry = self.section_geometry();
        let Some(observer) = self.observer.as_mut() else {
            return;
        };

        let mut events = observer.observe(&geometry);
        if let Some(target) = landed {
            events.extend(observer.settle_on(&target, &geometry));
        }
        for event in events {
            self.apply_visibility(event);
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.results.in_flight() > 0 {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES;
        }
        self.console.tick();
        self.copy_feedback.expire(now);

        if let Some(time) = self.notification_time {
            if now.saturating_duration_since(time) > NOTIFICATION_TTL {
                self.popup_message = None;
                self.notification_time = None;
            }
        }

        let landed = self.scroll.tick();
        self.observe_sections(landed);
    }
}
