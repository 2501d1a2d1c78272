//! Execution console geometry: layout breakpoint, size bounds and the
//! drag-to-resize state machine.
//!
//! All values are in abstract units; one terminal cell is
//! `cell_width` x `cell_height` units (see [`crate::config::Settings`]).

/// Viewports at least this wide use the side-by-side layout.
pub const WIDE_BREAKPOINT: f32 = 1024.0;
pub const MIN_WIDTH: f32 = 280.0;
pub const MAX_WIDTH_RATIO: f32 = 0.7;
pub const MIN_HEIGHT: f32 = 120.0;
pub const MAX_HEIGHT_RATIO: f32 = 0.85;

const DEFAULT_WIDTH: f32 = 450.0;
const DEFAULT_HEIGHT_RATIO: f32 = 0.4;
const EASING: f32 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    Wide,
    Narrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn layout(&self) -> LayoutMode {
        if self.width >= WIDE_BREAKPOINT {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        }
    }

    pub fn resize_axis(&self) -> Axis {
        match self.layout() {
            LayoutMode::Wide => Axis::Horizontal,
            LayoutMode::Narrow => Axis::Vertical,
        }
    }
}

/// Converts between terminal cells and geometry units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: u16,
    pub height: u16,
}

impl CellMetrics {
    pub fn new(width: u16, height: u16) -> Self {
        CellMetrics {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols as f32 * self.width as f32,
            rows as f32 * self.height as f32,
        )
    }

    /// Position of the cell at (`col`, `row`) in units.
    pub fn point(&self, col: u16, row: u16) -> (f32, f32) {
        (
            col as f32 * self.width as f32,
            row as f32 * self.height as f32,
        )
    }

    pub fn cols(&self, width: f32) -> u16 {
        (width / self.width as f32).round().max(0.0) as u16
    }

    pub fn rows(&self, height: f32) -> u16 {
        (height / self.height as f32).round().max(0.0) as u16
    }
}

// When the viewport is too small for both bounds, the upper bound wins so the
// console never exceeds the screen.
fn bounded(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

pub fn clamp_width(width: f32, viewport: Viewport) -> f32 {
    bounded(width, MIN_WIDTH, viewport.width * MAX_WIDTH_RATIO)
}

pub fn clamp_height(height: f32, viewport: Viewport) -> f32 {
    bounded(height, MIN_HEIGHT, viewport.height * MAX_HEIGHT_RATIO)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { axis: Axis, original: Size },
}

#[derive(Clone, Debug)]
pub struct ConsoleState {
    /// Size the console is heading to.
    pub target: Size,
    /// Size currently drawn; trails `target` unless dragging.
    pub shown: Size,
    pub drag: DragState,
}

impl ConsoleState {
    pub fn new(viewport: Viewport) -> Self {
        let size = Size {
            width: clamp_width(DEFAULT_WIDTH, viewport),
            height: clamp_height(viewport.height * DEFAULT_HEIGHT_RATIO, viewport),
        };
        ConsoleState {
            target: size,
            shown: size,
            drag: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn begin_drag(&mut self, viewport: Viewport) {
        self.drag = DragState::Dragging {
            axis: viewport.resize_axis(),
            original: self.target,
        };
    }

    /// Pointer moved to (`x`, `y`) while dragging. Returns whether the size changed.
    pub fn drag_to(&mut self, x: f32, y: f32, viewport: Viewport) -> bool {
        let DragState::Dragging { axis, .. } = self.drag else {
            return false;
        };

        let before = self.target;
        match axis {
            Axis::Horizontal => self.target.width = clamp_width(viewport.width - x, viewport),
            Axis::Vertical => self.target.height = clamp_height(viewport.height - y, viewport),
        }
        self.shown = self.target;
        before != self.target
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Keyboard resize along the active axis.
    pub fn nudge(&mut self, delta: f32, viewport: Viewport) {
        match viewport.resize_axis() {
            Axis::Horizontal => {
                self.target.width = clamp_width(self.target.width + delta, viewport)
            }
            Axis::Vertical => {
                self.target.height = clamp_height(self.target.height + delta, viewport)
            }
        }
    }

    pub fn on_viewport_resized(&mut self, viewport: Viewport) {
        if let DragState::Dragging { axis, .. } = self.drag {
            if axis != viewport.resize_axis() {
                self.end_drag();
            }
        }
        self.target = Size {
            width: clamp_width(self.target.width, viewport),
            height: clamp_height(self.target.height, viewport),
        };
        if self.is_dragging() {
            self.shown = self.target;
        }
    }

    /// Advances the resize animation by one frame.
    pub fn tick(&mut self) {
        if self.is_dragging() {
            self.shown = self.target;
            return;
        }
        self.shown.width = ease(self.shown.width, self.target.width);
        self.shown.height = ease(self.shown.height, self.target.height);
    }
}

fn ease(current: f32, target: f32) -> f32 {
    let diff = target - current;
    if diff.abs() < 1.0 {
        target
    } else {
        current + diff * EASING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Viewport = Viewport {
        width: 1600.0,
        height: 900.0,
    };
    const NARROW: Viewport = Viewport {
        width: 800.0,
        height: 1000.0,
    };

    #[test]
    fn test_cell_metrics_round_trip_columns() {
        let cells = CellMetrics::new(8, 16);
        let viewport = cells.viewport(160, 50);
        assert_eq!(viewport, Viewport::new(1280.0, 800.0));
        assert_eq!(viewport.layout(), LayoutMode::Wide);
        assert_eq!(cells.viewport(100, 50).layout(), LayoutMode::Narrow);

        // dragging the handle to column 100 of 160 leaves a 60 column console
        let mut console = ConsoleState::new(viewport);
        console.begin_drag(viewport);
        let (x, y) = cells.point(100, 10);
        console.drag_to(x, y, viewport);
        assert_eq!(cells.cols(console.target.width), 60);
    }

    #[test]
    fn test_breakpoint() {
        assert_eq!(Viewport::new(1024.0, 10.0).layout(), LayoutMode::Wide);
        assert_eq!(Viewport::new(1023.0, 10.0).layout(), LayoutMode::Narrow);
    }

    #[test]
    fn test_wide_drag_stays_in_bounds() {
        let mut console = ConsoleState::new(WIDE);
        console.begin_drag(WIDE);

        for x in (0..=1600).step_by(7) {
            console.drag_to(x as f32, 0.0, WIDE);
            let w = console.target.width;
            assert!((MIN_WIDTH..=WIDE.width * MAX_WIDTH_RATIO).contains(&w), "width {}", w);
        }

        console.drag_to(1600.0 - 500.0, 0.0, WIDE);
        assert_eq!(console.target.width, 500.0);
    }

    #[test]
    fn test_narrow_drag_only_touches_height() {
        let mut console = ConsoleState::new(NARROW);
        let width_before = console.target.width;
        console.begin_drag(NARROW);

        for y in (0..=1000).step_by(11) {
            console.drag_to(0.0, y as f32, NARROW);
            let h = console.target.height;
            assert!((MIN_HEIGHT..=NARROW.height * MAX_HEIGHT_RATIO).contains(&h), "height {}", h);
        }
        assert_eq!(console.target.width, width_before);
    }

    #[test]
    fn test_moves_ignored_when_idle() {
        let mut console = ConsoleState::new(WIDE);
        let before = console.target;
        assert!(!console.drag_to(100.0, 100.0, WIDE));
        assert_eq!(console.target, before);

        console.begin_drag(WIDE);
        console.end_drag();
        assert!(!console.drag_to(100.0, 100.0, WIDE));
    }

    #[test]
    fn test_animation_only_when_not_dragging() {
        let mut console = ConsoleState::new(WIDE);
        console.nudge(200.0, WIDE);
        assert_ne!(console.shown, console.target);

        console.tick();
        assert!(console.shown.width > 450.0 && console.shown.width < console.target.width);
        for _ in 0..30 {
            console.tick();
        }
        assert_eq!(console.shown, console.target);

        console.begin_drag(WIDE);
        console.drag_to(1000.0, 0.0, WIDE);
        assert_eq!(console.shown, console.target);
    }

    #[test]
    fn test_layout_switch_ends_drag_and_reclamps() {
        let mut console = ConsoleState::new(WIDE);
        console.begin_drag(WIDE);
        console.drag_to(300.0, 0.0, WIDE);

        console.on_viewport_resized(NARROW);
        assert!(!console.is_dragging());
        assert!(console.target.width <= NARROW.width * MAX_WIDTH_RATIO);
    }
}
