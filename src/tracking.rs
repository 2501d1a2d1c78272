//! Scroll position of the content document and which sections are in view.

/// Fraction of a section that must be on screen for it to count as visible.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: String,
    pub top: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionGeometry {
    pub sections: Vec<SectionSpan>,
    pub offset: u32,
    pub viewport_height: u32,
}

impl SectionGeometry {
    pub fn content_height(&self) -> u32 {
        self.sections
            .last()
            .map(|s| s.top + s.height)
            .unwrap_or_default()
    }

    pub fn top_of(&self, id: &str) -> Option<u32> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.top)
    }

    /// Share of `span` inside the viewport. A section taller than the
    /// viewport counts as fully visible once it fills the viewport.
    pub fn visible_ratio(&self, span: &SectionSpan) -> f32 {
        let basis = span.height.min(self.viewport_height);
        if basis == 0 {
            return 0.0;
        }
        let view_end = self.offset + self.viewport_height;
        let start = span.top.max(self.offset);
        let end = (span.top + span.height).min(view_end);
        end.saturating_sub(start) as f32 / basis as f32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub id: String,
    pub visible: bool,
}

pub trait VisibilityObserver {
    /// Reports sections that crossed the threshold since the last call.
    fn observe(&mut self, geometry: &SectionGeometry) -> Vec<VisibilityEvent>;

    /// Re-reports `target` after a programmatic scroll lands on it.
    fn settle_on(&mut self, target: &str, geometry: &SectionGeometry) -> Option<VisibilityEvent>;
}

#[derive(Clone, Debug)]
pub struct ThresholdObserver {
    threshold: f32,
    visible: Vec<(String, bool)>,
}

impl ThresholdObserver {
    pub fn new(threshold: f32) -> Self {
        ThresholdObserver {
            threshold,
            visible: Vec::new(),
        }
    }

    fn was_visible(&self, id: &str) -> bool {
        self.visible
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, v)| *v)
            .unwrap_or(false)
    }
}

impl Default for ThresholdObserver {
    fn default() -> Self {
        ThresholdObserver::new(VISIBILITY_THRESHOLD)
    }
}

impl VisibilityObserver for ThresholdObserver {
    fn observe(&mut self, geometry: &SectionGeometry) -> Vec<VisibilityEvent> {
        let mut events = Vec::new();
        let mut next = Vec::with_capacity(geometry.sections.len());

        for span in &geometry.sections {
            let visible = geometry.visible_ratio(span) >= self.threshold;
            if visible != self.was_visible(&span.id) {
                events.push(VisibilityEvent {
                    id: span.id.clone(),
                    visible,
                });
            }
            next.push((span.id.clone(), visible));
        }

        self.visible = next;
        events
    }

    fn settle_on(&mut self, target: &str, geometry: &SectionGeometry) -> Option<VisibilityEvent> {
        let span = geometry.sections.iter().find(|s| s.id == target)?;
        (geometry.visible_ratio(span) >= self.threshold).then(|| VisibilityEvent {
            id: span.id.clone(),
            visible: true,
        })
    }
}

/// Scroll offset of the content document, with eased programmatic scrolling.
#[derive(Clone, Debug, Default)]
pub struct ScrollState {
    pub offset: u32,
    max_offset: u32,
    target: Option<(u32, String)>,
}

impl ScrollState {
    pub fn set_bounds(&mut self, content_height: u32, viewport_height: u32) {
        self.max_offset = content_height.saturating_sub(viewport_height);
        self.offset = self.offset.min(self.max_offset);
        if let Some((offset, _)) = &mut self.target {
            *offset = (*offset).min(self.max_offset);
        }
    }

    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Section a programmatic scroll is heading for.
    pub fn target_id(&self) -> Option<&str> {
        self.target.as_ref().map(|(_, id)| id.as_str())
    }

    pub fn scroll_to(&mut self, offset: u32, id: &str) {
        self.target = Some((offset.min(self.max_offset), id.to_string()));
    }

    /// User scroll; cancels any programmatic scroll in progress.
    pub fn scroll_by(&mut self, delta: i32) {
        self.target = None;
        let next = self.offset as i64 + delta as i64;
        self.offset = next.clamp(0, self.max_offset as i64) as u32;
    }

    /// Advances one frame. Returns the target id once the scroll lands.
    pub fn tick(&mut self) -> Option<String> {
        let (goal, _) = self.target.as_ref()?;
        let goal = *goal;

        if self.offset == goal {
            return self.target.take().map(|(_, id)| id);
        }

        let distance = goal.abs_diff(self.offset);
        let step = (distance / 3).max(1);
        if goal > self.offset {
            self.offset += step;
        } else {
            self.offset -= step;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(heights: &[u32], offset: u32, viewport_height: u32) -> SectionGeometry {
        let mut top = 0;
        let sections = heights
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let span = SectionSpan {
                    id: format!("s{}", i),
                    top,
                    height: *h,
                };
                top += h;
                span
            })
            .collect();
        SectionGeometry {
            sections,
            offset,
            viewport_height,
        }
    }

    #[test]
    fn test_reports_only_threshold_crossings() {
        let mut observer = ThresholdObserver::default();
        let g = geometry(&[10, 10, 10], 0, 12);

        let first = observer.observe(&g);
        assert_eq!(
            first,
            vec![VisibilityEvent {
                id: "s0".into(),
                visible: true
            }]
        );
        assert!(observer.observe(&g).is_empty());

        // s1 goes from 2/10 to 7/10 visible; s0 drops to 5/10 and stays visible
        let moved = geometry(&[10, 10, 10], 5, 12);
        assert_eq!(
            observer.observe(&moved),
            vec![VisibilityEvent {
                id: "s1".into(),
                visible: true
            }]
        );

        let further = geometry(&[10, 10, 10], 9, 12);
        let events = observer.observe(&further);
        assert!(events.contains(&VisibilityEvent {
            id: "s0".into(),
            visible: false
        }));
    }

    #[test]
    fn test_tall_section_counts_when_filling_viewport() {
        let g = geometry(&[100, 10], 20, 30);
        assert_eq!(g.visible_ratio(&g.sections[0]), 1.0);
    }

    #[test]
    fn test_settle_on_reports_visible_target() {
        let mut observer = ThresholdObserver::default();
        let g = geometry(&[5, 5, 5], 0, 20);
        observer.observe(&g);

        assert_eq!(
            observer.settle_on("s0", &g),
            Some(VisibilityEvent {
                id: "s0".into(),
                visible: true
            })
        );
        assert_eq!(observer.settle_on("missing", &g), None);
    }

    #[test]
    fn test_scroll_eases_and_lands() {
        let mut scroll = ScrollState::default();
        scroll.set_bounds(100, 20);
        scroll.scroll_to(60, "s3");

        let mut landed = None;
        for _ in 0..100 {
            if let Some(id) = scroll.tick() {
                landed = Some(id);
                break;
            }
        }
        assert_eq!(landed.as_deref(), Some("s3"));
        assert_eq!(scroll.offset, 60);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_scroll_target_clamped_and_user_scroll_cancels() {
        let mut scroll = ScrollState::default();
        scroll.set_bounds(50, 20);
        scroll.scroll_to(45, "last");
        scroll.tick();
        scroll.scroll_by(-100);
        assert_eq!(scroll.offset, 0);
        assert!(!scroll.is_animating());

        scroll.scroll_to(45, "last");
        while scroll.tick().is_none() {}
        assert_eq!(scroll.offset, 30);
    }
}
