//! Viewport visibility tracking for the snap-scrolling feed.
//!
//! Panels are stacked top to bottom and each is exactly one viewport tall.
//! On every scroll or resize the tracker recomputes each panel's visible
//! fraction and reports the panels whose above-threshold state flipped.

use crate::config::{DEFAULT_VIEWPORT_HEIGHT, sanitize_viewport_height};

/// Geometry change of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// Vertical scroll offset of the container, in pixels.
    Scroll { offset: f64 },
    /// New container height, in pixels.
    Resize { height: f64 },
}

/// One threshold crossing reported for a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub video_id: String,
    /// Visible fraction of the panel in `[0, 1]`
    pub ratio: f64,
    /// Whether `ratio` is at or above the tracker threshold
    pub is_intersecting: bool,
}

#[derive(Debug)]
struct ObservedPanel {
    video_id: String,
    // None until the first report after `observe`
    intersecting: Option<bool>,
}

/// Tracks which feed panels are sufficiently visible.
#[derive(Debug)]
pub struct ViewportTracker {
    threshold: f64,
    viewport_height: f64,
    scroll_offset: f64,
    panels: Vec<ObservedPanel>,
    connected: bool,
}

impl ViewportTracker {
    /// Creates a tracker. Unusable heights fall back to the default.
    pub fn new(threshold: f64, viewport_height: f64) -> Self {
        Self {
            threshold,
            viewport_height: sanitize_viewport_height(viewport_height)
                .unwrap_or(DEFAULT_VIEWPORT_HEIGHT),
            scroll_offset: 0.0,
            panels: Vec::new(),
            connected: false,
        }
    }

    /// Starts observing the given panels, in feed order.
    ///
    /// Like a freshly created intersection observer, the first report
    /// contains an entry for every observed panel.
    pub fn observe<I, S>(&mut self, video_ids: I) -> Vec<IntersectionEntry>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.panels = video_ids
            .into_iter()
            .map(|id| ObservedPanel {
                video_id: id.into(),
                intersecting: None,
            })
            .collect();
        self.connected = true;
        self.scroll_offset = self.clamp_offset(self.scroll_offset);
        self.collect_crossings()
    }

    /// Stops observation and releases the observed panels.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.panels.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Applies a geometry change and returns the resulting crossings.
    ///
    /// Returns nothing once disconnected.
    pub fn handle(&mut self, event: ViewportEvent) -> Vec<IntersectionEntry> {
        if !self.connected {
            return Vec::new();
        }

        match event {
            ViewportEvent::Scroll { offset } => {
                self.scroll_offset = self.clamp_offset(offset);
            }
            ViewportEvent::Resize { height } => {
                // Unusable heights leave the layout unchanged.
                let Some(height) = sanitize_viewport_height(height) else {
                    return Vec::new();
                };
                // Keep the same panel index in view after the height change.
                let index = self.current_index();
                self.viewport_height = height;
                self.scroll_offset = self.clamp_offset(index as f64 * self.viewport_height);
            }
        }

        self.collect_crossings()
    }

    /// Scroll event that snaps to the top edge of `index`.
    pub fn snap_to(&self, index: usize) -> ViewportEvent {
        let last = self.panels.len().saturating_sub(1);
        ViewportEvent::Scroll {
            offset: index.min(last) as f64 * self.viewport_height,
        }
    }

    pub fn snap_next(&self) -> ViewportEvent {
        self.snap_to(self.current_index().saturating_add(1))
    }

    pub fn snap_prev(&self) -> ViewportEvent {
        self.snap_to(self.current_index().saturating_sub(1))
    }

    /// Scroll event moving the container by `delta` pixels.
    pub fn scroll_by(&self, delta: f64) -> ViewportEvent {
        ViewportEvent::Scroll {
            offset: self.scroll_offset + delta,
        }
    }

    /// Index of the panel nearest to the current scroll position.
    pub fn current_index(&self) -> usize {
        if self.viewport_height <= 0.0 {
            return 0;
        }
        (self.scroll_offset / self.viewport_height).round() as usize
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Visible fraction of the panel at `index` for the current geometry.
    pub fn visible_ratio(&self, index: usize) -> f64 {
        let h = self.viewport_height;
        if h <= 0.0 {
            return 0.0;
        }
        let top = index as f64 * h - self.scroll_offset;
        let bottom = top + h;
        let visible = (bottom.min(h) - top.max(0.0)).max(0.0);
        (visible / h).clamp(0.0, 1.0)
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        let max = self.panels.len().saturating_sub(1) as f64 * self.viewport_height;
        if offset.is_finite() && max.is_finite() {
            offset.clamp(0.0, max)
        } else {
            0.0
        }
    }

    fn collect_crossings(&mut self) -> Vec<IntersectionEntry> {
        let ratios: Vec<f64> = (0..self.panels.len())
            .map(|index| self.visible_ratio(index))
            .collect();
        let threshold = self.threshold;

        let mut entries = Vec::new();
        for (panel, ratio) in self.panels.iter_mut().zip(ratios) {
            let is_intersecting = ratio > 0.0 && ratio >= threshold;
            if panel.intersecting != Some(is_intersecting) {
                panel.intersecting = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    video_id: panel.video_id.clone(),
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}
