//! Horizontal scroll position of one gallery.
//!
//! The offset is kept in pixels inside `[0, W - V]`. Because the content is
//! three identical laps of width `T = W / 3`, any offset can be shifted by
//! `±T` without a visible change; [`ScrollController::normalize`] uses that to
//! keep the offset away from both ends.

use std::time::{Duration, Instant};

use folio_core::GalleryConfig;
use tracing::debug;

use crate::scroll::{EasingType, GalleryConfigExt, OffsetAnimation};

/// Scrollable width `W` and visible width `V`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub total_width: f64,
    pub visible_width: f64,
}

impl ViewportMetrics {
    /// Loop period `T`
    pub fn lap_width(&self) -> f64 {
        self.total_width / 3.0
    }

    /// Largest reachable offset
    pub fn max_offset(&self) -> f64 {
        (self.total_width - self.visible_width).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    fn sign(self) -> f64 {
        match self {
            ScrollDirection::Left => -1.0,
            ScrollDirection::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollController {
    /// Current offset (px), always inside `[0, W - V]`
    offset: f64,
    /// Unknown until the gallery is laid out
    metrics: Option<ViewportMetrics>,
    can_scroll_left: bool,
    can_scroll_right: bool,
    /// Running page-scroll tween
    animation: Option<OffsetAnimation>,
    /// Set by the first successful `initialize`
    initialized: bool,
    /// Share of `V` left visible before the middle lap after initializing
    initial_offset_fraction: f64,
    /// Lower wrap threshold as a share of `T`
    wrap_lower_fraction: f64,
    /// Tolerance (px) for the right edge flag
    edge_epsilon: f64,
    /// Share of `V` moved by one page scroll
    page_fraction: f64,
    page_duration: Duration,
    page_easing: EasingType,
}

impl ScrollController {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            offset: 0.0,
            metrics: None,
            can_scroll_left: false,
            can_scroll_right: false,
            animation: None,
            initialized: false,
            initial_offset_fraction: config.initial_offset_fraction,
            wrap_lower_fraction: config.wrap_lower_fraction,
            edge_epsilon: config.edge_epsilon,
            page_fraction: config.page_fraction,
            page_duration: config.page_animation_duration(),
            page_easing: config.page_easing,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn metrics(&self) -> Option<ViewportMetrics> {
        self.metrics
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn can_scroll_left(&self) -> bool {
        self.can_scroll_left
    }

    pub fn can_scroll_right(&self) -> bool {
        self.can_scroll_right
    }

    /// Apply new viewport metrics (mount, resize, tiles resized)
    pub fn set_metrics(&mut self, metrics: ViewportMetrics) {
        if self.metrics == Some(metrics) {
            return;
        }
        self.metrics = Some(metrics);
        self.set_offset(self.offset);
    }

    /// Position the view just before the start of the middle lap.
    ///
    /// Returns false while metrics are unknown.
    pub fn initialize(&mut self) -> bool {
        let Some(metrics) = self.metrics else {
            return false;
        };
        let target = metrics.lap_width() - self.initial_offset_fraction * metrics.visible_width;
        self.set_offset(target);
        self.initialized = true;
        debug!("Gallery positioned at {:.1}px (lap {:.1}px)", self.offset, metrics.lap_width());
        true
    }

    /// Shift that brings `offset` back into the wrap band: `-T`, `+T` or 0.
    ///
    /// When the scroll limit is shorter than two laps it becomes the upper
    /// threshold. Without room for a full lap plus the lower margin nothing
    /// wraps.
    pub fn wrap_shift(&self, offset: f64) -> f64 {
        let Some(metrics) = self.metrics else {
            return 0.0;
        };
        let lap = metrics.lap_width();
        let limit = metrics.max_offset();
        let lower = self.wrap_lower_fraction * lap;
        if lap <= 0.0 || limit <= lap + lower {
            return 0.0;
        }

        let upper = (2.0 * lap).min(limit);
        if offset >= upper {
            -lap
        } else if offset < lower {
            lap
        } else {
            0.0
        }
    }

    /// Single-step wrap of an offset into `[0.1·T, 2·T)`
    pub fn normalize(&self, offset: f64) -> f64 {
        offset + self.wrap_shift(offset)
    }

    /// Write an offset, clamped to the scrollable range; edge flags follow
    pub fn set_offset(&mut self, offset: f64) -> f64 {
        let limit = self.metrics.map(|m| m.max_offset()).unwrap_or(0.0);
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, limit)
        } else {
            0.0
        };
        self.update_edges();
        self.offset
    }

    /// Move by `delta` and normalize. Returns the wrap shift applied.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let target = self.offset + delta;
        let shift = self.wrap_shift(target);
        if shift != 0.0 {
            debug!("Gallery wrapped by {:.1}px at {:.1}px", shift, target);
        }
        self.set_offset(target + shift);
        shift
    }

    fn update_edges(&mut self) {
        match self.metrics {
            Some(m) => {
                self.can_scroll_left = self.offset > 0.0;
                self.can_scroll_right =
                    self.offset < m.total_width - m.visible_width - self.edge_epsilon;
            }
            None => {
                self.can_scroll_left = false;
                self.can_scroll_right = false;
            }
        }
    }

    /// Start an animated scroll by `page_fraction` of the visible width
    pub fn page_scroll(&mut self, direction: ScrollDirection, now: Instant) -> bool {
        let Some(metrics) = self.metrics else {
            return false;
        };
        let from = self.offset;
        let amount = self.page_fraction * metrics.visible_width;
        let target = (from + direction.sign() * amount).clamp(0.0, metrics.max_offset());

        if self.page_easing == EasingType::None || self.page_duration.is_zero() {
            self.set_offset(target);
            let normalized = self.normalize(self.offset);
            self.set_offset(normalized);
            return true;
        }

        self.animation = Some(OffsetAnimation::new(
            from,
            target,
            self.page_duration,
            self.page_easing,
            now,
        ));
        true
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Advance a running page animation. Returns true while it is running.
    pub fn tick_animation(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation.as_ref() else {
            return false;
        };

        if animation.is_complete(now) {
            let target = animation.target();
            self.animation = None;
            self.set_offset(target);
            let normalized = self.normalize(self.offset);
            self.set_offset(normalized);
            false
        } else {
            let value = animation.sample(now);
            self.set_offset(value);
            true
        }
    }
}
