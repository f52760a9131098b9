//! Scroll animation controllers.
//!
//! [`ScrollAnimator`] drives the page's vertical scroll in terminal lines;
//! [`OffsetAnimation`] is a single eased tween over a pixel offset, used for
//! gallery page scrolls.

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, lerp_u16, progress};

/// One eased tween between two pixel offsets
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetAnimation {
    /// When the tween started
    start: Instant,
    /// Offset at the start (px)
    from: f64,
    /// Offset at the end (px)
    to: f64,
    /// Total length of the tween
    duration: Duration,
    easing: EasingType,
}

impl OffsetAnimation {
    pub fn new(from: f64, to: f64, duration: Duration, easing: EasingType, now: Instant) -> Self {
        Self {
            start: now,
            from,
            to,
            duration,
            easing,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Interpolated value at `now`
    pub fn sample(&self, now: Instant) -> f64 {
        let t = self.easing.apply(progress(self.start, self.duration, now));
        lerp(self.from, self.to, t)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        is_complete(self.start, self.duration, now)
    }
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// When the animation started
    start: Instant,
    /// Starting line
    from: u16,
    /// Target line
    to: u16,
    /// Total animation duration
    duration: Duration,
    /// Easing curve applied to progress
    easing: EasingType,
}

/// Vertical page scroll with batching of rapid scroll requests.
///
/// Call a `scroll_*` method to request movement and `update()` once per frame
/// to advance and read the current line.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    /// Running animation, if any
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Line shown this frame
    current_scroll: u16,
    /// Accumulated delta, applied on the next update
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation running or a delta waiting for the next frame
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Final position after the running animation
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animation
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to an absolute line (instant when smooth scrolling is off)
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() || self.current_scroll == target {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta in lines (positive = down)
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            self.current_scroll =
                (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        self.scroll_by(self.step(), max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: u16) {
        self.scroll_by(-self.step(), max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by((viewport_height / 2).max(1) as i32, max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-((viewport_height / 2).max(1) as i32), max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(viewport_height as i32, max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-(viewport_height as i32), max_scroll);
    }

    fn step(&self) -> i32 {
        if self.config.is_smooth() {
            1
        } else {
            self.config.scroll_lines.max(1) as i32
        }
    }

    /// Advance the animation and return the current line
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let new_target =
                (self.target_scroll() as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        } else {
            self.current_scroll = self.current_scroll.min(max_scroll);
        }

        self.current_scroll
    }

    /// Stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing: EasingType::Linear,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(100, 200, Instant::now());
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_to_reaches_target() {
        let mut animator = ScrollAnimator::new(smooth(100));
        let start = Instant::now();

        animator.scroll_to(40, 200, start);
        assert!(animator.is_animating());
        assert_eq!(animator.update(200, start + Duration::from_millis(50)), 20);
        assert_eq!(animator.update(200, start + Duration::from_millis(100)), 40);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth(100));

        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);

        animator.update(200, Instant::now());
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_scroll_clamped_to_max() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.set_scroll(50);
        animator.scroll_to(300, 100, Instant::now());
        assert_eq!(animator.target_scroll(), 100);
    }

    #[test]
    fn test_offset_animation() {
        let now = Instant::now();
        let anim =
            OffsetAnimation::new(100.0, 300.0, Duration::from_millis(200), EasingType::Linear, now);
        assert_eq!(anim.sample(now), 100.0);
        assert!((anim.sample(now + Duration::from_millis(100)) - 200.0).abs() < 1e-9);
        assert!(!anim.is_complete(now + Duration::from_millis(199)));
        assert!(anim.is_complete(now + Duration::from_millis(200)));
        assert_eq!(anim.target(), 300.0);
    }
}
