//! Duration helpers over the scroll and gallery configuration.

use std::time::Duration;

pub use folio_core::{GalleryConfig, ScrollConfig};

pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Frame interval while something animates
    fn animation_tick_duration(&self) -> Duration;

    /// Smooth scrolling is enabled and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

pub trait GalleryConfigExt {
    /// Duration of the animated page scroll (0.8 of the viewport)
    fn page_animation_duration(&self) -> Duration;

    /// Delays after mount at which initial positioning is attempted
    fn init_delays(&self) -> Vec<Duration>;
}

impl GalleryConfigExt for GalleryConfig {
    fn page_animation_duration(&self) -> Duration {
        Duration::from_millis(self.page_animation_ms)
    }

    fn init_delays(&self) -> Vec<Duration> {
        self.init_delays_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect()
    }
}
