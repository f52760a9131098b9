use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use image::DynamicImage;

/// Polls the terminal, at frame rate while something is animating
pub struct EventHandler {
    tick_rate: Duration,
    frame_rate: Duration,
}

/// Outcome of a background media load
pub enum ImageLoadResult {
    Success { url: String, image: DynamicImage },
    Failure { url: String, error: String },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            frame_rate: Duration::from_micros(1_000_000 / u64::from(fps.max(1))),
        }
    }

    pub fn frame_rate(&self) -> Duration {
        self.frame_rate
    }

    /// Wait for the next event. `animating` selects the short frame timeout.
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.frame_rate
        } else {
            self.tick_rate
        };

        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            // Some terminals also report key releases
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            _ => Ok(None),
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}
