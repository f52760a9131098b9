pub mod config;
pub mod error;
pub mod player;
pub mod portfolio;

pub use config::{AppConfig, EasingType, GalleryConfig, ScrollConfig};
pub use error::{Error, Result};
pub use player::{PlayerCommand, PlayerMessage, PlayerTransport};
pub use portfolio::{MediaItem, MediaSource, Portfolio, Project};
