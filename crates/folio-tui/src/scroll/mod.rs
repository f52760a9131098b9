//! Smooth scrolling with configurable easing.
//!
//! - `easing`: pure easing curves
//! - `timing`: progress and interpolation against an explicit clock
//! - `config`: duration helpers over the core configuration
//! - `animation`: the page animator and the gallery offset tween

pub mod animation;
pub mod config;
pub mod easing;
pub mod timing;

pub use animation::{OffsetAnimation, ScrollAnimator};
pub use config::{GalleryConfigExt, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
