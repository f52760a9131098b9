pub mod app;
pub mod event;
pub mod gallery;
pub mod input;
pub mod keymap;
pub mod media_cache;
pub mod nav;
pub mod page_layout;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::{App, Effect};
pub use themes::load_theme;
