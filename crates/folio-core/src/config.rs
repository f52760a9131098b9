use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (logs, image cache)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Portfolio content file; defaults to `<data_dir>/portfolio.toml`
    #[serde(default)]
    pub content: Option<PathBuf>,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Decode and draw images (otherwise tiles show placeholders only)
    #[serde(default = "default_true")]
    pub image_preview: bool,
    /// Height of a gallery row in terminal rows
    #[serde(default = "default_tile_rows")]
    pub tile_rows: u16,
    /// Gap between tiles in terminal columns
    #[serde(default = "default_tile_gap")]
    pub tile_gap: u16,
    /// Page (vertical) scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            image_preview: default_true(),
            tile_rows: default_tile_rows(),
            tile_gap: default_tile_gap(),
            scroll: ScrollConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Easing curve for scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Cubic ease-in-out, closest to a browser's smooth scroll
    EaseInOut,
}

/// Smooth scroll animation settings for the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per step when smooth scrolling is disabled
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while anything animates (auto-scroll, momentum, easing)
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Tuned constants of the carousel engine.
///
/// All distances are pixels, all rates are per animation frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Auto-scroll advance per frame
    #[serde(default = "default_auto_scroll_speed")]
    pub auto_scroll_speed: f64,
    /// Scroll distance per pointer distance while dragging
    #[serde(default = "default_drag_multiplier")]
    pub drag_multiplier: f64,
    /// Velocity multiplier applied every coasting frame
    #[serde(default = "default_momentum_decay")]
    pub momentum_decay: f64,
    /// Velocity below which momentum stops
    #[serde(default = "default_momentum_threshold")]
    pub momentum_threshold: f64,
    /// Pointer travel that turns a press into a drag
    #[serde(default = "default_click_threshold")]
    pub click_threshold: f64,
    /// Tolerance used for the scroll-right edge flag
    #[serde(default = "default_edge_epsilon")]
    pub edge_epsilon: f64,
    /// Fraction of the visible width moved by a page scroll
    #[serde(default = "default_page_fraction")]
    pub page_fraction: f64,
    /// Fraction of the visible width kept before the middle lap on start
    #[serde(default = "default_initial_offset_fraction")]
    pub initial_offset_fraction: f64,
    /// Fraction of one lap below which the offset wraps forward
    #[serde(default = "default_wrap_lower_fraction")]
    pub wrap_lower_fraction: f64,
    /// Delays after mount at which the initial position is applied
    #[serde(default = "default_init_delays")]
    pub init_delays_ms: Vec<u64>,
    /// Number of live players that start playing
    #[serde(default = "default_autoplay_instances")]
    pub autoplay_instances: usize,
    /// Duration of the smooth page scroll
    #[serde(default = "default_page_animation")]
    pub page_animation_ms: u64,
    /// Easing of the smooth page scroll
    #[serde(default = "default_page_easing")]
    pub page_easing: EasingType,
    /// Width/height ratio used for images whose size is not known yet
    #[serde(default = "default_placeholder_aspect")]
    pub placeholder_aspect: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            auto_scroll_speed: default_auto_scroll_speed(),
            drag_multiplier: default_drag_multiplier(),
            momentum_decay: default_momentum_decay(),
            momentum_threshold: default_momentum_threshold(),
            click_threshold: default_click_threshold(),
            edge_epsilon: default_edge_epsilon(),
            page_fraction: default_page_fraction(),
            initial_offset_fraction: default_initial_offset_fraction(),
            wrap_lower_fraction: default_wrap_lower_fraction(),
            init_delays_ms: default_init_delays(),
            autoplay_instances: default_autoplay_instances(),
            page_animation_ms: default_page_animation(),
            page_easing: default_page_easing(),
            placeholder_aspect: default_placeholder_aspect(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("paper-dark", "paper-light", "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub background: Option<String>,
    pub surface: Option<String>,
    pub foreground: Option<String>,
    pub muted: Option<String>,
    pub accent: Option<String>,
    pub border: Option<String>,
    pub scrim: Option<String>,
    pub error: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-Tab>", "<CR>", "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Select the next section
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Select the previous section
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Page the selected gallery left
    #[serde(default = "default_key_gallery_left")]
    pub gallery_left: String,
    /// Page the selected gallery right
    #[serde(default = "default_key_gallery_right")]
    pub gallery_right: String,
    /// Open the first visible image in the lightbox
    #[serde(default = "default_key_open_lightbox")]
    pub open_lightbox: String,
    /// Play/pause the first visible live player
    #[serde(default = "default_key_toggle_playback")]
    pub toggle_playback: String,
    /// Show/hide the project description
    #[serde(default = "default_key_toggle_info")]
    pub toggle_info: String,
    /// Open the focused video, clip or link externally
    #[serde(default = "default_key_open_external")]
    pub open_external: String,
    #[serde(default = "default_key_work_menu")]
    pub work_menu: String,
    #[serde(default = "default_key_contact_menu")]
    pub contact_menu: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            gallery_left: default_key_gallery_left(),
            gallery_right: default_key_gallery_right(),
            open_lightbox: default_key_open_lightbox(),
            toggle_playback: default_key_toggle_playback(),
            toggle_info: default_key_toggle_info(),
            open_external: default_key_open_external(),
            work_menu: default_key_work_menu(),
            contact_menu: default_key_contact_menu(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_section() -> String { "j".to_string() }
fn default_key_prev_section() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<C-f>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_gallery_left() -> String { "h".to_string() }
fn default_key_gallery_right() -> String { "l".to_string() }
fn default_key_open_lightbox() -> String { "<CR>".to_string() }
fn default_key_toggle_playback() -> String { "<Space>".to_string() }
fn default_key_toggle_info() -> String { "i".to_string() }
fn default_key_open_external() -> String { "o".to_string() }
fn default_key_work_menu() -> String { "w".to_string() }
fn default_key_contact_menu() -> String { "c".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_tile_rows() -> u16 {
    12
}

fn default_tile_gap() -> u16 {
    1
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_auto_scroll_speed() -> f64 {
    0.3
}

fn default_drag_multiplier() -> f64 {
    2.0
}

fn default_momentum_decay() -> f64 {
    0.96
}

fn default_momentum_threshold() -> f64 {
    0.3
}

fn default_click_threshold() -> f64 {
    5.0
}

fn default_edge_epsilon() -> f64 {
    10.0
}

fn default_page_fraction() -> f64 {
    0.8
}

fn default_initial_offset_fraction() -> f64 {
    0.08
}

fn default_wrap_lower_fraction() -> f64 {
    0.1
}

fn default_init_delays() -> Vec<u64> {
    vec![100, 300, 600, 1000]
}

fn default_autoplay_instances() -> usize {
    3
}

fn default_page_animation() -> u64 {
    350
}

fn default_page_easing() -> EasingType {
    EasingType::EaseInOut
}

fn default_placeholder_aspect() -> f64 {
    4.0 / 3.0
}

fn default_theme_name() -> String {
    "paper-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
pub(crate) fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Portfolio content file (with tilde expansion)
    pub fn content_path(&self) -> PathBuf {
        match self.general.content {
            Some(ref path) => expand_tilde(path),
            None => self.data_dir().join("portfolio.toml"),
        }
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// On-disk cache for downloaded media
    pub fn image_cache_dir(&self) -> PathBuf {
        self.data_dir().join("image_cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_defaults_match_tuned_constants() {
        let config = GalleryConfig::default();
        assert_eq!(config.auto_scroll_speed, 0.3);
        assert_eq!(config.drag_multiplier, 2.0);
        assert_eq!(config.momentum_decay, 0.96);
        assert_eq!(config.momentum_threshold, 0.3);
        assert_eq!(config.click_threshold, 5.0);
        assert_eq!(config.edge_epsilon, 10.0);
        assert_eq!(config.init_delays_ms, vec![100, 300, 600, 1000]);
        assert_eq!(config.autoplay_instances, 3);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [gallery]
            drag_multiplier = 3.0

            [ui]
            theme = "nord"
            "#,
        )
        .unwrap();

        assert_eq!(config.gallery.drag_multiplier, 3.0);
        assert_eq!(config.gallery.momentum_decay, 0.96);
        assert_eq!(config.ui.theme.name, "nord");
        assert_eq!(config.ui.tile_rows, 12);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_theme_as_map() {
        let config: AppConfig = toml::from_str(
            r##"
            [ui.theme]
            name = "paper-light"
            colors = { accent = "#ff8800" }
            "##,
        )
        .unwrap();

        assert_eq!(config.ui.theme.name, "paper-light");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff8800"));
    }

    #[test]
    fn test_easing_names() {
        let config: ScrollConfig = toml::from_str(r#"easing = "ease_in_out""#).unwrap();
        assert_eq!(config.easing, EasingType::EaseInOut);
        assert!(config.smooth_enabled);
    }

    #[test]
    fn test_content_path_defaults_to_data_dir() {
        let mut config = AppConfig::default();
        config.general.data_dir = PathBuf::from("/tmp/folio-data");
        assert_eq!(
            config.content_path(),
            PathBuf::from("/tmp/folio-data/portfolio.toml")
        );

        config.general.content = Some(PathBuf::from("/srv/site.toml"));
        assert_eq!(config.content_path(), PathBuf::from("/srv/site.toml"));
    }
}
