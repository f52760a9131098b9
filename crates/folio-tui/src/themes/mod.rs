//! Built-in themes and user overrides

mod gruvbox;
mod nord;
mod paper;

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

pub use paper::dark as paper_dark;

/// Parse "#RRGGBB", "RRGGBB", "#RGB" or "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "paper-dark" | "paper" => paper::dark(),
        "paper-light" => paper::light(),
        "gruvbox-dark" | "gruvbox" => gruvbox::dark(),
        "nord" => nord::default(),
        other => {
            warn!("Unknown theme '{}', using paper-dark", other);
            paper::dark()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots = [
        ("background", &overrides.background, &mut theme.background),
        ("surface", &overrides.surface, &mut theme.surface),
        ("foreground", &overrides.foreground, &mut theme.foreground),
        ("muted", &overrides.muted, &mut theme.muted),
        ("accent", &overrides.accent, &mut theme.accent),
        ("border", &overrides.border, &mut theme.border),
        ("scrim", &overrides.scrim, &mut theme.scrim),
        ("error", &overrides.error, &mut theme.error),
    ];

    for (name, hex, slot) in slots {
        let Some(hex) = hex else { continue };
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => warn!("Ignoring invalid color for {}: '{}'", name, hex),
        }
    }

    theme
}

pub fn available_themes() -> &'static [&'static str] {
    &["paper-dark", "paper-light", "gruvbox-dark", "nord"]
}
