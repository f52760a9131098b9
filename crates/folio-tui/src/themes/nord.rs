//! Nord
//! https://www.nordtheme.com/

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        background: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        surface: Color::Rgb(0x3b, 0x42, 0x52),    // nord1
        foreground: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        muted: Color::Rgb(0x81, 0x8c, 0xa0),
        accent: Color::Rgb(0x88, 0xc0, 0xd0), // nord8
        border: Color::Rgb(0x4c, 0x56, 0x6a), // nord3
        scrim: Color::Rgb(0x1c, 0x20, 0x28),
        error: Color::Rgb(0xbf, 0x61, 0x6a), // nord11
    }
}
