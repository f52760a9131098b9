//! Gruvbox Material
//! https://github.com/sainnhe/gruvbox-material

use ratatui::style::Color;

use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x28, 0x28),
        surface: Color::Rgb(0x32, 0x30, 0x2f),
        foreground: Color::Rgb(0xd4, 0xbe, 0x98),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0xd8, 0xa6, 0x57),
        border: Color::Rgb(0x50, 0x49, 0x45),
        scrim: Color::Rgb(0x1d, 0x20, 0x21),
        error: Color::Rgb(0xea, 0x69, 0x62),
    }
}
