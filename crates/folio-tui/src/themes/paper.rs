//! Paper: near-monochrome palettes that keep the focus on the work

use ratatui::style::Color;

use crate::theme::Theme;

pub fn dark() -> Theme {
    Theme {
        background: Color::Rgb(0x11, 0x11, 0x11),
        surface: Color::Rgb(0x1e, 0x1e, 0x1e),
        foreground: Color::Rgb(0xf2, 0xf0, 0xeb),
        muted: Color::Rgb(0x8a, 0x87, 0x80),
        accent: Color::Rgb(0xe8, 0x6a, 0x33),
        border: Color::Rgb(0x33, 0x33, 0x33),
        scrim: Color::Rgb(0x00, 0x00, 0x00),
        error: Color::Rgb(0xe0, 0x55, 0x55),
    }
}

pub fn light() -> Theme {
    Theme {
        background: Color::Rgb(0xfa, 0xf8, 0xf3),
        surface: Color::Rgb(0xec, 0xe9, 0xe1),
        foreground: Color::Rgb(0x1a, 0x1a, 0x1a),
        muted: Color::Rgb(0x6e, 0x6b, 0x64),
        accent: Color::Rgb(0xc4, 0x4b, 0x16),
        border: Color::Rgb(0xd0, 0xcc, 0xc2),
        scrim: Color::Rgb(0x20, 0x1f, 0x1c),
        error: Color::Rgb(0xb3, 0x26, 0x1e),
    }
}
