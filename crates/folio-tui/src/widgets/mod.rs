mod gallery_strip;
mod header;
mod lightbox;
mod page;
mod popup;
mod status_bar;

pub use gallery_strip::GalleryStripWidget;
pub use header::HeaderWidget;
pub use lightbox::LightboxWidget;
pub use page::PageWidget;
pub use popup::NavMenuWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use unicode_width::UnicodeWidthStr;

use crate::media_cache::HalfBlockBitmap;

/// Paint one half-block cell
fn paint_halfblock(buf: &mut Buffer, x: u16, y: u16, top: Color, bottom: Color) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char('▀').set_fg(top).set_bg(bottom);
    }
}

/// Paint a bitmap into `area`. `col_skip`/`row_skip` bitmap cells are hidden
/// before the area's first column and row; letterbox cells get `fill`.
fn paint_bitmap(
    buf: &mut Buffer,
    area: Rect,
    bitmap: &HalfBlockBitmap,
    col_skip: u16,
    row_skip: u16,
    fill: Color,
) {
    for dy in 0..area.height {
        for dx in 0..area.width {
            let (x, y) = (area.x + dx, area.y + dy);
            match bitmap.cell(dx + col_skip, dy + row_skip) {
                Some((top, bottom)) => paint_halfblock(buf, x, y, top, bottom),
                None => {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(' ').set_bg(fill);
                    }
                }
            }
        }
    }
}

/// Truncate to a display width, with an ellipsis when cut
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
