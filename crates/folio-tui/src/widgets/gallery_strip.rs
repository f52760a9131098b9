use folio_core::MediaItem;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};

use super::paint_bitmap;
use crate::app::{App, StripArea};
use crate::gallery::{InstanceView, VisibleTile};
use crate::media_cache::{Fit, MediaState};
use crate::page_layout::STRIP_MARGIN;
use crate::theme::Theme;

/// The horizontal tile strip of one gallery
pub struct GalleryStripWidget;

impl GalleryStripWidget {
    /// Draw the visible rows of a strip. `row_skip` strip rows are scrolled
    /// off above `area`.
    pub fn render(
        frame: &mut Frame,
        app: &mut App,
        index: usize,
        area: Rect,
        row_skip: u16,
    ) -> StripArea {
        let (cell_w, _) = app.cell_px();
        let tile_rows = app.config.ui.tile_rows;
        let Some(gallery) = app.galleries.get(index) else {
            return StripArea {
                gallery: index,
                rect: area,
                left_arrow: None,
                right_arrow: None,
            };
        };

        let tiles: Vec<(VisibleTile, Option<MediaItem>)> = gallery
            .visible_tiles()
            .into_iter()
            .map(|t| (t, gallery.item(t.instance).cloned()))
            .collect();
        let can_left = gallery.controller().can_scroll_left();
        let can_right = gallery.controller().can_scroll_right();

        let theme = app.theme.clone();
        let buf = frame.buffer_mut();
        buf.set_style(area, Style::default().bg(theme.background));

        for (tile, item) in tiles {
            let Some(item) = item else { continue };
            let start = (tile.x / cell_w).floor() as i32;
            let cols = (tile.width / cell_w).round().max(1.0) as i32;
            let first = start.max(0);
            let last = (start + cols).min(i32::from(area.width));
            if first >= last {
                continue;
            }

            let tile_area = Rect::new(
                area.x + first as u16,
                area.y,
                (last - first) as u16,
                area.height,
            );
            let col_skip = (first - start) as u16;
            let cols = cols as u16;

            let source = match tile.view {
                InstanceView::Clip => None,
                _ => item.preview_url(),
            };
            let state = source.as_deref().and_then(|url| match app.media.state(url) {
                Some(MediaState::Ready(_)) => Some(true),
                Some(MediaState::Failed(_)) => Some(false),
                _ => None,
            });

            match (source.as_deref(), state) {
                (Some(url), Some(true)) => {
                    if let Some(bitmap) = app.media.bitmap(url, cols, tile_rows, Fit::Cover) {
                        paint_bitmap(buf, tile_area, bitmap, col_skip, row_skip, theme.surface);
                    }
                }
                _ => buf.set_style(tile_area, Style::default().bg(theme.surface)),
            }

            let label = match (tile.view, state) {
                (InstanceView::Clip, _) => Some("▶ clip".to_string()),
                (_, Some(false)) => Some("unavailable".to_string()),
                (InstanceView::Image, None) => Some("···".to_string()),
                (InstanceView::VideoPreview, _) => Some("▶".to_string()),
                (InstanceView::LivePlayer, None) => Some("▶ video".to_string()),
                _ => None,
            };
            if let Some(label) = label {
                let offset = i32::from(cols.saturating_sub(label.chars().count() as u16) / 2);
                let style = Style::default().fg(theme.muted).bg(theme.surface);
                put_str(buf, area, start + offset, tile_rows / 2, row_skip, &label, style);
            }

            if tile.view == InstanceView::LivePlayer {
                let badge = if tile.playing { " ▶ playing " } else { " ❚❚ paused " };
                put_str(
                    buf,
                    area,
                    start + 1,
                    tile_rows.saturating_sub(2),
                    row_skip,
                    badge,
                    Style::default()
                        .fg(theme.background)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        let arrow_row = middle_row(area, tile_rows, row_skip);
        let left_arrow = (can_left && area.x >= STRIP_MARGIN).then(|| {
            let rect = Rect::new(area.x - STRIP_MARGIN, area.y, STRIP_MARGIN, area.height);
            draw_arrow(buf, rect, arrow_row, "‹", &theme);
            rect
        });
        let right_arrow = can_right.then(|| {
            let rect = Rect::new(area.right(), area.y, STRIP_MARGIN, area.height);
            draw_arrow(buf, rect, arrow_row, "›", &theme);
            rect
        });

        StripArea {
            gallery: index,
            rect: area,
            left_arrow,
            right_arrow,
        }
    }
}

/// Screen row of the strip's middle row, if visible
fn middle_row(area: Rect, tile_rows: u16, row_skip: u16) -> Option<u16> {
    let middle = tile_rows / 2;
    let visible = middle.checked_sub(row_skip).filter(|&r| r < area.height)?;
    Some(area.y + visible)
}

fn draw_arrow(buf: &mut Buffer, rect: Rect, row: Option<u16>, glyph: &str, theme: &Theme) {
    if let Some(y) = row {
        let x = rect.x + rect.width.saturating_sub(1) / 2;
        buf.set_string(
            x,
            y,
            glyph,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        );
    }
}

/// Write text at strip coordinates, clipped to the visible area
fn put_str(
    buf: &mut Buffer,
    area: Rect,
    col: i32,
    strip_row: u16,
    row_skip: u16,
    text: &str,
    style: Style,
) {
    let Some(row) = strip_row.checked_sub(row_skip).filter(|&r| r < area.height) else {
        return;
    };
    for (i, c) in text.chars().enumerate() {
        let x = col + i as i32;
        if x < 0 || x >= i32::from(area.width) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + row)) {
            cell.set_char(c).set_style(style);
        }
    }
}
