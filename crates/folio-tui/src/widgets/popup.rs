use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::app::App;
use crate::nav::RowKind;

/// Drop-down panel of the open header menu
pub struct NavMenuWidget;

impl NavMenuWidget {
    /// Draw below the header trigger of the open menu. The header must be
    /// drawn first so its trigger position is known.
    pub fn render(frame: &mut Frame, app: &mut App) {
        let Some(kind) = app.nav.open_menu() else {
            return;
        };
        let rows = app.nav.rows(&app.portfolio);
        let screen = frame.area();
        let theme = &app.theme;

        let anchor = app
            .hits
            .header
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(rect, _)| *rect)
            .unwrap_or(Rect::new(screen.right().saturating_sub(1), screen.y, 1, 1));

        let content_width = rows
            .iter()
            .map(|r| r.label.width() + if r.nested { 4 } else { 2 })
            .max()
            .unwrap_or(12)
            .max(kind.label().len() + 2) as u16;
        let width = (content_width + 4).min(screen.width);
        let body_rows = rows.len().max(1) as u16;
        let below = screen
            .height
            .saturating_sub(anchor.bottom().saturating_sub(screen.y));
        let height = (body_rows + 2).min(below);
        let x = anchor
            .right()
            .saturating_sub(width)
            .max(screen.x)
            .min(screen.right().saturating_sub(width));
        let panel = Rect::new(x, anchor.bottom(), width, height);
        if panel.height < 3 {
            return;
        }

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(format!(" {} ", kind.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        if rows.is_empty() {
            let empty = Paragraph::new(Span::styled(
                " nothing here",
                Style::default().fg(theme.muted),
            ));
            frame.render_widget(empty, inner);
            app.hits.menu_panel = Some(panel);
            return;
        }

        // Keep the cursor inside the visible rows
        let visible = usize::from(inner.height);
        let cursor = app.nav.cursor();
        let first = cursor.saturating_sub(visible.saturating_sub(1));

        let mut row_rects = Vec::with_capacity(visible);
        let mut lines = Vec::with_capacity(visible);
        for (i, row) in rows.iter().enumerate().skip(first).take(visible) {
            let marker = match row.kind {
                RowKind::Bucket { expanded: true, .. } => "▾ ",
                RowKind::Bucket { expanded: false, .. } => "▸ ",
                RowKind::Project(_) if row.nested => "    ",
                RowKind::Project(_) | RowKind::Link(_) => "  ",
            };
            let label_width = usize::from(inner.width).saturating_sub(marker.width() + 1);
            let text = format!("{}{}", marker, truncate_str(&row.label, label_width));

            let mut style = match row.kind {
                RowKind::Bucket { .. } => Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
                RowKind::Link(_) => Style::default().fg(theme.accent),
                RowKind::Project(_) => Style::default().fg(theme.foreground),
            };
            if i == cursor {
                style = style.bg(theme.accent).fg(theme.background);
            }
            let pad = usize::from(inner.width).saturating_sub(text.width());
            lines.push(Line::from(vec![
                Span::styled(text, style),
                Span::styled(" ".repeat(pad), style),
            ]));
            row_rects.push(Rect::new(
                inner.x,
                inner.y + (i - first) as u16,
                inner.width,
                1,
            ));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        // Hit rows are indexed from the first menu row
        app.hits.menu_rows = (0..first)
            .map(|_| Rect::default())
            .chain(row_rects)
            .collect();
        app.hits.menu_panel = Some(panel);
    }
}
