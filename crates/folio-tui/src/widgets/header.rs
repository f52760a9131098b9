use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::app::App;
use crate::nav::MenuKind;

pub struct HeaderWidget;

impl HeaderWidget {
    /// Site name on the left, menu triggers on the right
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        if area.height == 0 {
            return;
        }
        let theme = &app.theme;
        let open = app.nav.open_menu();

        let items: Vec<(MenuKind, String)> = [MenuKind::Work, MenuKind::Contact]
            .into_iter()
            .map(|kind| (kind, format!(" {} ▾ ", kind.label())))
            .collect();
        let menu_width: u16 = items.iter().map(|(_, label)| label.width() as u16).sum();

        let name_width = usize::from(area.width.saturating_sub(menu_width + 2));
        let name = truncate_str(&app.portfolio.site.name, name_width);
        let pad = usize::from(area.width)
            .saturating_sub(1 + name.width() + usize::from(menu_width));

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                name,
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(pad)),
        ];

        let mut x = area.right().saturating_sub(menu_width);
        let mut hits = Vec::with_capacity(items.len());
        for (kind, label) in items {
            let width = label.width() as u16;
            let style = if open == Some(kind) {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            hits.push((Rect::new(x, area.y, width.min(area.right().saturating_sub(x)), 1), kind));
            spans.push(Span::styled(label, style));
            x += width;
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(
            Style::default().bg(theme.surface).fg(theme.foreground),
        );
        frame.render_widget(paragraph, area);
        app.hits.header.extend(hits);
    }
}
