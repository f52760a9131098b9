use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.height == 0 {
            return;
        }
        let theme = &app.theme;
        let mode = app.mode();

        let mode_str = match mode {
            Mode::Normal => "PAGE",
            Mode::Menu(kind) => kind.label(),
            Mode::Lightbox { .. } => "VIEW",
        };

        let focused = match mode {
            Mode::Lightbox { gallery } => app.galleries.get(gallery),
            _ => app.focused_gallery().and_then(|i| app.galleries.get(i)),
        }
        .map(|g| g.title().to_string())
        .unwrap_or_default();

        let status_text = format!(" {} ", mode_str.to_uppercase());
        let mut detail = focused;
        let playing = app.playing_count();
        if playing > 0 {
            detail.push_str(&format!(" | ▶ {playing}"));
        }
        let loading = app.media.loading_count();
        if loading > 0 {
            detail.push_str(&format!(" | loading {loading}"));
        }

        let help_hint = match mode {
            Mode::Normal => " q:quit j/k:sections h/l:gallery enter:view w/c:menus ",
            Mode::Menu(_) => " j/k:move l/h:expand enter:select esc:close ",
            Mode::Lightbox { .. } => " ←/→:browse o:open esc:close ",
        };

        let message = app.status_message.clone().unwrap_or(detail);
        let available = usize::from(area.width)
            .saturating_sub(status_text.width() + help_hint.width() + 1);
        let message = format!(" {}", truncate_str(&message, available));
        let padding = usize::from(area.width)
            .saturating_sub(status_text.width() + message.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(message, Style::default().fg(theme.foreground).bg(theme.surface)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.surface)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.surface)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
