use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::{paint_bitmap, truncate_str};
use crate::app::{App, Mode};
use crate::gallery::LightboxTarget;
use crate::media_cache::{Fit, MediaState};

/// Columns reserved on each side for the previous/next controls
const NAV_BAND: u16 = 6;

/// Full-screen overlay showing one image of a gallery
pub struct LightboxWidget;

impl LightboxWidget {
    pub fn render(frame: &mut Frame, app: &mut App) {
        let Mode::Lightbox { gallery } = app.mode() else {
            return;
        };
        let area = frame.area();
        if area.height < 4 || area.width < 8 {
            return;
        }

        let theme = app.theme.clone();
        let (cell_w, cell_h) = app.cell_px();
        let (title, counter, shows_navigation, url) = {
            let g = &app.galleries[gallery];
            let lightbox = g.lightbox();
            (
                g.title().to_string(),
                lightbox.counter(),
                lightbox.shows_navigation(),
                lightbox.current().and_then(|item| item.preview_url()),
            )
        };

        frame.render_widget(Clear, area);
        frame
            .buffer_mut()
            .set_style(area, Style::default().bg(theme.scrim).fg(theme.foreground));

        // Top bar: title, counter, close
        let top = Rect::new(area.x, area.y, area.width, 1);
        let close = Rect::new(area.right().saturating_sub(4), area.y, 3, 1);
        let title_width = usize::from(area.width.saturating_sub(6));
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", truncate_str(&title, title_width)),
                Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
            )),
            top,
        );
        if let Some(ref counter) = counter {
            frame.render_widget(
                Paragraph::new(Span::styled(counter.as_str(), Style::default().fg(theme.muted)))
                    .alignment(Alignment::Center),
                top,
            );
        }
        frame.render_widget(
            Paragraph::new(Span::styled(
                " ✕ ",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            close,
        );

        // Image frame between the bars and the side controls
        let band = if shows_navigation { NAV_BAND } else { 2 };
        let frame_area = Rect::new(
            area.x + band,
            area.y + 2,
            area.width.saturating_sub(2 * band),
            area.height.saturating_sub(4),
        );

        let aspect = url.as_deref().and_then(|u| app.media.aspect(u));
        let failure = url.as_deref().and_then(|u| match app.media.state(u) {
            Some(MediaState::Failed(error)) => Some(error.clone()),
            _ => None,
        });

        let image_rect = match (url.as_deref(), aspect, failure) {
            (Some(url), Some(aspect), _) => {
                let rect = fit_rect(frame_area, aspect, cell_w, cell_h);
                if let Some(bitmap) = app.media.bitmap(url, rect.width, rect.height, Fit::Contain) {
                    paint_bitmap(frame.buffer_mut(), rect, bitmap, 0, 0, theme.scrim);
                }
                rect
            }
            (_, _, Some(error)) => {
                let message = format!("Image unavailable: {error}");
                centered_message(frame, frame_area, &message, theme.error);
                frame_area
            }
            _ => {
                centered_message(frame, frame_area, "Loading…", theme.muted);
                frame_area
            }
        };

        let mut hits = vec![
            (area, LightboxTarget::Scrim),
            (image_rect, LightboxTarget::Image),
            (close, LightboxTarget::Close),
        ];

        if shows_navigation {
            let prev = Rect::new(area.x, frame_area.y, NAV_BAND, frame_area.height);
            let next = Rect::new(area.right() - NAV_BAND, frame_area.y, NAV_BAND, frame_area.height);
            let arrow = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
            let middle = prev.y + prev.height / 2;
            frame.buffer_mut().set_string(prev.x + NAV_BAND / 2 - 1, middle, "‹", arrow);
            frame.buffer_mut().set_string(next.x + NAV_BAND / 2, middle, "›", arrow);
            hits.push((prev, LightboxTarget::Previous));
            hits.push((next, LightboxTarget::Next));
        }

        let hint = if shows_navigation {
            "←/→ browse  o open  Esc close"
        } else {
            "o open  Esc close"
        };
        let bottom = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
            bottom,
        );

        app.hits.lightbox = hits;
    }
}

/// Largest rect of the given pixel aspect that fits in `area`, centered
fn fit_rect(area: Rect, aspect: f64, cell_w: f64, cell_h: f64) -> Rect {
    if area.width == 0 || area.height == 0 || aspect <= 0.0 {
        return area;
    }
    let mut cols = (f64::from(area.height) * cell_h * aspect / cell_w).round();
    let mut rows = f64::from(area.height);
    if cols > f64::from(area.width) {
        cols = f64::from(area.width);
        rows = (cols * cell_w / (aspect * cell_h)).round();
    }
    let cols = (cols as u16).clamp(1, area.width);
    let rows = (rows as u16).clamp(1, area.height);
    Rect::new(
        area.x + (area.width - cols) / 2,
        area.y + (area.height - rows) / 2,
        cols,
        rows,
    )
}

fn centered_message(frame: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
    if area.height == 0 {
        return;
    }
    let text = truncate_str(message, usize::from(area.width));
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let pad = usize::from(area.width).saturating_sub(text.width()) / 2;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(text, Style::default().fg(color)),
        ])),
        row,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use folio_core::{AppConfig, Portfolio};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn app(media: &str) -> App {
        let toml = format!(
            "[site]\nname = \"Ada\"\n[[project]]\nid = \"lamp\"\ntitle = \"Lamp\"\nmedia = [{media}]\n"
        );
        let now = Instant::now();
        let portfolio = Portfolio::from_toml(&toml).unwrap();
        let mut app = App::new(Arc::new(AppConfig::default()), portfolio, Theme::default(), now);
        app.relayout(Rect::new(0, 0, 80, 30));
        app.tick(now + Duration::from_millis(100));
        assert!(app.galleries[0].open_lightbox_on_visible());
        app
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| LightboxWidget::render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hit_order_with_navigation() {
        let mut app = app("\"a.jpg\", \"b.jpg\", \"c.jpg\"");
        let text = draw(&mut app);
        assert!(text.contains("1 / 3"));
        assert!(text.contains("Loading"));

        let targets: Vec<LightboxTarget> = app.hits.lightbox.iter().map(|(_, t)| *t).collect();
        assert_eq!(
            targets,
            vec![
                LightboxTarget::Scrim,
                LightboxTarget::Image,
                LightboxTarget::Close,
                LightboxTarget::Previous,
                LightboxTarget::Next,
            ]
        );
    }

    #[test]
    fn test_single_image_has_no_navigation() {
        let mut app = app("\"a.jpg\"");
        let text = draw(&mut app);
        assert!(!text.contains("1 / 1"));
        assert_eq!(app.hits.lightbox.len(), 3);
    }

    #[test]
    fn test_fit_rect_keeps_aspect() {
        // 8x16 cells: a square image 20 rows high is 40 columns wide
        let rect = fit_rect(Rect::new(0, 0, 100, 20), 1.0, 8.0, 16.0);
        assert_eq!((rect.width, rect.height), (40, 20));
        assert_eq!(rect.x, 30);

        // Wide images are limited by width
        let rect = fit_rect(Rect::new(0, 0, 40, 20), 4.0, 8.0, 16.0);
        assert_eq!((rect.width, rect.height), (40, 5));
        assert_eq!(rect.y, 7);
    }
}
