//! The scrolling page body: hero, one section per gallery, contact and
//! footer. Sections are laid out by `PageLayout`; this module only paints
//! the rows that fall inside the viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use super::GalleryStripWidget;
use crate::app::App;
use crate::page_layout::{hero_text_width, wrap_text, Section, SectionKind, STRIP_MARGIN, STRIP_OFFSET};

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, app: &mut App) {
        let body = app.screen.body;
        if body.height == 0 || body.width == 0 {
            return;
        }
        let view = PageView {
            body,
            scroll: app.scroll(),
        };
        frame
            .buffer_mut()
            .set_style(body, Style::default().bg(app.theme.background).fg(app.theme.foreground));

        let sections: Vec<Section> = app.layout.sections().to_vec();
        for section in sections.iter().filter(|s| view.overlaps(s)) {
            match section.kind {
                SectionKind::Hero => render_hero(frame.buffer_mut(), &view, section, app),
                SectionKind::Gallery(index) => render_gallery(frame, &view, section, index, app),
                SectionKind::Contact => render_contact(frame.buffer_mut(), &view, section, app),
                SectionKind::Footer => {
                    let line = Line::styled(
                        format!("© {}", app.portfolio.site.name),
                        Style::default().fg(app.theme.muted),
                    );
                    view.line(frame.buffer_mut(), section.top, 2, &line);
                }
            }
        }
    }
}

/// Viewport onto the page
struct PageView {
    body: Rect,
    scroll: u16,
}

impl PageView {
    fn bottom(&self) -> u16 {
        self.scroll.saturating_add(self.body.height)
    }

    fn overlaps(&self, section: &Section) -> bool {
        section.bottom() > self.scroll && section.top < self.bottom()
    }

    /// Screen row of a page row, if visible
    fn screen_row(&self, row: u16) -> Option<u16> {
        let offset = row.checked_sub(self.scroll)?;
        (offset < self.body.height).then(|| self.body.y + offset)
    }

    fn line(&self, buf: &mut Buffer, row: u16, indent: u16, line: &Line) {
        if let Some(y) = self.screen_row(row) {
            let width = self.body.width.saturating_sub(indent);
            buf.set_line(self.body.x + indent, y, line, width);
        }
    }
}

fn render_hero(buf: &mut Buffer, view: &PageView, section: &Section, app: &App) {
    let site = &app.portfolio.site;
    let theme = &app.theme;
    let mut row = section.top;

    let name = Line::styled(
        site.name.as_str(),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    );
    view.line(buf, row, 2, &name);
    row += 2;

    if let Some(ref tagline) = site.tagline {
        view.line(buf, row, 2, &Line::styled(tagline.as_str(), Style::default().fg(theme.foreground)));
        row += 2;
    }

    if let Some(ref bio) = site.bio {
        for text in wrap_text(bio, hero_text_width(view.body.width)) {
            view.line(buf, row, 2, &Line::styled(text, Style::default().fg(theme.muted)));
            row += 1;
        }
        row += 1;
    }

    if !site.tags.is_empty() {
        let mut spans = Vec::with_capacity(site.tags.len() * 2);
        for (i, tag) in site.tags.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", Style::default().fg(theme.muted)));
            }
            spans.push(Span::styled(tag.as_str(), Style::default().fg(theme.accent)));
        }
        view.line(buf, row, 2, &Line::from(spans));
    }
}

fn render_gallery(frame: &mut Frame, view: &PageView, section: &Section, index: usize, app: &mut App) {
    let theme = app.theme.clone();
    let tile_rows = app.config.ui.tile_rows;
    let Some(gallery) = app.galleries.get(index) else {
        return;
    };

    let mut title = vec![Span::styled(
        gallery.title().to_string(),
        Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
    )];
    if let Some(year) = gallery.year() {
        title.push(Span::styled(format!("  {year}"), Style::default().fg(theme.muted)));
    }
    view.line(frame.buffer_mut(), section.top, STRIP_MARGIN, &Line::from(title));

    let count = gallery.sequence().logical_len();
    let mut caption = format!("{} {}", count, if count == 1 { "item" } else { "items" });
    let info = gallery.show_info().then(|| gallery.description()).flatten();
    match (gallery.description(), gallery.show_info()) {
        (Some(_), true) => caption.push_str("  ·  i: hide details"),
        (Some(_), false) => caption.push_str("  ·  i: details"),
        (None, _) => {}
    }
    view.line(
        frame.buffer_mut(),
        section.top + 1,
        STRIP_MARGIN,
        &Line::styled(caption, Style::default().fg(theme.muted)),
    );

    let strip_top = section.top + STRIP_OFFSET;
    if let Some(text) = info {
        let width = view.body.width.saturating_sub(2 * STRIP_MARGIN).max(1);
        let lines = wrap_text(text, width);
        for (i, text) in lines.into_iter().enumerate() {
            let row = strip_top + tile_rows + i as u16;
            view.line(
                frame.buffer_mut(),
                row,
                STRIP_MARGIN,
                &Line::styled(text, Style::default().fg(theme.foreground)),
            );
        }
    }

    let first = strip_top.max(view.scroll);
    let last = (strip_top + tile_rows).min(view.bottom());
    if first >= last {
        return;
    }
    let rect = Rect::new(
        view.body.x + STRIP_MARGIN,
        view.body.y + (first - view.scroll),
        view.body.width.saturating_sub(2 * STRIP_MARGIN),
        last - first,
    );
    if rect.width == 0 {
        return;
    }
    let strip = GalleryStripWidget::render(frame, app, index, rect, first - strip_top);
    app.hits.strips.push(strip);
}

fn render_contact(buf: &mut Buffer, view: &PageView, section: &Section, app: &App) {
    let theme = &app.theme;
    view.line(
        buf,
        section.top,
        2,
        &Line::styled(
            "Contact",
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ),
    );

    for (i, (label, url)) in app.portfolio.site.contact.links().into_iter().enumerate() {
        let shown = url.strip_prefix("mailto:").unwrap_or(&url).to_string();
        let line = Line::from(vec![
            Span::styled(format!("{label:<11}"), Style::default().fg(theme.muted)),
            Span::styled(
                shown,
                Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
            ),
        ]);
        view.line(buf, section.top + 2 + i as u16, 2, &line);
    }
}
