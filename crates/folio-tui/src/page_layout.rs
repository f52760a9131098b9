//! Vertical layout of the page: hero, one section per gallery, contact and
//! footer. Rows are page coordinates; the page scroll subtracts from them.

use folio_core::portfolio::Site;
use folio_core::Portfolio;
use unicode_width::UnicodeWidthStr;

/// Rows above a gallery's tile strip (title and caption)
pub const STRIP_OFFSET: u16 = 2;

/// Columns on each side of a tile strip, where the scroll arrows sit
pub const STRIP_MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Gallery(usize),
    Contact,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub top: u16,
    pub height: u16,
}

impl Section {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, row: u16) -> bool {
        row >= self.top && row < self.bottom()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    sections: Vec<Section>,
}

impl PageLayout {
    /// `info_lines[i]` is the number of description rows shown under gallery `i`
    pub fn compute(portfolio: &Portfolio, info_lines: &[u16], width: u16, tile_rows: u16) -> Self {
        let mut sections = Vec::with_capacity(portfolio.projects.len() + 3);
        let mut top = 0u16;
        let mut push = |kind: SectionKind, height: u16| {
            sections.push(Section { kind, top, height });
            top = top.saturating_add(height);
        };

        push(SectionKind::Hero, hero_height(&portfolio.site, width));
        for index in 0..portfolio.projects.len() {
            let info = info_lines.get(index).copied().unwrap_or(0);
            push(SectionKind::Gallery(index), gallery_height(tile_rows, info));
        }
        push(SectionKind::Contact, contact_height(&portfolio.site));
        push(SectionKind::Footer, 1);

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn total_height(&self) -> u16 {
        self.sections.last().map(Section::bottom).unwrap_or(0)
    }

    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.total_height().saturating_sub(viewport_height)
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn section_at(&self, row: u16) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(row))
    }

    /// Top of the first section starting below `scroll`
    pub fn next_section_top(&self, scroll: u16) -> Option<u16> {
        self.sections.iter().map(|s| s.top).find(|&top| top > scroll)
    }

    /// Top of the last section starting above `scroll`
    pub fn prev_section_top(&self, scroll: u16) -> Option<u16> {
        self.sections.iter().rev().map(|s| s.top).find(|&top| top < scroll)
    }

    /// Gallery whose section holds `row`
    pub fn gallery_at(&self, row: u16) -> Option<usize> {
        match self.section_at(row)?.kind {
            SectionKind::Gallery(index) => Some(index),
            _ => None,
        }
    }
}

pub fn gallery_height(tile_rows: u16, info_lines: u16) -> u16 {
    STRIP_OFFSET + tile_rows + info_lines + 1
}

pub fn hero_height(site: &Site, width: u16) -> u16 {
    // name + blank
    let mut rows = 2u16;
    if site.tagline.is_some() {
        rows += 2;
    }
    if let Some(ref bio) = site.bio {
        rows += wrap_text(bio, hero_text_width(width)).len() as u16 + 1;
    }
    if !site.tags.is_empty() {
        rows += 2;
    }
    rows
}

/// Hero copy is set in a narrower column
pub fn hero_text_width(width: u16) -> u16 {
    width.saturating_sub(4).min(72).max(1)
}

pub fn contact_height(site: &Site) -> u16 {
    // heading + blank + links + blank
    3 + site.contact.links().len() as u16
}

/// Greedy word wrap by display width
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.width()
            } else {
                line.width() + 1 + word.width()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio(projects: usize) -> Portfolio {
        let mut toml = String::from(
            "[site]\nname = \"Ada\"\ntagline = \"Designer\"\n[site.contact]\nemail = \"a@b.c\"\n",
        );
        for i in 0..projects {
            toml.push_str(&format!(
                "[[project]]\nid = \"p{i}\"\ntitle = \"P{i}\"\nmedia = [\"{i}.jpg\"]\n"
            ));
        }
        Portfolio::from_toml(&toml).unwrap()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        // Overlong words stay whole
        assert_eq!(wrap_text("abcdefghij x", 4), vec!["abcdefghij", "x"]);
    }

    #[test]
    fn test_sections_are_contiguous() {
        let layout = PageLayout::compute(&portfolio(3), &[0, 4, 0], 80, 12);
        let sections = layout.sections();
        assert_eq!(sections.len(), 6);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top);
        }
        assert_eq!(sections[0].height, 4);
        assert_eq!(sections[1].height, 15);
        assert_eq!(sections[2].height, 19);
        assert_eq!(layout.total_height(), sections[5].bottom());
    }

    #[test]
    fn test_section_navigation() {
        let layout = PageLayout::compute(&portfolio(2), &[], 80, 10);
        let g0 = layout.section(SectionKind::Gallery(0)).unwrap().top;
        let g1 = layout.section(SectionKind::Gallery(1)).unwrap().top;

        assert_eq!(layout.next_section_top(0), Some(g0));
        assert_eq!(layout.next_section_top(g0), Some(g1));
        assert_eq!(layout.prev_section_top(g1), Some(g0));
        assert_eq!(layout.prev_section_top(0), None);
        assert_eq!(layout.gallery_at(g1 + 3), Some(1));
        assert_eq!(layout.gallery_at(0), None);
    }

    #[test]
    fn test_max_scroll() {
        let layout = PageLayout::compute(&portfolio(1), &[], 80, 10);
        let total = layout.total_height();
        assert_eq!(layout.max_scroll(total + 5), 0);
        assert_eq!(layout.max_scroll(10), total - 10);
    }
}
