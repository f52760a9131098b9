use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use folio_core::{AppConfig, MediaItem, Portfolio};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use crate::event::ImageLoadResult;
use crate::gallery::{
    ClickOutcome, Gallery, InstanceView, LightboxKey, LightboxTarget, LogTransport,
    PageScrollLock, ScrollDirection,
};
use crate::input::Action;
use crate::keymap::Keymap;
use crate::media_cache::MediaCache;
use crate::nav::{MenuKind, NavMenu, NavOutcome};
use crate::page_layout::{wrap_text, PageLayout, SectionKind, STRIP_MARGIN};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Width over height of video tiles
pub const VIDEO_ASPECT: f64 = 16.0 / 9.0;

/// What has the input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Menu(MenuKind),
    /// A gallery's lightbox is open
    Lightbox { gallery: usize },
}

/// Work the caller performs outside the app state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Open a URL or path with the system handler
    Open(String),
}

/// Header, page body and status bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn split(area: Rect) -> Self {
        let header_height = area.height.min(1);
        let status_height = area.height.saturating_sub(header_height).min(1);
        let body_height = area.height - header_height - status_height;
        Self {
            header: Rect::new(area.x, area.y, area.width, header_height),
            body: Rect::new(area.x, area.y + header_height, area.width, body_height),
            status: Rect::new(area.x, area.y + header_height + body_height, area.width, status_height),
        }
    }
}

/// On-screen placement of a gallery's tile strip in the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripArea {
    pub gallery: usize,
    /// Visible part of the strip
    pub rect: Rect,
    pub left_arrow: Option<Rect>,
    pub right_arrow: Option<Rect>,
}

/// Click regions recorded while drawing
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub header: Vec<(Rect, MenuKind)>,
    /// Menu rows, top to bottom
    pub menu_rows: Vec<Rect>,
    pub menu_panel: Option<Rect>,
    pub strips: Vec<StripArea>,
    /// Later entries sit on top
    pub lightbox: Vec<(Rect, LightboxTarget)>,
}

impl HitAreas {
    pub fn clear(&mut self) {
        self.header.clear();
        self.menu_rows.clear();
        self.menu_panel = None;
        self.strips.clear();
        self.lightbox.clear();
    }
}

pub struct App {
    pub config: Arc<AppConfig>,
    pub portfolio: Portfolio,
    pub theme: Theme,
    pub keymap: Keymap,
    pub galleries: Vec<Gallery>,
    pub page: ScrollAnimator,
    pub layout: PageLayout,
    pub screen: ScreenLayout,
    pub lock: PageScrollLock,
    pub nav: NavMenu,
    pub media: MediaCache,
    pub hits: HitAreas,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub pending_key: Option<char>,
    cell_size: (u16, u16),
    dragging: Option<usize>,
    hovered: Option<usize>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, portfolio: Portfolio, theme: Theme, now: Instant) -> Self {
        let lock = PageScrollLock::new();
        let galleries: Vec<Gallery> = portfolio
            .projects
            .iter()
            .map(|project| {
                Gallery::new(
                    project,
                    &config.gallery,
                    lock.clone(),
                    Box::new(LogTransport),
                    now,
                )
            })
            .collect();
        info!("Mounted {} galleries", galleries.len());

        Self {
            keymap: Keymap::from_config(&config.keymap),
            page: ScrollAnimator::new(config.ui.scroll.clone()),
            config,
            portfolio,
            theme,
            galleries,
            layout: PageLayout::default(),
            screen: ScreenLayout::default(),
            lock,
            nav: NavMenu::new(),
            media: MediaCache::new(),
            hits: HitAreas::default(),
            status_message: None,
            should_quit: false,
            pending_key: None,
            cell_size: (8, 16),
            dragging: None,
            hovered: None,
        }
    }

    /// Cell size in pixels, used to express terminal geometry in pixels
    pub fn set_cell_size(&mut self, size: (u16, u16)) {
        self.cell_size = (size.0.max(1), size.1.max(1));
    }

    pub fn cell_px(&self) -> (f64, f64) {
        (f64::from(self.cell_size.0), f64::from(self.cell_size.1))
    }

    pub fn mode(&self) -> Mode {
        if let Some(gallery) = self.galleries.iter().position(|g| g.lightbox().is_open()) {
            return Mode::Lightbox { gallery };
        }
        match self.nav.open_menu() {
            Some(kind) => Mode::Menu(kind),
            None => Mode::Normal,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn scroll(&self) -> u16 {
        self.page.current_scroll()
    }

    fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.screen.body.height)
    }

    /// Recompute the page layout and gallery geometry for a screen size
    pub fn relayout(&mut self, area: Rect) {
        self.screen = ScreenLayout::split(area);
        let width = self.screen.body.width;
        let text_width = width.saturating_sub(2 * STRIP_MARGIN).max(1);

        let info_lines: Vec<u16> = self
            .galleries
            .iter()
            .map(|g| match g.description() {
                Some(text) if g.show_info() => wrap_text(text, text_width).len() as u16,
                _ => 0,
            })
            .collect();
        self.layout =
            PageLayout::compute(&self.portfolio, &info_lines, width, self.config.ui.tile_rows);

        let (cell_w, _) = self.cell_px();
        let strip_width = f64::from(width.saturating_sub(2 * STRIP_MARGIN)) * cell_w;
        let gap = f64::from(self.config.ui.tile_gap) * cell_w;
        for index in 0..self.galleries.len() {
            let widths = self.tile_widths(index);
            self.galleries[index].set_geometry(&widths, gap, strip_width);
        }
    }

    /// Pixel width of each distinct item of a gallery, a whole number of cells
    pub fn tile_widths(&self, index: usize) -> Vec<f64> {
        let Some(gallery) = self.galleries.get(index) else {
            return Vec::new();
        };
        let (cell_w, cell_h) = self.cell_px();
        let height = f64::from(self.config.ui.tile_rows) * cell_h;

        gallery
            .sequence()
            .items()
            .iter()
            .map(|item| {
                let aspect = match item {
                    MediaItem::Image(url) => self
                        .media
                        .aspect(url)
                        .unwrap_or(self.config.gallery.placeholder_aspect),
                    MediaItem::VideoClip(_) | MediaItem::EmbeddedVideo(_) => VIDEO_ASPECT,
                };
                (height * aspect / cell_w).round().max(1.0) * cell_w
            })
            .collect()
    }

    /// Advance animations. Returns true while anything moves.
    pub fn tick(&mut self, now: Instant) -> bool {
        let max_scroll = self.max_scroll();
        self.page.update(max_scroll, now);

        let mut busy = self.page.needs_update();
        for gallery in &mut self.galleries {
            busy |= gallery.tick(now);
        }
        busy
    }

    /// Gallery the keyboard acts on: the one a third of the way down the body
    pub fn focused_gallery(&self) -> Option<usize> {
        let scroll = self.scroll();
        let probe = scroll.saturating_add(self.screen.body.height / 3);
        if let Some(index) = self.layout.gallery_at(probe) {
            return Some(index);
        }
        let sections = self.layout.sections();
        sections
            .iter()
            .find_map(|s| match s.kind {
                SectionKind::Gallery(i) if s.bottom() > scroll => Some(i),
                _ => None,
            })
            .or_else(|| self.galleries.len().checked_sub(1))
    }

    /// Animate the page to a row unless a lightbox holds the page
    fn scroll_page_to(&mut self, row: u16, now: Instant) {
        if self.lock.is_locked() {
            return;
        }
        let max_scroll = self.max_scroll();
        self.page.scroll_to(row, max_scroll, now);
    }

    fn scroll_page_by(&mut self, delta: i32) {
        if self.lock.is_locked() {
            return;
        }
        let max_scroll = self.max_scroll();
        self.page.scroll_by(delta, max_scroll);
    }

    /// Bring a project's gallery to the top of the page
    pub fn scroll_to_project(&mut self, id: &str, now: Instant) -> bool {
        let Some(index) = self.portfolio.project_index(id) else {
            self.set_status(format!("Unknown project: {id}"));
            return false;
        };
        for gallery in &mut self.galleries {
            gallery.on_navigate();
        }
        let Some(top) = self.layout.section(SectionKind::Gallery(index)).map(|s| s.top) else {
            return false;
        };
        debug!("Navigate to '{}' at row {}", id, top);
        self.scroll_page_to(top, now);
        true
    }

    /// Queue loads for media of galleries near the viewport.
    /// Returns the URLs that still need fetching.
    pub fn media_to_load(&mut self) -> Vec<String> {
        if !self.config.ui.image_preview {
            return Vec::new();
        }
        let height = self.screen.body.height;
        let from = self.scroll().saturating_sub(height);
        let to = self.scroll().saturating_add(height.saturating_mul(2));

        let mut urls = Vec::new();
        for section in self.layout.sections() {
            let SectionKind::Gallery(index) = section.kind else {
                continue;
            };
            if section.bottom() < from || section.top > to {
                continue;
            }
            let Some(gallery) = self.galleries.get(index) else {
                continue;
            };
            for item in gallery.sequence().items() {
                if let Some(url) = item.preview_url() {
                    if self.media.start_loading(&url) {
                        urls.push(url);
                    }
                }
            }
        }
        urls
    }

    pub fn handle_media(&mut self, result: ImageLoadResult) {
        self.media.apply(result);
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Effect {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let viewport = self.screen.body.height;
        match action {
            Action::Quit => self.should_quit = true,
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSection => {
                if let Some(top) = self.layout.next_section_top(self.page.target_scroll()) {
                    self.scroll_page_to(top, now);
                }
            }
            Action::PrevSection => {
                let top = self
                    .layout
                    .prev_section_top(self.page.target_scroll())
                    .unwrap_or(0);
                self.scroll_page_to(top, now);
            }
            Action::ScrollLineDown => self.scroll_page_by(self.line_step()),
            Action::ScrollLineUp => self.scroll_page_by(-self.line_step()),
            Action::ScrollHalfPageDown => self.scroll_page_by(i32::from((viewport / 2).max(1))),
            Action::ScrollHalfPageUp => self.scroll_page_by(-i32::from((viewport / 2).max(1))),
            Action::ScrollPageDown => self.scroll_page_by(i32::from(viewport.max(1))),
            Action::ScrollPageUp => self.scroll_page_by(-i32::from(viewport.max(1))),
            Action::JumpToTop => self.scroll_page_to(0, now),
            Action::JumpToBottom => self.scroll_page_to(u16::MAX, now),
            Action::GalleryLeft => self.page_gallery(ScrollDirection::Left, now),
            Action::GalleryRight => self.page_gallery(ScrollDirection::Right, now),
            Action::OpenLightbox => {
                let opened = self
                    .focused_gallery()
                    .and_then(|i| self.galleries.get_mut(i))
                    .map(|g| g.open_lightbox_on_visible())
                    .unwrap_or(false);
                if !opened {
                    self.set_status("No image in view");
                }
            }
            Action::TogglePlayback => {
                let toggled = self
                    .focused_gallery()
                    .and_then(|i| self.galleries.get_mut(i))
                    .and_then(|g| g.toggle_visible_player());
                match toggled {
                    Some(true) => self.set_status("Playing"),
                    Some(false) => self.set_status("Paused"),
                    None => self.set_status("No video in view"),
                }
            }
            Action::ToggleInfo => {
                let toggled = self
                    .focused_gallery()
                    .and_then(|i| self.galleries.get_mut(i))
                    .map(|g| g.toggle_info())
                    .unwrap_or(false);
                if !toggled {
                    self.set_status("No description for this project");
                }
            }
            Action::OpenExternal => return self.external_target(),
            Action::WorkMenu => self.nav.toggle(MenuKind::Work),
            Action::ContactMenu => self.nav.toggle(MenuKind::Contact),
            Action::MenuUp => self.nav.move_cursor(-1, &self.portfolio),
            Action::MenuDown => self.nav.move_cursor(1, &self.portfolio),
            Action::MenuExpand => self.nav.set_expanded(true, &self.portfolio),
            Action::MenuCollapse => self.nav.set_expanded(false, &self.portfolio),
            Action::MenuSelect => return self.activate_menu(now),
            Action::LightboxNext => self.lightbox_key(LightboxKey::Right),
            Action::LightboxPrev => self.lightbox_key(LightboxKey::Left),
            Action::LightboxClose => self.lightbox_key(LightboxKey::Escape),
            Action::ExitMode => {
                self.nav.close();
                self.clear_status();
            }
            Action::None => {}
        }
        Effect::None
    }

    fn line_step(&self) -> i32 {
        i32::from(self.config.ui.scroll.scroll_lines.max(1))
    }

    fn page_gallery(&mut self, direction: ScrollDirection, now: Instant) {
        if let Some(gallery) = self.focused_gallery().and_then(|i| self.galleries.get_mut(i)) {
            gallery.page_scroll(direction, now);
        }
    }

    fn lightbox_key(&mut self, key: LightboxKey) {
        if let Mode::Lightbox { gallery } = self.mode() {
            self.galleries[gallery].lightbox_mut().handle_key(key);
        }
    }

    fn activate_menu(&mut self, now: Instant) -> Effect {
        match self.nav.activate(&self.portfolio) {
            NavOutcome::ScrollTo(id) => {
                self.scroll_to_project(&id, now);
                Effect::None
            }
            NavOutcome::OpenLink(url) => Effect::Open(url),
            NavOutcome::Expanded | NavOutcome::Nothing => Effect::None,
        }
    }

    /// The lightbox image, or the first media in view of the focused gallery
    fn external_target(&mut self) -> Effect {
        if let Mode::Lightbox { gallery } = self.mode() {
            return match self.galleries[gallery].lightbox().current() {
                Some(item) => Effect::Open(item.external_url()),
                None => Effect::None,
            };
        }

        let Some(gallery) = self.focused_gallery().and_then(|i| self.galleries.get(i)) else {
            return Effect::None;
        };
        let first = gallery
            .visible_tiles()
            .into_iter()
            .find(|t| t.x >= 0.0)
            .and_then(|t| gallery.item(t.instance).cloned());
        match first {
            Some(item) => Effect::Open(item.external_url()),
            None => {
                self.set_status("Nothing in view to open");
                Effect::None
            }
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> Effect {
        let at = Position::new(event.column, event.row);
        match self.mode() {
            Mode::Lightbox { gallery } => {
                if let MouseEventKind::Down(MouseButton::Left) = event.kind {
                    let target = self
                        .hits
                        .lightbox
                        .iter()
                        .rev()
                        .find(|(rect, _)| rect.contains(at))
                        .map(|(_, target)| *target);
                    if let Some(target) = target {
                        self.galleries[gallery].lightbox_mut().click(target);
                    }
                }
                Effect::None
            }
            Mode::Menu(_) => {
                if let MouseEventKind::Down(MouseButton::Left) = event.kind {
                    return self.click_menu(at, now);
                }
                Effect::None
            }
            Mode::Normal => self.mouse_normal(event, at, now),
        }
    }

    fn click_menu(&mut self, at: Position, now: Instant) -> Effect {
        if let Some(row) = self.hits.menu_rows.iter().position(|r| r.contains(at)) {
            self.nav.set_cursor(row, &self.portfolio);
            return self.activate_menu(now);
        }
        if let Some(kind) = self.header_hit(at) {
            self.nav.toggle(kind);
            return Effect::None;
        }
        if !self.hits.menu_panel.is_some_and(|p| p.contains(at)) {
            self.nav.close();
        }
        Effect::None
    }

    fn header_hit(&self, at: Position) -> Option<MenuKind> {
        self.hits
            .header
            .iter()
            .find(|(rect, _)| rect.contains(at))
            .map(|(_, kind)| *kind)
    }

    fn strip_at(&self, at: Position) -> Option<StripArea> {
        self.hits.strips.iter().copied().find(|s| s.rect.contains(at))
    }

    /// Viewport x in pixels of a terminal column, at the cell centre
    fn strip_x(&self, strip: &StripArea, column: u16) -> f64 {
        let (cell_w, _) = self.cell_px();
        (f64::from(column) - f64::from(strip.rect.x)) * cell_w + cell_w / 2.0
    }

    fn mouse_normal(&mut self, event: MouseEvent, at: Position, now: Instant) -> Effect {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(kind) = self.header_hit(at) {
                    self.nav.toggle(kind);
                    return Effect::None;
                }
                for strip in self.hits.strips.clone() {
                    if strip.left_arrow.is_some_and(|r| r.contains(at)) {
                        self.galleries[strip.gallery].page_scroll(ScrollDirection::Left, now);
                        return Effect::None;
                    }
                    if strip.right_arrow.is_some_and(|r| r.contains(at)) {
                        self.galleries[strip.gallery].page_scroll(ScrollDirection::Right, now);
                        return Effect::None;
                    }
                }
                if let Some(strip) = self.strip_at(at) {
                    let x = self.strip_x(&strip, event.column);
                    self.galleries[strip.gallery].pointer_down(x);
                    self.dragging = Some(strip.gallery);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.dragging {
                    match self.hits.strips.iter().copied().find(|s| s.gallery == index) {
                        Some(strip) if strip.rect.contains(at) => {
                            let x = self.strip_x(&strip, event.column);
                            self.galleries[index].pointer_move(x);
                        }
                        _ => {
                            self.galleries[index].pointer_leave();
                            self.dragging = None;
                        }
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(index) = self.dragging.take() {
                    let strip = self.hits.strips.iter().copied().find(|s| s.gallery == index);
                    if let Some(strip) = strip {
                        let x = self.strip_x(&strip, event.column);
                        let outcome = self.galleries[index].pointer_up(x);
                        self.report_click(outcome);
                    }
                }
            }
            MouseEventKind::Moved => self.update_hover(at),
            MouseEventKind::ScrollDown => {
                self.scroll_page_by(self.line_step());
            }
            MouseEventKind::ScrollUp => {
                self.scroll_page_by(-self.line_step());
            }
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
                if let Some(strip) = self.strip_at(at) {
                    let direction = if event.kind == MouseEventKind::ScrollLeft {
                        ScrollDirection::Left
                    } else {
                        ScrollDirection::Right
                    };
                    self.galleries[strip.gallery].page_scroll(direction, now);
                }
            }
            _ => {}
        }
        Effect::None
    }

    fn update_hover(&mut self, at: Position) {
        let hovered = self.strip_at(at).map(|s| s.gallery);
        if hovered == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            if let Some(gallery) = self.galleries.get_mut(previous) {
                gallery.pointer_leave();
            }
        }
        if let Some(gallery) = hovered.and_then(|i| self.galleries.get_mut(i)) {
            gallery.hover(true);
        }
        self.hovered = hovered;
    }

    fn report_click(&mut self, outcome: ClickOutcome) {
        match outcome {
            ClickOutcome::TogglePlayback { playing: true, .. } => self.set_status("Playing"),
            ClickOutcome::TogglePlayback { playing: false, .. } => self.set_status("Paused"),
            ClickOutcome::OpenedLightbox { .. } => self.clear_status(),
            ClickOutcome::Suppressed | ClickOutcome::Ignored => {}
        }
    }

    /// Number of live players currently playing, across galleries
    pub fn playing_count(&self) -> usize {
        self.galleries
            .iter()
            .map(|g| {
                g.players()
                    .registry()
                    .instances()
                    .filter(|&i| g.players().is_playing(i))
                    .count()
            })
            .sum()
    }

    /// Kind of the first visible tile of the focused gallery
    pub fn focused_view(&self) -> Option<InstanceView> {
        let gallery = self.galleries.get(self.focused_gallery()?)?;
        gallery.visible_tiles().into_iter().find(|t| t.x >= 0.0).map(|t| t.view)
    }

    pub fn teardown(&mut self) {
        for gallery in &mut self.galleries {
            gallery.teardown();
        }
    }
}
