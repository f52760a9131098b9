//! Infinite media carousel.
//!
//! A [`Gallery`] owns everything one carousel needs: the looped sequence, the
//! tile layout, the scroll controller, drag/momentum, auto-scroll, the live
//! player registry and the lightbox. The UI loop feeds it pointer events in
//! viewport pixels and calls [`Gallery::tick`] once per frame.

pub mod autoscroll;
pub mod controller;
pub mod interaction;
pub mod layout;
pub mod lightbox;
pub mod player;
pub mod scheduler;
pub mod sequence;

use std::time::Instant;

use folio_core::{GalleryConfig, MediaItem, PlayerTransport, Project};
use tracing::debug;

use crate::scroll::GalleryConfigExt;

pub use autoscroll::{AutoScrollDriver, Suspension};
pub use controller::{ScrollController, ScrollDirection, ViewportMetrics};
pub use interaction::{InteractionEngine, InteractionPhase};
pub use layout::{TileExtent, TileLayout};
pub use lightbox::{Lightbox, LightboxKey, LightboxState, LightboxTarget, PageScrollLock};
pub use player::{instance_view, InstanceView, LogTransport, PlayerBridge};
pub use scheduler::{DelayedAttempts, FrameTask, TaskState};
pub use sequence::{Lap, LoopedSequence};

/// What a click on the tile strip did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    OpenedLightbox { index: usize },
    TogglePlayback { instance: usize, playing: bool },
    /// The press turned into a drag
    Suppressed,
    Ignored,
}

/// A tile overlapping the viewport, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub instance: usize,
    pub logical: usize,
    /// Left edge relative to the viewport, negative when clipped
    pub x: f64,
    pub width: f64,
    pub view: InstanceView,
    pub playing: bool,
}

/// One project's carousel and everything that moves it
#[derive(Debug)]
pub struct Gallery {
    /// Project id, used in logs and navigation
    id: String,
    title: String,
    year: Option<String>,
    description: Option<String>,
    /// Three laps of the project's media
    sequence: LoopedSequence,
    /// Tile extents in content pixels; empty until `set_geometry`
    layout: TileLayout,
    controller: ScrollController,
    /// Drag and momentum
    interaction: InteractionEngine,
    autoscroll: AutoScrollDriver,
    /// Pending initial-position attempts
    init: DelayedAttempts,
    players: PlayerBridge,
    lightbox: Lightbox,
    /// Pointer is over the strip
    hovering: bool,
    /// Description panel expanded
    show_info: bool,
    /// Set by `teardown`; every later call is a no-op
    torn_down: bool,
}

impl Gallery {
    /// Mount a gallery for a project. Initial positioning is attempted at the
    /// configured delays after `now`.
    pub fn new(
        project: &Project,
        config: &GalleryConfig,
        lock: PageScrollLock,
        transport: Box<dyn PlayerTransport>,
        now: Instant,
    ) -> Self {
        let sequence = LoopedSequence::build(project.media_items());
        let lightbox = Lightbox::new(sequence.images().to_vec(), lock);
        let mut players = PlayerBridge::new(transport, config.autoplay_instances);
        players.mount(&sequence);

        debug!(
            "Mounted gallery '{}' with {} items ({} live players)",
            project.id,
            sequence.logical_len(),
            players.registry().len()
        );

        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            year: project.year.clone(),
            description: project.description.clone(),
            sequence,
            layout: TileLayout::default(),
            controller: ScrollController::new(config),
            interaction: InteractionEngine::new(config),
            autoscroll: AutoScrollDriver::new(config.auto_scroll_speed),
            init: DelayedAttempts::new(now, config.init_delays()),
            players,
            lightbox,
            hovering: false,
            show_info: false,
            torn_down: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sequence(&self) -> &LoopedSequence {
        &self.sequence
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    pub fn controller(&self) -> &ScrollController {
        &self.controller
    }

    pub fn interaction(&self) -> &InteractionEngine {
        &self.interaction
    }

    pub fn players(&self) -> &PlayerBridge {
        &self.players
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    pub fn auto_scroll_state(&self) -> TaskState {
        self.autoscroll.state()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn show_info(&self) -> bool {
        self.show_info && self.description.is_some()
    }

    /// Toggle the description; galleries without one have no Info control
    pub fn toggle_info(&mut self) -> bool {
        if self.description.is_none() {
            return false;
        }
        self.show_info = !self.show_info;
        true
    }

    /// Lay out the tiles (widths per distinct item) in a viewport
    pub fn set_geometry(&mut self, widths: &[f64], gap: f64, visible_width: f64) {
        let layout = TileLayout::new(widths, gap);
        if layout != self.layout {
            self.layout = layout;
        }
        self.controller.set_metrics(ViewportMetrics {
            total_width: self.layout.total_width(),
            visible_width,
        });
    }

    pub fn suspension(&self) -> Suspension {
        Suspension {
            hovering: self.hovering,
            lightbox_open: self.lightbox.is_open(),
            dragging: self.interaction.is_dragging(),
            coasting: self.interaction.is_coasting(),
            page_animating: self.controller.is_animating(),
        }
    }

    /// Run one frame. Returns true while anything is moving or pending.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }

        for _ in 0..self.init.poll(now) {
            self.controller.initialize();
        }

        let animating = self.controller.tick_animation(now);
        let coasting = self.interaction.tick(&mut self.controller);

        self.autoscroll.update(self.suspension());
        let drifting = self.autoscroll.tick(&mut self.controller);

        animating || coasting || drifting || !self.init.is_finished()
    }

    pub fn hover(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn pointer_down(&mut self, x: f64) {
        if self.torn_down {
            return;
        }
        self.interrupt_init();
        self.interaction.pointer_down(x, &mut self.controller);
    }

    pub fn pointer_move(&mut self, x: f64) -> bool {
        self.interaction.pointer_move(x, &mut self.controller)
    }

    /// Release the pointer; a press that did not travel is a click at `x`
    pub fn pointer_up(&mut self, x: f64) -> ClickOutcome {
        if !self.interaction.is_dragging() {
            return ClickOutcome::Ignored;
        }
        self.interaction.pointer_up();
        self.click(x)
    }

    /// Pointer left the viewport
    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        if self.interaction.is_dragging() {
            self.interaction.pointer_leave();
        }
    }

    /// Click at a viewport x coordinate
    pub fn click(&mut self, x: f64) -> ClickOutcome {
        if self.interaction.has_moved() {
            return ClickOutcome::Suppressed;
        }
        let Some(instance) = self.layout.hit_test(self.controller.offset() + x) else {
            return ClickOutcome::Ignored;
        };
        self.activate(instance)
    }

    fn activate(&mut self, instance: usize) -> ClickOutcome {
        match instance_view(&self.sequence, instance) {
            Some(InstanceView::Image) => {
                let Some(item) = self.sequence.get(instance).cloned() else {
                    return ClickOutcome::Ignored;
                };
                if self.lightbox.open(&item) {
                    if let LightboxState::Open { index } = self.lightbox.state() {
                        return ClickOutcome::OpenedLightbox { index };
                    }
                }
                ClickOutcome::Ignored
            }
            Some(InstanceView::LivePlayer) => match self.players.toggle(instance) {
                Some(playing) => ClickOutcome::TogglePlayback { instance, playing },
                None => ClickOutcome::Ignored,
            },
            _ => ClickOutcome::Ignored,
        }
    }

    /// Animated scroll by most of a viewport
    pub fn page_scroll(&mut self, direction: ScrollDirection, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        self.interrupt_init();
        self.controller.page_scroll(direction, now)
    }

    /// User interaction drops the remaining initial-position attempts. A
    /// gallery that was never positioned is positioned first, so auto-scroll
    /// can start once the interaction ends.
    fn interrupt_init(&mut self) {
        if self.init.is_finished() {
            return;
        }
        if !self.controller.is_initialized() && !self.controller.initialize() {
            // No metrics yet; the pending attempts will position it
            return;
        }
        self.init.cancel();
    }

    /// Tiles overlapping the viewport, left to right
    pub fn visible_tiles(&self) -> Vec<VisibleTile> {
        let Some(metrics) = self.controller.metrics() else {
            return Vec::new();
        };
        let offset = self.controller.offset();
        self.layout
            .visible(offset, metrics.visible_width)
            .filter_map(|(instance, extent)| {
                Some(VisibleTile {
                    instance,
                    logical: self.sequence.logical_index(instance)?,
                    x: extent.start - offset,
                    width: extent.width,
                    view: instance_view(&self.sequence, instance)?,
                    playing: self.players.is_playing(instance),
                })
            })
            .collect()
    }

    /// Leftmost visible instance of a kind, preferring tiles that start
    /// inside the viewport
    pub fn first_visible(&self, view: InstanceView) -> Option<usize> {
        let tiles = self.visible_tiles();
        tiles
            .iter()
            .filter(|t| t.view == view)
            .find(|t| t.x >= 0.0)
            .or_else(|| tiles.iter().find(|t| t.view == view))
            .map(|t| t.instance)
    }

    pub fn item(&self, instance: usize) -> Option<&MediaItem> {
        self.sequence.get(instance)
    }

    /// Open the lightbox on the first visible image
    pub fn open_lightbox_on_visible(&mut self) -> bool {
        match self.first_visible(InstanceView::Image) {
            Some(instance) => matches!(self.activate(instance), ClickOutcome::OpenedLightbox { .. }),
            None => false,
        }
    }

    /// Toggle the first visible live player
    pub fn toggle_visible_player(&mut self) -> Option<bool> {
        let instance = self.first_visible(InstanceView::LivePlayer)?;
        self.players.toggle(instance)
    }

    /// Called when page navigation moves away from this gallery
    pub fn on_navigate(&mut self) {
        self.lightbox.close();
    }

    /// Stop all tasks, unmount players and release the page lock
    pub fn teardown(&mut self) {
        self.autoscroll.cancel();
        self.interaction.cancel();
        self.init.cancel();
        self.controller.cancel_animation();
        self.players.unmount_all();
        self.lightbox.close();
        self.torn_down = true;
        debug!("Gallery '{}' torn down", self.id);
    }
}
