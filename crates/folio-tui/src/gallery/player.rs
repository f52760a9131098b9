//! Embedded player instances of a gallery.
//!
//! Only embedded videos in the active lap get a live player; their copies in
//! the leading and trailing laps show a static preview. Control messages are
//! fire-and-forget: a failed post is logged and otherwise ignored.

use std::collections::BTreeMap;

use folio_core::{MediaItem, PlayerCommand, PlayerMessage, PlayerTransport};
use tracing::debug;

use super::sequence::{Lap, LoopedSequence};

/// How one instance of the looped sequence is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceView {
    Image,
    Clip,
    LivePlayer,
    /// Static thumbnail standing in for a player
    VideoPreview,
}

pub fn instance_view(sequence: &LoopedSequence, index: usize) -> Option<InstanceView> {
    let item = sequence.get(index)?;
    Some(match item {
        MediaItem::Image(_) => InstanceView::Image,
        MediaItem::VideoClip(_) => InstanceView::Clip,
        MediaItem::EmbeddedVideo(_) if sequence.lap(index) == Some(Lap::Active) => {
            InstanceView::LivePlayer
        }
        MediaItem::EmbeddedVideo(_) => InstanceView::VideoPreview,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot {
    /// A live player exists for the instance
    pub mounted: bool,
    /// Last state commanded, not confirmed by the player
    pub playing: bool,
}

/// Live players keyed by instance index
#[derive(Debug, Clone, Default)]
pub struct PlaybackRegistry {
    slots: BTreeMap<usize, PlayerSlot>,
}

impl PlaybackRegistry {
    pub fn mount(&mut self, instance: usize, playing: bool) {
        self.slots.insert(
            instance,
            PlayerSlot {
                mounted: true,
                playing,
            },
        );
    }

    pub fn get(&self, instance: usize) -> Option<PlayerSlot> {
        self.slots.get(&instance).copied()
    }

    pub fn is_playing(&self, instance: usize) -> bool {
        self.get(instance).map(|s| s.playing).unwrap_or(false)
    }

    pub fn instances(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

pub struct PlayerBridge {
    registry: PlaybackRegistry,
    /// Where control messages are posted
    transport: Box<dyn PlayerTransport>,
    /// Number of live instances that start playing on mount
    autoplay: usize,
}

impl std::fmt::Debug for PlayerBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerBridge")
            .field("registry", &self.registry)
            .field("autoplay", &self.autoplay)
            .finish_non_exhaustive()
    }
}

impl PlayerBridge {
    pub fn new(transport: Box<dyn PlayerTransport>, autoplay: usize) -> Self {
        Self {
            registry: PlaybackRegistry::default(),
            transport,
            autoplay,
        }
    }

    /// Register the live instances of a sequence. The first `autoplay` of
    /// them, in render order, start playing.
    pub fn mount(&mut self, sequence: &LoopedSequence) {
        let live = (0..sequence.len())
            .filter(|&i| instance_view(sequence, i) == Some(InstanceView::LivePlayer));
        for (rank, instance) in live.enumerate() {
            self.registry.mount(instance, rank < self.autoplay);
        }
    }

    pub fn registry(&self) -> &PlaybackRegistry {
        &self.registry
    }

    pub fn is_playing(&self, instance: usize) -> bool {
        self.registry.is_playing(instance)
    }

    /// Flip play/pause of a live instance. Returns the new playing state, or
    /// None when the instance has no live player.
    pub fn toggle(&mut self, instance: usize) -> Option<bool> {
        let slot = self.registry.get(instance).filter(|s| s.mounted)?;
        let command = if slot.playing {
            PlayerCommand::Pause
        } else {
            PlayerCommand::Play
        };

        if let Err(e) = self
            .transport
            .post(instance, &PlayerMessage::command(command))
        {
            debug!("Player message to instance {} dropped: {}", instance, e);
        }

        let playing = !slot.playing;
        self.registry.mount(instance, playing);
        Some(playing)
    }

    pub fn unmount_all(&mut self) {
        self.registry.clear();
    }
}

/// Transport used in the terminal, which has no player frames to post to
#[derive(Debug, Default)]
pub struct LogTransport;

impl PlayerTransport for LogTransport {
    fn post(&mut self, instance: usize, message: &PlayerMessage) -> folio_core::Result<()> {
        debug!("Player {} <- {}", instance, message.to_json()?);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingTransport, SharedRecorder};
    use super::*;

    fn video() -> MediaItem {
        MediaItem::EmbeddedVideo("https://www.youtube.com/embed/z5wdWnmcaOI".to_string())
    }

    fn image(name: &str) -> MediaItem {
        MediaItem::Image(format!("{name}.jpg"))
    }

    #[test]
    fn test_only_active_lap_is_live() {
        let seq = LoopedSequence::build(vec![video(), image("a"), image("b")]);
        assert_eq!(instance_view(&seq, 0), Some(InstanceView::VideoPreview));
        assert_eq!(instance_view(&seq, 3), Some(InstanceView::LivePlayer));
        assert_eq!(instance_view(&seq, 6), Some(InstanceView::VideoPreview));
        assert_eq!(instance_view(&seq, 4), Some(InstanceView::Image));

        let mut bridge = PlayerBridge::new(Box::new(LogTransport), 3);
        bridge.mount(&seq);
        assert_eq!(bridge.registry().instances().collect::<Vec<_>>(), vec![3]);
        assert!(bridge.is_playing(3));
    }

    #[test]
    fn test_toggle_sends_commands() {
        let recorder = SharedRecorder::default();
        let seq = LoopedSequence::build(vec![video(), image("a")]);
        let mut bridge = PlayerBridge::new(Box::new(recorder.clone()), 3);
        bridge.mount(&seq);

        assert_eq!(bridge.toggle(2), Some(false));
        assert_eq!(bridge.toggle(2), Some(true));

        let sent = recorder.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].1.contains("pauseVideo"));
        assert!(sent[1].1.contains("playVideo"));
        assert!(sent.iter().all(|(i, _)| *i == 2));
    }

    #[test]
    fn test_toggle_non_live_instance_is_noop() {
        let recorder = SharedRecorder::default();
        let seq = LoopedSequence::build(vec![video(), image("a")]);
        let mut bridge = PlayerBridge::new(Box::new(recorder.clone()), 3);
        bridge.mount(&seq);

        assert_eq!(bridge.toggle(0), None);
        assert_eq!(bridge.toggle(3), None);
        assert!(recorder.sent().is_empty());
    }

    #[test]
    fn test_autoplay_limit() {
        let seq = LoopedSequence::build(vec![
            video(),
            MediaItem::EmbeddedVideo("https://www.youtube.com/embed/secondvid".to_string()),
        ]);
        let mut bridge = PlayerBridge::new(Box::new(LogTransport), 1);
        bridge.mount(&seq);
        assert!(bridge.is_playing(2));
        assert!(!bridge.is_playing(3));
        assert_eq!(
            bridge.registry().get(3),
            Some(PlayerSlot {
                mounted: true,
                playing: false
            })
        );
    }

    #[test]
    fn test_delivery_failure_is_ignored() {
        let seq = LoopedSequence::build(vec![video()]);
        let mut bridge = PlayerBridge::new(Box::new(FailingTransport), 3);
        bridge.mount(&seq);
        assert_eq!(bridge.toggle(1), Some(false));
        assert!(!bridge.is_playing(1));
    }

    #[test]
    fn test_unmount_all() {
        let seq = LoopedSequence::build(vec![video()]);
        let mut bridge = PlayerBridge::new(Box::new(LogTransport), 3);
        bridge.mount(&seq);
        bridge.unmount_all();
        assert!(bridge.registry().is_empty());
        assert_eq!(bridge.toggle(1), None);
    }
}
