//! Full-size image viewer over a gallery's image subset.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::MediaItem;
use tracing::debug;

/// Page-wide scroll lock shared by every gallery.
///
/// The page is locked while at least one guard is alive.
#[derive(Debug, Clone, Default)]
pub struct PageScrollLock {
    holders: Rc<Cell<usize>>,
}

impl PageScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }
}

/// Releases its share of the page lock when dropped
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open { index: usize },
}

/// Click targets inside the open lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxTarget {
    Scrim,
    Image,
    Close,
    Previous,
    Next,
}

/// Keys captured while the lightbox is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    Left,
    Right,
}

#[derive(Debug)]
pub struct Lightbox {
    images: Vec<MediaItem>,
    index: Option<usize>,
    lock: PageScrollLock,
    guard: Option<ScrollLockGuard>,
}

impl Lightbox {
    pub fn new(images: Vec<MediaItem>, lock: PageScrollLock) -> Self {
        Self {
            images,
            index: None,
            lock,
            guard: None,
        }
    }

    pub fn state(&self) -> LightboxState {
        match self.index {
            Some(index) => LightboxState::Open { index },
            None => LightboxState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Open on an image of the subset; anything else is ignored
    pub fn open(&mut self, item: &MediaItem) -> bool {
        match self.images.iter().position(|m| m == item) {
            Some(index) => self.open_at(index),
            None => false,
        }
    }

    pub fn open_at(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.index = Some(index);
        if self.guard.is_none() {
            self.guard = Some(self.lock.acquire());
        }
        debug!("Lightbox open at {}/{}", index + 1, self.images.len());
        true
    }

    pub fn close(&mut self) {
        self.index = None;
        self.guard = None;
    }

    pub fn next(&mut self) {
        let len = self.images.len();
        if let Some(index) = self.index.as_mut().filter(|_| len > 0) {
            *index = (*index + 1) % len;
        }
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        if let Some(index) = self.index.as_mut().filter(|_| len > 0) {
            *index = (*index + len - 1) % len;
        }
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.index.and_then(|i| self.images.get(i))
    }

    /// Previous/next chrome and the counter only exist for more than one image
    pub fn shows_navigation(&self) -> bool {
        self.images.len() > 1
    }

    /// "i / M", 1-based
    pub fn counter(&self) -> Option<String> {
        let index = self.index?;
        self.shows_navigation()
            .then(|| format!("{} / {}", index + 1, self.images.len()))
    }

    /// Returns true when the key was consumed
    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::Left => self.previous(),
            LightboxKey::Right => self.next(),
        }
        true
    }

    pub fn click(&mut self, target: LightboxTarget) {
        if !self.is_open() {
            return;
        }
        match target {
            LightboxTarget::Scrim | LightboxTarget::Close => self.close(),
            LightboxTarget::Image => {}
            LightboxTarget::Previous if self.shows_navigation() => self.previous(),
            LightboxTarget::Next if self.shows_navigation() => self.next(),
            LightboxTarget::Previous | LightboxTarget::Next => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<MediaItem> {
        (0..n).map(|i| MediaItem::Image(format!("{i}.jpg"))).collect()
    }

    #[test]
    fn test_circular_navigation() {
        let mut lb = Lightbox::new(images(5), PageScrollLock::new());
        assert!(lb.open(&MediaItem::Image("3.jpg".to_string())));

        let mut seen = Vec::new();
        for _ in 0..4 {
            lb.handle_key(LightboxKey::Right);
            let LightboxState::Open { index } = lb.state() else {
                panic!("closed");
            };
            seen.push(index);
        }
        assert_eq!(seen, vec![4, 0, 1, 2]);
    }

    #[test]
    fn test_next_and_previous_cycle() {
        let mut lb = Lightbox::new(images(4), PageScrollLock::new());
        lb.open_at(0);
        for _ in 0..4 {
            lb.next();
        }
        assert_eq!(lb.state(), LightboxState::Open { index: 0 });
        for _ in 0..4 {
            lb.previous();
        }
        assert_eq!(lb.state(), LightboxState::Open { index: 0 });
        lb.previous();
        assert_eq!(lb.state(), LightboxState::Open { index: 3 });
    }

    #[test]
    fn test_non_image_does_not_open() {
        let mut lb = Lightbox::new(images(2), PageScrollLock::new());
        assert!(!lb.open(&MediaItem::VideoClip("0.mp4".to_string())));
        assert!(!lb.open_at(2));
        assert_eq!(lb.state(), LightboxState::Closed);

        let mut empty = Lightbox::new(Vec::new(), PageScrollLock::new());
        assert!(!empty.open_at(0));
        empty.next();
        assert_eq!(empty.state(), LightboxState::Closed);
    }

    #[test]
    fn test_scroll_lock_follows_open_state() {
        let lock = PageScrollLock::new();
        let mut lb = Lightbox::new(images(3), lock.clone());
        assert!(!lock.is_locked());

        lb.open_at(1);
        assert!(lock.is_locked());
        lb.next();
        lb.open_at(2);
        assert!(lock.is_locked());

        lb.close();
        assert!(!lock.is_locked());

        lb.open_at(0);
        drop(lb);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_lock_is_shared_between_lightboxes() {
        let lock = PageScrollLock::new();
        let mut a = Lightbox::new(images(1), lock.clone());
        let mut b = Lightbox::new(images(1), lock.clone());
        a.open_at(0);
        b.open_at(0);
        a.close();
        assert!(lock.is_locked());
        b.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_clicks() {
        let mut lb = Lightbox::new(images(3), PageScrollLock::new());
        lb.open_at(0);

        lb.click(LightboxTarget::Image);
        assert_eq!(lb.state(), LightboxState::Open { index: 0 });
        lb.click(LightboxTarget::Next);
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
        lb.click(LightboxTarget::Previous);
        assert_eq!(lb.state(), LightboxState::Open { index: 0 });
        lb.click(LightboxTarget::Scrim);
        assert!(!lb.is_open());

        lb.open_at(2);
        lb.click(LightboxTarget::Close);
        assert!(!lb.is_open());
    }

    #[test]
    fn test_counter_only_for_multiple_images() {
        let mut single = Lightbox::new(images(1), PageScrollLock::new());
        single.open_at(0);
        assert_eq!(single.counter(), None);
        assert!(!single.shows_navigation());

        let mut many = Lightbox::new(images(5), PageScrollLock::new());
        assert_eq!(many.counter(), None);
        many.open_at(3);
        assert_eq!(many.counter().as_deref(), Some("4 / 5"));
    }

    #[test]
    fn test_keys_ignored_when_closed() {
        let mut lb = Lightbox::new(images(3), PageScrollLock::new());
        assert!(!lb.handle_key(LightboxKey::Right));
        assert!(!lb.handle_key(LightboxKey::Escape));
        lb.open_at(1);
        assert!(lb.handle_key(LightboxKey::Escape));
        assert!(!lb.is_open());
    }
}
