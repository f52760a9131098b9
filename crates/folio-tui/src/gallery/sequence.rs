//! The looped media sequence: three back-to-back copies of a gallery's media.

use folio_core::portfolio::image_subset;
use folio_core::MediaItem;

/// Number of copies laid out end to end
pub const COPIES: usize = 3;

/// Which copy an instance belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lap {
    Leading,
    /// The middle copy, the only one hosting live players
    Active,
    Trailing,
}

#[derive(Debug, Clone, Default)]
pub struct LoopedSequence {
    items: Vec<MediaItem>,
    images: Vec<MediaItem>,
}

impl LoopedSequence {
    pub fn build(items: Vec<MediaItem>) -> Self {
        let images = image_subset(&items);
        Self { items, images }
    }

    /// N, the number of distinct items
    pub fn logical_len(&self) -> usize {
        self.items.len()
    }

    /// 3N, the number of rendered instances
    pub fn len(&self) -> usize {
        self.items.len() * COPIES
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.logical_index(index).map(|i| &self.items[i])
    }

    pub fn logical_index(&self, index: usize) -> Option<usize> {
        (index < self.len()).then(|| index % self.items.len())
    }

    pub fn lap(&self, index: usize) -> Option<Lap> {
        if index >= self.len() {
            return None;
        }
        Some(match index / self.items.len() {
            0 => Lap::Leading,
            1 => Lap::Active,
            _ => Lap::Trailing,
        })
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Image-only subset, in media order
    pub fn images(&self) -> &[MediaItem] {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::Image(format!("https://cdn.example.com/{i}.jpg")))
            .collect()
    }

    #[test]
    fn test_loop_invariant() {
        let seq = LoopedSequence::build(images(5));
        assert_eq!(seq.len(), 15);
        for i in 0..5 {
            assert_eq!(seq.get(i), seq.get(i + 5));
            assert_eq!(seq.get(i + 5), seq.get(i + 10));
        }
        assert_eq!(seq.get(15), None);
    }

    #[test]
    fn test_laps() {
        let seq = LoopedSequence::build(images(2));
        let laps: Vec<_> = (0..6).map(|i| seq.lap(i).unwrap()).collect();
        assert_eq!(
            laps,
            vec![
                Lap::Leading,
                Lap::Leading,
                Lap::Active,
                Lap::Active,
                Lap::Trailing,
                Lap::Trailing
            ]
        );
        assert_eq!(seq.lap(6), None);
    }

    #[test]
    fn test_empty_sequence() {
        let seq = LoopedSequence::build(Vec::new());
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.get(0), None);
        assert_eq!(seq.lap(0), None);
        assert!(seq.images().is_empty());
    }

    #[test]
    fn test_image_subset_skips_videos() {
        let seq = LoopedSequence::build(vec![
            MediaItem::EmbeddedVideo("https://www.youtube.com/embed/abcdefgh".to_string()),
            MediaItem::Image("a.jpg".to_string()),
            MediaItem::VideoClip("b.mp4".to_string()),
            MediaItem::Image("c.jpg".to_string()),
        ]);
        assert_eq!(
            seq.images(),
            &[
                MediaItem::Image("a.jpg".to_string()),
                MediaItem::Image("c.jpg".to_string())
            ]
        );
    }
}
