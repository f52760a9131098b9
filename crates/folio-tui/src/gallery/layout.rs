//! Pixel geometry of the tiles of a looped sequence.
//!
//! Every tile slot is its width plus one trailing gap, so the three laps are
//! exactly the same width and `W / 3` is the loop period.

use super::sequence::COPIES;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileExtent {
    pub start: f64,
    pub width: f64,
}

impl TileExtent {
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x < self.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileLayout {
    extents: Vec<TileExtent>,
    lap_width: f64,
}

impl TileLayout {
    /// Lay out `COPIES` laps of tiles with the given per-item widths
    pub fn new(widths: &[f64], gap: f64) -> Self {
        let gap = gap.max(0.0);
        let mut extents = Vec::with_capacity(widths.len() * COPIES);
        let mut x = 0.0;
        for _ in 0..COPIES {
            for width in widths {
                let width = width.max(1.0);
                extents.push(TileExtent { start: x, width });
                x += width + gap;
            }
        }
        let lap_width = if widths.is_empty() { 0.0 } else { x / COPIES as f64 };
        Self { extents, lap_width }
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// W, total scrollable width
    pub fn total_width(&self) -> f64 {
        self.lap_width * COPIES as f64
    }

    pub fn lap_width(&self) -> f64 {
        self.lap_width
    }

    pub fn extent(&self, index: usize) -> Option<TileExtent> {
        self.extents.get(index).copied()
    }

    /// Instance under a content-space x coordinate; gaps hit nothing
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        let idx = self.extents.partition_point(|e| e.start <= x);
        let candidate = idx.checked_sub(1)?;
        self.extents[candidate].contains(x).then_some(candidate)
    }

    /// Instances overlapping `[offset, offset + viewport)`
    pub fn visible(&self, offset: f64, viewport: f64) -> impl Iterator<Item = (usize, TileExtent)> + '_ {
        let first = self.extents.partition_point(|e| e.end() <= offset);
        let end = offset + viewport;
        self.extents[first..]
            .iter()
            .enumerate()
            .take_while(move |(_, e)| e.start < end)
            .map(move |(i, e)| (first + i, *e))
    }
}
