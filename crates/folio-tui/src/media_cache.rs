//! Decoded media and their half-block renditions.
//!
//! Images are fetched off the UI thread (see [`spawn_media_load`]) and land
//! here as [`MediaState::Ready`]. Rendering converts an image to a grid of
//! upper-half-block cells once per (url, size, fit) and reuses it while the
//! tile size is stable.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use folio_core::portfolio::{decode_image_bytes, fetch_media, ImageDiskCache, MediaSource};
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ratatui::style::Color;
use ratatui_image::picker::Picker;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::event::ImageLoadResult;

/// Terminal cell size in pixels, falling back to 8x16 when the terminal
/// does not answer the query
pub fn cell_size() -> (u16, u16) {
    static PICKER: OnceLock<Picker> = OnceLock::new();
    let picker = PICKER.get_or_init(|| {
        Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)))
    });
    let (w, h) = picker.font_size();
    (w.max(1), h.max(1))
}

pub enum MediaState {
    Loading,
    Ready(Arc<DynamicImage>),
    Failed(String),
}

/// How an image is fitted into a cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Fill the grid, cropping the overflow (tiles)
    Cover,
    /// Fit inside the grid, letterboxed (lightbox)
    Contain,
}

/// Pre-rendered grid of half-block cells: `(top, bottom)` colors per cell
#[derive(Debug, Clone)]
pub struct HalfBlockBitmap {
    pub cols: u16,
    pub rows: u16,
    /// Row-major, `None` for letterbox padding
    cells: Vec<Option<(Color, Color)>>,
}

impl HalfBlockBitmap {
    pub fn render(image: &DynamicImage, cols: u16, rows: u16, fit: Fit) -> Self {
        let target_w = u32::from(cols.max(1));
        let target_h = u32::from(rows.max(1)) * 2;
        let (img_w, img_h) = image.dimensions();

        let mut cells = vec![None; usize::from(cols) * usize::from(rows)];
        if img_w == 0 || img_h == 0 || cols == 0 || rows == 0 {
            return Self { cols, rows, cells };
        }

        let (pixels, x_pad, y_pad) = match fit {
            Fit::Cover => {
                let resized = image.resize_to_fill(target_w, target_h, FilterType::Triangle);
                (resized.to_rgba8(), 0, 0)
            }
            Fit::Contain => {
                let resized = image.resize(target_w, target_h, FilterType::Triangle);
                let (w, h) = resized.dimensions();
                (
                    resized.to_rgba8(),
                    (target_w.saturating_sub(w)) / 2,
                    (target_h.saturating_sub(h)) / 4 * 2,
                )
            }
        };
        let (w, h) = pixels.dimensions();

        for row in 0..u32::from(rows) {
            for col in 0..u32::from(cols) {
                let Some(x) = col.checked_sub(x_pad).filter(|&x| x < w) else {
                    continue;
                };
                let Some(y) = (row * 2).checked_sub(y_pad).filter(|&y| y < h) else {
                    continue;
                };
                let top = pixels.get_pixel(x, y);
                let bottom = if y + 1 < h { pixels.get_pixel(x, y + 1) } else { top };
                let index = (row * u32::from(cols) + col) as usize;
                cells[index] = Some((
                    Color::Rgb(top[0], top[1], top[2]),
                    Color::Rgb(bottom[0], bottom[1], bottom[2]),
                ));
            }
        }

        Self { cols, rows, cells }
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<(Color, Color)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.cols) + usize::from(col))
            .copied()
            .flatten()
    }
}

type BitmapKey = (String, u16, u16, Fit);

/// Loaded media keyed by URL, plus rendered bitmaps
#[derive(Default)]
pub struct MediaCache {
    states: HashMap<String, MediaState>,
    bitmaps: HashMap<BitmapKey, HalfBlockBitmap>,
}

impl MediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a URL as loading. Returns false when it is already known.
    pub fn start_loading(&mut self, url: &str) -> bool {
        if self.states.contains_key(url) {
            return false;
        }
        self.states.insert(url.to_string(), MediaState::Loading);
        true
    }

    pub fn apply(&mut self, result: ImageLoadResult) {
        match result {
            ImageLoadResult::Success { url, image } => {
                debug!("Media ready: {} ({}x{})", url, image.width(), image.height());
                self.bitmaps.retain(|(u, ..), _| u != &url);
                self.states.insert(url, MediaState::Ready(Arc::new(image)));
            }
            ImageLoadResult::Failure { url, error } => {
                warn!("Media failed: {}: {}", url, error);
                self.states.insert(url, MediaState::Failed(error));
            }
        }
    }

    pub fn state(&self, url: &str) -> Option<&MediaState> {
        self.states.get(url)
    }

    pub fn is_ready(&self, url: &str) -> bool {
        matches!(self.states.get(url), Some(MediaState::Ready(_)))
    }

    pub fn is_failed(&self, url: &str) -> bool {
        matches!(self.states.get(url), Some(MediaState::Failed(_)))
    }

    pub fn image(&self, url: &str) -> Option<Arc<DynamicImage>> {
        match self.states.get(url) {
            Some(MediaState::Ready(image)) => Some(Arc::clone(image)),
            _ => None,
        }
    }

    /// Width over height of a loaded image
    pub fn aspect(&self, url: &str) -> Option<f64> {
        let image = self.image(url)?;
        let (w, h) = image.dimensions();
        (w > 0 && h > 0).then(|| f64::from(w) / f64::from(h))
    }

    /// Half-block rendition of a loaded image, rendered on first use
    pub fn bitmap(&mut self, url: &str, cols: u16, rows: u16, fit: Fit) -> Option<&HalfBlockBitmap> {
        let image = self.image(url)?;
        let key = (url.to_string(), cols, rows, fit);
        Some(
            self.bitmaps
                .entry(key)
                .or_insert_with(|| HalfBlockBitmap::render(&image, cols, rows, fit)),
        )
    }

    /// Drop renditions not used at the current sizes
    pub fn retain_bitmaps(&mut self, keep: impl Fn(u16, u16, Fit) -> bool) {
        self.bitmaps.retain(|(_, cols, rows, fit), _| keep(*cols, *rows, *fit));
    }

    pub fn loading_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, MediaState::Loading))
            .count()
    }
}

/// Fetch and decode a media entry in the background, reporting through `tx`
pub fn spawn_media_load(
    tx: UnboundedSender<ImageLoadResult>,
    client: reqwest::Client,
    cache: Option<Arc<ImageDiskCache>>,
    url: String,
) {
    tokio::spawn(async move {
        let result = load_media(&client, cache.as_deref(), &url).await;
        let message = match result {
            Ok(image) => ImageLoadResult::Success { url, image },
            Err(error) => ImageLoadResult::Failure {
                url,
                error: error.to_string(),
            },
        };
        // Receiver gone means the UI is shutting down
        let _ = tx.send(message);
    });
}

async fn load_media(
    client: &reqwest::Client,
    cache: Option<&ImageDiskCache>,
    url: &str,
) -> folio_core::Result<DynamicImage> {
    let source = MediaSource::parse(url)?;
    let bytes = fetch_media(client, &source, cache).await?;
    tokio::task::spawn_blocking(move || decode_image_bytes(&bytes))
        .await
        .map_err(|e| folio_core::Error::Other(format!("decode task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn split_image() -> DynamicImage {
        // Left half red, right half blue
        let img = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_cover_fills_every_cell() {
        let bitmap = HalfBlockBitmap::render(&split_image(), 4, 2, Fit::Cover);
        for row in 0..2 {
            for col in 0..4 {
                assert!(bitmap.cell(col, row).is_some());
            }
        }
        assert!(bitmap.cell(4, 0).is_none());
    }

    #[test]
    fn test_contain_letterboxes() {
        // 2:1 image into a square grid: 10 cols x 5 rows = 10x10 pixels
        let bitmap = HalfBlockBitmap::render(&split_image(), 10, 5, Fit::Contain);
        assert!(bitmap.cell(0, 0).is_none());
        assert!(bitmap.cell(0, 2).is_some());
        let Some((Color::Rgb(r, _, _), _)) = bitmap.cell(0, 2) else {
            panic!("expected rgb cell");
        };
        assert!(r > 200);
    }

    #[test]
    fn test_cache_states_and_aspect() {
        let mut cache = MediaCache::new();
        assert!(cache.start_loading("a.png"));
        assert!(!cache.start_loading("a.png"));
        assert_eq!(cache.loading_count(), 1);
        assert!(cache.aspect("a.png").is_none());

        cache.apply(ImageLoadResult::Success {
            url: "a.png".to_string(),
            image: split_image(),
        });
        assert!(cache.is_ready("a.png"));
        assert_eq!(cache.aspect("a.png"), Some(2.0));
        assert!(cache.bitmap("a.png", 4, 2, Fit::Cover).is_some());

        cache.start_loading("b.png");
        cache.apply(ImageLoadResult::Failure {
            url: "b.png".to_string(),
            error: "HTTP 404".to_string(),
        });
        assert!(cache.is_failed("b.png"));
        assert!(cache.bitmap("b.png", 4, 2, Fit::Cover).is_none());
    }
}
