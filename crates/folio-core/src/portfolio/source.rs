use std::path::{Path, PathBuf};
use std::time::Duration;

use image::DynamicImage;
use tracing::debug;
use url::Url;

use crate::{Error, Result};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) folio/0.1";
const ACCEPT_IMAGES: &str = "image/png,image/jpeg,image/gif,image/webp,image/*;q=0.8";

/// Where the bytes of a media entry come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Local(PathBuf),
    Remote(Url),
}

impl MediaSource {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.contains("://") {
            let url = Url::parse(raw)?;
            match url.scheme() {
                "http" | "https" => Ok(MediaSource::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(MediaSource::Local)
                    .map_err(|_| Error::Other(format!("Not a local file URL: {raw}"))),
                other => Err(Error::Other(format!("Unsupported media scheme: {other}"))),
            }
        } else {
            Ok(MediaSource::Local(PathBuf::from(raw)))
        }
    }
}

/// On-disk cache of downloaded media, one file per URL
#[derive(Debug, Clone)]
pub struct ImageDiskCache {
    cache_dir: PathBuf,
}

impl ImageDiskCache {
    pub fn new(cache_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(cache_dir)?;
        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// Cache filename: hash of the URL plus a known image extension
    fn url_to_filename(url: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        let hash = hasher.finish();

        let path = url.split(['?', '#']).next().unwrap_or(url);
        let ext = path
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .filter(|e| ["jpg", "jpeg", "png", "gif", "webp"].contains(&e.as_str()))
            .unwrap_or_else(|| "bin".to_string());

        format!("{:016x}.{}", hash, ext)
    }

    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(Self::url_to_filename(url))
    }

    pub fn load(&self, url: &str) -> Option<Vec<u8>> {
        std::fs::read(self.cache_path(url)).ok()
    }

    pub fn save(&self, url: &str, data: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.cache_path(url), data)
    }
}

/// Shared HTTP client for media downloads
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?)
}

/// Read the bytes of a media entry, going through the disk cache for remote
/// sources.
pub async fn fetch_media(
    client: &reqwest::Client,
    source: &MediaSource,
    cache: Option<&ImageDiskCache>,
) -> Result<Vec<u8>> {
    match source {
        MediaSource::Local(path) => Ok(tokio::fs::read(path).await?),
        MediaSource::Remote(url) => {
            if let Some(bytes) = cache.and_then(|c| c.load(url.as_str())) {
                debug!("Media cache hit: {}", url);
                return Ok(bytes);
            }

            let referer = format!("{}://{}/", url.scheme(), url.host_str().unwrap_or(""));
            let response = client
                .get(url.clone())
                .header("Accept", ACCEPT_IMAGES)
                .header("Referer", referer)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Error::MediaFetch {
                    url: url.to_string(),
                    reason: format!("HTTP {}", response.status()),
                });
            }

            let bytes = response.bytes().await?.to_vec();
            if let Some(cache) = cache {
                if let Err(e) = cache.save(url.as_str(), &bytes) {
                    debug!("Failed to cache {}: {}", url, e);
                }
            }
            Ok(bytes)
        }
    }
}

/// Decode image bytes, falling back to magic-byte format detection
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::Other("Empty image data".to_string()));
    }

    if let Ok(img) = image::load_from_memory(bytes) {
        return Ok(img);
    }

    let format = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(image::ImageFormat::Png)
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some(image::ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(image::ImageFormat::Gif)
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some(image::ImageFormat::WebP)
    } else {
        None
    };

    match format {
        Some(format) => Ok(image::load_from_memory_with_format(bytes, format)?),
        None => Err(Error::Other(format!("Unknown image format ({}B)", bytes.len()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        assert!(matches!(
            MediaSource::parse("https://cdn.example.com/a.jpg").unwrap(),
            MediaSource::Remote(_)
        ));
        assert_eq!(
            MediaSource::parse("/srv/site/a.jpg").unwrap(),
            MediaSource::Local(PathBuf::from("/srv/site/a.jpg"))
        );
        assert!(MediaSource::parse("ftp://example.com/a.jpg").is_err());
    }

    #[test]
    fn test_cache_filename() {
        let name = ImageDiskCache::url_to_filename("https://cdn.example.com/a.JPG?w=800");
        assert!(name.ends_with(".jpg"));
        let name = ImageDiskCache::url_to_filename("https://img.example.com/raw");
        assert!(name.ends_with(".bin"));
    }

    #[test]
    fn test_decode_png() {
        let img = image::RgbImage::from_pixel(2, 3, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image_bytes(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 3));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_image_bytes(b"").is_err());
        assert!(decode_image_bytes(b"definitely not an image").is_err());
    }

    #[tokio::test]
    async fn test_fetch_local_and_cache_roundtrip() {
        let dir = std::env::temp_dir().join(format!("folio-source-{}", std::process::id()));
        let cache = ImageDiskCache::new(&dir.join("cache")).unwrap();
        let file = dir.join("local.bin");
        std::fs::write(&file, b"abc").unwrap();

        let client = http_client().unwrap();
        let bytes = fetch_media(&client, &MediaSource::Local(file), Some(&cache))
            .await
            .unwrap();
        assert_eq!(bytes, b"abc");

        // Pre-seeded cache entries are served without touching the network
        let url = "https://unreachable.invalid/photo.png";
        cache.save(url, b"cached").unwrap();
        let source = MediaSource::parse(url).unwrap();
        let bytes = fetch_media(&client, &source, Some(&cache)).await.unwrap();
        assert_eq!(bytes, b"cached");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
