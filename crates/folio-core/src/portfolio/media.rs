use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::Project;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v", "ogv"];
const VIDEO_PLATFORMS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com", "vimeo.com"];

static YOUTUBE_ID: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:/embed/|youtu\.be/|[?&]v=|/shorts/)([A-Za-z0-9_-]{6,})").ok()
});

static VIMEO_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").ok());

/// One entry of a project gallery. Identity is the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaItem {
    Image(String),
    /// Silent looping clip (mp4 and friends)
    VideoClip(String),
    /// Third-party hosted player
    EmbeddedVideo(String),
}

impl MediaItem {
    /// Classify a media URL or local path
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if has_video_extension(raw) {
            return MediaItem::VideoClip(raw.to_string());
        }

        let host = Url::parse(raw)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()));
        let on_platform = match host {
            Some(host) => VIDEO_PLATFORMS
                .iter()
                .any(|p| host == *p || host.ends_with(&format!(".{p}"))),
            None => {
                let lower = raw.to_ascii_lowercase();
                VIDEO_PLATFORMS.iter().any(|p| lower.contains(p))
            }
        };

        if on_platform {
            MediaItem::EmbeddedVideo(raw.to_string())
        } else {
            MediaItem::Image(raw.to_string())
        }
    }

    pub fn url(&self) -> &str {
        match self {
            MediaItem::Image(url) | MediaItem::VideoClip(url) | MediaItem::EmbeddedVideo(url) => url,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaItem::Image(_))
    }

    pub fn is_embedded_video(&self) -> bool {
        matches!(self, MediaItem::EmbeddedVideo(_))
    }

    /// Short label for status lines and tile captions
    pub fn kind_label(&self) -> &'static str {
        match self {
            MediaItem::Image(_) => "image",
            MediaItem::VideoClip(_) => "clip",
            MediaItem::EmbeddedVideo(_) => "video",
        }
    }

    /// Platform video id of an embedded video
    pub fn video_id(&self) -> Option<&str> {
        let MediaItem::EmbeddedVideo(url) = self else {
            return None;
        };
        [&*YOUTUBE_ID, &*VIMEO_ID]
            .into_iter()
            .flatten()
            .find_map(|re| re.captures(url))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Static preview image shown instead of a live player
    pub fn preview_url(&self) -> Option<String> {
        match self {
            MediaItem::Image(url) => Some(url.clone()),
            MediaItem::VideoClip(_) => None,
            MediaItem::EmbeddedVideo(url) => {
                if url.contains("vimeo.com") {
                    None
                } else {
                    self.video_id()
                        .map(|id| format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"))
                }
            }
        }
    }

    /// URL suitable for opening in a browser or player
    pub fn external_url(&self) -> String {
        match self {
            MediaItem::EmbeddedVideo(url) => match self.video_id() {
                Some(id) if !url.contains("vimeo.com") => {
                    format!("https://www.youtube.com/watch?v={id}")
                }
                _ => url.clone(),
            },
            other => other.url().to_string(),
        }
    }
}

fn has_video_extension(raw: &str) -> bool {
    let path = raw
        .split(['?', '#'])
        .next()
        .unwrap_or(raw)
        .to_ascii_lowercase();
    path.rsplit_once('.')
        .map(|(_, ext)| VIDEO_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Build the gallery media list of a project: the embedded video first, then
/// the media entries in order, duplicates dropped.
pub fn media_list(project: &Project) -> Vec<MediaItem> {
    let mut seen = HashSet::new();
    project
        .video
        .iter()
        .chain(project.media.iter())
        .filter(|url| !url.trim().is_empty())
        .filter(|url| seen.insert(url.trim().to_string()))
        .map(|url| MediaItem::classify(url))
        .collect()
}

/// The image-only subset browsed by the lightbox
pub fn image_subset(items: &[MediaItem]) -> Vec<MediaItem> {
    items.iter().filter(|m| m.is_image()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(video: Option<&str>, media: &[&str]) -> Project {
        Project {
            id: "p".to_string(),
            title: "P".to_string(),
            year: None,
            description: None,
            media: media.iter().map(|s| s.to_string()).collect(),
            video: video.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            MediaItem::classify("https://example.com/a.jpg"),
            MediaItem::Image("https://example.com/a.jpg".to_string())
        );
        assert!(matches!(
            MediaItem::classify("https://blob.example.com/clip.MP4?download=1"),
            MediaItem::VideoClip(_)
        ));
        assert!(MediaItem::classify("https://www.youtube.com/embed/z5wdWnmcaOI").is_embedded_video());
        assert!(MediaItem::classify("https://youtu.be/z5wdWnmcaOI").is_embedded_video());
        assert!(MediaItem::classify("images/plan.png").is_image());
        assert!(matches!(MediaItem::classify("clips/walk.webm"), MediaItem::VideoClip(_)));
    }

    #[test]
    fn test_platform_name_in_path_is_not_a_video() {
        let item = MediaItem::classify("https://cdn.example.com/youtube.com-banner.png");
        assert!(item.is_image());
    }

    #[test]
    fn test_youtube_preview_and_external_url() {
        let item = MediaItem::classify("https://www.youtube.com/embed/z5wdWnmcaOI?rel=0");
        assert_eq!(item.video_id(), Some("z5wdWnmcaOI"));
        assert_eq!(
            item.preview_url().as_deref(),
            Some("https://img.youtube.com/vi/z5wdWnmcaOI/maxresdefault.jpg")
        );
        assert_eq!(item.external_url(), "https://www.youtube.com/watch?v=z5wdWnmcaOI");
    }

    #[test]
    fn test_vimeo_has_no_preview() {
        let item = MediaItem::classify("https://player.vimeo.com/video/123456");
        assert_eq!(item.video_id(), Some("123456"));
        assert_eq!(item.preview_url(), None);
        assert_eq!(item.external_url(), "https://player.vimeo.com/video/123456");
    }

    #[test]
    fn test_media_list_puts_video_first_and_dedupes() {
        let p = project(
            Some("https://www.youtube.com/embed/abcdefgh"),
            &["a.jpg", "b.jpg", "a.jpg", "https://www.youtube.com/embed/abcdefgh"],
        );
        let list = media_list(&p);
        assert_eq!(list.len(), 3);
        assert!(list[0].is_embedded_video());
        assert_eq!(list[1].url(), "a.jpg");
        assert_eq!(list[2].url(), "b.jpg");
    }

    #[test]
    fn test_image_subset() {
        let p = project(None, &["a.jpg", "b.mp4", "c.png"]);
        let list = media_list(&p);
        let images = image_subset(&list);
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(MediaItem::is_image));
    }
}
