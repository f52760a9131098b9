mod media;
mod models;
mod source;

pub use media::{image_subset, media_list, MediaItem};
pub use models::{Contact, NavBucket, Portfolio, Project, Site};
pub use source::{decode_image_bytes, fetch_media, http_client, ImageDiskCache, MediaSource};
