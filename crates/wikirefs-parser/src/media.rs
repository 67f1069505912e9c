//! Media type detection for embeds

use std::path::Path;

const AUDIO_EXTENSIONS: &[&str] = &["3gp", "flac", "m4a", "mp3", "oga", "ogg", "opus", "wav"];

const IMAGE_EXTENSIONS: &[&str] = &[
    "apng", "avif", "bmp", "gif", "ico", "jpeg", "jpg", "png", "svg", "tif", "tiff", "webp",
];

const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mov", "mp4", "ogv", "webm"];

/// Category of an embeddable media file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Image,
    Video,
}

/// A media target with its lowercase extension (no leading dot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTarget {
    pub kind: MediaKind,
    pub extension: String,
}

impl MediaTarget {
    /// Classify `target` by extension; `None` means a document embed
    pub fn detect(target: &str) -> Option<Self> {
        let extension = Path::new(target.trim())
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        let kind = if AUDIO_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Audio
        } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Video
        } else {
            return None;
        };

        Some(Self { kind, extension })
    }
}
