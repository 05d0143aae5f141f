use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" | "tiff" | "tif" | "svg" | "avif" => {
                Some(Self::Image)
            }
            "webm" | "mp4" | "mkv" | "avi" | "mov" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// A single entry of the carousel: where to load it from and how to describe it.
///
/// Items have no identity of their own; they are addressed by their position
/// in the snapshot they were loaded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    source: String,
    alt_text: String,
}

impl MediaItem {
    pub fn new(source: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt_text: alt_text.into(),
        }
    }

    /// Build an item for the trigger at `position` (0-based), substituting the
    /// numbered fallback when the trigger carries no description.
    pub fn with_fallback_alt(
        source: impl Into<String>,
        alt_text: Option<&str>,
        position: usize,
    ) -> Self {
        let alt_text = match alt_text.map(str::trim) {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => fallback_alt(position),
        };
        Self::new(source, alt_text)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn media_type(&self) -> Option<MediaType> {
        MediaType::from_path(Path::new(&self.source))
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.alt_text, self.source)
    }
}

fn fallback_alt(position: usize) -> String {
    format!("Zertifikat {}", position + 1)
}
