// Album art sources

pub mod cache;
pub mod probe;

pub use cache::ArtCache;

use std::path::Path;

use tracing::debug;

use crate::error::ArtError;
use crate::model::AlbumArt;

/// Cache key of the built-in placeholder
pub const PLACEHOLDER_KEY: &str = "placeholder:no-cover";

const PLACEHOLDER_SIZE: u32 = 200;
const PLACEHOLDER_SVG: &str = r##"<svg width="200" height="200" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#e5e7eb;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#d1d5db;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="200" height="200" fill="url(#grad)" stroke="#9ca3af" stroke-width="2"/>
  <text x="50%" y="45%" font-size="16" text-anchor="middle" fill="#6b7280" font-family="Arial, sans-serif">No Cover</text>
  <text x="50%" y="65%" font-size="12" text-anchor="middle" fill="#9ca3af" font-family="Arial, sans-serif">Available</text>
</svg>
"##;

/// The "No Cover" image every track gets when its own art is unavailable.
pub fn placeholder() -> AlbumArt {
    AlbumArt::new(PLACEHOLDER_SVG.as_bytes().to_vec(), "image/svg+xml")
        .with_dimensions(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE)
}

/// Build an [`AlbumArt`] from raw image bytes, sniffing type and size.
///
/// `declared_mime` wins over sniffing when given (parameters after `;` are
/// dropped).
pub fn from_bytes(bytes: Vec<u8>, declared_mime: Option<&str>) -> AlbumArt {
    let mime = declared_mime
        .map(|m| m.split(';').next().unwrap_or(m).trim())
        .filter(|m| !m.is_empty())
        .or_else(|| probe::sniff_mime(&bytes))
        .unwrap_or(probe::DEFAULT_MIME)
        .to_string();
    let dims = probe::dimensions(&bytes);

    AlbumArt {
        bytes,
        mime_type: mime,
        width: dims.map(|(w, _)| w),
        height: dims.map(|(_, h)| h),
    }
}

/// Where album art comes from.
pub trait ArtSource {
    /// Load the art identified by `source` (a URL, path, ...).
    fn fetch(&self, source: &str) -> Result<AlbumArt, ArtError>;
}

impl<F> ArtSource for F
where
    F: Fn(&str) -> Result<AlbumArt, ArtError>,
{
    fn fetch(&self, source: &str) -> Result<AlbumArt, ArtError> {
        self(source)
    }
}

/// Loads art from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileArtSource;

impl ArtSource for FileArtSource {
    fn fetch(&self, source: &str) -> Result<AlbumArt, ArtError> {
        let bytes = std::fs::read(Path::new(source))?;
        if bytes.is_empty() {
            return Err(ArtError::Empty(source.to_string()));
        }
        let art = from_bytes(bytes, None);
        debug!(
            source,
            mime = %art.mime_type,
            width = ?art.width,
            height = ?art.height,
            "loaded album art"
        );
        Ok(art)
    }
}
