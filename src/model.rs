// Track metadata and album art records

use serde::{Deserialize, Serialize};

use crate::format::AudioFormat;

/// Metadata handed over by the extraction step.
///
/// Every field is optional. Keys follow the extractor's JSON layout, so an
/// artist list arrives as `[["Name", 123], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_name: Option<String>,
    /// `(name, id)` pairs in credit order
    #[serde(default, rename = "artist", skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<(String, u64)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    /// Where the cover art lives (URL or path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_pic: Option<String>,
}

impl TrackMetadata {
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists
            .iter()
            .flatten()
            .map(|(name, _)| name.as_str())
    }
}

/// Decoded audio as handed over by the extraction step.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTrack {
    pub buffer: Vec<u8>,
    pub format: Option<AudioFormat>,
    pub metadata: Option<TrackMetadata>,
}

impl ExtractedTrack {
    /// Explicit format, else the one recorded in the metadata
    pub fn format_hint(&self) -> Option<AudioFormat> {
        self.format
            .or_else(|| self.metadata.as_ref().and_then(|m| m.format))
    }

    pub fn album_pic(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.album_pic.as_deref())
    }
}

/// Cover image bytes plus what is known about them.
///
/// Width and height are advisory; `None` is written as 0 ("unknown").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumArt {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl AlbumArt {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        AlbumArt {
            bytes,
            mime_type: mime_type.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_extractor_json() {
        let json = r#"{
            "musicId": 42,
            "musicName": "Song",
            "artist": [["A", 1], ["B", 2]],
            "album": "Alb",
            "format": "flac",
            "albumPic": "https://example.com/cover.jpg"
        }"#;
        let meta: TrackMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.music_id, Some(42));
        assert_eq!(meta.music_name.as_deref(), Some("Song"));
        assert_eq!(meta.artist_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(meta.format, Some(AudioFormat::Flac));
        assert_eq!(meta.album_pic.as_deref(), Some("https://example.com/cover.jpg"));
    }

    #[test]
    fn missing_keys_are_none() {
        let meta: TrackMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta, TrackMetadata::default());
        assert_eq!(meta.artist_names().count(), 0);
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let meta = TrackMetadata {
            album: Some("Alb".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"album":"Alb"}"#);
    }
}
