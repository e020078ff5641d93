// Metadata field mapping between the track record and the two tag formats
//
// The same three text fields end up in different places depending on the
// container:
// - ID3v2: frame IDs (TIT2, TPE1, TALB) plus an APIC picture frame
// - FLAC: Vorbis Comment keys (TITLE, ARTIST, ALBUM) plus a PICTURE block

use crate::model::TrackMetadata;

/// Separator used when several artists share one Vorbis `ARTIST` entry.
pub const ARTIST_SEPARATOR: &str = " / ";

/// Fields the embedder writes, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Artist,
    Album,
}

impl StandardField {
    /// Every text field, in the order tags are emitted.
    pub const ALL: [StandardField; 3] = [
        StandardField::Title,
        StandardField::Artist,
        StandardField::Album,
    ];

    /// Values for this field taken from `meta`, or `None` if absent.
    ///
    /// Empty strings and empty artist lists count as absent. Empty names
    /// inside an artist list are dropped before joining.
    pub fn values(&self, meta: &TrackMetadata) -> Option<Vec<String>> {
        let values: Vec<String> = match self {
            StandardField::Title => meta.music_name.iter().cloned().collect(),
            StandardField::Artist => meta.artist_names().map(str::to_owned).collect(),
            StandardField::Album => meta.album.iter().cloned().collect(),
        };
        let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }
}

/// Format-specific field names
pub struct FieldMappings;

impl FieldMappings {
    pub const ID3V2_TITLE: &str = "TIT2";
    pub const ID3V2_ARTIST: &str = "TPE1";
    pub const ID3V2_ALBUM: &str = "TALB";
    pub const ID3V2_COVER: &str = "APIC";

    pub const VORBIS_TITLE: &str = "TITLE";
    pub const VORBIS_ARTIST: &str = "ARTIST";
    pub const VORBIS_ALBUM: &str = "ALBUM";

    /// ID3v2 frame ID for a standard field
    pub fn to_id3v2(field: StandardField) -> &'static str {
        match field {
            StandardField::Title => Self::ID3V2_TITLE,
            StandardField::Artist => Self::ID3V2_ARTIST,
            StandardField::Album => Self::ID3V2_ALBUM,
        }
    }

    /// Vorbis Comment key for a standard field
    pub fn to_vorbis(field: StandardField) -> &'static str {
        match field {
            StandardField::Title => Self::VORBIS_TITLE,
            StandardField::Artist => Self::VORBIS_ARTIST,
            StandardField::Album => Self::VORBIS_ALBUM,
        }
    }
}
