// ID3 tagging for MP3 buffers
//
// The embedder only decides which frames to write; encoding them is left to
// an `Id3Backend`. The default backend is built on the `id3` crate.

pub mod backend;
pub mod v2;

pub use backend::Id3CrateBackend;

use crate::error::EmbedError;
use crate::field_mapping::{FieldMappings, StandardField};
use crate::model::{AlbumArt, TrackMetadata};

/// Picture type code for the front cover
pub const COVER_FRONT_TYPE: u8 = 0x03;
/// APIC description used when there is no album title
pub const DEFAULT_PICTURE_DESCRIPTION: &str = "Cover";

/// Attached picture frame contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFrame<'a> {
    pub description: String,
    pub mime_type: &'a str,
    pub data: &'a [u8],
    pub picture_type: u8,
    /// Encode the description as Unicode rather than Latin-1
    pub unicode: bool,
}

/// One instruction for an ID3 backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Id3Op<'a> {
    /// Drop every existing frame
    Clear,
    /// Replace a text frame; several values become a multi-value frame
    Text {
        frame_id: &'static str,
        values: Vec<String>,
    },
    /// Attach a picture
    Picture(PictureFrame<'a>),
}

/// Ordered list of frame operations for one buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Id3Plan<'a> {
    ops: Vec<Id3Op<'a>>,
}

impl<'a> Id3Plan<'a> {
    /// Clear, then title, artists, album when present, then the cover.
    pub fn for_track(meta: Option<&TrackMetadata>, art: &'a AlbumArt) -> Self {
        let mut ops = vec![Id3Op::Clear];

        if let Some(meta) = meta {
            for field in StandardField::ALL {
                if let Some(values) = field.values(meta) {
                    ops.push(Id3Op::Text {
                        frame_id: FieldMappings::to_id3v2(field),
                        values,
                    });
                }
            }
        }

        let description = meta
            .and_then(|m| m.album.as_deref())
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_PICTURE_DESCRIPTION);
        ops.push(Id3Op::Picture(PictureFrame {
            description: description.to_string(),
            mime_type: &art.mime_type,
            data: &art.bytes,
            picture_type: COVER_FRONT_TYPE,
            unicode: true,
        }));

        Id3Plan { ops }
    }

    pub fn ops(&self) -> &[Id3Op<'a>] {
        &self.ops
    }

    /// Frame IDs touched by this plan, in order (`APIC` for pictures)
    pub fn frame_ids(&self) -> Vec<&'static str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Id3Op::Clear => None,
                Id3Op::Text { frame_id, .. } => Some(*frame_id),
                Id3Op::Picture(_) => Some(FieldMappings::ID3V2_COVER),
            })
            .collect()
    }
}

/// Something that can write an ID3 tag onto an MP3 buffer.
pub trait Id3Backend {
    /// Apply `plan` to `audio` and return the tagged buffer.
    fn apply(&self, audio: &[u8], plan: &Id3Plan<'_>) -> Result<Vec<u8>, EmbedError>;
}

impl<T: Id3Backend + ?Sized> Id3Backend for &T {
    fn apply(&self, audio: &[u8], plan: &Id3Plan<'_>) -> Result<Vec<u8>, EmbedError> {
        (**self).apply(audio, plan)
    }
}
