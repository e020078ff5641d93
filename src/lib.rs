//! tagsplice - embed track metadata and cover art into FLAC and MP3 buffers
//!
//! FLAC metadata chains are rebuilt in-crate: stale VORBIS_COMMENT and
//! PICTURE blocks are dropped, every other block is kept, and a fresh comment
//! block plus a front-cover picture block are appended. MP3 buffers get a new
//! ID3v2 tag through an [`Id3Backend`]. Audio frames are never touched, and
//! any failure hands back the original buffer.
//!
//! ```no_run
//! use tagsplice::{embed_album_art, AlbumArt, TrackMetadata};
//!
//! let audio = std::fs::read("track.flac").unwrap();
//! let meta = TrackMetadata {
//!     music_name: Some("Song".into()),
//!     ..Default::default()
//! };
//! let art = AlbumArt::new(std::fs::read("cover.png").unwrap(), "image/png");
//! let tagged = embed_album_art(&audio, None, Some(&meta), Some(&art));
//! ```

pub mod art;
pub mod embed;
pub mod error;
pub mod field_mapping;
pub mod flac;
pub mod format;
pub mod id3;
pub mod model;

pub use crate::art::{ArtCache, ArtSource, FileArtSource};
pub use crate::embed::{Embedder, Outcome};
pub use crate::error::{ArtError, EmbedError};
pub use crate::format::AudioFormat;
pub use crate::id3::{Id3Backend, Id3CrateBackend, Id3Op, Id3Plan};
pub use crate::model::{AlbumArt, ExtractedTrack, TrackMetadata};

/// Embed with the default ID3 backend. See [`Embedder::embed`].
pub fn embed_album_art(
    buffer: &[u8],
    format: Option<AudioFormat>,
    meta: Option<&TrackMetadata>,
    art: Option<&AlbumArt>,
) -> Vec<u8> {
    Embedder::new().embed(buffer, format, meta, art)
}
