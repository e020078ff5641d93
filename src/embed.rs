// Tag embedding entry point

use tracing::{debug, warn};

use crate::art::{ArtCache, ArtSource};
use crate::error::EmbedError;
use crate::flac;
use crate::format::AudioFormat;
use crate::id3::{Id3Backend, Id3CrateBackend, Id3Plan};
use crate::model::{AlbumArt, ExtractedTrack, TrackMetadata};

/// What a successful embedding attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Tags were written for the given container
    Tagged { format: AudioFormat, buffer: Vec<u8> },
    /// No art was supplied, so nothing was attempted
    NoArt,
}

/// Embeds metadata and cover art into audio buffers.
///
/// FLAC buffers are rewritten in-crate; everything else is handed to the ID3
/// backend. Holds no per-call state, so one instance can serve any number of
/// threads when the backend allows it.
#[derive(Debug, Clone, Default)]
pub struct Embedder<B = Id3CrateBackend> {
    id3: B,
}

impl Embedder<Id3CrateBackend> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: Id3Backend> Embedder<B> {
    pub fn with_backend(id3: B) -> Self {
        Embedder { id3 }
    }

    /// Best-effort embed: the tagged buffer, or a copy of `buffer` when there
    /// is no art or anything goes wrong.
    pub fn embed(
        &self,
        buffer: &[u8],
        format: Option<AudioFormat>,
        meta: Option<&TrackMetadata>,
        art: Option<&AlbumArt>,
    ) -> Vec<u8> {
        match self.try_embed(buffer, format, meta, art) {
            Ok(Outcome::Tagged { buffer, .. }) => buffer,
            Ok(Outcome::NoArt) => buffer.to_vec(),
            Err(e) => {
                warn!(error = %e, "tag embedding failed, returning original audio");
                buffer.to_vec()
            }
        }
    }

    /// Same as [`Embedder::embed`] but reports what happened.
    pub fn try_embed(
        &self,
        buffer: &[u8],
        format: Option<AudioFormat>,
        meta: Option<&TrackMetadata>,
        art: Option<&AlbumArt>,
    ) -> Result<Outcome, EmbedError> {
        let art = match art {
            Some(art) => art,
            None => return Ok(Outcome::NoArt),
        };

        let format = AudioFormat::resolve(buffer, format);
        debug!(%format, len = buffer.len(), "embedding tags");

        let tagged = match format {
            AudioFormat::Flac => flac::rewrite(buffer, meta, art)?,
            AudioFormat::Mp3 => {
                let plan = Id3Plan::for_track(meta, art);
                self.id3.apply(buffer, &plan)?
            }
        };

        Ok(Outcome::Tagged {
            format,
            buffer: tagged,
        })
    }

    /// Resolve the track's art through `cache` (placeholder when missing or
    /// unavailable) and embed it.
    pub fn embed_track(
        &self,
        track: &ExtractedTrack,
        cache: &ArtCache,
        source: &dyn ArtSource,
    ) -> Vec<u8> {
        let art = cache.resolve(track.album_pic(), source);
        self.embed(
            &track.buffer,
            track.format_hint(),
            track.metadata.as_ref(),
            Some(&art),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flac::FLAC_SIGNATURE;

    struct FailingBackend;

    impl Id3Backend for FailingBackend {
        fn apply(&self, _: &[u8], _: &Id3Plan<'_>) -> Result<Vec<u8>, EmbedError> {
            Err(EmbedError::Id3("writer exploded".into()))
        }
    }

    fn art() -> AlbumArt {
        AlbumArt::new(vec![1, 2, 3], "image/png")
    }

    #[test]
    fn no_art_is_a_no_op() {
        let embedder = Embedder::new();
        let buffer = b"fLaC\x80\x00\x00\x00audio".to_vec();
        assert_eq!(
            embedder.try_embed(&buffer, None, None, None).unwrap(),
            Outcome::NoArt
        );
        assert_eq!(embedder.embed(&buffer, None, None, None), buffer);
    }

    #[test]
    fn backend_failure_returns_original() {
        let embedder = Embedder::with_backend(FailingBackend);
        let buffer = vec![0xFF, 0xFB, 0x90, 0x00];
        assert!(embedder.try_embed(&buffer, None, None, Some(&art())).is_err());
        assert_eq!(embedder.embed(&buffer, None, None, Some(&art())), buffer);
    }

    #[test]
    fn flac_hint_on_mp3_bytes_fails_soft() {
        let embedder = Embedder::with_backend(FailingBackend);
        let buffer = vec![0xFF, 0xFB, 0x90, 0x00];
        assert!(matches!(
            embedder.try_embed(&buffer, Some(AudioFormat::Flac), None, Some(&art())),
            Err(EmbedError::BadMagic)
        ));
        assert_eq!(
            embedder.embed(&buffer, Some(AudioFormat::Flac), None, Some(&art())),
            buffer
        );
    }

    #[test]
    fn flac_goes_through_rewriter() {
        let embedder = Embedder::with_backend(FailingBackend);
        let mut buffer = FLAC_SIGNATURE.to_vec();
        buffer.extend_from_slice(&[0x80, 0, 0, 2, 0xAB, 0xCD, 0xFF, 0xF8]);
        match embedder.try_embed(&buffer, None, None, Some(&art())).unwrap() {
            Outcome::Tagged { format, buffer: out } => {
                assert_eq!(format, AudioFormat::Flac);
                assert!(out.ends_with(&[0xFF, 0xF8]));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
