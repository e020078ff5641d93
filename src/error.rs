// Error types for the embedding pipeline

use thiserror::Error;

/// Why an embedding attempt could not produce a tagged buffer.
///
/// None of these ever escape [`crate::Embedder::embed`]; they surface only
/// through [`crate::Embedder::try_embed`] and the logs.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Buffer does not start with `fLaC`
    #[error("flac signature is missing or malformed")]
    BadMagic,

    /// A block header claims a body that runs past the end of the buffer
    #[error("metadata block at offset {offset} ends at {end}, past buffer length {len}")]
    BlockOverrun { offset: usize, end: usize, len: usize },

    /// The buffer ended before any block was flagged as last
    #[error("metadata chain is not terminated (stopped at offset {offset})")]
    UnterminatedChain { offset: usize },

    /// A block body does not fit in the 24-bit length field
    #[error("block type {block_type} body of {len} bytes exceeds the 24-bit length field")]
    BlockTooLarge { block_type: u8, len: usize },

    /// The ID3 backend failed to write the tag
    #[error("id3 backend failed: {0}")]
    Id3(String),
}

impl From<::id3::Error> for EmbedError {
    fn from(e: ::id3::Error) -> Self {
        EmbedError::Id3(e.to_string())
    }
}

/// Failure to load album art from a source.
#[derive(Debug, Error)]
pub enum ArtError {
    #[error("io error while loading album art")]
    Io(#[from] std::io::Error),

    #[error("album art source `{0}` is empty")]
    Empty(String),
}
