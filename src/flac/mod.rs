// FLAC metadata handling module

pub mod inspect;
pub mod metadata;
pub mod picture;
pub mod rewrite;
pub mod vorbis;

pub use inspect::{inspect, FlacReport};
pub use metadata::{
    encode_block, BlockChain, FlacMetadataBlockHeader, FlacMetadataBlockType, RawBlock,
    FLAC_SIGNATURE,
};
pub use picture::{build_picture_block, FlacPicture};
pub use rewrite::rewrite;
pub use vorbis::{build_comment_block, VorbisComment};
