// Rebuilds the FLAC metadata chain around fresh comment and picture blocks

use tracing::debug;

use super::metadata::{encode_block, BlockChain, FlacMetadataBlockType, FLAC_SIGNATURE};
use super::picture::build_picture_block;
use super::vorbis::build_comment_block;
use crate::error::EmbedError;
use crate::model::{AlbumArt, TrackMetadata};

const LAST_BLOCK_MASK: u8 = 0x7F;

/// Rewrite `source` with a new comment block (when `meta` has anything to
/// say) and a new front-cover picture block.
///
/// Every existing block other than VORBIS_COMMENT and PICTURE is kept in
/// order with its last-block flag cleared. The picture block always goes
/// last and is the only block flagged as such. Audio frames are copied
/// untouched.
pub fn rewrite(
    source: &[u8],
    meta: Option<&TrackMetadata>,
    art: &AlbumArt,
) -> Result<Vec<u8>, EmbedError> {
    let mut chain = BlockChain::new(source)?;
    let mut chunks: Vec<Vec<u8>> = Vec::new();

    for block in chain.by_ref() {
        let block = block?;
        let block_type = block.header.block_type;
        if block_type.is_replaced_on_embed() {
            debug!(
                offset = block.offset,
                block = block_type.name(),
                "dropping stale metadata block"
            );
            continue;
        }

        let mut kept = block.bytes.to_vec();
        kept[0] &= LAST_BLOCK_MASK;
        chunks.push(kept);
    }
    let audio_offset = chain.offset();

    if let Some(body) = meta.and_then(build_comment_block) {
        chunks.push(encode_block(FlacMetadataBlockType::VorbisComment, false, &body)?);
    }

    let description = meta.and_then(|m| m.album.as_deref());
    let picture = build_picture_block(art, description);
    chunks.push(encode_block(FlacMetadataBlockType::Picture, true, &picture)?);

    let audio = &source[audio_offset..];
    let total = FLAC_SIGNATURE.len() + chunks.iter().map(Vec::len).sum::<usize>() + audio.len();

    let mut output = Vec::with_capacity(total);
    output.extend_from_slice(FLAC_SIGNATURE);
    for chunk in &chunks {
        output.extend_from_slice(chunk);
    }
    output.extend_from_slice(audio);

    debug!(
        blocks = chunks.len(),
        audio_offset,
        audio_len = audio.len(),
        "rebuilt flac metadata chain"
    );
    Ok(output)
}
