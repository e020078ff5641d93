// Read back the metadata chain of a FLAC buffer

use serde::Serialize;

use super::metadata::{BlockChain, FlacMetadataBlockType};
use super::picture::FlacPicture;
use super::vorbis::VorbisComment;
use crate::error::EmbedError;

/// One block in the chain, as found.
#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub offset: usize,
    pub block_type: u8,
    pub name: &'static str,
    pub is_last: bool,
    pub length: u32,
}

/// Picture block without its image data
#[derive(Debug, Clone, Serialize)]
pub struct PictureSummary {
    pub picture_type: &'static str,
    pub mime_type: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub data_length: usize,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl From<FlacPicture> for PictureSummary {
    fn from(picture: FlacPicture) -> Self {
        PictureSummary {
            picture_type: picture.type_name(),
            data_length: picture.data.len(),
            mime_type: picture.mime_type,
            description: picture.description,
            width: picture.width,
            height: picture.height,
            depth: picture.depth,
            data: picture.data,
        }
    }
}

/// Everything we can say about a FLAC buffer's metadata
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlacReport {
    pub blocks: Vec<BlockSummary>,
    pub vendor: Option<String>,
    pub comments: Vec<(String, String)>,
    pub pictures: Vec<PictureSummary>,
    /// Offset of the first audio frame byte
    pub audio_offset: usize,
    pub audio_length: usize,
}

impl FlacReport {
    /// First comment value for `field`
    pub fn comment(&self, field: &str) -> Option<&str> {
        self.comments
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v.as_str())
    }

    /// Number of blocks flagged as last
    pub fn last_flags(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_last).count()
    }
}

/// Walk the chain of `source` and decode comment and picture blocks.
///
/// Comment or picture bodies that fail to decode are listed in `blocks` but
/// otherwise skipped.
pub fn inspect(source: &[u8]) -> Result<FlacReport, EmbedError> {
    let mut chain = BlockChain::new(source)?;
    let mut report = FlacReport::default();

    for block in chain.by_ref() {
        let block = block?;
        report.blocks.push(BlockSummary {
            offset: block.offset,
            block_type: block.header.block_type.to_byte(),
            name: block.header.block_type.name(),
            is_last: block.header.is_last,
            length: block.header.length,
        });

        match block.header.block_type {
            FlacMetadataBlockType::VorbisComment => {
                if let Ok(comment) = VorbisComment::read(block.body()) {
                    report.vendor = Some(comment.vendor_string);
                    report.comments.extend(comment.comments);
                }
            }
            FlacMetadataBlockType::Picture => {
                if let Ok(picture) = FlacPicture::read(block.body()) {
                    report.pictures.push(picture.into());
                }
            }
            _ => {}
        }
    }

    report.audio_offset = chain.offset();
    report.audio_length = source.len() - report.audio_offset;
    Ok(report)
}
