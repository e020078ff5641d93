// FLAC metadata block framing

use crate::error::EmbedError;

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

/// Largest body a 24-bit length field can describe
pub const MAX_BLOCK_LENGTH: usize = 0x00FF_FFFF;

const LAST_BLOCK_FLAG: u8 = 0x80;
const BLOCK_TYPE_MASK: u8 = 0x7F;

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlacMetadataBlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    /// Reserved or invalid type, kept verbatim
    Other(u8),
}

impl FlacMetadataBlockType {
    pub fn from_byte(byte: u8) -> Self {
        match byte & BLOCK_TYPE_MASK {
            0 => FlacMetadataBlockType::StreamInfo,
            1 => FlacMetadataBlockType::Padding,
            2 => FlacMetadataBlockType::Application,
            3 => FlacMetadataBlockType::SeekTable,
            4 => FlacMetadataBlockType::VorbisComment,
            5 => FlacMetadataBlockType::CueSheet,
            6 => FlacMetadataBlockType::Picture,
            other => FlacMetadataBlockType::Other(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            FlacMetadataBlockType::StreamInfo => 0,
            FlacMetadataBlockType::Padding => 1,
            FlacMetadataBlockType::Application => 2,
            FlacMetadataBlockType::SeekTable => 3,
            FlacMetadataBlockType::VorbisComment => 4,
            FlacMetadataBlockType::CueSheet => 5,
            FlacMetadataBlockType::Picture => 6,
            FlacMetadataBlockType::Other(b) => b & BLOCK_TYPE_MASK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FlacMetadataBlockType::StreamInfo => "STREAMINFO",
            FlacMetadataBlockType::Padding => "PADDING",
            FlacMetadataBlockType::Application => "APPLICATION",
            FlacMetadataBlockType::SeekTable => "SEEKTABLE",
            FlacMetadataBlockType::VorbisComment => "VORBIS_COMMENT",
            FlacMetadataBlockType::CueSheet => "CUESHEET",
            FlacMetadataBlockType::Picture => "PICTURE",
            FlacMetadataBlockType::Other(_) => "UNKNOWN",
        }
    }

    /// Blocks the rewriter throws away and rebuilds
    pub fn is_replaced_on_embed(self) -> bool {
        matches!(
            self,
            FlacMetadataBlockType::VorbisComment | FlacMetadataBlockType::Picture
        )
    }
}

/// FLAC metadata block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacMetadataBlockHeader {
    pub is_last: bool,
    pub block_type: FlacMetadataBlockType,
    pub length: u32,
}

impl FlacMetadataBlockHeader {
    pub const HEADER_SIZE: usize = 4;

    /// Parse a header from exactly four bytes
    pub fn parse(bytes: [u8; Self::HEADER_SIZE]) -> Self {
        let is_last = (bytes[0] & LAST_BLOCK_FLAG) != 0;
        let block_type = FlacMetadataBlockType::from_byte(bytes[0]);

        // Length is big-endian 24-bit
        let length = u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]);

        FlacMetadataBlockHeader {
            is_last,
            block_type,
            length,
        }
    }

    /// Header for a body of `len` bytes, refusing lengths that overflow 24 bits.
    pub fn for_body(
        block_type: FlacMetadataBlockType,
        is_last: bool,
        len: usize,
    ) -> Result<Self, EmbedError> {
        if len > MAX_BLOCK_LENGTH {
            return Err(EmbedError::BlockTooLarge {
                block_type: block_type.to_byte(),
                len,
            });
        }
        Ok(FlacMetadataBlockHeader {
            is_last,
            block_type,
            length: len as u32,
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::HEADER_SIZE] {
        let [_, l0, l1, l2] = self.length.to_be_bytes();
        let flag = if self.is_last { LAST_BLOCK_FLAG } else { 0 };
        [flag | self.block_type.to_byte(), l0, l1, l2]
    }
}

/// A metadata block borrowed from a source buffer.
#[derive(Debug, Clone, Copy)]
pub struct RawBlock<'a> {
    pub header: FlacMetadataBlockHeader,
    /// Offset of the header within the source buffer
    pub offset: usize,
    /// Header and body exactly as they appear in the source
    pub bytes: &'a [u8],
}

impl<'a> RawBlock<'a> {
    pub fn body(&self) -> &'a [u8] {
        &self.bytes[FlacMetadataBlockHeader::HEADER_SIZE..]
    }

    /// Offset of the first byte after this block
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }
}

/// Walks the metadata block chain that follows the signature.
///
/// Yields every block up to and including the one flagged as last, then
/// stops. A block that would read past the buffer, or a buffer that ends
/// before the last-block flag, yields an error and ends iteration.
pub struct BlockChain<'a> {
    source: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> BlockChain<'a> {
    pub fn new(source: &'a [u8]) -> Result<Self, EmbedError> {
        if source.get(..FLAC_SIGNATURE.len()) != Some(FLAC_SIGNATURE.as_slice()) {
            return Err(EmbedError::BadMagic);
        }
        Ok(BlockChain {
            source,
            offset: FLAC_SIGNATURE.len(),
            done: false,
        })
    }

    /// Offset just past the last block read so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn read_block(&mut self) -> Result<RawBlock<'a>, EmbedError> {
        let len = self.source.len();
        let header_end = self.offset + FlacMetadataBlockHeader::HEADER_SIZE;
        let header_bytes: [u8; FlacMetadataBlockHeader::HEADER_SIZE] = self
            .source
            .get(self.offset..header_end)
            .and_then(|b| b.try_into().ok())
            .ok_or(EmbedError::UnterminatedChain {
                offset: self.offset,
            })?;

        let header = FlacMetadataBlockHeader::parse(header_bytes);
        let end = header_end + header.length as usize;
        if end > len {
            return Err(EmbedError::BlockOverrun {
                offset: self.offset,
                end,
                len,
            });
        }

        let block = RawBlock {
            header,
            offset: self.offset,
            bytes: &self.source[self.offset..end],
        };
        self.offset = end;
        Ok(block)
    }
}

impl<'a> Iterator for BlockChain<'a> {
    type Item = Result<RawBlock<'a>, EmbedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let block = self.read_block();
        match &block {
            Ok(b) if !b.header.is_last => {}
            _ => self.done = true,
        }
        Some(block)
    }
}

/// Frame a block body with its header.
pub fn encode_block(
    block_type: FlacMetadataBlockType,
    is_last: bool,
    body: &[u8],
) -> Result<Vec<u8>, EmbedError> {
    let header = FlacMetadataBlockHeader::for_body(block_type, is_last, body.len())?;
    let mut block = Vec::with_capacity(FlacMetadataBlockHeader::HEADER_SIZE + body.len());
    block.extend_from_slice(&header.to_bytes());
    block.extend_from_slice(body);
    Ok(block)
}
