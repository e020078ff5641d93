// ID3v2 tag header, just enough to find where an existing tag ends

use crate::error::EmbedError;

/// ID3v2 header structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    /// Tag size excluding header and footer
    pub size: u32,
}

impl Id3v2Header {
    pub const HEADER_SIZE: usize = 10;
    const ID: [u8; 3] = *b"ID3";
    const FOOTER_FLAG: u8 = 0x10;

    /// Parse the header at the start of `buffer`, if there is one
    pub fn parse(buffer: &[u8]) -> Option<Self> {
        let header = buffer.get(..Self::HEADER_SIZE)?;
        if header[0..3] != Self::ID {
            return None;
        }
        // Size bytes are synchsafe: the high bit is never set
        if header[6..10].iter().any(|b| b & 0x80 != 0) {
            return None;
        }

        Some(Id3v2Header {
            version: (header[3], header[4]),
            flags: header[5],
            size: parse_synchsafe([header[6], header[7], header[8], header[9]]),
        })
    }

    /// Bytes the whole tag occupies, header and footer included
    pub fn total_len(&self) -> usize {
        let footer = if self.flags & Self::FOOTER_FLAG != 0 {
            Self::HEADER_SIZE
        } else {
            0
        };
        Self::HEADER_SIZE + self.size as usize + footer
    }
}

/// Parse synchsafe integer (7 bits per byte)
pub fn parse_synchsafe(bytes: [u8; 4]) -> u32 {
    ((bytes[0] as u32) << 21) | ((bytes[1] as u32) << 14) | ((bytes[2] as u32) << 7) | (bytes[3] as u32)
}

/// Everything after any leading ID3v2 tags.
///
/// Parsed by hand rather than with `id3::Tag::skip`, which stops after the
/// first tag and works on readers, not borrowed slices.
pub fn strip_tags(buffer: &[u8]) -> Result<&[u8], EmbedError> {
    let mut rest = buffer;
    while let Some(header) = Id3v2Header::parse(rest) {
        let len = header.total_len();
        rest = rest.get(len..).ok_or_else(|| {
            EmbedError::Id3(format!(
                "existing ID3v2.{} tag claims {} bytes, only {} available",
                header.version.0,
                len,
                rest.len()
            ))
        })?;
    }
    Ok(rest)
}
