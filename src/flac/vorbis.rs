// VORBIS_COMMENT block for FLAC
//
// Unlike every other structure in a FLAC stream, the integers in this block
// are little-endian.

use std::io::{Cursor, Read};

use crate::field_mapping::{FieldMappings, StandardField, ARTIST_SEPARATOR};
use crate::model::TrackMetadata;

/// Vendor string written into every comment block we build
pub const VENDOR_STRING: &str = "tagsplice";

/// Build a comment block body from `meta`.
///
/// Returns `None` when there is nothing to write, in which case no comment
/// block should be emitted at all.
pub fn build_comment_block(meta: &TrackMetadata) -> Option<Vec<u8>> {
    let comments: Vec<String> = StandardField::ALL
        .iter()
        .filter_map(|field| {
            let values = field.values(meta)?;
            Some(format!(
                "{}={}",
                FieldMappings::to_vorbis(*field),
                values.join(ARTIST_SEPARATOR)
            ))
        })
        .collect();

    if comments.is_empty() {
        return None;
    }

    let total = 4
        + VENDOR_STRING.len()
        + 4
        + comments.iter().map(|c| 4 + c.len()).sum::<usize>();
    let mut body = Vec::with_capacity(total);

    body.extend_from_slice(&(VENDOR_STRING.len() as u32).to_le_bytes());
    body.extend_from_slice(VENDOR_STRING.as_bytes());
    body.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for comment in &comments {
        body.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        body.extend_from_slice(comment.as_bytes());
    }

    Some(body)
}

/// Decoded Vorbis comment block
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VorbisComment {
    pub vendor_string: String,
    pub comments: Vec<(String, String)>,
}

impl VorbisComment {
    /// Decode a comment block body
    pub fn read(body: &[u8]) -> std::io::Result<Self> {
        let mut reader = Cursor::new(body);

        let vendor_length = read_le_u32(&mut reader)? as usize;
        let vendor_string = read_string(&mut reader, vendor_length)?;

        let comment_count = read_le_u32(&mut reader)? as usize;
        // Never trust the count for preallocation
        let mut comments = Vec::with_capacity(comment_count.min(64));
        for _ in 0..comment_count {
            let comment_length = read_le_u32(&mut reader)? as usize;
            let comment = read_string(&mut reader, comment_length)?;

            // Parse comment (format: FIELD=value)
            if let Some((field, value)) = comment.split_once('=') {
                comments.push((field.to_string(), value.to_string()));
            }
        }

        Ok(VorbisComment {
            vendor_string,
            comments,
        })
    }
}

fn read_le_u32(reader: &mut Cursor<&[u8]>) -> std::io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

fn read_string(reader: &mut Cursor<&[u8]>, len: usize) -> std::io::Result<String> {
    let remaining = reader.get_ref().len() as u64 - reader.position();
    if len as u64 > remaining {
        return Err(std::io::ErrorKind::UnexpectedEof.into());
    }
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
