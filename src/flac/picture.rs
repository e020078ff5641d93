// PICTURE block for FLAC
//
// All integers in this block are big-endian.

use std::io::{Cursor, Read};

use crate::model::AlbumArt;

/// Picture type written for embedded artwork ("Cover (front)")
pub const FRONT_COVER: u32 = 3;
/// Colour depth we declare for every embedded picture
pub const DEFAULT_DEPTH: u32 = 24;
/// MIME type used when the art arrives without one
pub const FALLBACK_MIME: &str = "image/jpeg";

const PICTURE_TYPE_NAMES: [&str; 21] = [
    "Other",
    "File Icon",
    "Other File Icon",
    "Cover (front)",
    "Cover (back)",
    "Leaflet page",
    "Media",
    "Lead artist",
    "Artist",
    "Conductor",
    "Band",
    "Composer",
    "Lyricist",
    "Recording Location",
    "During recording",
    "During performance",
    "Video screen capture",
    "Bright coloured fish",
    "Illustration",
    "Band logo",
    "Publisher logo",
];

/// Human-readable name of a picture type code
pub fn picture_type_name(picture_type: u32) -> &'static str {
    PICTURE_TYPE_NAMES
        .get(picture_type as usize)
        .copied()
        .unwrap_or("Other")
}

/// Build a front-cover picture block body.
///
/// `description` is normally the album title; absent means empty. Missing
/// dimensions are written as 0.
pub fn build_picture_block(art: &AlbumArt, description: Option<&str>) -> Vec<u8> {
    let mime = if art.mime_type.is_empty() {
        FALLBACK_MIME
    } else {
        art.mime_type.as_str()
    };
    let description = description.unwrap_or("");

    let mut body = Vec::with_capacity(32 + mime.len() + description.len() + art.bytes.len());

    body.extend_from_slice(&FRONT_COVER.to_be_bytes());

    body.extend_from_slice(&(mime.len() as u32).to_be_bytes());
    body.extend_from_slice(mime.as_bytes());

    body.extend_from_slice(&(description.len() as u32).to_be_bytes());
    body.extend_from_slice(description.as_bytes());

    body.extend_from_slice(&art.width.unwrap_or(0).to_be_bytes());
    body.extend_from_slice(&art.height.unwrap_or(0).to_be_bytes());
    body.extend_from_slice(&DEFAULT_DEPTH.to_be_bytes());
    // Not a palette image
    body.extend_from_slice(&0u32.to_be_bytes());

    body.extend_from_slice(&(art.bytes.len() as u32).to_be_bytes());
    body.extend_from_slice(&art.bytes);

    body
}

/// Decoded PICTURE block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlacPicture {
    pub picture_type: u32,
    pub mime_type: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub colors: u32,
    pub data: Vec<u8>,
}

impl FlacPicture {
    /// Decode a picture block body
    pub fn read(body: &[u8]) -> std::io::Result<Self> {
        let mut cursor = Cursor::new(body);

        let picture_type = read_be_u32(&mut cursor)?;
        let mime_length = read_be_u32(&mut cursor)? as usize;
        let mime_type = String::from_utf8_lossy(&read_bytes(&mut cursor, mime_length)?).into_owned();
        let desc_length = read_be_u32(&mut cursor)? as usize;
        let description =
            String::from_utf8_lossy(&read_bytes(&mut cursor, desc_length)?).into_owned();
        let width = read_be_u32(&mut cursor)?;
        let height = read_be_u32(&mut cursor)?;
        let depth = read_be_u32(&mut cursor)?;
        let colors = read_be_u32(&mut cursor)?;
        let data_length = read_be_u32(&mut cursor)? as usize;
        let data = read_bytes(&mut cursor, data_length)?;

        Ok(FlacPicture {
            picture_type,
            mime_type,
            description,
            width,
            height,
            depth,
            colors,
            data,
        })
    }

    pub fn type_name(&self) -> &'static str {
        picture_type_name(self.picture_type)
    }
}

fn read_be_u32(reader: &mut Cursor<&[u8]>) -> std::io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_be_bytes(buffer))
}

fn read_bytes(reader: &mut Cursor<&[u8]>, len: usize) -> std::io::Result<Vec<u8>> {
    let remaining = reader.get_ref().len() as u64 - reader.position();
    if len as u64 > remaining {
        return Err(std::io::ErrorKind::UnexpectedEof.into());
    }
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}
