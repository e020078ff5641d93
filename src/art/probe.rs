// Image type and dimension sniffing for album art

/// PNG magic bytes
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: [u8; 2] = [0xFF, 0xD8];

/// MIME type used when the bytes match nothing we recognise
pub const DEFAULT_MIME: &str = "image/jpeg";

/// Guess a MIME type from the leading bytes of an image.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&PNG_MAGIC) {
        return Some("image/png");
    }
    if bytes.starts_with(&JPEG_MAGIC) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP".as_slice()) {
        return Some("image/webp");
    }
    if bytes.starts_with(b"BM") && bytes.len() > 26 {
        return Some("image/bmp");
    }

    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start();
    if text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg")) {
        return Some("image/svg+xml");
    }
    None
}

/// Pixel dimensions for PNG, GIF and JPEG data, `None` for anything else.
pub fn dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.starts_with(&PNG_MAGIC) {
        // IHDR is always the first chunk
        if bytes.get(12..16) != Some(b"IHDR".as_slice()) {
            return None;
        }
        return Some((be_u32(bytes, 16)?, be_u32(bytes, 20)?));
    }
    if bytes.starts_with(b"GIF8") {
        let width = u16::from_le_bytes([*bytes.get(6)?, *bytes.get(7)?]);
        let height = u16::from_le_bytes([*bytes.get(8)?, *bytes.get(9)?]);
        return Some((width as u32, height as u32));
    }
    if bytes.starts_with(&JPEG_MAGIC) {
        return jpeg_dimensions(bytes);
    }
    None
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

/// Walk JPEG segments until a start-of-frame marker.
fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut pos = JPEG_MAGIC.len();
    loop {
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        // Skip fill bytes
        while *bytes.get(pos)? == 0xFF {
            pos += 1;
        }
        let marker = *bytes.get(pos)?;
        pos += 1;

        match marker {
            // Standalone markers carry no length
            0x01 | 0xD0..=0xD7 => continue,
            // End of image or start of scan before any frame header
            0xD9 | 0xDA => return None,
            // SOF0..SOF15 minus DHT, JPG and DAC
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                let height = be_u16(bytes, pos + 3)?;
                let width = be_u16(bytes, pos + 5)?;
                return Some((width as u32, height as u32));
            }
            _ => {
                let len = be_u16(bytes, pos)? as usize;
                if len < 2 {
                    return None;
                }
                pos += len;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut png = PNG_MAGIC.to_vec();
        png.extend_from_slice(&13u32.to_be_bytes());
        png.extend_from_slice(b"IHDR");
        png.extend_from_slice(&width.to_be_bytes());
        png.extend_from_slice(&height.to_be_bytes());
        png.extend_from_slice(&[8, 6, 0, 0, 0]);
        png
    }

    #[test]
    fn png() {
        let png = png_header(10, 10);
        assert_eq!(sniff_mime(&png), Some("image/png"));
        assert_eq!(dimensions(&png), Some((10, 10)));
    }

    #[test]
    fn gif() {
        let gif = b"GIF89a\x40\x01\xF0\x00\x00\x00";
        assert_eq!(sniff_mime(gif), Some("image/gif"));
        assert_eq!(dimensions(gif), Some((320, 240)));
    }

    #[test]
    fn jpeg_skips_app_segments() {
        let mut jpeg = vec![0xFF, 0xD8];
        // APP0 with a 16-byte segment
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        jpeg.extend_from_slice(&[0u8; 14]);
        // SOF0: length, precision, height 480, width 640
        jpeg.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x01, 0xE0, 0x02, 0x80]);
        assert_eq!(sniff_mime(&jpeg), Some("image/jpeg"));
        assert_eq!(dimensions(&jpeg), Some((640, 480)));
    }

    #[test]
    fn jpeg_without_frame_header() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
        assert_eq!(dimensions(&jpeg), None);
        assert_eq!(dimensions(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), None);
    }

    #[test]
    fn svg_and_unknown() {
        assert_eq!(sniff_mime(b"  <svg width=\"1\"/>"), Some("image/svg+xml"));
        assert_eq!(
            sniff_mime(b"<?xml version=\"1.0\"?><svg/>"),
            Some("image/svg+xml")
        );
        assert_eq!(sniff_mime(b"hello"), None);
        assert_eq!(dimensions(b"<svg/>"), None);
    }
}
