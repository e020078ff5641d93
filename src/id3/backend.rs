// Id3Backend built on the `id3` crate

use ::id3::frame::{Picture, PictureType};
use ::id3::{Tag, TagLike, Version};
use tracing::debug;

use super::v2::strip_tags;
use super::{Id3Backend, Id3Op, Id3Plan, COVER_FRONT_TYPE};
use crate::error::EmbedError;

/// Writes a fresh ID3v2 tag in front of the audio frames.
///
/// Any ID3v2 tag already at the start of the buffer is removed first, so the
/// output never carries two tags. Text is written in whatever encoding the
/// `id3` crate picks for `version`, which is UTF-8 for ID3v2.4.
#[derive(Debug, Clone, Copy)]
pub struct Id3CrateBackend {
    pub version: Version,
}

impl Default for Id3CrateBackend {
    fn default() -> Self {
        Id3CrateBackend {
            version: Version::Id3v24,
        }
    }
}

fn picture_type(code: u8) -> PictureType {
    match code {
        COVER_FRONT_TYPE => PictureType::CoverFront,
        4 => PictureType::CoverBack,
        _ => PictureType::Other,
    }
}

impl Id3Backend for Id3CrateBackend {
    fn apply(&self, audio: &[u8], plan: &Id3Plan<'_>) -> Result<Vec<u8>, EmbedError> {
        let frames = strip_tags(audio)?;
        let mut tag = Tag::new();

        for op in plan.ops() {
            match op {
                Id3Op::Clear => tag = Tag::new(),
                Id3Op::Text { frame_id, values } => {
                    tag.set_text_values(*frame_id, values.iter().cloned());
                }
                Id3Op::Picture(frame) => {
                    let kind = picture_type(frame.picture_type);
                    tag.remove_picture_by_type(kind);
                    tag.add_frame(Picture {
                        mime_type: frame.mime_type.to_string(),
                        picture_type: kind,
                        description: frame.description.clone(),
                        data: frame.data.to_vec(),
                    });
                }
            }
        }

        let mut output = Vec::with_capacity(frames.len() + 1024);
        tag.write_to(&mut output, self.version)?;
        let tag_len = output.len();
        output.extend_from_slice(frames);

        debug!(
            frames = tag.frames().count(),
            tag_len,
            stripped = audio.len() - frames.len(),
            "wrote id3 tag"
        );
        Ok(output)
    }
}
