// Container format detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::flac::FLAC_SIGNATURE;

/// The two container formats the embedder knows how to tag.
///
/// Anything that is not FLAC is treated as MP3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Flac,
}

impl AudioFormat {
    /// Classify a buffer by its first four bytes.
    pub fn sniff(buffer: &[u8]) -> Self {
        match buffer.get(..FLAC_SIGNATURE.len()) {
            Some(magic) if magic == FLAC_SIGNATURE => AudioFormat::Flac,
            _ => AudioFormat::Mp3,
        }
    }

    /// Use `hint` when present, otherwise sniff.
    pub fn resolve(buffer: &[u8], hint: Option<AudioFormat>) -> Self {
        hint.unwrap_or_else(|| Self::sniff(buffer))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "flac" => Ok(AudioFormat::Flac),
            other => Err(format!("unsupported format `{}` (expected mp3 or flac)", other)),
        }
    }
}
