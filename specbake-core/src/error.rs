use std::fmt;
use std::path::{Path, PathBuf};

/// Errors produced while baking a track.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file is missing, unreadable, or not valid audio.
    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MessagePack encoding failed: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decoding failed: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
}

impl Error {
    pub(crate) fn decode(path: &Path, reason: impl fmt::Display) -> Self {
        Error::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
