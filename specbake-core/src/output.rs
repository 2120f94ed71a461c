//! Serialization of baked frame sequences.
//!
//! Two interchangeable containers: a UTF-8 JSON array of arrays, and a
//! MessagePack document with the same logical structure (plain numeric
//! arrays only, so any MessagePack reader on the game side can consume
//! it). Writes are atomic: the document goes to a uniquely named temp file
//! in the destination directory and is renamed over the final path on
//! success, so a failed bake never leaves a partial asset.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::Error;
use crate::profile::OutputEncoding;

/// Encode a frame sequence into the chosen container. `pretty` only
/// affects the JSON encoding.
pub fn encode_frames<T>(frames: &T, encoding: OutputEncoding, pretty: bool) -> Result<Vec<u8>, Error>
where
    T: Serialize + ?Sized,
{
    let bytes = match encoding {
        OutputEncoding::Json if pretty => serde_json::to_vec_pretty(frames)?,
        OutputEncoding::Json => serde_json::to_vec(frames)?,
        OutputEncoding::MessagePack => rmp_serde::to_vec(frames)?,
    };
    Ok(bytes)
}

/// Serialize `frames` to `path` atomically.
pub fn write_frames(
    path: &Path,
    frames: &[Vec<f32>],
    encoding: OutputEncoding,
    pretty: bool,
) -> Result<(), Error> {
    let bytes = encode_frames(frames, encoding, pretty)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a frame sequence back from `path`.
pub fn read_frames(path: &Path, encoding: OutputEncoding) -> Result<Vec<Vec<f32>>, Error> {
    let bytes = fs::read(path)?;
    let frames = match encoding {
        OutputEncoding::Json => serde_json::from_slice(&bytes)?,
        OutputEncoding::MessagePack => rmp_serde::from_slice(&bytes)?,
    };
    Ok(frames)
}
