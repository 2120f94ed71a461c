//! Spectrum-baking core for the game's audio visualizer.
//!
//! Converts a music track into a time-ordered sequence of quantized
//! frequency-magnitude frames: decode → downmix → overlapping frames →
//! FFT magnitudes → per-frame peak normalization + quantization →
//! JSON or MessagePack output. Runs once per track at asset-build time.

pub mod audio;
pub mod dsp;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod types;

pub use error::Error;
pub use pipeline::{analyze_samples, convert_track, TrackReport};
pub use profile::{AnalysisProfile, HopFraction, OutputEncoding, TransformKind};
pub use types::DecodedAudio;
