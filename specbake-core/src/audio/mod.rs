pub mod decoder;

use crate::types::DecodedAudio;

/// Collapse interleaved multi-channel audio to mono by averaging channels.
///
/// Mono input passes through unchanged. A trailing short frame (malformed
/// interleaving) is averaged over the samples actually present.
pub fn downmix_to_mono(audio: &DecodedAudio) -> Vec<f32> {
    if audio.channels <= 1 {
        return audio.samples.clone();
    }

    audio
        .samples
        .chunks(audio.channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
