//! Per-frame normalization and quantization.
//!
//! The visualizer only cares about the shape of each frame's spectrum, not
//! absolute loudness, so normalization is per frame: divide by the frame's
//! peak magnitude. The result is downsampled (every second bin kept) and
//! rounded to 2 decimal places to shrink the asset.

/// Round to 2 decimal places.
fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Normalize a magnitude spectrum by its peak, keep every second bin, and
/// round to 2 decimals.
///
/// A silent frame (peak of 0) passes through as all zeros rather than
/// dividing by zero. The peak is taken over the full spectrum before
/// downsampling, so a peak on an odd bin still scales its neighbors.
pub fn quantize_spectrum(spectrum: &[f32]) -> Vec<f32> {
    let peak = spectrum.iter().copied().fold(0.0f32, f32::max);

    spectrum
        .iter()
        .step_by(2)
        .map(|&m| {
            let normalized = if peak > 0.0 { m / peak } else { m };
            round2(normalized)
        })
        .collect()
}
