//! Overlapping frame extraction from a mono signal.

/// Iterate over analysis frames: frame `i` starts at `i * hop` and spans
/// `window_size` samples. The tail partial frame is dropped, never padded;
/// a signal shorter than one window yields no frames.
///
/// The iterator is lazy and cloneable, so a pass can be restarted cheaply.
///
/// Panics if `window_size` or `hop` is zero.
pub fn frames(
    samples: &[f32],
    window_size: usize,
    hop: usize,
) -> impl Iterator<Item = &[f32]> + Clone {
    assert!(hop > 0, "hop must be nonzero");
    samples.windows(window_size).step_by(hop)
}

/// Number of frames `frames` yields for a signal of `len` samples.
pub fn frame_count(len: usize, window_size: usize, hop: usize) -> usize {
    if len < window_size {
        0
    } else {
        (len - window_size) / hop + 1
    }
}
