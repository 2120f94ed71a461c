//! Per-frame spectral transform.
//!
//! Two variants, selected by the analysis profile:
//!
//! - [`TransformKind::Plain`]: full complex FFT, no window function. The
//!   second half of the output mirrors the first for real input, so the
//!   magnitudes are truncated to the first `window_size / 2` bins.
//! - [`TransformKind::Windowed`]: Hann taper then a real-input FFT, which
//!   yields `window_size / 2 + 1` bins; the Nyquist bin is dropped so both
//!   variants produce the same shape.

use std::sync::Arc;

use realfft::{RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::profile::TransformKind;

/// Symmetric raised-cosine (Hann) window.
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos()))
        .collect()
}

enum Transform {
    Plain {
        fft: Arc<dyn Fft<f32>>,
        buf: Vec<Complex<f32>>,
    },
    Windowed {
        fft: Arc<dyn RealToComplex<f32>>,
        window: Vec<f32>,
        input: Vec<f32>,
        output: Vec<Complex<f32>>,
    },
}

/// Computes magnitude spectra frame by frame, reusing the FFT plan and
/// scratch buffers across frames.
pub struct SpectrumAnalyzer {
    window_size: usize,
    transform: Transform,
}

impl SpectrumAnalyzer {
    pub fn new(window_size: usize, kind: TransformKind) -> Self {
        let transform = match kind {
            TransformKind::Plain => {
                let fft = FftPlanner::<f32>::new().plan_fft_forward(window_size);
                let buf = vec![Complex::new(0.0, 0.0); window_size];
                Transform::Plain { fft, buf }
            }
            TransformKind::Windowed => {
                let fft = RealFftPlanner::<f32>::new().plan_fft_forward(window_size);
                let input = fft.make_input_vec();
                let output = fft.make_output_vec();
                Transform::Windowed {
                    fft,
                    window: hann_window(window_size),
                    input,
                    output,
                }
            }
        };
        Self {
            window_size,
            transform,
        }
    }

    /// Magnitude spectrum of one frame: `window_size / 2` non-negative
    /// values, indexed by ascending frequency bin.
    ///
    /// Panics if the frame length does not match the window size.
    pub fn spectrum(&mut self, frame: &[f32]) -> Vec<f32> {
        assert_eq!(frame.len(), self.window_size, "frame length != window size");
        let bins = self.window_size / 2;

        match &mut self.transform {
            Transform::Plain { fft, buf } => {
                for (b, &s) in buf.iter_mut().zip(frame) {
                    *b = Complex::new(s, 0.0);
                }
                fft.process(buf);
                buf[..bins].iter().map(|c| c.norm()).collect()
            }
            Transform::Windowed {
                fft,
                window,
                input,
                output,
            } => {
                for (inp, (&s, &w)) in input.iter_mut().zip(frame.iter().zip(window.iter())) {
                    *inp = s * w;
                }
                fft.process(input, output).expect("FFT failed");
                output[..bins].iter().map(|c| c.norm()).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One frame of a sine with exactly `cycles` periods per window, so its
    /// energy lands on a single bin.
    fn sine_frame(window_size: usize, cycles: usize) -> Vec<f32> {
        (0..window_size)
            .map(|i| {
                (2.0 * std::f64::consts::PI * cycles as f64 * i as f64 / window_size as f64).sin()
                    as f32
            })
            .collect()
    }

    fn peak_bin(spectrum: &[f32]) -> usize {
        spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0
    }

    #[test]
    fn plain_sine_peaks_at_its_bin() {
        let mut analyzer = SpectrumAnalyzer::new(1024, TransformKind::Plain);
        let spectrum = analyzer.spectrum(&sine_frame(1024, 32));

        assert_eq!(spectrum.len(), 512);
        assert_eq!(peak_bin(&spectrum), 32);
        // Integral cycles per window: no leakage beyond float noise.
        let peak = spectrum[32];
        assert!(peak > 400.0, "peak magnitude {peak}");
        for (i, &m) in spectrum.iter().enumerate() {
            if i != 32 {
                assert!(m < peak * 1e-3, "bin {i} = {m}");
            }
        }
    }

    #[test]
    fn windowed_sine_peaks_at_its_bin() {
        let mut analyzer = SpectrumAnalyzer::new(1024, TransformKind::Windowed);
        let spectrum = analyzer.spectrum(&sine_frame(1024, 32));

        assert_eq!(spectrum.len(), 512);
        assert_eq!(peak_bin(&spectrum), 32);
        // Hann leaks into the adjacent bins at half the peak magnitude,
        // but two bins away it is back near zero.
        let peak = spectrum[32];
        assert!((spectrum[31] / peak - 0.5).abs() < 0.01);
        assert!((spectrum[33] / peak - 0.5).abs() < 0.01);
        assert!(spectrum[30] < peak * 0.01);
        assert!(spectrum[34] < peak * 0.01);
    }

    #[test]
    fn variants_share_output_shape() {
        let frame = sine_frame(2048, 64);
        let plain = SpectrumAnalyzer::new(2048, TransformKind::Plain).spectrum(&frame);
        let windowed = SpectrumAnalyzer::new(2048, TransformKind::Windowed).spectrum(&frame);
        assert_eq!(plain.len(), 1024);
        assert_eq!(windowed.len(), 1024);
    }

    #[test]
    fn silence_transforms_to_zero() {
        let mut analyzer = SpectrumAnalyzer::new(1024, TransformKind::Windowed);
        let spectrum = analyzer.spectrum(&vec![0.0; 1024]);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn hann_window_is_symmetric_and_tapered() {
        let w = hann_window(1024);
        assert_eq!(w.len(), 1024);
        assert_eq!(w[0], 0.0);
        assert!((w[1023]).abs() < 1e-5);
        for i in 0..512 {
            assert!((w[i] - w[1023 - i]).abs() < 1e-5);
        }
        assert!((w[511] - 1.0).abs() < 1e-4);
    }
}
