//! Single-track bake pipeline: decode → downmix → frames → spectra →
//! quantize → serialize.

use std::path::{Path, PathBuf};

use crate::audio::{decoder::decode_file, downmix_to_mono};
use crate::dsp::frames::frames;
use crate::dsp::quantize::quantize_spectrum;
use crate::dsp::stft::SpectrumAnalyzer;
use crate::error::Error;
use crate::output::write_frames;
use crate::profile::AnalysisProfile;

/// What one successful bake produced.
#[derive(Clone, Debug)]
pub struct TrackReport {
    pub frames: usize,
    pub output: PathBuf,
}

/// Run the analysis stages over an already-decoded mono signal.
///
/// Returns one quantized spectrum per frame, in playback order. Frame
/// order is the only link between the document and playback time, so this
/// never reorders or drops interior frames.
pub fn analyze_samples(samples: &[f32], profile: &AnalysisProfile) -> Vec<Vec<f32>> {
    let mut analyzer = SpectrumAnalyzer::new(profile.window_size, profile.transform);

    frames(samples, profile.window_size, profile.hop_size())
        .map(|frame| {
            let spectrum = analyzer.spectrum(frame);
            quantize_spectrum(&spectrum)
        })
        .collect()
}

/// Bake one track: decode `input`, analyze it under `profile`, and write
/// the framed document to `output`.
pub fn convert_track(
    input: &Path,
    output: &Path,
    profile: &AnalysisProfile,
    pretty: bool,
) -> Result<TrackReport, Error> {
    let audio = decode_file(input)?;
    log::info!(
        "{}: {} Hz, {} channel(s), {:.2}s",
        input.display(),
        audio.sample_rate,
        audio.channels,
        audio.duration_secs()
    );

    let mono = downmix_to_mono(&audio);
    let baked = analyze_samples(&mono, profile);
    if baked.is_empty() {
        log::warn!(
            "{}: shorter than one {}-sample window, writing empty document",
            input.display(),
            profile.window_size
        );
    }

    write_frames(output, &baked, profile.encoding, pretty)?;
    log::info!("wrote {} ({} frames)", output.display(), baked.len());

    Ok(TrackReport {
        frames: baked.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::read_frames;
    use crate::profile::{HopFraction, OutputEncoding, TransformKind};

    fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample((s * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    /// Sine whose frequency sits exactly on FFT bin 32 for a 1024 window.
    fn bin32_sine(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                (2.0 * std::f64::consts::PI * 32.0 * i as f64 / 1024.0).sin() as f32 * 0.8
            })
            .collect()
    }

    #[test]
    fn sine_bakes_to_three_frames_with_one_dominant_bin() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sine.wav");
        let output = dir.path().join("sine.json");
        // 2048 samples at window 1024, hop 512: exactly 3 frames.
        write_wav(&input, &bin32_sine(2048), 44100);

        let profile = AnalysisProfile::default();
        let report = convert_track(&input, &output, &profile, false).unwrap();
        assert_eq!(report.frames, 3);

        let baked = read_frames(&output, OutputEncoding::Json).unwrap();
        assert_eq!(baked.len(), 3);
        for frame in &baked {
            assert_eq!(frame.len(), 256);
            // Bin 32 survives the stride-2 downsampling as index 16.
            assert_eq!(frame[16], 1.0);
            for (i, &v) in frame.iter().enumerate() {
                assert!((0.0..=1.0).contains(&v));
                if i != 16 {
                    assert!(v <= 0.01, "index {i} = {v}");
                }
            }
        }
    }

    #[test]
    fn plain_profile_matches_sine_bin_too() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sine.wav");
        let output = dir.path().join("sine.msgpack");
        write_wav(&input, &bin32_sine(2048), 44100);

        let profile = AnalysisProfile::default()
            .with_transform(TransformKind::Plain)
            .with_encoding(OutputEncoding::MessagePack);
        convert_track(&input, &output, &profile, false).unwrap();

        let baked = read_frames(&output, OutputEncoding::MessagePack).unwrap();
        assert_eq!(baked.len(), 3);
        for frame in &baked {
            assert_eq!(frame[16], 1.0);
        }
    }

    #[test]
    fn silent_track_bakes_to_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("silence.wav");
        let output = dir.path().join("silence.json");
        write_wav(&input, &vec![0.0; 4096], 44100);

        let report =
            convert_track(&input, &output, &AnalysisProfile::default(), false).unwrap();
        assert_eq!(report.frames, 7);

        let baked = read_frames(&output, OutputEncoding::Json).unwrap();
        assert!(baked.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn short_track_bakes_to_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.wav");
        let output = dir.path().join("short.json");
        write_wav(&input, &vec![0.1; 512], 44100);

        let report =
            convert_track(&input, &output, &AnalysisProfile::default(), false).unwrap();
        assert_eq!(report.frames, 0);

        let baked = read_frames(&output, OutputEncoding::Json).unwrap();
        assert!(baked.is_empty());
    }

    #[test]
    fn quarter_hop_produces_more_frames() {
        let samples = bin32_sine(4096);
        let half = analyze_samples(&samples, &AnalysisProfile::default());
        let quarter = analyze_samples(
            &samples,
            &AnalysisProfile::default().with_hop(HopFraction::Quarter),
        );
        assert_eq!(half.len(), 7);
        assert_eq!(quarter.len(), 13);
    }
}
