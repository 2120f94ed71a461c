//! Audio file decoding.
//!
//! WAV files are read directly with hound; everything else (MP3 in
//! practice) goes through symphonia's probe and packet loop. Decoding is
//! fully in-memory; no intermediate waveform file is written.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::Error;
use crate::types::DecodedAudio;

/// Decode an audio file into interleaved f32 PCM at its native sample rate.
pub fn decode_file(path: &Path) -> Result<DecodedAudio, Error> {
    let audio = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("wav") => decode_wav(path)?,
        _ => decode_compressed(path)?,
    };
    log::debug!(
        "decoded {}: {} Hz, {} channel(s), {:.2}s",
        path.display(),
        audio.sample_rate,
        audio.channels,
        audio.duration_secs()
    );
    Ok(audio)
}

fn decode_wav(path: &Path) -> Result<DecodedAudio, Error> {
    let reader = hound::WavReader::open(path).map_err(|e| Error::decode(path, e))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => {
            let samples: Result<Vec<f32>, _> = reader.into_samples::<f32>().collect();
            samples.map_err(|e| Error::decode(path, e))?
        }
        hound::SampleFormat::Int => {
            // Scale integer samples into [-1, 1].
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            let samples: Result<Vec<f32>, _> = reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect();
            samples.map_err(|e| Error::decode(path, e))?
        }
    };

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels as usize,
    })
}

fn decode_compressed(path: &Path) -> Result<DecodedAudio, Error> {
    let src = File::open(path).map_err(|e| Error::decode(path, e))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::decode(path, e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::decode(path, "no supported audio track"))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::decode(path, e))?;

    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream.
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(Error::decode(path, e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count());

                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
            // Recoverable: skip the corrupt packet and keep going.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(Error::decode(path, e)),
        }
    }

    if samples.is_empty() {
        return Err(Error::decode(path, "no decodable audio data"));
    }

    let sample_rate = sample_rate.ok_or_else(|| Error::decode(path, "unknown sample rate"))?;
    let channels = channels.ok_or_else(|| Error::decode(path, "unknown channel count"))?;

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}
