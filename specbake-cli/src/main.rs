//! Batch driver for baking music tracks into visualizer spectrum data.
//!
//! Each input file is decoded, analyzed under one shared profile, and
//! written next to the input (or into `--out-dir`) as `<stem>.json` or
//! `<stem>.msgpack`. Failed tracks are logged and the rest of the batch
//! still runs; the process exits nonzero if anything failed.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use specbake_core::{convert_track, AnalysisProfile, HopFraction, OutputEncoding, TransformKind};

#[derive(Parser)]
#[command(name = "specbake")]
#[command(about = "Precompute quantized frequency-spectrum data for the audio visualizer")]
struct Args {
    /// Audio files to bake (MP3 or WAV)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for output files (default: next to each input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Explicit output path; only valid with a single input
    #[arg(long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Analysis window size in samples (1024 or 2048)
    #[arg(long, default_value_t = 1024)]
    window_size: u64,

    /// Overlap between consecutive frames
    #[arg(long, value_enum, default_value_t = HopArg::Half)]
    hop: HopArg,

    /// Spectral transform variant
    #[arg(long, value_enum, default_value_t = TransformArg::Windowed)]
    transform: TransformArg,

    /// Output container format
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum HopArg {
    /// 50% overlap (hop = window / 2)
    Half,
    /// 75% overlap (hop = window / 4)
    Quarter,
}

#[derive(Clone, Copy, ValueEnum)]
enum TransformArg {
    /// Hann-windowed real FFT
    Windowed,
    /// Unwindowed complex FFT
    Plain,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Msgpack,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.output.is_some() && args.inputs.len() != 1 {
        bail!("--output requires exactly one input file");
    }
    if !matches!(args.window_size, 1024 | 2048) {
        bail!("unsupported window size {} (use 1024 or 2048)", args.window_size);
    }

    let encoding = match args.format {
        FormatArg::Json => OutputEncoding::Json,
        FormatArg::Msgpack => OutputEncoding::MessagePack,
    };
    let profile = AnalysisProfile::new(args.window_size as usize)
        .with_hop(match args.hop {
            HopArg::Half => HopFraction::Half,
            HopArg::Quarter => HopFraction::Quarter,
        })
        .with_transform(match args.transform {
            TransformArg::Windowed => TransformKind::Windowed,
            TransformArg::Plain => TransformKind::Plain,
        })
        .with_encoding(encoding);

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    }

    let mut failures = 0usize;
    for input in &args.inputs {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => {
                let stem = input
                    .file_stem()
                    .with_context(|| format!("cannot derive output name for {}", input.display()))?;
                let dir = match &args.out_dir {
                    Some(dir) => dir.clone(),
                    None => input.parent().map(PathBuf::from).unwrap_or_default(),
                };
                dir.join(stem).with_extension(encoding.extension())
            }
        };

        match convert_track(input, &output, &profile, args.pretty) {
            Ok(report) => {
                println!(
                    "{} -> {} ({} frames)",
                    input.display(),
                    report.output.display(),
                    report.frames
                );
            }
            Err(e) => {
                log::error!("{}: {e}", input.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} track(s) failed", args.inputs.len());
    }
    Ok(())
}
