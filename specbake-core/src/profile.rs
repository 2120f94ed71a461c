//! Analysis profile: the fixed, build-time configuration of the pipeline.
//!
//! A profile pins down everything that shapes the output document, so two
//! bakes with the same profile produce byte-identical assets for the same
//! input.

/// Hop size as a fraction of the window size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HopFraction {
    /// Hop = window / 2 (50% overlap).
    Half,
    /// Hop = window / 4 (75% overlap).
    Quarter,
}

/// Which spectral transform the pipeline runs per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    /// Full complex FFT with no window function; the redundant mirror half
    /// of the output is truncated manually.
    Plain,
    /// Hann-windowed real-input FFT.
    Windowed,
}

/// Container format for the baked document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputEncoding {
    Json,
    MessagePack,
}

impl OutputEncoding {
    /// File extension used when deriving output paths.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputEncoding::Json => "json",
            OutputEncoding::MessagePack => "msgpack",
        }
    }
}

/// Complete configuration for one bake.
#[derive(Clone, Debug)]
pub struct AnalysisProfile {
    pub window_size: usize,
    pub hop: HopFraction,
    pub transform: TransformKind,
    pub encoding: OutputEncoding,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self {
            window_size: 1024,
            hop: HopFraction::Half,
            transform: TransformKind::Windowed,
            encoding: OutputEncoding::Json,
        }
    }
}

impl AnalysisProfile {
    /// Create a profile with the given window size and defaults elsewhere.
    ///
    /// Panics if `window_size` is not a power of two (1024 and 2048 are the
    /// shipping configurations).
    pub fn new(window_size: usize) -> Self {
        assert!(
            window_size >= 2 && window_size.is_power_of_two(),
            "window size must be a power of two, got {window_size}"
        );
        Self {
            window_size,
            ..Self::default()
        }
    }

    pub fn with_hop(mut self, hop: HopFraction) -> Self {
        self.hop = hop;
        self
    }

    pub fn with_transform(mut self, transform: TransformKind) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Samples between the starts of consecutive frames.
    pub fn hop_size(&self) -> usize {
        match self.hop {
            HopFraction::Half => self.window_size / 2,
            HopFraction::Quarter => self.window_size / 4,
        }
    }

    /// Magnitude bins per frame before downsampling.
    pub fn spectrum_bins(&self) -> usize {
        self.window_size / 2
    }

    /// Values per frame in the final document (after stride-2 downsampling).
    pub fn output_bins(&self) -> usize {
        self.spectrum_bins().div_ceil(2)
    }
}
