//! Audio analysis for Serenade
//!
//! Provides the real-time frequency-magnitude samples that drive the
//! spectrum bar display.

mod spectrum;

pub use spectrum::{FrequencySample, SpectrumAnalyzer, FREQUENCY_BINS};
