//! FFT-based frequency analyzer for real-time visualization

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Number of frequency bins in one sample (FFT size 256)
pub const FREQUENCY_BINS: usize = 128;

/// FFT window size; yields `FREQUENCY_BINS` usable bins
const FFT_SIZE: usize = 256;

/// One frame's snapshot of frequency-bin magnitudes (0-255)
///
/// Consumed once per rendered frame and never retained across frames.
#[derive(Clone, Copy, Debug)]
pub struct FrequencySample {
    pub bins: [u8; FREQUENCY_BINS],
}

impl Default for FrequencySample {
    fn default() -> Self {
        Self {
            bins: [0; FREQUENCY_BINS],
        }
    }
}

/// Real-time FFT analyzer producing byte-magnitude samples
pub struct SpectrumAnalyzer {
    fft: Arc<dyn rustfft::Fft<f32>>,
    window: Vec<f32>,
    smoothing: f32,
    previous_magnitudes: [f32; FREQUENCY_BINS],
    /// Pre-allocated FFT buffer to avoid allocation in analyze()
    fft_buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Pre-compute Hann window
        let window: Vec<f32> = (0..FFT_SIZE)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / FFT_SIZE as f32).cos()))
            .collect();

        Self {
            fft,
            window,
            smoothing: 0.7,
            previous_magnitudes: [0.0; FREQUENCY_BINS],
            fft_buffer: vec![Complex::new(0.0, 0.0); FFT_SIZE],
        }
    }

    /// Analyze a buffer of mono samples and return bin magnitudes
    pub fn analyze(&mut self, samples: &[f32]) -> FrequencySample {
        // Window the input into the pre-allocated buffer, zero-padding the tail
        let sample_count = samples.len().min(FFT_SIZE);
        for (i, &sample) in samples.iter().enumerate().take(sample_count) {
            self.fft_buffer[i] = Complex::new(sample * self.window[i], 0.0);
        }
        for slot in self.fft_buffer.iter_mut().skip(sample_count) {
            *slot = Complex::new(0.0, 0.0);
        }

        self.fft.process(&mut self.fft_buffer);

        // One byte per bin, normalized so a full-scale tone approaches 255
        let scale = 2.0 / FFT_SIZE as f32;
        let mut sample = FrequencySample::default();
        for (i, slot) in sample.bins.iter_mut().enumerate() {
            let magnitude = (self.fft_buffer[i].norm() * scale).clamp(0.0, 1.0);
            let smoothed = self.previous_magnitudes[i] * self.smoothing
                + magnitude * (1.0 - self.smoothing);
            self.previous_magnitudes[i] = smoothed;
            *slot = (smoothed * 255.0) as u8;
        }

        sample
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_yields_zero_bins() {
        let mut analyzer = SpectrumAnalyzer::new();
        let sample = analyzer.analyze(&[0.0; FFT_SIZE]);
        assert!(sample.bins.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_tone_yields_energy() {
        let mut analyzer = SpectrumAnalyzer::new();
        let tone: Vec<f32> = (0..FFT_SIZE)
            .map(|i| (2.0 * PI * 8.0 * i as f32 / FFT_SIZE as f32).sin())
            .collect();

        // Run a few frames so smoothing converges
        let mut sample = FrequencySample::default();
        for _ in 0..10 {
            sample = analyzer.analyze(&tone);
        }

        assert!(sample.bins.iter().any(|&b| b > 0));
        // Bin 8 carries the tone
        assert!(sample.bins[8] > sample.bins[40]);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let mut analyzer = SpectrumAnalyzer::new();
        let sample = analyzer.analyze(&[0.5; 16]);
        assert_eq!(sample.bins.len(), FREQUENCY_BINS);
    }
}
