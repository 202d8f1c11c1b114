//! Pixel statistics used by the soil heuristic.

use serde::Serialize;

use super::sample::SoilSample;

/// A channel strictly above this value counts towards a near-white pixel.
pub const NEAR_WHITE_CUTOFF: u8 = 230;

/// Aggregate statistics of a soil photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilMetrics {
    /// Mean of every channel sample, 0..=255.
    pub brightness: f64,
    /// Population variance of every channel sample (channels pooled, not per channel).
    pub variance: f64,
    /// Fraction of pixels whose three channels all exceed `NEAR_WHITE_CUTOFF`.
    pub near_white_ratio: f64,
}

impl SoilMetrics {
    /// Compute metrics in a single pass over the grid.
    ///
    /// Sums are kept as integers so the result does not depend on pixel order
    /// and a flat image has a variance of exactly zero.
    pub fn extract(sample: &SoilSample) -> Self {
        let mut sum: u64 = 0;
        let mut sum_sq: u64 = 0;
        for &value in sample.samples() {
            let v = u64::from(value);
            sum += v;
            sum_sq += v * v;
        }

        let near_white = sample
            .pixels()
            .filter(|p| p.iter().all(|&c| c > NEAR_WHITE_CUTOFF))
            .count();

        // SoilSample guarantees at least one pixel.
        let n = sample.samples().len() as u128;
        let brightness = sum as f64 / n as f64;
        // n * sum(x^2) - (sum x)^2 is exact in u128 and never negative.
        let spread = n * u128::from(sum_sq) - u128::from(sum) * u128::from(sum);
        let variance = spread as f64 / (n * n) as f64;
        let near_white_ratio = near_white as f64 / sample.pixel_count() as f64;

        Self {
            brightness,
            variance,
            near_white_ratio,
        }
    }

    /// Copy rounded for display: brightness and variance to 2 decimals, ratio to 3.
    pub fn rounded(&self) -> Self {
        Self {
            brightness: round_to(self.brightness, 2),
            variance: round_to(self.variance, 2),
            near_white_ratio: round_to(self.near_white_ratio, 3),
        }
    }
}

/// Round the exact binary value to `decimals` places, ties to even.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
