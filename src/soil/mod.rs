//! Soil photo heuristic.
//!
//! `SoilSample` (normalized grid) → `SoilMetrics::extract` → `SoilVerdict::from_metrics`.

pub mod metrics;
pub mod sample;
pub mod verdict;

pub use metrics::SoilMetrics;
pub use sample::SoilSample;
pub use verdict::{SoilStatus, SoilVerdict};

use crate::error::ImageError;

/// Classify a normalized soil grid.
pub fn classify_soil_image(sample: &SoilSample) -> SoilVerdict {
    SoilVerdict::from_metrics(SoilMetrics::extract(sample))
}

/// Decode an uploaded photo onto a `side` x `side` grid and classify it.
///
/// CPU-bound; async callers should run it on the blocking pool.
pub fn analyze_image(bytes: &[u8], side: u32) -> Result<SoilVerdict, ImageError> {
    let sample = SoilSample::decode(bytes, side)?;
    Ok(classify_soil_image(&sample))
}
