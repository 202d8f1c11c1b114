//! Normalized RGB pixel grid handed to the soil heuristic.

use image::imageops::FilterType;

use crate::error::ImageError;

/// Upload content types the soil endpoint accepts.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Whether `content_type` is an accepted soil photo type.
pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// A fixed-size RGB grid, row-major, three bytes per pixel.
///
/// Construction validates the shape, so every `SoilSample` has at least one
/// pixel and exactly `width * height * 3` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoilSample {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SoilSample {
    /// Wrap a raw RGB buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(ImageError::BufferMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A grid where every pixel has the same colour.
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, ImageError> {
        let pixels = width as usize * height as usize;
        Self::from_raw(width, height, rgb.repeat(pixels))
    }

    /// Decode an encoded photo (JPEG, PNG, WebP, ...) and resize it to `side` x `side`.
    ///
    /// Aspect ratio is not preserved; every sample is measured on the same grid.
    pub fn decode(bytes: &[u8], side: u32) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgb = decoded
            .resize_exact(side, side, FilterType::CatmullRom)
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_raw(width, height, rgb.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Every channel value, flattened.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Pixels as `[r, g, b]` triples.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(3)
    }
}
