//! Photo encoding for the classifier
//!
//! Photos are downscaled so the longest edge fits `max_image_size`,
//! re-encoded as JPEG and carried as a `data:image/jpeg;base64,` URI.

use crate::error::{AppError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::path::Path;
use tracing::debug;

pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Encoded photo handed to a classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub image: String,
}

impl ClassificationRequest {
    /// Load, downscale and encode a photo file
    pub fn from_photo(path: &Path, max_image_size: u32, jpeg_quality: u8) -> Result<Self> {
        if !path.is_file() {
            return Err(AppError::PhotoNotFound(path.display().to_string()));
        }

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| AppError::ImageLoad(format!("{}: {}", path.display(), e)))?;

        let (width, height) = (image.width(), image.height());
        let image = if width.max(height) > max_image_size {
            image.thumbnail(max_image_size, max_image_size)
        } else {
            image
        };

        let mut buf = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100));
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(encoder)
            .map_err(|e| AppError::ImageLoad(format!("JPEG encoding failed: {}", e)))?;

        debug!(
            path = %path.display(),
            original = %format!("{}x{}", width, height),
            encoded = %format!("{}x{}", image.width(), image.height()),
            bytes = buf.len(),
            "photo encoded"
        );

        Ok(Self {
            image: format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&buf)),
        })
    }

    /// Wrap already-encoded base64 data; existing data URIs are kept as is
    pub fn from_base64(data: &str) -> Self {
        let data = data.trim();
        let image = if data.starts_with("data:") {
            data.to_string()
        } else {
            format!("{}{}", DATA_URI_PREFIX, data)
        };
        Self { image }
    }

    /// Raw image bytes of the data URI
    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        let payload = match self.image.split_once(',') {
            Some((_, payload)) => payload,
            None => self.image.as_str(),
        };
        STANDARD
            .decode(payload)
            .map_err(|e| AppError::ImageLoad(format!("invalid base64 image: {}", e)))
    }
}
