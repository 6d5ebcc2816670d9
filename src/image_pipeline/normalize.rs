//! Decode, bound and re-encode raw image sources.

use std::io::Cursor;
use std::path::PathBuf;

use base64ct::{Base64, Encoding};
use bevy::log::debug;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use thiserror::Error;

use super::calculations::fit_within;

/// Raw image input
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Encoded file bytes (png, jpeg, webp, ...)
    Bytes(Vec<u8>),
    /// `data:<mime>;base64,<payload>` URL
    DataUrl(String),
    /// File on disk
    Path(PathBuf),
}

/// Why a source could not be turned into pixels
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("failed to read image {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data URL: {0}")]
    DataUrl(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to probe image format: {0}")]
    Probe(#[source] std::io::Error),
    #[error("image has zero width or height")]
    Empty,
    #[error("preview bounds {0}x{1} leave no room for the image")]
    ZeroBounds(u32, u32),
}

/// A bounded, JPEG re-encoded preview
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Native size before scaling
    pub source_width: u32,
    pub source_height: u32,
}

impl NormalizedImage {
    pub const MIME: &'static str = "image/jpeg";

    /// Preview as a `data:image/jpeg;base64,...` URL, suitable for `ImageLayer::src`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MIME, Base64::encode_string(&self.bytes))
    }
}

impl ImageSource {
    /// Resolve the source into encoded bytes without decoding pixels.
    pub fn load_bytes(&self) -> Result<Vec<u8>, ImageDecodeError> {
        match self {
            ImageSource::Bytes(bytes) => Ok(bytes.clone()),
            ImageSource::DataUrl(url) => decode_data_url(url),
            ImageSource::Path(path) => std::fs::read(path).map_err(|source| ImageDecodeError::Read {
                path: path.clone(),
                source,
            }),
        }
    }
}

fn decode_data_url(url: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ImageDecodeError::DataUrl("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageDecodeError::DataUrl("missing payload separator".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ImageDecodeError::DataUrl(
            "only base64 payloads are supported".to_string(),
        ));
    }
    Base64::decode_vec(payload.trim()).map_err(|e| ImageDecodeError::DataUrl(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageDecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageDecodeError::Probe)?;
    Ok(reader.decode()?)
}

/// Decode `source`, shrink it to fit `bounds` (aspect preserved, never
/// enlarged) and re-encode as JPEG at `quality` (1-100).
///
/// Decode failures are returned as-is; choosing a fallback is up to the caller.
pub async fn normalize_image(
    source: ImageSource,
    bounds: (u32, u32),
    quality: u8,
) -> Result<NormalizedImage, ImageDecodeError> {
    let bytes = source.load_bytes()?;
    let image = decode(&bytes)?;
    let (source_width, source_height) = (image.width(), image.height());
    if source_width == 0 || source_height == 0 {
        return Err(ImageDecodeError::Empty);
    }

    let (width, height) = fit_within((source_width, source_height), bounds);
    if width == 0 || height == 0 {
        return Err(ImageDecodeError::ZeroBounds(bounds.0, bounds.1));
    }
    let resized = if (width, height) == (source_width, source_height) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Lanczos3)
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;

    debug!(
        "Normalized image {}x{} -> {}x{} ({} bytes)",
        source_width,
        source_height,
        width,
        height,
        encoded.len()
    );

    Ok(NormalizedImage {
        bytes: encoded,
        width,
        height,
        source_width,
        source_height,
    })
}

/// Native pixel dimensions of `source`, read from the header where possible.
pub async fn image_dimensions(source: ImageSource) -> Result<(u32, u32), ImageDecodeError> {
    let bytes = source.load_bytes()?;
    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(ImageDecodeError::Probe)?;
    Ok(reader.into_dimensions()?)
}
