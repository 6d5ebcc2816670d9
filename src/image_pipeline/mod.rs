//! Image normalization pipeline.
//!
//! Turns arbitrary raw image sources into bounded, quality-limited previews
//! before an image layer is committed.
//!
//! ## Module Structure
//!
//! - [`calculations`] - Pure dimension math (fitting, canvas placement)
//! - [`normalize`] - Decoding, resizing and JPEG re-encoding

mod calculations;
mod normalize;


pub use calculations::{Placement, fit_within, place_image_layer};
pub use normalize::{
    ImageDecodeError, ImageSource, NormalizedImage, image_dimensions, normalize_image,
};
