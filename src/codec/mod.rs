//! Pure codecs between structured styling parameters and their serialized strings.

mod color;
mod shadow;

pub use color::{hex_to_rgb, rgb_to_hex};
pub use shadow::{ShadowParams, decode_shadow, encode_shadow};
