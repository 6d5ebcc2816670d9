//! Centralized constants used across the engine.
//!
//! This module contains magic numbers and default values that are used
//! in multiple places or would benefit from being named constants.

/// Default canvas width in canvas units (a 16:9 thumbnail)
pub const DEFAULT_CANVAS_WIDTH: f64 = 1280.0;

/// Default canvas height in canvas units
pub const DEFAULT_CANVAS_HEIGHT: f64 = 720.0;

/// Maximum width of a normalized image preview in pixels
pub const DEFAULT_PREVIEW_MAX_WIDTH: u32 = 1280;

/// Maximum height of a normalized image preview in pixels
pub const DEFAULT_PREVIEW_MAX_HEIGHT: u32 = 720;

/// JPEG quality (1-100) used when re-encoding previews
pub const DEFAULT_PREVIEW_QUALITY: u8 = 80;

/// Fraction of the canvas a newly placed (non-background) image may cover
pub const IMAGE_PLACEMENT_COVERAGE: f64 = 0.8;

/// Default size of a freshly created text layer
pub const DEFAULT_TEXT_SIZE: (f64, f64) = (400.0, 80.0);

/// Default font size of a freshly created text layer
pub const DEFAULT_FONT_SIZE: f64 = 48.0;

/// Default size of a freshly created shape layer
pub const DEFAULT_SHAPE_SIZE: (f64, f64) = (200.0, 200.0);

/// Default size of an image layer whose source has not resolved yet
pub const DEFAULT_IMAGE_SIZE: (f64, f64) = (320.0, 180.0);

/// Version stamped into serialized compositions
pub const COMPOSITION_FORMAT_VERSION: u32 = 1;

/// Offset applied to a duplicated layer so it does not sit exactly on its source
pub const DUPLICATE_OFFSET: f64 = 20.0;
