//! Pure dimension math for image previews and placement.

use crate::constants::IMAGE_PLACEMENT_COVERAGE;

/// Largest size that fits inside `bounds` with the aspect ratio of `source`.
///
/// The binding dimension decides the scale; images already inside the bounds
/// keep their native size. An empty source or a zero bound yields `(0, 0)`;
/// otherwise each axis is at least 1 pixel.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = source;
    let (max_width, max_height) = bounds;
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fitted_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let fitted_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (fitted_width, fitted_height)
}

/// Position and size of an image layer on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where a newly added image lands on a `canvas` sized canvas.
///
/// Background images cover the whole canvas. Others are contained within
/// [`IMAGE_PLACEMENT_COVERAGE`] of the canvas (never enlarged) and centered.
pub fn place_image_layer(canvas: (f64, f64), natural: (u32, u32), is_background: bool) -> Placement {
    let (canvas_width, canvas_height) = canvas;
    if is_background {
        return Placement {
            x: 0.0,
            y: 0.0,
            width: canvas_width,
            height: canvas_height,
        };
    }

    let (natural_width, natural_height) = (natural.0 as f64, natural.1 as f64);
    if natural_width <= 0.0 || natural_height <= 0.0 {
        return Placement {
            x: canvas_width / 2.0,
            y: canvas_height / 2.0,
            width: 0.0,
            height: 0.0,
        };
    }

    let scale = f64::min(
        1.0,
        f64::min(
            canvas_width * IMAGE_PLACEMENT_COVERAGE / natural_width,
            canvas_height * IMAGE_PLACEMENT_COVERAGE / natural_height,
        ),
    );
    let width = natural_width * scale;
    let height = natural_height * scale;

    Placement {
        x: (canvas_width - width) / 2.0,
        y: (canvas_height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect(size: (u32, u32)) -> f64 {
        size.0 as f64 / size.1 as f64
    }

    #[test]
    fn test_fit_within_width_binding() {
        assert_eq!(fit_within((400, 200), (100, 100)), (100, 50));
    }

    #[test]
    fn test_fit_within_height_binding() {
        assert_eq!(fit_within((300, 900), (200, 300)), (100, 300));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within((50, 40), (1280, 720)), (50, 40));
    }

    #[test]
    fn test_fit_within_degenerate_source() {
        assert_eq!(fit_within((0, 10), (100, 100)), (0, 0));
    }

    #[test]
    fn test_fit_within_zero_bound_is_empty() {
        assert_eq!(fit_within((100, 50), (0, 10)), (0, 0));
        assert_eq!(fit_within((100, 50), (10, 0)), (0, 0));
        assert_eq!(fit_within((5, 5), (0, 0)), (0, 0));
    }

    #[test]
    fn test_fit_within_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within((10_000, 1), (100, 100)), (100, 1));
    }

    #[test]
    fn test_fit_within_respects_bounds_and_aspect() {
        let sources = [(1920, 1080), (1080, 1920), (4000, 3000), (1281, 721), (777, 333)];
        let bounds = [(1280, 720), (320, 320), (100, 400)];
        for source in sources {
            for bound in bounds {
                let fitted = fit_within(source, bound);
                assert!(fitted.0 <= bound.0 && fitted.1 <= bound.1, "{:?} in {:?}", source, bound);
                // One pixel of rounding on the short side
                let tolerance = 1.0 / fitted.1.min(fitted.0) as f64 * aspect(source).max(1.0);
                assert!(
                    (aspect(fitted) - aspect(source)).abs() <= tolerance + 1e-9,
                    "{:?} -> {:?}",
                    source,
                    fitted
                );
            }
        }
    }

    #[test]
    fn test_place_background_covers_canvas() {
        let placement = place_image_layer((1280.0, 720.0), (300, 300), true);
        assert_eq!(
            placement,
            Placement {
                x: 0.0,
                y: 0.0,
                width: 1280.0,
                height: 720.0
            }
        );
    }

    #[test]
    fn test_place_large_image_is_contained_and_centered() {
        let placement = place_image_layer((1000.0, 500.0), (2000, 2000), false);
        assert_eq!(placement.width, 400.0);
        assert_eq!(placement.height, 400.0);
        assert_eq!(placement.x, 300.0);
        assert_eq!(placement.y, 50.0);
    }

    #[test]
    fn test_place_small_image_keeps_native_size() {
        let placement = place_image_layer((1000.0, 500.0), (100, 50), false);
        assert_eq!((placement.width, placement.height), (100.0, 50.0));
        assert_eq!((placement.x, placement.y), (450.0, 225.0));
    }
}
