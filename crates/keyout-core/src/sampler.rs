use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{KeyoutError, Result};
use crate::threshold::ThresholdState;
use crate::viewport::{Point, ViewportTransform};

/// Color of the pixel containing `image_point`.
///
/// The point is floored to pixel coordinates, so (2.9, 0.1) reads pixel
/// (2, 0) and (-0.5, 0.0) is outside. Points outside `[0, W) x [0, H)`
/// return [`KeyoutError::OutOfBounds`].
pub fn sample_at(buffer: &PixelBuffer, image_point: Point) -> Result<Rgb> {
    let out_of_bounds = || KeyoutError::OutOfBounds {
        x: image_point.x,
        y: image_point.y,
        width: buffer.width(),
        height: buffer.height(),
    };

    let x = image_point.x.floor();
    let y = image_point.y.floor();
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return Err(out_of_bounds());
    }
    if x >= buffer.width() as f64 || y >= buffer.height() as f64 {
        return Err(out_of_bounds());
    }

    let [r, g, b, _] = buffer.pixel(x as u32, y as u32).ok_or_else(out_of_bounds)?;
    Ok(Rgb::new(r, g, b))
}

/// Resolve a screen click through `transform` and sample the pixel beneath.
pub fn sample_screen(
    buffer: &PixelBuffer,
    transform: &ViewportTransform,
    screen_point: Point,
) -> Result<Rgb> {
    sample_at(buffer, transform.to_image(screen_point))
}

/// Thresholds pinned to the color under `screen_point`.
pub fn thresholds_from_click(
    buffer: &PixelBuffer,
    transform: &ViewportTransform,
    screen_point: Point,
) -> Result<ThresholdState> {
    sample_screen(buffer, transform, screen_point).map(ThresholdState::pinned)
}
