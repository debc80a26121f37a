//! Lon/lat to canvas projection

use geo::{Coord, Rect, coord};

/// Smallest extent drawn, in degrees; keeps single-node areas visible.
const MIN_EXTENT_DEG: f64 = 0.0005;

/// Maps lon/lat into a square plot area, preserving ground aspect ratio
/// (longitude scaled by the cosine of the middle latitude), Y down.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CanvasProjection {
    bounds: Rect<f64>,
    lon_factor: f64,
    scale: f64,
    offset: Coord<f64>,
}

impl CanvasProjection {
    /// Fits `bounds` into a `size` x `size` area whose top-left corner is `origin`
    pub(crate) fn fit(bounds: Rect<f64>, origin: Coord<f64>, size: f64) -> Self {
        let bounds = pad_degenerate(bounds);
        let lon_factor = bounds.center().y.to_radians().cos();

        let ground_width = bounds.width() * lon_factor;
        let ground_height = bounds.height();
        let scale = size / ground_width.max(ground_height);

        // Center the shorter side
        let offset = coord! {
            x: origin.x + (size - ground_width * scale) / 2.0,
            y: origin.y + (size - ground_height * scale) / 2.0,
        };

        Self {
            bounds,
            lon_factor,
            scale,
            offset,
        }
    }

    pub(crate) fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let x = self.offset.x + (coord.x - self.bounds.min().x) * self.lon_factor * self.scale;
        let y = self.offset.y + (self.bounds.max().y - coord.y) * self.scale; // invert vertically
        (x, y)
    }
}

fn pad_degenerate(bounds: Rect<f64>) -> Rect<f64> {
    let pad_x = ((MIN_EXTENT_DEG - bounds.width()) / 2.0).max(0.0);
    let pad_y = ((MIN_EXTENT_DEG - bounds.height()) / 2.0).max(0.0);
    Rect::new(
        coord! { x: bounds.min().x - pad_x, y: bounds.min().y - pad_y },
        coord! { x: bounds.max().x + pad_x, y: bounds.max().y + pad_y },
    )
}
