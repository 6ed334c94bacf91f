use tracing::debug;

use crate::bounds::Bounds;

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// Maps world coordinates onto surface pixels: `screen = (world + offset) * scale`.
///
/// The scale is uniform on both axes, so world shapes keep their aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl ViewportTransform {
    /// Fit `bounds` into a `width` x `height` pixel surface.
    ///
    /// Each axis proposes `surface extent / world extent` and the smaller one wins.
    /// An axis with zero world extent proposes nothing; with no proposal at all the
    /// scale falls back to 1. Pure: equal inputs give bit-identical output.
    #[must_use]
    pub fn fit(bounds: &Bounds, width: u32, height: u32) -> Self {
        let scale_x = axis_scale(f64::from(width), bounds.width());
        let scale_y = axis_scale(f64::from(height), bounds.height());
        let scale = match (scale_x, scale_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };
        if scale_x.is_none() || scale_y.is_none() {
            debug!(
                world_width = bounds.width(),
                world_height = bounds.height(),
                scale,
                "degenerate lane geometry, fitting on remaining axis"
            );
        }

        Self {
            scale,
            offset_x: -bounds.min_x,
            offset_y: -bounds.min_y,
        }
    }

    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        ((x + self.offset_x) * self.scale, (y + self.offset_y) * self.scale)
    }

    /// World length to pixels.
    #[must_use]
    pub fn length(&self, world: f64) -> f64 {
        world * self.scale
    }
}

/// `None` when the axis cannot constrain the scale.
fn axis_scale(surface: f64, world: f64) -> Option<f64> {
    if world > 0.0 && surface > 0.0 {
        let scale = surface / world;
        (scale.is_finite() && scale > 0.0).then_some(scale)
    } else {
        None
    }
}
