// ============================================================================
// OUTPUT SURFACE
// ============================================================================
//
// RGBA8 pixel buffer with the three primitives the scene needs: clear, stroked
// line, and filled rectangle rotated about its center. Everything is clipped to
// the buffer so off-surface geometry never indexes out of range.

use crate::color::Color;

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

/// Edge coverage below this is not worth blending.
const MIN_COVERAGE: f64 = 0.01;

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Wrap a `width * height * 4` byte frame. A shorter frame is treated as
    /// having only the rows it can hold.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = if width == 0 { 0 } else { height.min(frame.len() / (width * 4)) };
        Self { frame, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Read back one pixel, `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(self.frame[idx], self.frame[idx + 1], self.frame[idx + 2]))
    }

    fn blend(&mut self, x: usize, y: usize, color: Color, alpha: f64) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| (f64::from(src) * a + f64::from(dst) * (1.0 - a)).round() as u8;
        let out = [
            mix(color.r, self.frame[idx]),
            mix(color.g, self.frame[idx + 1]),
            mix(color.b, self.frame[idx + 2]),
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    /// Clip a float pixel rectangle to the surface, as inclusive integer ranges.
    fn clip(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<(usize, usize, usize, usize)> {
        if self.width == 0 || self.height == 0 || !(min_x <= max_x && min_y <= max_y) {
            return None;
        }
        let last_x = (self.width - 1) as f64;
        let last_y = (self.height - 1) as f64;
        if max_x < 0.0 || max_y < 0.0 || min_x > last_x || min_y > last_y {
            return None;
        }
        Some((
            min_x.floor().max(0.0) as usize,
            min_y.floor().max(0.0) as usize,
            max_x.ceil().min(last_x) as usize,
            max_y.ceil().min(last_y) as usize,
        ))
    }

    /// Anti-aliased stroke from `from` to `to` with a total width of `thickness` pixels.
    pub fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64, color: Color) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let half = (thickness / 2.0).max(0.5);
        let reach = half + 1.0;
        let Some((min_x, min_y, max_x, max_y)) = self.clip(
            x0.min(x1) - reach,
            y0.min(y1) - reach,
            x0.max(x1) + reach,
            y0.max(y1) + reach,
        ) else {
            return;
        };

        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 - x0;
                let py = y as f64 - y0;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = (px - t * dx).hypot(py - t * dy);
                let aa = (1.0 - (dist - half).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > MIN_COVERAGE {
                    self.blend(x, y, color, aa);
                }
            }
        }
    }

    /// Fill a `width` x `height` rectangle centered on `center`, rotated by
    /// `rotation` radians about that center. Unrotated, `width` runs along x.
    pub fn fill_rotated_rect(
        &mut self,
        center: (f64, f64),
        width: f64,
        height: f64,
        rotation: f64,
        color: Color,
    ) {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        if !(half_w > 0.0 && half_h > 0.0) {
            return;
        }
        let (sin, cos) = rotation.sin_cos();
        let extent_x = half_w * cos.abs() + half_h * sin.abs() + 1.0;
        let extent_y = half_w * sin.abs() + half_h * cos.abs() + 1.0;
        let (cx, cy) = center;
        let Some((min_x, min_y, max_x, max_y)) =
            self.clip(cx - extent_x, cy - extent_y, cx + extent_x, cy + extent_y)
        else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                // back into the rectangle's own frame
                let local_x = dx * cos + dy * sin;
                let local_y = -dx * sin + dy * cos;
                let outside_x = local_x.abs() - half_w;
                let outside_y = local_y.abs() - half_h;
                let aa = (1.0 - outside_x.max(outside_y).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > MIN_COVERAGE {
                    self.blend(x, y, color, aa);
                }
            }
        }
    }
}
