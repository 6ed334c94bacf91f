use crate::error::GeometryError;
use crate::model::LaneSegment;

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

/// Tight axis-aligned box around every lane endpoint, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Single pass over both endpoints of every lane.
    ///
    /// # Errors
    ///
    /// [`GeometryError::Empty`] when there are no lanes; callers skip refitting until
    /// geometry arrives.
    pub fn from_lanes(lanes: &[LaneSegment]) -> Result<Self, GeometryError> {
        let (first, rest) = lanes.split_first().ok_or(GeometryError::Empty)?;
        let mut bounds = Self::point(first.start_x, first.start_y);
        bounds.include(first.end_x, first.end_y);
        for lane in rest {
            bounds.include(lane.start_x, lane.start_y);
            bounds.include(lane.end_x, lane.end_y);
        }
        Ok(bounds)
    }

    fn point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}
