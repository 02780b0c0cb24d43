use std::ops::Range;

use crate::xyz::XYZ;

/// Global per-axis extents of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: XYZ,
    max: XYZ,
}

impl BoundingBox {
    pub fn from_points(points: impl IntoIterator<Item = XYZ>) -> Self {
        let (min, max) = points.into_iter().fold(
            ([f64::INFINITY; 3], [f64::NEG_INFINITY; 3]),
            |(mut min, mut max), p| {
                for (i, v) in p.coords().into_iter().enumerate() {
                    min[i] = min[i].min(v);
                    max[i] = max[i].max(v);
                }
                (min, max)
            },
        );
        Self {
            min: XYZ::from(min),
            max: XYZ::from(max),
        }
    }

    pub fn min(&self) -> XYZ {
        self.min
    }

    pub fn max(&self) -> XYZ {
        self.max
    }

    /// True when built from no points, the sentinels are still in place.
    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x()
    }

    pub fn axis(&self, i: usize) -> Range<f64> {
        self.min.coords()[i]..self.max.coords()[i]
    }

    pub fn contains(&self, p: XYZ) -> bool {
        (0..3).all(|i| {
            let v = p.coords()[i];
            v >= self.min.coords()[i] && v <= self.max.coords()[i]
        })
    }
}
