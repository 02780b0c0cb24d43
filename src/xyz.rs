use nalgebra::Point3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XYZ {
    coords: [f64; 3],
}

impl XYZ {
    pub fn from(coords: [f64; 3]) -> Self {
        Self { coords }
    }

    pub fn x(&self) -> f64 {
        self.coords[0]
    }
    pub fn y(&self) -> f64 {
        self.coords[1]
    }
    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    #[inline]
    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    #[inline]
    pub fn point(&self) -> Point3<f64> {
        Point3::from(self.coords)
    }
}

impl From<Point3<f64>> for XYZ {
    fn from(p: Point3<f64>) -> Self {
        Self::from([p.x, p.y, p.z])
    }
}

impl fmt::Display for XYZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}

pub fn distance(a: XYZ, b: XYZ) -> f64 {
    nalgebra::distance(&a.point(), &b.point())
}
