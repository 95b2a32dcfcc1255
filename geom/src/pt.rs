use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{trim_f64, Angle, EPSILON};

/// A point in model space. Station coordinates are integers, but bends and bisection midpoints
/// land on half units or worse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D {
            x: trim_f64(x),
            y: trim_f64(y),
        }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn approx_eq(self, other: Pt2D) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }

    pub fn dist_to(self, to: Pt2D) -> f64 {
        ((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt()
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    pub fn project_away(self, dist: f64, theta: Angle) -> Pt2D {
        assert!(dist >= 0.0);

        let (sin, cos) = theta.normalized_radians().sin_cos();
        Pt2D::new(self.x + dist * cos, self.y + dist * sin)
    }

    pub fn angle_to(self, to: Pt2D) -> Angle {
        Angle::new_rads((to.y - self.y).atan2(to.x - self.x))
    }

    pub fn midpoint(self, other: Pt2D) -> Pt2D {
        Pt2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn center(pts: &[Pt2D]) -> Pt2D {
        assert!(!pts.is_empty());
        let mut x = 0.0;
        let mut y = 0.0;
        for pt in pts {
            x += pt.x;
            y += pt.y;
        }
        let len = pts.len() as f64;
        Pt2D::new(x / len, y / len)
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

/// A station coordinate on the unit grid. Adjacent platforms of one physical station differ by
/// exactly one unit along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPt {
    pub x: i64,
    pub y: i64,
}

impl GridPt {
    pub fn new(x: i64, y: i64) -> GridPt {
        GridPt { x, y }
    }

    pub fn to_pt(self) -> Pt2D {
        Pt2D::new(self.x as f64, self.y as f64)
    }

    /// The 4 axis-aligned unit steps away. Diagonal neighbors don't count.
    pub fn neighbors(self) -> [GridPt; 4] {
        [
            GridPt::new(self.x + 1, self.y),
            GridPt::new(self.x, self.y + 1),
            GridPt::new(self.x - 1, self.y),
            GridPt::new(self.x, self.y - 1),
        ]
    }

    pub fn sum(self) -> i64 {
        self.x + self.y
    }
}

impl fmt::Display for GridPt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_row() {
        let pts = vec![Pt2D::new(5.0, 5.0), Pt2D::new(6.0, 5.0), Pt2D::new(7.0, 5.0)];
        assert_eq!(Pt2D::center(&pts), Pt2D::new(6.0, 5.0));
    }

    #[test]
    fn trims_noise() {
        let pt = Pt2D::new(0.1 + 0.2, 1.0 / 3.0);
        assert_eq!(pt, Pt2D::new(0.3, 0.3333));
    }

    #[test]
    fn grid_neighbors_are_orthogonal() {
        let pt = GridPt::new(2, -1);
        for n in pt.neighbors() {
            assert_eq!((n.x - pt.x).abs() + (n.y - pt.y).abs(), 1);
        }
    }
}
