use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Direction, Heading, Pt2D, EPSILON};

/// A line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Result<Line> {
        if pt1.approx_eq(pt2) {
            bail!("Line from {} to itself", pt1);
        }
        Ok(Line(pt1, pt2))
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn heading(&self) -> Heading {
        Heading::between(self.0, self.1)
    }

    /// True if the point sits somewhere on the segment, endpoints included. Only meaningful for
    /// segments that follow the 45-degree grid.
    pub fn contains_grid_pt(&self, pt: Pt2D) -> bool {
        let dir = match self.heading() {
            Heading::Along(dir) => dir,
            _ => return false,
        };
        let ok = |h: Heading| h == Heading::Stationary || h == Heading::Along(dir);
        ok(Heading::between(self.0, pt)) && ok(Heading::between(pt, self.1))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line({} to {})", self.0, self.1)
    }
}

/// The ways two infinite lines can meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    Point(Pt2D),
    /// The same line; every point is shared.
    Collinear,
    /// Parallel and distinct; nothing is shared.
    Parallel,
}

/// Intersects the infinite line through `pt1` heading `dir1` with the one through `pt2` heading
/// `dir2`.
///
/// Each line is written as `sin(t) x - cos(t) y = c`. The octant vector stands in for
/// `(cos(t), sin(t))`; it's only scaled, so it describes the same line and keeps the arithmetic
/// exact on the half-unit grid. If the 2x2 coefficient matrix has rank 2, there's one solution.
/// Otherwise the rank of the augmented matrix tells apart the same line (rank 1) from two
/// parallel ones (rank 2).
pub fn solve_intersection(pt1: Pt2D, dir1: Direction, pt2: Pt2D, dir2: Direction) -> Intersection {
    let (cos1, sin1) = dir1.unit_vector();
    let (cos2, sin2) = dir2.unit_vector();
    let (a1, b1, c1) = (sin1, -cos1, sin1 * pt1.x() - cos1 * pt1.y());
    let (a2, b2, c2) = (sin2, -cos2, sin2 * pt2.x() - cos2 * pt2.y());

    let det = a1 * b2 - a2 * b1;
    if det.abs() > EPSILON {
        let x = (c1 * b2 - c2 * b1) / det;
        let y = (a1 * c2 - a2 * c1) / det;
        return Intersection::Point(Pt2D::new(x, y));
    }

    let augmented_rank_2 =
        (a1 * c2 - a2 * c1).abs() > EPSILON || (b1 * c2 - b2 * c1).abs() > EPSILON;
    if augmented_rank_2 {
        Intersection::Parallel
    } else {
        Intersection::Collinear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_intersection() {
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::E, Pt2D::new(2.0, 2.0), Direction::N),
            Intersection::Point(Pt2D::new(2.0, 0.0))
        );
        assert_eq!(
            solve_intersection(
                Pt2D::new(0.0, 0.0),
                Direction::E,
                Pt2D::new(2.0, 1.0),
                Direction::NE
            ),
            Intersection::Point(Pt2D::new(1.0, 0.0))
        );
        // Direction along the line doesn't matter, only the line itself
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::W, Pt2D::new(2.0, 2.0), Direction::S),
            Intersection::Point(Pt2D::new(2.0, 0.0))
        );
    }

    #[test]
    fn collinear_and_parallel() {
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::E, Pt2D::new(4.0, 0.0), Direction::E),
            Intersection::Collinear
        );
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::E, Pt2D::new(4.0, 0.0), Direction::W),
            Intersection::Collinear
        );
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::NE, Pt2D::new(3.0, 3.0), Direction::NE),
            Intersection::Collinear
        );
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::E, Pt2D::new(0.0, 3.0), Direction::E),
            Intersection::Parallel
        );
        assert_eq!(
            solve_intersection(Pt2D::new(0.0, 0.0), Direction::NE, Pt2D::new(1.0, 0.0), Direction::SW),
            Intersection::Parallel
        );
    }

    #[test]
    fn grid_containment() {
        let line = Line::new(Pt2D::new(0.0, 0.0), Pt2D::new(4.0, 4.0)).unwrap();
        assert!(line.contains_grid_pt(Pt2D::new(2.0, 2.0)));
        assert!(line.contains_grid_pt(Pt2D::new(0.0, 0.0)));
        assert!(line.contains_grid_pt(Pt2D::new(4.0, 4.0)));
        assert!(!line.contains_grid_pt(Pt2D::new(5.0, 5.0)));
        assert!(!line.contains_grid_pt(Pt2D::new(2.0, 1.0)));
        assert!(Line::new(Pt2D::new(1.0, 1.0), Pt2D::new(1.0, 1.0)).is_err());
    }
}
