//! The 8 compass octants. A direction is an integer in [-4, 4), counting 45-degree steps
//! counter-clockwise from east: E=0, NE=1, N=2, NW=3, W=-4, SW=-3, S=-2, SE=-1. Rotating by 90
//! degrees adds or subtracts 2.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, Pt2D, EPSILON};

/// Wraps any octant count into [-4, 4).
pub fn wrap_octant(n: i64) -> i8 {
    ((n + 4).rem_euclid(8) - 4) as i8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Direction(i8);

impl Direction {
    pub const E: Direction = Direction(0);
    pub const NE: Direction = Direction(1);
    pub const N: Direction = Direction(2);
    pub const NW: Direction = Direction(3);
    pub const W: Direction = Direction(-4);
    pub const SW: Direction = Direction(-3);
    pub const S: Direction = Direction(-2);
    pub const SE: Direction = Direction(-1);

    pub const ALL: [Direction; 8] = [
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    pub fn from_octant(n: i64) -> Direction {
        Direction(wrap_octant(n))
    }

    pub fn octant(self) -> i8 {
        self.0
    }

    pub fn to_angle(self) -> Angle {
        Angle::degrees(f64::from(self.0) * 45.0)
    }

    /// Positive steps rotate counter-clockwise.
    pub fn rotate(self, steps: i64) -> Direction {
        Direction::from_octant(i64::from(self.0) + steps)
    }

    pub fn opposite(self) -> Direction {
        self.rotate(4)
    }

    pub fn is_diagonal(self) -> bool {
        self.0 % 2 != 0
    }

    /// Folds a direction onto the undirected line it travels along, as an octant in [0, 4).
    pub fn orientation(self) -> i8 {
        self.0.rem_euclid(4)
    }

    /// Unnormalized; each component is -1, 0, or 1.
    pub fn unit_vector(self) -> (f64, f64) {
        match self.0 {
            0 => (1.0, 0.0),
            1 => (1.0, 1.0),
            2 => (0.0, 1.0),
            3 => (-1.0, 1.0),
            -4 => (-1.0, 0.0),
            -3 => (-1.0, -1.0),
            -2 => (0.0, -1.0),
            -1 => (1.0, -1.0),
            _ => unreachable!(),
        }
    }

    /// Rotates a vector into the frame where this direction is the +x axis. Diagonal frames
    /// come out scaled by sqrt(2), which keeps half-unit inputs exact; only the signs and relative
    /// magnitudes of the result are meaningful.
    pub fn into_frame(self, dx: f64, dy: f64) -> (f64, f64) {
        let (mut x, mut y) = (dx, dy);
        let mut steps = i64::from(self.0);
        if self.is_diagonal() {
            // -45 degrees, times sqrt(2)
            let (rx, ry) = (x + y, y - x);
            x = rx;
            y = ry;
            steps -= 1;
        }
        for _ in 0..(steps / 2).rem_euclid(4) {
            // -90 degrees
            let (rx, ry) = (y, -x);
            x = rx;
            y = ry;
        }
        (x, y)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self.0 {
            0 => "E",
            1 => "NE",
            2 => "N",
            3 => "NW",
            -4 => "W",
            -3 => "SW",
            -2 => "S",
            -1 => "SE",
            _ => unreachable!(),
        };
        write!(f, "{}", name)
    }
}

/// How a vector lines up with the 45-degree grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    /// The zero vector points nowhere. Callers treat this as "no constraint", which is different
    /// from pointing the wrong way.
    Stationary,
    Along(Direction),
    /// Not a multiple of 45 degrees.
    OffGrid,
}

impl Heading {
    pub fn of(dx: f64, dy: f64) -> Heading {
        let zero_x = dx.abs() < EPSILON;
        let zero_y = dy.abs() < EPSILON;
        let dir = if zero_x && zero_y {
            return Heading::Stationary;
        } else if zero_x {
            if dy > 0.0 {
                Direction::N
            } else {
                Direction::S
            }
        } else if zero_y {
            if dx > 0.0 {
                Direction::E
            } else {
                Direction::W
            }
        } else if (dx - dy).abs() < EPSILON {
            if dx > 0.0 {
                Direction::NE
            } else {
                Direction::SW
            }
        } else if (dx + dy).abs() < EPSILON {
            if dx < 0.0 {
                Direction::NW
            } else {
                Direction::SE
            }
        } else {
            return Heading::OffGrid;
        };
        Heading::Along(dir)
    }

    pub fn between(from: Pt2D, to: Pt2D) -> Heading {
        Heading::of(to.x() - from.x(), to.y() - from.y())
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Heading::Along(dir) => Some(dir),
            _ => None,
        }
    }
}

/// The turn at `b` on the way from `a` to `c`, in octants: direction(a - b) minus direction(c -
/// b), wrapped into [-4, 4). Going straight through is -4, a right angle is +-2. None when either
/// leg is zero-length or off the grid.
pub fn turn_between(a: Pt2D, b: Pt2D, c: Pt2D) -> Option<i8> {
    let back = Heading::between(b, a).direction()?;
    let ahead = Heading::between(b, c).direction()?;
    Some(wrap_octant(
        i64::from(back.octant()) - i64::from(ahead.octant()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping() {
        assert_eq!(wrap_octant(4), -4);
        assert_eq!(wrap_octant(-5), 3);
        assert_eq!(wrap_octant(9), 1);
        assert_eq!(Direction::from_octant(6), Direction::S);
        assert_eq!(Direction::E.opposite(), Direction::W);
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::N.rotate(-2), Direction::E);
    }

    #[test]
    fn classify_vectors() {
        assert_eq!(Heading::of(0.0, 0.0), Heading::Stationary);
        assert_eq!(Heading::of(3.0, 0.0), Heading::Along(Direction::E));
        assert_eq!(Heading::of(0.0, -0.5), Heading::Along(Direction::S));
        assert_eq!(Heading::of(-2.0, -2.0), Heading::Along(Direction::SW));
        assert_eq!(Heading::of(-1.5, 1.5), Heading::Along(Direction::NW));
        assert_eq!(Heading::of(1.0, 2.0), Heading::OffGrid);
        for dir in Direction::ALL {
            let (dx, dy) = dir.unit_vector();
            assert_eq!(Heading::of(dx, dy), Heading::Along(dir));
            assert_eq!(Heading::of(dx * 7.5, dy * 7.5), Heading::Along(dir));
        }
    }

    #[test]
    fn angles() {
        assert!((Direction::NW.to_angle().normalized_degrees() - 135.0).abs() < 1e-9);
        assert!((Direction::S.to_angle().normalized_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn frame_rotation_puts_direction_on_x_axis() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.unit_vector();
            let (x, y) = dir.into_frame(dx, dy);
            assert!(x > 0.0, "{} -> ({}, {})", dir, x, y);
            assert!(y.abs() < EPSILON, "{} -> ({}, {})", dir, x, y);

            // 90 degrees counter-clockwise of the direction is +y in its frame
            let (lx, ly) = dir.rotate(2).unit_vector();
            let (x, y) = dir.into_frame(lx, ly);
            assert!(x.abs() < EPSILON && y > 0.0, "{} -> ({}, {})", dir, x, y);
        }
    }

    #[test]
    fn turns() {
        let pt = |x, y| Pt2D::new(x, y);
        // East then north
        assert_eq!(turn_between(pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0)), Some(2));
        // East then south
        assert_eq!(turn_between(pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, -2.0)), Some(-2));
        // East then north-east
        assert_eq!(turn_between(pt(0.0, 0.0), pt(1.0, 0.0), pt(3.0, 2.0)), Some(3));
        // Straight through
        assert_eq!(turn_between(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)), Some(-4));
        // Reversal
        assert_eq!(turn_between(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.5, 0.0)), Some(0));
        // Degenerate legs
        assert_eq!(turn_between(pt(0.0, 0.0), pt(0.0, 0.0), pt(2.0, 0.0)), None);
        assert_eq!(turn_between(pt(0.0, 0.0), pt(1.0, 0.0), pt(3.0, 1.0)), None);
    }
}
