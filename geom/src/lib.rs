//! Geometry for schematic maps drawn on a 45-degree grid. Everything here is y-up model space; the
//! SVG writer flips the y axis at the very end.

#[macro_use]
extern crate anyhow;

mod angle;
mod bounds;
mod direction;
mod line;
mod pt;

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::direction::{turn_between, wrap_octant, Direction, Heading};
pub use crate::line::{solve_intersection, Intersection, Line};
pub use crate::pt::{GridPt, Pt2D};

/// Two coordinates closer than this along both axes are the same point, and two vectors whose
/// components differ by less than this point the same way.
pub const EPSILON: f64 = 1e-6;

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading), and keeps bisection midpoints from
/// accumulating noise.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
