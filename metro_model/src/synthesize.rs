//! Resolves the bends of a route from its anchors.
//!
//! Between two consecutive anchors, the route leaves the first along its direction and arrives at
//! the second along its direction. If those two lines cross, the crossing is the only bend needed.
//! If they're the same line, no bend is needed. If they're parallel but distinct, a waypoint is
//! made at the midpoint with a direction that cuts across, and each half is resolved on its own.
//! Only the first two cases can happen for the halves, so recursion stops right there.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use abstutil::adjacent_pairs;
use geom::{solve_intersection, Direction, Intersection, Pt2D, EPSILON};

/// Bisection never needs to go this deep; hitting the limit means something is badly wrong.
pub const MAX_SYNTHESIS_DEPTH: usize = 10;

/// A point that a route has to pass through in a certain direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectedPt {
    pub pt: Pt2D,
    pub dir: Direction,
}

impl DirectedPt {
    pub fn new(pt: Pt2D, dir: Direction) -> DirectedPt {
        DirectedPt { pt, dir }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPointKind {
    /// An endpoint of an open route, copied from its anchor.
    Original,
    /// Where two anchor or waypoint lines cross.
    Synthesized,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub pt: Pt2D,
    pub kind: ControlPointKind,
}

impl ControlPoint {
    fn original(pt: Pt2D) -> ControlPoint {
        ControlPoint {
            pt,
            kind: ControlPointKind::Original,
        }
    }

    fn synthesized(pt: Pt2D) -> ControlPoint {
        ControlPoint {
            pt,
            kind: ControlPointKind::Synthesized,
        }
    }
}

/// The resolved shape of one sequence of anchors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub points: Vec<ControlPoint>,
    /// Midpoints created where two consecutive anchors had parallel, distinct lines.
    pub waypoints: Vec<DirectedPt>,
    /// 0 if every pair resolved directly.
    pub max_depth: usize,
}

impl Resolution {
    pub fn pts(&self) -> Vec<Pt2D> {
        self.points.iter().map(|cp| cp.pt).collect()
    }
}

/// Resolves every consecutive pair of anchors. For a loop, the last anchor pairs up with the first
/// and the result has no endpoints; otherwise the first and last anchors are the endpoints.
pub fn resolve(anchors: &[DirectedPt], is_loop: bool) -> Result<Resolution> {
    let min = if is_loop { 3 } else { 2 };
    if anchors.len() < min {
        bail!(
            "A {} needs at least {} anchors, but only has {}",
            if is_loop { "loop" } else { "path" },
            min,
            anchors.len()
        );
    }

    let mut points = Vec::new();
    let mut waypoints = Vec::new();
    let mut max_depth = 0;
    for (p1, p2) in adjacent_pairs(anchors, is_loop) {
        let pair = resolve_pair(*p1, *p2, 0)
            .with_context(|| format!("between {} and {}", p1.pt, p2.pt))?;
        points.extend(pair.bends.into_iter().map(ControlPoint::synthesized));
        waypoints.extend(pair.waypoints);
        max_depth = max_depth.max(pair.depth);
    }
    if !is_loop {
        points.insert(0, ControlPoint::original(anchors[0].pt));
        points.push(ControlPoint::original(anchors[anchors.len() - 1].pt));
    }

    collapse_duplicates(&mut points, is_loop);
    if is_loop && points.len() < 3 {
        bail!(
            "Loop collapsed to {} control points ({}); it has no room to turn around",
            points.len(),
            points
                .iter()
                .map(|cp| cp.pt.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(Resolution {
        points,
        waypoints,
        max_depth,
    })
}

struct PairResolution {
    bends: Vec<Pt2D>,
    waypoints: Vec<DirectedPt>,
    depth: usize,
}

fn resolve_pair(p1: DirectedPt, p2: DirectedPt, depth: usize) -> Result<PairResolution> {
    if depth > MAX_SYNTHESIS_DEPTH {
        bail!("Gave up synthesizing bends after {} levels", depth);
    }

    match solve_intersection(p1.pt, p1.dir, p2.pt, p2.dir) {
        Intersection::Point(pt) => Ok(PairResolution {
            bends: vec![pt],
            waypoints: Vec::new(),
            depth,
        }),
        Intersection::Collinear => Ok(PairResolution {
            bends: Vec::new(),
            waypoints: Vec::new(),
            depth,
        }),
        Intersection::Parallel => {
            let mid = synthesize_waypoint(p1, p2)?;
            let first = resolve_pair(p1, mid, depth + 1)?;
            let second = resolve_pair(mid, p2, depth + 1)?;

            let mut waypoints = vec![mid];
            waypoints.extend(first.waypoints);
            waypoints.extend(second.waypoints);
            let mut bends = first.bends;
            bends.extend(second.bends);
            Ok(PairResolution {
                bends,
                waypoints,
                depth: first.depth.max(second.depth),
            })
        }
    }
}

/// Picks the midpoint of two anchors with parallel lines and a direction for the route to cross
/// over between them. In the frame where p1's line is the x axis (flipped so p2 is above), a
/// mostly-ahead p2 gets a 45 degree jog, a mostly-behind one gets 135, and otherwise the route
/// crosses straight over at 90.
fn synthesize_waypoint(p1: DirectedPt, p2: DirectedPt) -> Result<DirectedPt> {
    let (mut h, mut v) = p1
        .dir
        .into_frame(p2.pt.x() - p1.pt.x(), p2.pt.y() - p1.pt.y());
    if h.abs() < EPSILON && v.abs() < EPSILON {
        bail!("Can't synthesize a bend between coincident points {}", p1.pt);
    }
    if v < 0.0 {
        h = -h;
        v = -v;
    }
    let jog = if h > v {
        1
    } else if h < -v {
        3
    } else {
        2
    };
    let dir = Direction::from_octant(i64::from((p1.dir.orientation() + jog) % 4));
    Ok(DirectedPt::new(p1.pt.midpoint(p2.pt), dir))
}

/// An intersection can land exactly on an anchor or another intersection; drop the zero-length
/// edges that would make. Endpoints win over bends.
fn collapse_duplicates(points: &mut Vec<ControlPoint>, is_loop: bool) {
    points.dedup_by(|later, earlier| {
        if later.pt.approx_eq(earlier.pt) {
            if later.kind == ControlPointKind::Original {
                earlier.kind = ControlPointKind::Original;
            }
            true
        } else {
            false
        }
    });
    if is_loop {
        while points.len() > 1 && points[points.len() - 1].pt.approx_eq(points[0].pt) {
            points.pop();
        }
    }
}
