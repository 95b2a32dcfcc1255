use std::fmt::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use abstutil::adjacent_triples;
use geom::{trim_f64, Pt2D};

use crate::assert_standard_route;

/// One drawing instruction of a rounded route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Pt2D),
    LineTo(Pt2D),
    /// A circular arc from the current position. Orientation is in y-up model space.
    ArcTo {
        to: Pt2D,
        radius: f64,
        counterclockwise: bool,
    },
    Close,
}

/// Draws a route through its control points, rounding off every corner with an arc of the given
/// radius. Each corner is cut back along both of its edges by `radius / tan(theta / 2)`, where
/// theta is the angle between the edges, so the arc is tangent to both.
pub fn arc_path(pts: &[Pt2D], radius: f64, is_loop: bool) -> Result<Vec<PathCommand>> {
    if pts.len() < 2 {
        bail!("Can't draw a path through {} points", pts.len());
    }
    assert_standard_route(pts, is_loop)?;

    let mut corners = Vec::new();
    for (a, b, c) in adjacent_triples(pts, is_loop) {
        let to_a = b.angle_to(*a);
        let to_c = b.angle_to(*c);
        let theta = to_a.signed_rotation_to(to_c);
        let cut = radius / (theta.abs() / 2.0).tan();
        if cut > a.dist_to(*b) || cut > b.dist_to(*c) {
            warn!(
                "Arc radius {} is too big for the corner at {}; the path will overlap itself",
                radius, b
            );
        }
        corners.push((
            b.project_away(cut, to_a),
            b.project_away(cut, to_c),
            theta < 0.0,
        ));
    }

    let mut cmds = Vec::new();
    if is_loop {
        // Start where the corner at the first point ends, so closing the path is a straight line
        match corners.last() {
            Some((_, after, _)) => cmds.push(PathCommand::MoveTo(*after)),
            None => bail!("A loop through {} points has no corners to round", pts.len()),
        }
    } else {
        cmds.push(PathCommand::MoveTo(pts[0]));
    }
    for (before, after, counterclockwise) in corners {
        cmds.push(PathCommand::LineTo(before));
        cmds.push(PathCommand::ArcTo {
            to: after,
            radius,
            counterclockwise,
        });
    }
    if is_loop {
        cmds.push(PathCommand::Close);
    } else {
        cmds.push(PathCommand::LineTo(pts[pts.len() - 1]));
    }
    Ok(cmds)
}

/// Serializes commands as SVG path data. `transform` has to preserve distances; if it mirrors
/// space (like flipping the y axis to get screen coordinates), set `mirrored` so arcs still bend
/// the right way.
pub fn to_svg_path_data<F: Fn(Pt2D) -> Pt2D>(
    cmds: &[PathCommand],
    transform: F,
    mirrored: bool,
) -> String {
    let mut out = String::new();
    for cmd in cmds {
        if !out.is_empty() {
            out.push(' ');
        }
        // Writing to a String can't fail
        let _ = match *cmd {
            PathCommand::MoveTo(pt) => {
                let pt = transform(pt);
                write!(out, "M {} {}", num(pt.x()), num(pt.y()))
            }
            PathCommand::LineTo(pt) => {
                let pt = transform(pt);
                write!(out, "L {} {}", num(pt.x()), num(pt.y()))
            }
            PathCommand::ArcTo {
                to,
                radius,
                counterclockwise,
            } => {
                let pt = transform(to);
                let sweep = if counterclockwise != mirrored { 1 } else { 0 };
                write!(
                    out,
                    "A {} {} 0 0 {} {} {}",
                    num(radius),
                    num(radius),
                    sweep,
                    num(pt.x()),
                    num(pt.y())
                )
            }
            PathCommand::Close => write!(out, "Z"),
        };
    }
    out
}

fn num(x: f64) -> String {
    let x = trim_f64(x);
    // Avoid "-0"
    if x == 0.0 {
        "0".to_string()
    } else {
        x.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(raw: &[(f64, f64)]) -> Vec<Pt2D> {
        raw.iter().map(|(x, y)| Pt2D::new(*x, *y)).collect()
    }

    #[test]
    fn right_angle_corner() {
        let cmds = arc_path(&route(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]), 1.0, false).unwrap();
        assert_eq!(
            cmds,
            vec![
                PathCommand::MoveTo(Pt2D::new(0.0, 0.0)),
                PathCommand::LineTo(Pt2D::new(3.0, 0.0)),
                PathCommand::ArcTo {
                    to: Pt2D::new(4.0, 1.0),
                    radius: 1.0,
                    counterclockwise: true,
                },
                PathCommand::LineTo(Pt2D::new(4.0, 4.0)),
            ]
        );
        assert_eq!(
            to_svg_path_data(&cmds, |pt| pt, false),
            "M 0 0 L 3 0 A 1 1 0 0 1 4 1 L 4 4"
        );
        // Flipping y turns a left turn into a right turn on screen
        assert_eq!(
            to_svg_path_data(&cmds, |pt| Pt2D::new(pt.x(), 10.0 - pt.y()), true),
            "M 0 10 L 3 10 A 1 1 0 0 0 4 9 L 4 6"
        );
    }

    #[test]
    fn gentle_corner_is_cut_less() {
        let cmds = arc_path(&route(&[(0.0, 0.0), (4.0, 0.0), (6.0, -2.0)]), 1.0, false).unwrap();
        match cmds[1] {
            PathCommand::LineTo(pt) => {
                // 1 / tan(67.5 degrees)
                assert!((pt.x() - (4.0 - 0.4142)).abs() < 1e-3);
                assert_eq!(pt.y(), 0.0);
            }
            ref x => panic!("expected a line, got {:?}", x),
        }
        match cmds[2] {
            PathCommand::ArcTo {
                counterclockwise, ..
            } => assert!(!counterclockwise),
            ref x => panic!("expected an arc, got {:?}", x),
        }
    }

    #[test]
    fn loop_closes() {
        let square = route(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let cmds = arc_path(&square, 1.0, true).unwrap();
        assert_eq!(cmds.len(), 1 + 2 * 4 + 1);
        assert_eq!(cmds[0], PathCommand::MoveTo(Pt2D::new(1.0, 0.0)));
        assert_eq!(cmds[1], PathCommand::LineTo(Pt2D::new(3.0, 0.0)));
        assert_eq!(cmds[cmds.len() - 1], PathCommand::Close);
        // Not enough room for a loop
        assert!(arc_path(&route(&[(4.0, 0.0), (2.0, 0.0)]), 1.0, true).is_err());
        assert_eq!(cmds[cmds.len() - 2], PathCommand::ArcTo {
            to: Pt2D::new(1.0, 0.0),
            radius: 1.0,
            counterclockwise: true,
        });
    }

    #[test]
    fn straight_route() {
        let cmds = arc_path(&route(&[(0.0, 0.0), (4.0, 0.0)]), 2.0, false).unwrap();
        assert_eq!(
            to_svg_path_data(&cmds, |pt| pt, false),
            "M 0 0 L 4 0"
        );
        assert!(arc_path(&route(&[(0.0, 0.0)]), 2.0, false).is_err());
        assert!(arc_path(&route(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]), 2.0, false).is_err());
    }
}
