use anyhow::Result;

use abstutil::{adjacent_pairs, adjacent_triples};
use geom::{turn_between, Line, Pt2D};

/// Every corner of a route has to be a right angle or a 135 degree angle (a 45 degree jog). Going
/// straight through a control point, reversing, or doubling back at 45 degrees all mean the
/// control points were resolved wrong.
pub fn assert_standard_route(pts: &[Pt2D], is_loop: bool) -> Result<()> {
    if is_loop && pts.len() < 3 {
        bail!("A loop through only {} points reverses onto itself", pts.len());
    }
    for (a, b, c) in adjacent_triples(pts, is_loop) {
        match turn_between(*a, *b, *c) {
            Some(turn) if turn.abs() == 2 || turn.abs() == 3 => {}
            Some(turn) => bail!(
                "Route has a {} degree corner at {} (coming from {}, going to {})",
                i16::from(turn.abs()) * 45,
                b,
                a,
                c
            ),
            None => bail!(
                "Route has a zero-length or off-grid edge around {} (coming from {}, going to {})",
                b,
                a,
                c
            ),
        }
    }
    Ok(())
}

/// The station has to sit on one of the route's edges, endpoints included.
pub fn assert_station_on_route(station: Pt2D, pts: &[Pt2D], is_loop: bool) -> Result<()> {
    for (a, b) in adjacent_pairs(pts, is_loop) {
        if let Ok(line) = Line::new(*a, *b) {
            if line.contains_grid_pt(station) {
                return Ok(());
            }
        }
    }
    bail!("Station at {} isn't on its route", station)
}
