//! Groups the real stations of every line into physical stations. Platforms at adjacent grid
//! coordinates belong to the same station, which has to be laid out in one straight row or column.

use std::collections::{BTreeSet, VecDeque};

use anyhow::{Context, Result};

use geom::{GridPt, Pt2D};

use crate::station::{agreed_name, agreed_value};
use crate::{Orientation, RealStationMap, RealStationRecord, Station};

/// Clusters every coordinate of the map. The output is ordered by each cluster's smallest
/// coordinate, so it doesn't depend on how the map was assembled.
pub fn build_stations(map: &RealStationMap) -> Result<Vec<Station>> {
    let mut pending: BTreeSet<GridPt> = map.keys().cloned().collect();
    let mut stations = Vec::new();
    while let Some(seed) = pending.iter().next().cloned() {
        let coords = flood_fill(seed, &mut pending);
        let station = make_station(map, coords)
            .with_context(|| format!("clustering the station around {}", seed))?;
        stations.push(station);
    }
    debug!(
        "{} coordinates clustered into {} stations",
        map.len(),
        stations.len()
    );
    Ok(stations)
}

/// Removes every coordinate connected to the seed from `pending`, and returns them ordered
/// along the row or column.
fn flood_fill(seed: GridPt, pending: &mut BTreeSet<GridPt>) -> Vec<GridPt> {
    let mut coords = Vec::new();
    let mut queue = VecDeque::new();
    pending.remove(&seed);
    queue.push_back(seed);
    while let Some(current) = queue.pop_front() {
        coords.push(current);
        for next in current.neighbors() {
            if pending.remove(&next) {
                queue.push_back(next);
            }
        }
    }
    coords.sort_by_key(|pt| (pt.sum(), pt.x, pt.y));
    coords
}

fn make_station(map: &RealStationMap, coords: Vec<GridPt>) -> Result<Station> {
    let orientation = if coords.iter().all(|pt| pt.y == coords[0].y) {
        Orientation::Horizontal
    } else if coords.iter().all(|pt| pt.x == coords[0].x) {
        Orientation::Vertical
    } else {
        bail!(
            "Platforms {} aren't in one row or column",
            coords
                .iter()
                .map(|pt| pt.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let pts: Vec<Pt2D> = coords.iter().map(|pt| pt.to_pt()).collect();
    let center = Pt2D::center(&pts);

    let records: Vec<(GridPt, &RealStationRecord)> = coords
        .iter()
        .flat_map(|pt| {
            map.get(pt)
                .into_iter()
                .flatten()
                .map(move |record| (*pt, record))
        })
        .collect();
    let name = agreed_name(records.iter().map(|(_, r)| &r.name))?;
    let label_direction = agreed_value(
        records.iter().map(|(_, r)| r.label_direction),
        "label direction",
    )?;

    Ok(Station {
        center,
        colors: records.iter().map(|(_, r)| r.color).collect(),
        sub_colors: records.iter().map(|(_, r)| r.sub_color).collect(),
        lines: records.iter().map(|(_, r)| r.line.clone()).collect(),
        platforms: records.iter().map(|(pt, _)| *pt).collect(),
        coords,
        orientation,
        name,
        label_direction,
    })
}
