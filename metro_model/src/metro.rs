use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use abstutil::Timer;
use geom::{Bounds, GridPt};

use crate::station::agreed_name;
use crate::{
    assert_standard_route, assert_station_on_route, build_stations, resolve, Color, DirectedPt,
    LineStationMap, RealStationMap, RealStationRecord, Resolution, Route, RouteType, Sign, Station,
    StationAnchor, Topology,
};

/// One metro line, as described by the line table and its station table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetroLine {
    pub id: usize,
    pub name: String,
    pub name_chn: Option<String>,
    pub color: Color,
    pub sub_color: Option<Color>,
    pub route_type: RouteType,
    pub arc_radius: f64,
    /// In travel order. A loop's last anchor connects back to the first.
    pub anchors: Vec<StationAnchor>,
}

/// Everything resolved from one line.
#[derive(Clone, Debug)]
pub struct BuiltLine {
    pub route: Route,
    /// One per sub-path, in the same order as `Route::sub_paths`.
    pub resolutions: Vec<Resolution>,
    pub stations: LineStationMap,
}

impl MetroLine {
    /// Parses every row of a station table, naming the row that fails.
    pub fn parse_anchors(rows: &[Vec<String>]) -> Result<Vec<StationAnchor>> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| {
                StationAnchor::from_row(row).with_context(|| format!("station row {}", idx + 1))
            })
            .collect()
    }

    pub fn build(&self) -> Result<BuiltLine> {
        self.check_anchors()
            .with_context(|| format!("checking the stations of line {}", self.name))?;

        let is_loop = self.route_type.is_loop();
        let mut resolutions = Vec::new();
        let mut stations = LineStationMap::new();
        for sequence in self.sequences()? {
            let resolution = self.resolve_sequence(&sequence, is_loop, &mut stations)?;
            resolutions.push(resolution);
        }

        let topology = match self.route_type {
            RouteType::Line => Topology::Line(resolutions[0].points.clone()),
            RouteType::Loop => Topology::Loop(resolutions[0].points.clone()),
            RouteType::Branching => Topology::Branch {
                main: resolutions[0].points.clone(),
                branch: resolutions[1].points.clone(),
            },
        };
        let route = Route {
            line_id: self.id,
            name: self.name.clone(),
            name_chn: self.name_chn.clone(),
            color: self.color,
            sub_color: self.sub_color,
            topology,
            arc_radius: self.arc_radius,
        };
        debug!(
            "Line {} resolved into {} control points, {} real stations",
            self.name,
            route.num_control_points(),
            stations.len()
        );
        Ok(BuiltLine {
            route,
            resolutions,
            stations,
        })
    }

    fn check_anchors(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for anchor in &self.anchors {
            if !seen.insert(anchor.pos) {
                bail!("{} appears more than once", anchor.pos);
            }
        }

        let num_branch = self.count_sign(Sign::BranchFrom);
        let num_follow = self.count_sign(Sign::Follow);
        if self.route_type != RouteType::Branching {
            if num_branch + num_follow > 0 {
                bail!(
                    "Only Y-shaped lines can have ^ or # stations, but this line is type {}",
                    self.route_type
                );
            }
            return Ok(());
        }
        if num_branch != 1 || num_follow != 1 {
            bail!(
                "A Y-shaped line needs exactly one ^ and one # station, not {} and {}",
                num_branch,
                num_follow
            );
        }
        Ok(())
    }

    fn count_sign(&self, sign: Sign) -> usize {
        self.anchors.iter().filter(|a| a.sign == sign).count()
    }

    fn find_sign(&self, sign: Sign) -> Result<usize> {
        self.anchors
            .iter()
            .position(|a| a.sign == sign)
            .ok_or_else(|| anyhow!("Line {} has no {:?} station", self.name, sign))
    }

    /// The anchor sequences to resolve separately. For a Y-shaped line, the trunk is everything
    /// before the `#` station, and the branch starts at the `^` station and continues from `#`.
    fn sequences(&self) -> Result<Vec<Vec<StationAnchor>>> {
        if self.route_type != RouteType::Branching {
            return Ok(vec![self.anchors.clone()]);
        }
        let branch_from = self.find_sign(Sign::BranchFrom)?;
        let follow = self.find_sign(Sign::Follow)?;
        if branch_from > follow {
            bail!(
                "Line {}: the ^ station must come before the # station",
                self.name
            );
        }
        let main = self.anchors[..follow].to_vec();
        let mut branch = vec![self.anchors[branch_from].clone()];
        branch.extend(self.anchors[follow..].iter().cloned());
        Ok(vec![main, branch])
    }

    fn resolve_sequence(
        &self,
        sequence: &[StationAnchor],
        is_loop: bool,
        stations: &mut LineStationMap,
    ) -> Result<Resolution> {
        let directed: Vec<DirectedPt> = sequence
            .iter()
            .map(|a| DirectedPt::new(a.pt(), a.travel))
            .collect();
        let resolution = resolve(&directed, is_loop)
            .with_context(|| format!("resolving the route of line {}", self.name))?;
        let pts = resolution.pts();
        assert_standard_route(&pts, is_loop)
            .with_context(|| format!("validating the route of line {}", self.name))?;

        for anchor in sequence {
            if !anchor.sign.is_real_station() {
                continue;
            }
            assert_station_on_route(anchor.pt(), &pts, is_loop)
                .with_context(|| format!("line {}, {}", self.name, anchor))?;
            stations.insert(
                anchor.pos,
                RealStationRecord {
                    line: self.name.clone(),
                    color: self.color,
                    sub_color: self.sub_color,
                    name: anchor.name.clone(),
                    label_direction: anchor.label,
                },
            );
        }
        Ok(resolution)
    }
}

/// Combines the stations of every line, in line order. Lines sharing a coordinate form an
/// interchange, and have to agree on what it's called.
pub fn merge_station_maps(maps: Vec<LineStationMap>) -> Result<RealStationMap> {
    let mut merged = RealStationMap::new();
    for map in maps {
        for (pt, record) in map {
            let records = merged.entry(pt).or_insert_with(Vec::new);
            records.push(record);
            if records.len() > 1 {
                agreed_name(records.iter().map(|r| &r.name))
                    .with_context(|| format!("interchange at {}", pt))?;
            }
        }
    }
    Ok(merged)
}

/// Every route and physical station of a metro system.
#[derive(Clone, Debug, Serialize)]
pub struct MetroMap {
    pub routes: Vec<Route>,
    pub stations: Vec<Station>,
}

impl MetroMap {
    pub fn build(lines: &[MetroLine], timer: &mut Timer) -> Result<MetroMap> {
        let results = timer.parallelize("resolve lines", lines.iter().collect(), |line: &MetroLine| {
            line.build()
                .with_context(|| format!("building line {} ({})", line.id, line.name))
        });
        let mut routes = Vec::new();
        let mut maps = Vec::new();
        for result in results {
            let built = result?;
            if built.resolutions.iter().any(|r| !r.waypoints.is_empty()) {
                timer.note(format!(
                    "Line {} needed {} synthesized waypoints",
                    built.route.name,
                    built
                        .resolutions
                        .iter()
                        .map(|r| r.waypoints.len())
                        .sum::<usize>()
                ));
            }
            routes.push(built.route);
            maps.push(built.stations);
        }

        let merged = merge_station_maps(maps)?;
        timer.start("cluster stations");
        let stations = build_stations(&merged);
        timer.stop("cluster stations");
        let stations = stations?;

        info!(
            "Built {} routes with {} stations",
            routes.len(),
            stations.len()
        );
        Ok(MetroMap { routes, stations })
    }

    pub fn get_bounds(&self) -> Bounds {
        let mut b = Bounds::new();
        for route in &self.routes {
            b.union(route.get_bounds());
        }
        for station in &self.stations {
            for pt in &station.coords {
                b.update(pt.to_pt());
            }
        }
        b
    }

    pub fn station_at(&self, pt: GridPt) -> Option<&Station> {
        self.stations.iter().find(|s| s.coords.contains(&pt))
    }
}
