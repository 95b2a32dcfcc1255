//! Turns a sparse list of station anchors per metro line into fully articulated routes, and merges
//! the stations of all lines into physical stations.
//!
//! Each anchor only says which way (out of 4 undirected orientations on the 45-degree grid) its
//! line passes through it. Between two consecutive anchors, the route bends where their two
//! lines meet; when those lines are parallel, a bend point is synthesized halfway between them.
//! Every resolved route is checked to only turn by 90 or 135 degrees and to pass through every one
//! of its stations. Optional geography (coastlines, rivers, lakes) is rounded the same way.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod anchor;
mod arc_path;
mod cluster;
mod color;
mod geography;
mod metro;
mod route;
mod station;
mod synthesize;
mod validate;

pub use crate::anchor::{BilingualName, Sign, StationAnchor, ANCHOR_COLUMNS};
pub use crate::arc_path::{arc_path, to_svg_path_data, PathCommand};
pub use crate::cluster::build_stations;
pub use crate::color::Color;
pub use crate::geography::{AreaKind, AreaLabel, GeoShape, Geography, ShapeKind};
pub use crate::metro::{merge_station_maps, BuiltLine, MetroLine, MetroMap};
pub use crate::route::{Route, RouteType, Topology};
pub use crate::station::{
    LabelAlignment, LineStationMap, Orientation, RealStationMap, RealStationRecord, Station,
};
pub use crate::synthesize::{
    resolve, ControlPoint, ControlPointKind, DirectedPt, Resolution, MAX_SYNTHESIS_DEPTH,
};
pub use crate::validate::{assert_standard_route, assert_station_on_route};
