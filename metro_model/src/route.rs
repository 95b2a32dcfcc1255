use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{Bounds, Pt2D};

use crate::{arc_path, BilingualName, Color, ControlPoint, PathCommand};

/// The `l` / `o` / `y` column of the line table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteType {
    #[serde(rename = "l")]
    Line,
    #[serde(rename = "o")]
    Loop,
    /// Y-shaped: a trunk plus one branch splitting off partway.
    #[serde(rename = "y")]
    Branching,
}

impl RouteType {
    pub fn parse(raw: &str) -> Result<RouteType> {
        match raw.trim() {
            "l" => Ok(RouteType::Line),
            "o" => Ok(RouteType::Loop),
            "y" => Ok(RouteType::Branching),
            x => bail!("Unknown route type {:?}; must be l, o, or y", x),
        }
    }

    pub fn is_loop(self) -> bool {
        self == RouteType::Loop
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteType::Line => write!(f, "l"),
            RouteType::Loop => write!(f, "o"),
            RouteType::Branching => write!(f, "y"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Topology {
    Line(Vec<ControlPoint>),
    Loop(Vec<ControlPoint>),
    /// The branch starts at the junction, which is also somewhere along the trunk.
    Branch {
        main: Vec<ControlPoint>,
        branch: Vec<ControlPoint>,
    },
}

/// The resolved shape of one metro line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub line_id: usize,
    pub name: String,
    pub name_chn: Option<String>,
    pub color: Color,
    /// Drawn as a thinner stripe down the middle of the route.
    pub sub_color: Option<Color>,
    pub topology: Topology,
    pub arc_radius: f64,
}

impl Route {
    pub fn route_type(&self) -> RouteType {
        match self.topology {
            Topology::Line(_) => RouteType::Line,
            Topology::Loop(_) => RouteType::Loop,
            Topology::Branch { .. } => RouteType::Branching,
        }
    }

    pub fn full_name(&self) -> BilingualName {
        BilingualName {
            eng: Some(self.name.clone()),
            chn: self.name_chn.clone(),
        }
    }

    /// Every separately drawn piece, and whether it's closed.
    pub fn sub_paths(&self) -> Vec<(&[ControlPoint], bool)> {
        match self.topology {
            Topology::Line(ref pts) => vec![(pts.as_slice(), false)],
            Topology::Loop(ref pts) => vec![(pts.as_slice(), true)],
            Topology::Branch {
                ref main,
                ref branch,
            } => vec![(main.as_slice(), false), (branch.as_slice(), false)],
        }
    }

    /// One list of commands per sub-path. The branch of a Y-shaped line is its own sub-path.
    pub fn path_commands(&self) -> Result<Vec<Vec<PathCommand>>> {
        let mut result = Vec::new();
        for (pts, is_loop) in self.sub_paths() {
            let pts: Vec<Pt2D> = pts.iter().map(|cp| cp.pt).collect();
            result.push(arc_path(&pts, self.arc_radius, is_loop)?);
        }
        Ok(result)
    }

    pub fn get_bounds(&self) -> Bounds {
        let mut b = Bounds::new();
        for (pts, _) in self.sub_paths() {
            for cp in pts {
                b.update(cp.pt);
            }
        }
        b
    }

    pub fn num_control_points(&self) -> usize {
        self.sub_paths().iter().map(|(pts, _)| pts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ControlPointKind;

    fn cps(raw: &[(f64, f64)]) -> Vec<ControlPoint> {
        raw.iter()
            .map(|(x, y)| ControlPoint {
                pt: Pt2D::new(*x, *y),
                kind: ControlPointKind::Synthesized,
            })
            .collect()
    }

    #[test]
    fn route_types() {
        assert_eq!(RouteType::parse("y").unwrap(), RouteType::Branching);
        assert!(RouteType::parse("x").is_err());
        assert!(RouteType::Loop.is_loop());
        assert_eq!(
            serde_json::to_string(&RouteType::Line).unwrap(),
            "\"l\"".to_string()
        );
    }

    #[test]
    fn loop_route() {
        let route = Route {
            line_id: 4,
            name: "Circle".to_string(),
            name_chn: Some("环线".to_string()),
            color: Color(0, 128, 0),
            sub_color: None,
            topology: Topology::Loop(cps(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])),
            arc_radius: 1.0,
        };
        assert_eq!(route.route_type(), RouteType::Loop);
        assert_eq!(route.full_name().to_string(), "Circle (环线)");
        assert_eq!(route.num_control_points(), 4);
        let sub_paths = route.sub_paths();
        assert_eq!(sub_paths.len(), 1);
        assert!(sub_paths[0].1);

        let commands = route.path_commands().unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].last(), Some(&PathCommand::Close));

        let b = route.get_bounds();
        assert_eq!((b.width(), b.height()), (4.0, 4.0));
    }
}
