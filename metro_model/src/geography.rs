//! Land and water drawn underneath the routes. Coastlines, lakes, and rivers obey the same rules as
//! metro routes: every corner is a right angle or a 45 degree jog, rounded off with an arc.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::{Bounds, Pt2D};

use crate::{arc_path, BilingualName, PathCommand};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Land reaching the edge of the map. The coastline is open; straight edges through
    /// `frame_corners` close it off.
    Land,
    /// Land surrounded by water, as one rounded loop.
    Island,
    /// An open stroke, `width` wide.
    River,
    /// Water reaching the edge of the map, closed off like `Land`.
    Lake,
    /// Water surrounded by land, as one rounded loop.
    InnerLake,
}

impl ShapeKind {
    pub fn is_loop(self) -> bool {
        matches!(self, ShapeKind::Island | ShapeKind::InnerLake)
    }

    pub fn is_water(self) -> bool {
        matches!(
            self,
            ShapeKind::River | ShapeKind::Lake | ShapeKind::InnerLake
        )
    }

    fn reaches_frame(self) -> bool {
        matches!(self, ShapeKind::Land | ShapeKind::Lake)
    }
}

/// Points are `[x, y]` pairs in grid units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoShape {
    pub kind: ShapeKind,
    #[serde(default)]
    pub name: Option<String>,
    pub arc_radius: f64,
    #[serde(default)]
    pub width: Option<f64>,
    pub points: Vec<(f64, f64)>,
    #[serde(default)]
    pub frame_corners: Vec<(f64, f64)>,
}

impl GeoShape {
    pub fn control_points(&self) -> Vec<Pt2D> {
        self.points.iter().map(|(x, y)| Pt2D::new(*x, *y)).collect()
    }

    fn corner_points(&self) -> Vec<Pt2D> {
        self.frame_corners
            .iter()
            .map(|(x, y)| Pt2D::new(*x, *y))
            .collect()
    }

    fn check(&self) -> Result<()> {
        if self.arc_radius <= 0.0 {
            bail!("Arc radius {} isn't positive", self.arc_radius);
        }
        match (self.kind, self.width) {
            (ShapeKind::River, Some(width)) if width > 0.0 => {}
            (ShapeKind::River, _) => bail!("A river needs a positive width"),
            (_, Some(_)) => bail!("Only rivers have a width"),
            (_, None) => {}
        }
        if !self.kind.reaches_frame() && !self.frame_corners.is_empty() {
            bail!("Only land and lakes reaching the edge of the map have frame corners");
        }
        Ok(())
    }

    pub fn path_commands(&self) -> Result<Vec<PathCommand>> {
        self.check()?;
        let mut cmds = arc_path(&self.control_points(), self.arc_radius, self.kind.is_loop())?;
        if self.kind.reaches_frame() {
            for pt in self.corner_points() {
                cmds.push(PathCommand::LineTo(pt));
            }
            cmds.push(PathCommand::Close);
        }
        Ok(cmds)
    }

    pub fn get_bounds(&self) -> Bounds {
        let mut pts = self.control_points();
        pts.extend(self.corner_points());
        Bounds::from(&pts)
    }

    fn describe(&self, idx: usize) -> String {
        match self.name {
            Some(ref name) => format!("{:?} #{} ({})", self.kind, idx + 1, name),
            None => format!("{:?} #{}", self.kind, idx + 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    District,
    Water,
}

/// The name of a district or a body of water, centered on a point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaLabel {
    pub kind: AreaKind,
    pub name: BilingualName,
    pub center: (f64, f64),
}

impl AreaLabel {
    pub fn center(&self) -> Pt2D {
        Pt2D::new(self.center.0, self.center.1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geography {
    #[serde(default)]
    pub shapes: Vec<GeoShape>,
    #[serde(default)]
    pub labels: Vec<AreaLabel>,
}

impl Geography {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.labels.is_empty()
    }

    /// The commands of every shape, lined up with `shapes`.
    pub fn path_commands(&self) -> Result<Vec<Vec<PathCommand>>> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(idx, shape)| {
                shape
                    .path_commands()
                    .with_context(|| format!("drawing {}", shape.describe(idx)))
            })
            .collect()
    }

    pub fn get_bounds(&self) -> Bounds {
        let mut b = Bounds::new();
        for shape in &self.shapes {
            b.union(shape.get_bounds());
        }
        for label in &self.labels {
            b.update(label.center());
        }
        b
    }
}
