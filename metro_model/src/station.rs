use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{Direction, GridPt, Pt2D};

use crate::{BilingualName, Color};

/// What one line knows about one of its real stations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealStationRecord {
    pub line: String,
    pub color: Color,
    pub sub_color: Option<Color>,
    pub name: BilingualName,
    pub label_direction: Option<Direction>,
}

/// The real stations of one line.
pub type LineStationMap = BTreeMap<GridPt, RealStationRecord>;
/// The real stations of every line. Several lines stopping at the same coordinate is an
/// interchange, so each coordinate can have several records, in line order.
pub type RealStationMap = BTreeMap<GridPt, Vec<RealStationRecord>>;

/// Which way the platforms of a station are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// How a label lines up with its anchor, horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelAlignment {
    /// The text starts at the anchor and runs away from the station.
    Start,
    Middle,
    End,
}

/// One physical station, possibly served by several lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub center: Pt2D,
    /// Ordered by coordinate sum, so along the row or column.
    pub coords: Vec<GridPt>,
    /// One per record, in coordinate order.
    pub colors: Vec<Color>,
    pub sub_colors: Vec<Option<Color>>,
    pub lines: Vec<String>,
    /// Where each record stops, lined up with `colors`.
    pub platforms: Vec<GridPt>,
    pub orientation: Orientation,
    pub name: BilingualName,
    pub label_direction: Option<Direction>,
}

impl Station {
    pub fn is_interchange(&self) -> bool {
        self.colors.len() > 1
    }

    /// Half the width and height of the rounded box drawn around the platforms.
    pub fn frame_half_size(&self, frame_radius: f64) -> (f64, f64) {
        let half_span = (self.coords.len() - 1) as f64 / 2.0;
        match self.orientation {
            Orientation::Horizontal => (half_span + frame_radius, frame_radius),
            Orientation::Vertical => (frame_radius, half_span + frame_radius),
        }
    }

    /// The point on the station's frame where the label attaches: a corner or edge midpoint,
    /// picked by the label direction.
    pub fn label_anchor(&self, frame_radius: f64) -> Option<Pt2D> {
        let (dx, dy) = self.label_direction?.unit_vector();
        let (half_width, half_height) = self.frame_half_size(frame_radius);
        Some(self.center.offset(half_width * dx, half_height * dy))
    }

    /// Where to draw the colored point of each record, lined up with `colors`. Records sharing a
    /// coordinate are spread `spacing` apart along the station, centered on that coordinate.
    pub fn platform_points(&self, spacing: f64) -> Vec<Pt2D> {
        let (ux, uy) = match self.orientation {
            Orientation::Horizontal => (1.0, 0.0),
            Orientation::Vertical => (0.0, 1.0),
        };
        let mut pts = Vec::new();
        let mut idx = 0;
        while idx < self.platforms.len() {
            let pos = self.platforms[idx];
            let count = self.platforms[idx..]
                .iter()
                .take_while(|pt| **pt == pos)
                .count();
            for k in 0..count {
                let shift = (k as f64 - (count - 1) as f64 / 2.0) * spacing;
                pts.push(pos.to_pt().offset(shift * ux, shift * uy));
            }
            idx += count;
        }
        pts
    }

    pub fn label_alignment(&self) -> Option<LabelAlignment> {
        let (dx, _) = self.label_direction?.opposite().unit_vector();
        Some(if dx > 0.0 {
            LabelAlignment::End
        } else if dx < 0.0 {
            LabelAlignment::Start
        } else {
            LabelAlignment::Middle
        })
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Station {} at {} ({} lines)",
            self.name,
            self.center,
            self.colors.len()
        )
    }
}

/// The first value present, as long as every value present is the same. Nothing decides between
/// two different values, so that's an error.
pub(crate) fn agreed_value<T: PartialEq + fmt::Debug>(
    values: impl IntoIterator<Item = Option<T>>,
    what: &str,
) -> Result<Option<T>> {
    let mut result: Option<T> = None;
    for value in values.into_iter().flatten() {
        match result {
            Some(ref existing) if *existing != value => {
                bail!("Disagreement about {}: {:?} vs {:?}", what, existing, value);
            }
            Some(_) => {}
            None => {
                result = Some(value);
            }
        }
    }
    Ok(result)
}

pub(crate) fn agreed_name<'a>(
    names: impl IntoIterator<Item = &'a BilingualName> + Clone,
) -> Result<BilingualName> {
    Ok(BilingualName {
        eng: agreed_value(names.clone().into_iter().map(|n| n.eng.clone()), "English name")?,
        chn: agreed_value(names.into_iter().map(|n| n.chn.clone()), "Chinese name")?,
    })
}
