use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::{Direction, GridPt, Pt2D};

/// Columns in one row of a line's station table: English name, Chinese name, sign, x, y, travel
/// octant, label octant.
pub const ANCHOR_COLUMNS: usize = 7;

/// The marker column of a station row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    /// Blank: an ordinary station.
    Station,
    /// `*`: only shapes the route; no station is drawn here.
    Waypoint,
    /// `^`: a Y-shaped line splits off from here. The trunk carries on to the next row.
    BranchFrom,
    /// `#`: the first station of the branch of a Y-shaped line.
    Follow,
}

impl Sign {
    pub fn parse(raw: &str) -> Result<Sign> {
        match raw.trim() {
            "" => Ok(Sign::Station),
            "*" => Ok(Sign::Waypoint),
            "^" => Ok(Sign::BranchFrom),
            "#" => Ok(Sign::Follow),
            x => bail!("Unknown station sign {:?}", x),
        }
    }

    pub fn is_real_station(self) -> bool {
        self != Sign::Waypoint
    }
}

/// A station name in English and Chinese. Either half may be missing; interchange platforms
/// often only name the station once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualName {
    pub eng: Option<String>,
    pub chn: Option<String>,
}

impl BilingualName {
    pub fn new<S: Into<String>>(eng: S, chn: S) -> BilingualName {
        BilingualName {
            eng: Some(eng.into()),
            chn: Some(chn.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.eng.is_none() && self.chn.is_none()
    }
}

impl fmt::Display for BilingualName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.eng, &self.chn) {
            (Some(eng), Some(chn)) => write!(f, "{} ({})", eng, chn),
            (Some(name), None) | (None, Some(name)) => write!(f, "{}", name),
            (None, None) => write!(f, "unnamed"),
        }
    }
}

/// One row of a line's station table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationAnchor {
    pub pos: GridPt,
    /// Which way the line passes through. Only the orientation matters, so this is one of E, NE,
    /// N, or NW.
    pub travel: Direction,
    /// Where the label goes, relative to the station.
    pub label: Option<Direction>,
    pub name: BilingualName,
    pub sign: Sign,
}

impl StationAnchor {
    /// Parses `name_eng, name_chn, sign, x, y, travel_octant, label_octant`. Empty cells are null.
    pub fn from_row(row: &[String]) -> Result<StationAnchor> {
        if row.len() != ANCHOR_COLUMNS {
            bail!(
                "Station row has {} columns, expected {}: {:?}",
                row.len(),
                ANCHOR_COLUMNS,
                row
            );
        }
        let name = BilingualName {
            eng: non_empty(&row[0]),
            chn: non_empty(&row[1]),
        };
        let sign = Sign::parse(&row[2])?;
        let x = parse_int(&row[3]).context("x")?;
        let y = parse_int(&row[4]).context("y")?;

        let travel = parse_int(&row[5]).context("travel direction")?;
        if !(0..4).contains(&travel) {
            bail!("Travel direction {} isn't in [0, 4)", travel);
        }
        let label = match non_empty(&row[6]) {
            Some(raw) => {
                let n = parse_int(&raw).context("label direction")?;
                if !(0..8).contains(&n) {
                    bail!("Label direction {} isn't in [0, 8)", n);
                }
                Some(Direction::from_octant(n))
            }
            None => None,
        };

        Ok(StationAnchor {
            pos: GridPt::new(x, y),
            travel: Direction::from_octant(travel),
            label,
            name,
            sign,
        })
    }

    pub fn pt(&self) -> Pt2D {
        self.pos.to_pt()
    }
}

impl fmt::Display for StationAnchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {} heading {}", self.name, self.pos, self.travel)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Spreadsheet exports sometimes write integers as `3.0`.
fn parse_int(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n);
    }
    let x: f64 = raw
        .parse()
        .with_context(|| format!("{:?} isn't a number", raw))?;
    if x.fract() != 0.0 || !x.is_finite() {
        bail!("{} isn't an integer", raw);
    }
    Ok(x as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; 7]) -> Vec<String> {
        cells.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn parse_station_row() {
        let anchor =
            StationAnchor::from_row(&row(["People's Square", "人民广场", "", "10", "-3", "2", "4"]))
                .unwrap();
        assert_eq!(anchor.pos, GridPt::new(10, -3));
        assert_eq!(anchor.travel, Direction::N);
        assert_eq!(anchor.label, Some(Direction::W));
        assert_eq!(anchor.sign, Sign::Station);
        assert_eq!(anchor.name, BilingualName::new("People's Square", "人民广场"));
    }

    #[test]
    fn parse_waypoint_row() {
        let anchor = StationAnchor::from_row(&row(["", "", "*", "4.0", "5", "1", ""])).unwrap();
        assert_eq!(anchor.pos, GridPt::new(4, 5));
        assert_eq!(anchor.travel, Direction::NE);
        assert_eq!(anchor.label, None);
        assert!(anchor.name.is_empty());
        assert!(!anchor.sign.is_real_station());
    }

    #[test]
    fn reject_bad_rows() {
        assert!(StationAnchor::from_row(&row(["a", "b", "", "0", "0", "4", ""])).is_err());
        assert!(StationAnchor::from_row(&row(["a", "b", "", "0", "0", "0", "8"])).is_err());
        assert!(StationAnchor::from_row(&row(["a", "b", "!", "0", "0", "0", ""])).is_err());
        assert!(StationAnchor::from_row(&row(["a", "b", "", "0.5", "0", "0", ""])).is_err());
        assert!(StationAnchor::from_row(&row(["a", "b", "", "x", "0", "0", ""])).is_err());
        assert!(StationAnchor::from_row(&["a".to_string()]).is_err());
    }

    #[test]
    fn signs() {
        assert_eq!(Sign::parse(" ^ ").unwrap(), Sign::BranchFrom);
        assert_eq!(Sign::parse("#").unwrap(), Sign::Follow);
        assert!(Sign::BranchFrom.is_real_station());
    }
}
