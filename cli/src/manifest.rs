use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use metro_model::{Color, Geography, MetroLine, RouteType, ANCHOR_COLUMNS};

/// Describes a whole metro system: which lines exist, where their station tables live, and how to
/// draw them. Paths are relative to the manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    #[serde(default = "default_arc_radius")]
    pub arc_radius: f64,
    #[serde(default = "default_frame_radius")]
    pub frame_radius: f64,
    #[serde(default)]
    pub style: Style,
    pub lines: Vec<LineEntry>,
    /// Drawn underneath everything else.
    #[serde(default)]
    pub geography: Geography,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineEntry {
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub name_chn: Option<String>,
    pub color: Color,
    #[serde(default)]
    pub sub_color: Option<Color>,
    pub route_type: RouteType,
    /// Overrides the manifest's radius for just this line.
    #[serde(default)]
    pub arc_radius: Option<f64>,
    /// A headerless CSV file with one station per row.
    pub stations: String,
}

/// Everything here is in grid units, except `scale`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Pixels per grid unit
    pub scale: f64,
    pub padding: f64,
    pub background: Color,
    pub route_width: f64,
    pub route_opacity: f64,
    pub sub_route_width: f64,
    pub station_radius: f64,
    pub station_stroke_width: f64,
    pub interchange_stroke: Color,
    /// Each line stopping at an interchange gets a dot this big inside the frame.
    pub platform_radius: f64,
    /// How far apart the dots of lines stopping at the same coordinate are.
    pub platform_spacing: f64,
    pub font_size: f64,
    pub font_family: String,
    pub land: Color,
    pub water: Color,
    pub district_label: Color,
    pub water_label: Color,
    pub area_font_size: f64,
}

impl Default for Style {
    fn default() -> Style {
        Style {
            scale: 10.0,
            padding: 3.0,
            background: Color::WHITE,
            route_width: 0.8,
            route_opacity: 0.7,
            sub_route_width: 0.3,
            station_radius: 0.4,
            station_stroke_width: 0.2,
            interchange_stroke: Color::BLACK,
            platform_radius: 0.2,
            platform_spacing: 0.5,
            font_size: 1.0,
            font_family: "sans-serif".to_string(),
            land: Color::WHITE,
            water: Color(217, 235, 247),
            district_label: Color(120, 120, 120),
            water_label: Color(93, 188, 218),
            area_font_size: 1.5,
        }
    }
}

fn default_arc_radius() -> f64 {
    2.0
}

fn default_frame_radius() -> f64 {
    0.55
}

impl Manifest {
    pub fn load(path: &str) -> Result<Manifest> {
        let manifest: Manifest = abstutil::read_json(path)?;
        let mut ids = BTreeSet::new();
        for line in &manifest.lines {
            if !ids.insert(line.id) {
                bail!("{} lists line {} more than once", path, line.id);
            }
        }
        if manifest.arc_radius <= 0.0 || manifest.frame_radius <= 0.0 {
            bail!("{} needs positive arc and frame radii", path);
        }
        manifest
            .geography
            .path_commands()
            .with_context(|| format!("checking the geography of {}", path))?;
        Ok(manifest)
    }

    /// Reads the station table of every line. `manifest_path` is where this manifest came from.
    pub fn metro_lines(&self, manifest_path: &str) -> Result<Vec<MetroLine>> {
        let dir = Path::new(manifest_path)
            .parent()
            .unwrap_or_else(|| Path::new(""));
        let mut lines = Vec::new();
        for entry in &self.lines {
            let path = dir.join(&entry.stations);
            let path = path.to_string_lossy();
            let rows = abstutil::read_csv_rows(&path, ANCHOR_COLUMNS)?;
            let anchors = MetroLine::parse_anchors(&rows)
                .with_context(|| format!("reading line {} from {}", entry.name, path))?;
            debug!("Line {} has {} anchors", entry.name, anchors.len());
            lines.push(MetroLine {
                id: entry.id,
                name: entry.name.clone(),
                name_chn: entry.name_chn.clone(),
                color: entry.color,
                sub_color: entry.sub_color,
                route_type: entry.route_type,
                arc_radius: entry.arc_radius.unwrap_or(self.arc_radius),
                anchors,
            });
        }
        Ok(lines)
    }
}
