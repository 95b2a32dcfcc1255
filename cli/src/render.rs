//! Draws a built metro map as SVG. Everything is drawn in grid units with the y axis flipped, and
//! the `viewBox` scales it up. Layers from the bottom: geography, area names, routes, stations,
//! station labels.

use std::fmt::Write;

use anyhow::Result;

use geom::Pt2D;
use metro_model::{
    to_svg_path_data, AreaKind, AreaLabel, BilingualName, Color, LabelAlignment, MetroMap,
    ShapeKind, Station,
};

use crate::manifest::Manifest;

pub fn render_svg(map: &MetroMap, manifest: &Manifest) -> Result<String> {
    let style = &manifest.style;
    let mut bounds = map.get_bounds();
    bounds.union(manifest.geography.get_bounds());
    if bounds.is_empty() {
        bail!("{} has nothing to draw", manifest.name);
    }
    let bounds = bounds.padded(style.padding);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        bounds.width() * style.scale,
        bounds.height() * style.scale,
        bounds.min_x,
        -bounds.max_y,
        bounds.width(),
        bounds.height()
    )?;
    writeln!(svg, "<title>{}</title>", escape(&manifest.name))?;
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        bounds.min_x,
        -bounds.max_y,
        bounds.width(),
        bounds.height(),
        style.background
    )?;

    if !manifest.geography.is_empty() {
        draw_geography(&mut svg, manifest)?;
    }

    writeln!(svg, r#"<g id="routes" fill="none" stroke-linecap="round" stroke-linejoin="round">"#)?;
    for route in &map.routes {
        writeln!(svg, r#"<g id="line-{}">"#, route.line_id)?;
        writeln!(svg, "<title>{}</title>", escape(&route.full_name().to_string()))?;
        for cmds in route.path_commands()? {
            let data = to_svg_path_data(&cmds, flip, true);
            writeln!(
                svg,
                r#"<path d="{}" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
                data, route.color, style.route_width, style.route_opacity
            )?;
            if let Some(sub_color) = route.sub_color {
                writeln!(
                    svg,
                    r#"<path d="{}" stroke="{}" stroke-width="{}"/>"#,
                    data, sub_color, style.sub_route_width
                )?;
            }
        }
        writeln!(svg, "</g>")?;
    }
    writeln!(svg, "</g>")?;

    writeln!(svg, r#"<g id="stations">"#)?;
    for station in &map.stations {
        draw_station(&mut svg, station, manifest)?;
    }
    writeln!(svg, "</g>")?;

    writeln!(
        svg,
        r#"<g id="labels" font-family="{}" font-size="{}">"#,
        escape(&style.font_family),
        style.font_size
    )?;
    for station in &map.stations {
        draw_label(&mut svg, station, manifest)?;
    }
    writeln!(svg, "</g>")?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn flip(pt: Pt2D) -> Pt2D {
    Pt2D::new(pt.x(), -pt.y())
}

fn draw_geography(svg: &mut String, manifest: &Manifest) -> Result<()> {
    let style = &manifest.style;
    let geography = &manifest.geography;
    let paths = geography.path_commands()?;

    writeln!(svg, r#"<g id="geography">"#)?;
    // Land first, then rivers, then lakes on top
    for pass in 0..3 {
        for (shape, cmds) in geography.shapes.iter().zip(paths.iter()) {
            let rank = match shape.kind {
                ShapeKind::Land | ShapeKind::Island => 0,
                ShapeKind::River => 1,
                ShapeKind::Lake | ShapeKind::InnerLake => 2,
            };
            if rank != pass {
                continue;
            }
            let data = to_svg_path_data(cmds, flip, true);
            match (shape.kind, shape.width) {
                (ShapeKind::River, Some(width)) => writeln!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                    data, style.water, width
                )?,
                (kind, _) => writeln!(
                    svg,
                    r#"<path d="{}" fill="{}"/>"#,
                    data,
                    if kind.is_water() {
                        style.water
                    } else {
                        style.land
                    }
                )?,
            }
        }
    }
    writeln!(svg, "</g>")?;

    writeln!(
        svg,
        r#"<g id="area-names" font-family="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle">"#,
        escape(&style.font_family),
        style.area_font_size
    )?;
    for label in &geography.labels {
        draw_area_label(svg, label, manifest)?;
    }
    writeln!(svg, "</g>")?;
    Ok(())
}

fn draw_area_label(svg: &mut String, label: &AreaLabel, manifest: &Manifest) -> Result<()> {
    let style = &manifest.style;
    let lines = name_lines(&label.name);
    if lines.is_empty() {
        return Ok(());
    }
    let fill = match label.kind {
        AreaKind::District => style.district_label,
        AreaKind::Water => style.water_label,
    };
    let pt = flip(label.center());
    // Centered on the point as a whole
    let first_line_y = -(lines.len() as f64 - 1.0) * style.area_font_size / 2.0;
    write!(
        svg,
        r#"<text x="{}" y="{}" fill="{}">"#,
        pt.x(),
        pt.y() + first_line_y,
        fill
    )?;
    write_tspans(svg, pt.x(), &lines, style.area_font_size)?;
    writeln!(svg, "</text>")?;
    Ok(())
}

/// Chinese above English.
fn name_lines(name: &BilingualName) -> Vec<&String> {
    name.chn.iter().chain(name.eng.iter()).collect()
}

fn write_tspans(svg: &mut String, x: f64, lines: &[&String], font_size: f64) -> Result<()> {
    for (idx, line) in lines.iter().enumerate() {
        write!(
            svg,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            x,
            if idx == 0 { 0.0 } else { font_size },
            escape(line)
        )?;
    }
    Ok(())
}

fn draw_station(svg: &mut String, station: &Station, manifest: &Manifest) -> Result<()> {
    let style = &manifest.style;
    if station.coords.len() == 1 && !station.is_interchange() {
        let center = flip(station.center);
        writeln!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            center.x(),
            center.y(),
            style.station_radius,
            Color::WHITE,
            station.colors[0],
            style.station_stroke_width
        )?;
        return Ok(());
    }

    // Interchanges and long stations get a rounded frame around every platform
    let r = manifest.frame_radius;
    let (half_width, half_height) = station.frame_half_size(r);
    let top_left = flip(station.center.offset(-half_width, half_height));
    let stroke = if station.is_interchange() {
        style.interchange_stroke
    } else {
        station.colors[0]
    };
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        top_left.x(),
        top_left.y(),
        2.0 * half_width,
        2.0 * half_height,
        r,
        Color::WHITE,
        stroke,
        style.station_stroke_width
    )?;

    // One dot per line stopping here, in the order clustering settled on
    if station.is_interchange() {
        let pts = station.platform_points(style.platform_spacing);
        for ((pt, color), sub_color) in pts
            .into_iter()
            .zip(station.colors.iter())
            .zip(station.sub_colors.iter())
        {
            let pt = flip(pt);
            writeln!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                pt.x(),
                pt.y(),
                style.platform_radius,
                color
            )?;
            if let Some(sub_color) = sub_color {
                writeln!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    pt.x(),
                    pt.y(),
                    style.platform_radius / 2.0,
                    sub_color
                )?;
            }
        }
    }
    Ok(())
}

fn draw_label(svg: &mut String, station: &Station, manifest: &Manifest) -> Result<()> {
    if station.name.is_empty() {
        return Ok(());
    }
    let (anchor, alignment, direction) = match (
        station.label_anchor(manifest.frame_radius),
        station.label_alignment(),
        station.label_direction,
    ) {
        (Some(anchor), Some(alignment), Some(direction)) => (anchor, alignment, direction),
        _ => return Ok(()),
    };
    let text_anchor = match alignment {
        LabelAlignment::Start => "start",
        LabelAlignment::Middle => "middle",
        LabelAlignment::End => "end",
    };
    // Labels above the station grow upwards, labels below grow downwards
    let (_, dy) = direction.unit_vector();
    let baseline = if dy > 0.0 {
        "text-after-edge"
    } else if dy < 0.0 {
        "text-before-edge"
    } else {
        "middle"
    };

    let lines = name_lines(&station.name);
    let font_size = manifest.style.font_size;
    // Stack lines away from the station when the label is above it
    let first_line_y = if dy > 0.0 {
        -(lines.len() as f64 - 1.0) * font_size
    } else if dy < 0.0 {
        0.0
    } else {
        -(lines.len() as f64 - 1.0) * font_size / 2.0
    };
    let pt = flip(anchor);
    write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="{}" dominant-baseline="{}">"#,
        pt.x(),
        pt.y() + first_line_y,
        text_anchor,
        baseline
    )?;
    write_tspans(svg, pt.x(), &lines, font_size)?;
    writeln!(svg, "</text>")?;
    Ok(())
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use abstutil::Timer;
    use geom::{Direction, GridPt};
    use metro_model::{
        AreaLabel, GeoShape, Geography, MetroLine, RouteType, Sign, StationAnchor,
    };

    use super::*;
    use crate::manifest::Style;

    fn anchor(name: &str, x: i64, y: i64, travel: Direction, label: Direction) -> StationAnchor {
        StationAnchor {
            pos: GridPt::new(x, y),
            travel,
            label: Some(label),
            name: BilingualName::new(name, "站"),
            sign: Sign::Station,
        }
    }

    fn manifest(geography: Geography) -> Manifest {
        Manifest {
            name: "Test".to_string(),
            arc_radius: 0.5,
            frame_radius: 0.5,
            style: Style::default(),
            lines: Vec::new(),
            geography,
        }
    }

    fn small_map() -> MetroMap {
        let lines = vec![MetroLine {
            id: 1,
            name: "Red & Blue".to_string(),
            name_chn: None,
            color: Color(228, 0, 43),
            sub_color: Some(Color::WHITE),
            route_type: RouteType::Line,
            arc_radius: 0.5,
            anchors: vec![
                anchor("West", 0, 0, Direction::E, Direction::S),
                anchor("North <1>", 2, 2, Direction::N, Direction::E),
            ],
        }];
        MetroMap::build(&lines, &mut Timer::throwaway()).unwrap()
    }

    #[test]
    fn draw_small_map() {
        let svg = render_svg(&small_map(), &manifest(Geography::default())).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        // The main stroke and the sub-color stripe
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(r#"d="M 0 0 L 1.5 0 A 0.5 0.5 0 0 0 2 -0.5 L 2 -2""#));
        assert!(svg.contains("<title>Red &amp; Blue</title>"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("North &lt;1&gt;"));
        assert!(svg.contains(r#"text-anchor="start""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(!svg.contains(r#"<g id="geography">"#));
    }

    #[test]
    fn interchange_gets_a_dot_per_line() {
        let lines = vec![
            MetroLine {
                id: 1,
                name: "Red".to_string(),
                name_chn: Some("红线".to_string()),
                color: Color(228, 0, 43),
                sub_color: None,
                route_type: RouteType::Line,
                arc_radius: 0.5,
                anchors: vec![
                    anchor("West", 0, 2, Direction::E, Direction::S),
                    anchor("Cross", 2, 2, Direction::E, Direction::SE),
                    anchor("East", 4, 2, Direction::E, Direction::S),
                ],
            },
            MetroLine {
                id: 2,
                name: "Green".to_string(),
                name_chn: Some("绿线".to_string()),
                color: Color(0, 150, 64),
                sub_color: Some(Color::WHITE),
                route_type: RouteType::Line,
                arc_radius: 0.5,
                anchors: vec![
                    anchor("South", 2, 0, Direction::N, Direction::E),
                    anchor("Cross", 2, 2, Direction::N, Direction::SE),
                    anchor("North", 2, 4, Direction::N, Direction::E),
                ],
            },
        ];
        let map = MetroMap::build(&lines, &mut Timer::throwaway()).unwrap();
        let svg = render_svg(&map, &manifest(Geography::default())).unwrap();
        assert!(svg.contains("<title>Green (绿线)</title>"));
        // 4 ordinary stations, a dot for each line at the interchange, and the sub-color dot
        assert_eq!(svg.matches("<circle").count(), 4 + 2 + 1);
        let red = svg
            .find(r##"<circle cx="1.75" cy="-2" r="0.2" fill="#e4002b"/>"##)
            .unwrap();
        let green = svg
            .find(r##"<circle cx="2.25" cy="-2" r="0.2" fill="#009640"/>"##)
            .unwrap();
        let stripe = svg
            .find(r##"<circle cx="2.25" cy="-2" r="0.1" fill="#ffffff"/>"##)
            .unwrap();
        assert!(red < green && green < stripe);
        // The frame is still drawn underneath
        assert!(svg.find(r#"rx="0.5""#).unwrap() < red);
    }

    #[test]
    fn geography_goes_underneath() {
        let geography = Geography {
            shapes: vec![
                GeoShape {
                    kind: ShapeKind::River,
                    name: Some("Pearl".to_string()),
                    arc_radius: 1.0,
                    width: Some(0.6),
                    points: vec![(0.0, -2.0), (6.0, -2.0)],
                    frame_corners: Vec::new(),
                },
                GeoShape {
                    kind: ShapeKind::Island,
                    name: None,
                    arc_radius: 1.0,
                    width: None,
                    points: vec![(4.0, 4.0), (8.0, 4.0), (8.0, 8.0), (4.0, 8.0)],
                    frame_corners: Vec::new(),
                },
            ],
            labels: vec![AreaLabel {
                kind: AreaKind::Water,
                name: BilingualName::new("Still Lake", "静湖"),
                center: (6.0, 6.0),
            }],
        };
        let svg = render_svg(&small_map(), &manifest(geography)).unwrap();
        assert_eq!(svg.matches("<path").count(), 2 + 2);

        // Land before rivers, no matter the order they're listed in
        let island = svg.find(r#"<path d="M 5 -4 "#).unwrap();
        let river = svg
            .find(r##"<path d="M 0 2 L 6 2" fill="none" stroke="#d9ebf7" stroke-width="0.6""##)
            .unwrap();
        assert!(island < river);
        let label = svg
            .find(r##"<text x="6" y="-6.75" fill="#5dbcda"><tspan x="6" dy="0">静湖</tspan>"##)
            .unwrap();
        assert!(river < label);
        assert!(label < svg.find(r#"<g id="routes""#).unwrap());
        // The island sticks out past the routes
        assert!(svg.contains(r#"viewBox="-3 -11 14 16""#));
    }

    #[test]
    fn escaping() {
        assert_eq!(escape(r#"A & "B""#), "A &amp; &quot;B&quot;");
    }
}
