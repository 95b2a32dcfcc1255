//! Builds schematic metro maps. Each line only lists its stations and which way it passes through
//! them; the bends in between are worked out here.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod manifest;
mod render;

use anyhow::Result;
use structopt::StructOpt;

use abstutil::Timer;
use metro_model::MetroMap;

use crate::manifest::Manifest;

#[derive(StructOpt)]
#[structopt(name = "metro_cli", about = "Builds schematic metro maps")]
enum Command {
    /// Resolves every line of a manifest and draws the map as SVG
    Build {
        /// The path to a JSON manifest listing every line
        #[structopt(long)]
        manifest: String,
        /// The SVG file to write
        #[structopt(long)]
        output: String,
        /// Also write the resolved routes and stations as JSON here
        #[structopt(long)]
        json: Option<String>,
    },
    /// Resolves and validates every line, without drawing anything
    Check {
        /// The path to a JSON manifest listing every line
        #[structopt(long)]
        manifest: String,
    },
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    match Command::from_args() {
        Command::Build {
            manifest,
            output,
            json,
        } => build(manifest, output, json),
        Command::Check { manifest } => {
            let (manifest, map) = load(&manifest, &mut Timer::new("check metro map"))?;
            println!(
                "{}: {} lines, {} stations, all valid",
                manifest.name,
                map.routes.len(),
                abstutil::prettyprint_usize(map.stations.len())
            );
            Ok(())
        }
    }
}

fn load(path: &str, timer: &mut Timer) -> Result<(Manifest, MetroMap)> {
    timer.start("load manifest");
    let lines = Manifest::load(path).and_then(|manifest| {
        let lines = manifest.metro_lines(path)?;
        Ok((manifest, lines))
    });
    timer.stop("load manifest");
    let (manifest, lines) = lines?;

    let map = MetroMap::build(&lines, timer)?;
    Ok((manifest, map))
}

fn build(manifest_path: String, output: String, json: Option<String>) -> Result<()> {
    let mut timer = Timer::new(format!("build {}", abstutil::basename(&manifest_path)));
    let (manifest, map) = load(&manifest_path, &mut timer)?;

    timer.start("render SVG");
    let svg = render::render_svg(&map, &manifest);
    timer.stop("render SVG");
    fs_err::write(&output, svg?)?;
    info!("Wrote {}", output);

    if let Some(path) = json {
        abstutil::write_json(&path, &map)?;
    }
    Ok(())
}
