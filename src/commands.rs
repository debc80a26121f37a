use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use tracing::info;
use walkshed_core::config::Settings;
use walkshed_core::render::{RenderOptions, save_isochrone_svg};
use walkshed_core::{
    CityData, Geocoder, Isochrone, bulk_isochrones, load_city_data, walking_isochrone,
};

use crate::cli::{Cli, Operation};
use crate::export::{bbox_wkt, svg_file_name, write_geojson, write_tally_csv};

pub fn run(args: Cli) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())
        .context("Failed to read settings")?;

    match args.op {
        Operation::Garages => {
            for garage in &settings.garages {
                println!("{:<28}{}", garage.name, garage.address);
            }
            Ok(())
        }
        Operation::Render {
            garage,
            minutes,
            out,
            geojson,
            tally_csv,
        } => {
            let garage = settings
                .garage(&garage)
                .ok_or_else(|| anyhow!("Unknown parking structure {garage:?}; see `walkshed garages`"))?
                .clone();
            let geocoder = settings.nominatim_geocoder()?;
            let city = load(&settings, &geocoder)?;

            let isochrone = walking_isochrone(
                &city,
                &geocoder,
                &garage.address,
                f64::from(minutes),
                &garage.name,
            )?;
            save_isochrone_svg(&isochrone, &RenderOptions::default(), &out)?;

            if let Some(path) = &geojson {
                write_geojson(&isochrone, path)?;
            }
            if let Some(path) = &tally_csv {
                write_tally_csv(&isochrone, path)?;
            }
            print_summary(&isochrone);
            Ok(())
        }
        Operation::RenderAll { minutes, out_dir } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;
            let geocoder = settings.nominatim_geocoder()?;
            let city = load(&settings, &geocoder)?;

            let origins: Vec<(String, String)> = settings
                .garages
                .iter()
                .map(|garage| (garage.name.clone(), garage.address.clone()))
                .collect();
            let isochrones = bulk_isochrones(&city, &geocoder, &origins, f64::from(minutes))?;

            isochrones
                .par_iter()
                .try_for_each(|isochrone| write_map(isochrone, &out_dir))?;
            for isochrone in &isochrones {
                print_summary(isochrone);
            }
            Ok(())
        }
    }
}

fn load(settings: &Settings, geocoder: &dyn Geocoder) -> Result<CityData> {
    let source = settings.overpass_client()?;
    load_city_data(&settings.load_config(), &source, geocoder)
        .with_context(|| format!("Failed to load city data around {}", settings.data.center_address))
}

fn write_map(isochrone: &Isochrone, dir: &Path) -> Result<()> {
    let path = dir.join(svg_file_name(&isochrone.label));
    save_isochrone_svg(isochrone, &RenderOptions::default(), &path)?;
    Ok(())
}

fn print_summary(isochrone: &Isochrone) {
    println!(
        "The following amenities can be within {} minutes of {}.",
        isochrone.budget, isochrone.label
    );
    info!(
        "{} street nodes reachable, bounding box {}",
        isochrone.subgraph.node_count(),
        bbox_wkt(&isochrone.bbox)
    );

    let tally = isochrone.tally();
    if tally.is_empty() {
        println!("  (none)");
    }
    for count in tally.counts() {
        println!("  {:<24}{:>5}", count.category, count.count);
    }
}
