//! File outputs besides the SVG map

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use walkshed_core::Isochrone;
use walkshed_core::algo::BoundingBox;
use walkshed_core::model::amenities_to_geojson;
use wkt::ToWkt;

/// Bounding box as a WKT polygon
pub fn bbox_wkt(bbox: &BoundingBox) -> String {
    bbox.to_rect().to_polygon().to_wkt().to_string()
}

pub fn write_geojson(isochrone: &Isochrone, path: &Path) -> Result<()> {
    let collection = amenities_to_geojson(&isochrone.amenities)?;
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &collection)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_tally_csv(isochrone: &Isochrone, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    isochrone.tally().write_csv(BufWriter::new(file))?;
    Ok(())
}

/// File name for a garage map, e.g. `bricktown-parking-garage.svg`
pub fn svg_file_name(garage: &str) -> String {
    let slug: String = garage
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    format!("{slug}.svg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garage_file_names() {
        assert_eq!(svg_file_name("Bricktown Parking Garage"), "bricktown-parking-garage.svg");
        assert_eq!(svg_file_name("1234 Library St."), "1234-library-st.svg");
    }

    #[test]
    fn bbox_polygon_wkt() {
        let bbox = BoundingBox {
            north: 2.0,
            south: 1.0,
            east: 4.0,
            west: 3.0,
        };
        let wkt = bbox_wkt(&bbox);
        assert!(wkt.starts_with("POLYGON(("), "{wkt}");
        assert!(wkt.contains("3 1"));
        assert!(wkt.contains("4 2"));
    }
}
