//! Amenity geometries from Overpass `out geom` elements

use geo::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use log::debug;

use super::elements::{LatLon, OsmElement};
use crate::model::{Amenity, OsmElementType};

/// Converts tagged elements to amenities, skipping those without usable geometry
pub fn amenities_from_elements(elements: &[OsmElement]) -> Vec<Amenity> {
    let mut skipped = 0usize;

    let amenities: Vec<Amenity> = elements
        .iter()
        .filter_map(|element| {
            let category = element.tag("amenity")?;
            let Some(geometry) = element_geometry(element) else {
                skipped += 1;
                return None;
            };

            Some(Amenity {
                element: element.elem_type,
                osm_id: element.id,
                category: category.to_string(),
                name: element.tag("name").map(str::to_string),
                geometry,
            })
        })
        .collect();

    if skipped > 0 {
        debug!("Skipped {skipped} amenities without geometry");
    }

    amenities
}

fn element_geometry(element: &OsmElement) -> Option<Geometry<f64>> {
    match element.elem_type {
        OsmElementType::Node => element.point().map(Geometry::Point),
        OsmElementType::Way => way_geometry(element.geometry.as_deref()?),
        OsmElementType::Relation => {
            let polygons: Vec<Polygon<f64>> = element
                .members
                .as_deref()?
                .iter()
                .filter(|member| member.role == "outer")
                .filter_map(|member| closed_ring(member.geometry.as_deref()?))
                .map(|ring| Polygon::new(ring, vec![]))
                .collect();

            (!polygons.is_empty()).then(|| Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
    }
}

fn way_geometry(points: &[LatLon]) -> Option<Geometry<f64>> {
    if points.len() < 2 {
        return points
            .first()
            .map(|p| Geometry::Point(Coord::from(*p).into()));
    }

    match closed_ring(points) {
        Some(ring) => Some(Geometry::Polygon(Polygon::new(ring, vec![]))),
        None => Some(Geometry::LineString(to_line_string(points))),
    }
}

fn closed_ring(points: &[LatLon]) -> Option<LineString<f64>> {
    let closed = points.len() >= 4 && points.first() == points.last();
    closed.then(|| to_line_string(points))
}

fn to_line_string(points: &[LatLon]) -> LineString<f64> {
    points.iter().map(|p| Coord::from(*p)).collect()
}
