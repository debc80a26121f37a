//! Points of interest tagged with `amenity` in OpenStreetMap

use std::fmt;

use geo::{Centroid, Geometry, Point};
use geojson::{Feature, FeatureCollection, Geometry as GeoJsonGeometry};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::Error;

/// Kind of OSM element an amenity was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmElementType {
    Node,
    Way,
    Relation,
}

impl fmt::Display for OsmElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsmElementType::Node => "node",
            OsmElementType::Way => "way",
            OsmElementType::Relation => "relation",
        };
        f.write_str(name)
    }
}

/// Amenity feature with its geometry and category
#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
    pub element: OsmElementType,
    pub osm_id: i64,
    /// Value of the `amenity` tag, e.g. `cafe`
    pub category: String,
    pub name: Option<String>,
    pub geometry: Geometry<f64>,
}

impl Amenity {
    /// Location used to draw the amenity as a single marker
    pub fn representative_point(&self) -> Option<Point<f64>> {
        match &self.geometry {
            Geometry::Point(point) => Some(*point),
            other => other.centroid(),
        }
    }

    pub fn to_feature(&self) -> Result<Feature, Error> {
        let geometry = GeoJsonGeometry::from(&self.geometry);

        let value = json!({
            "type": "Feature",
            "id": format!("{}/{}", self.element, self.osm_id),
            "geometry": geometry,
            "properties": {
                "amenity": self.category,
                "name": self.name,
                "osm_type": self.element,
                "osm_id": self.osm_id,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Converts amenities to a `GeoJSON` `FeatureCollection`.
pub fn amenities_to_geojson(amenities: &[Amenity]) -> Result<FeatureCollection, Error> {
    let features = amenities
        .iter()
        .map(Amenity::to_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}
