//! Raw Overpass JSON elements

use std::collections::HashMap;

use geo::{Coord, Point};
use serde::Deserialize;

use crate::model::OsmElementType;

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    pub(crate) elements: Vec<OsmElement>,
}

/// Node, way or relation as returned by Overpass with `out body` or `out geom`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type")]
    pub elem_type: OsmElementType,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Node references of a way
    pub nodes: Option<Vec<i64>>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    /// Way geometry (`out geom`)
    pub geometry: Option<Vec<LatLon>>,
    /// Relation members (`out geom`)
    pub members: Option<Vec<ElementMember>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<LatLon> for Coord<f64> {
    fn from(value: LatLon) -> Self {
        Coord {
            x: value.lon,
            y: value.lat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementMember {
    #[serde(rename = "type")]
    pub member_type: OsmElementType,
    #[serde(rename = "ref")]
    pub reference: i64,
    #[serde(default)]
    pub role: String,
    pub geometry: Option<Vec<LatLon>>,
}

impl OsmElement {
    pub fn node(id: i64, lat: f64, lon: f64) -> Self {
        Self {
            elem_type: OsmElementType::Node,
            id,
            lat: Some(lat),
            lon: Some(lon),
            nodes: None,
            tags: HashMap::new(),
            geometry: None,
            members: None,
        }
    }

    pub fn way(id: i64, nodes: Vec<i64>) -> Self {
        Self {
            elem_type: OsmElementType::Way,
            id,
            lat: None,
            lon: None,
            nodes: Some(nodes),
            tags: HashMap::new(),
            geometry: None,
            members: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Vec<LatLon>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Location of a node element
    pub fn point(&self) -> Option<Point<f64>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}
