//! Street network components - nodes and edges

use geo::{LineString, Point};

use crate::Minutes;

/// Street graph node
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    /// OSM ID of the node
    pub osm_id: i64,
    /// Node coordinates, `x` is longitude and `y` latitude
    pub geometry: Point<f64>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone, PartialEq)]
pub struct StreetEdge {
    /// Physical length in meters
    pub length: f64,
    /// Walking time in minutes, zero until the graph is annotated
    pub time: Minutes,
    /// Segment geometry for drawing
    pub geometry: LineString<f64>,
}

impl StreetEdge {
    pub fn walking_time(&self) -> Minutes {
        self.time
    }
}
