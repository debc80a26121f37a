//! Walking isochrones: the part of the street network reachable within a
//! time budget from an origin, and the amenities inside its bounding box.

use std::collections::BTreeSet;

use geo::{Centroid, MultiPoint, Point};
use hashbrown::HashMap;
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;

use super::bbox::BoundingBox;
use crate::loading::Geocoder;
use crate::model::{Amenity, CityData, StreetEdge, StreetGraph, StreetNode};
use crate::routing::dijkstra_path_weights;
use crate::summary::AmenityTally;
use crate::{Error, Minutes, StreetNodeId};

/// Induced subgraph of the nodes reachable within a walking-time budget
#[derive(Debug, Clone)]
pub struct Subgraph {
    pub streets: StreetGraph,
    /// Origin node, indexed in `streets`
    pub origin: NodeIndex,
    /// Walking time from the origin for each node of `streets`
    travel_times: Vec<Minutes>,
}

impl Subgraph {
    pub fn node_count(&self) -> usize {
        self.streets.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.streets.edge_count()
    }

    pub fn travel_time(&self, node: NodeIndex) -> Option<Minutes> {
        self.travel_times.get(node.index()).copied()
    }

    pub fn osm_node_ids(&self) -> BTreeSet<i64> {
        self.streets
            .graph()
            .node_weights()
            .map(|node| node.osm_id)
            .collect()
    }

    /// Directed segments as `(from, to)` OSM node pairs
    pub fn osm_edges(&self) -> BTreeSet<(i64, i64)> {
        let graph = self.streets.graph();
        graph
            .raw_edges()
            .iter()
            .map(|edge| (graph[edge.source()].osm_id, graph[edge.target()].osm_id))
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let origin = self.streets.graph()[self.origin].geometry;
        BoundingBox::from_points(self.streets.graph().node_weights().map(|node| node.geometry))
            .unwrap_or(BoundingBox {
                north: origin.y(),
                south: origin.y(),
                east: origin.x(),
                west: origin.x(),
            })
    }

    /// Node closest to the centroid of all subgraph nodes
    pub fn center_node(&self) -> Option<NodeIndex> {
        let points: MultiPoint = self
            .streets
            .graph()
            .node_weights()
            .map(|node| node.geometry)
            .collect();
        let centroid = points.centroid()?;
        self.streets.nearest_node(&centroid).ok()
    }
}

/// Builds the subgraph of every node within `budget` minutes of `origin`
/// together with all edges between those nodes.
///
/// # Errors
///
/// Returns an error if the budget is negative or not finite, or `origin`
/// is not a node of `streets`
pub fn ego_subgraph(
    streets: &StreetGraph,
    origin: StreetNodeId,
    budget: Minutes,
) -> Result<Subgraph, Error> {
    validate_budget(budget)?;
    streets.node(origin)?;

    let reached = dijkstra_path_weights(streets, origin, Some(budget));

    let mut order: Vec<NodeIndex> = reached.keys().copied().collect();
    order.sort_unstable();

    let mut graph: DiGraph<StreetNode, StreetEdge> = DiGraph::with_capacity(order.len(), 0);
    let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(order.len());
    let mut travel_times = Vec::with_capacity(order.len());

    for node in order {
        let idx = graph.add_node(streets.graph()[node].clone());
        remap.insert(node, idx);
        travel_times.push(reached[&node]);
    }

    for edge in streets.graph().raw_edges() {
        if let (Some(&from), Some(&to)) = (remap.get(&edge.source()), remap.get(&edge.target())) {
            graph.add_edge(from, to, edge.weight.clone());
        }
    }

    let origin = remap[&origin];
    debug!(
        "Reachable within {budget} min: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(Subgraph {
        streets: StreetGraph::new(graph),
        origin,
        travel_times,
    })
}

fn validate_budget(budget: Minutes) -> Result<(), Error> {
    if budget.is_finite() && budget >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "travel time budget must be a non-negative number of minutes, got {budget}"
        )))
    }
}

/// Result of one isochrone query
#[derive(Debug, Clone)]
pub struct Isochrone {
    /// Display name of the origin
    pub label: String,
    pub budget: Minutes,
    /// Location the origin resolved to before snapping
    pub location: Point<f64>,
    pub subgraph: Subgraph,
    pub bbox: BoundingBox,
    /// Amenities inside `bbox`
    pub amenities: Vec<Amenity>,
}

impl Isochrone {
    pub fn tally(&self) -> AmenityTally {
        AmenityTally::from_amenities(&self.amenities)
    }
}

/// Isochrone from a known location
///
/// # Errors
///
/// Returns an error if the graph is empty or the budget is invalid
pub fn isochrone_from_point(
    city: &CityData,
    location: Point<f64>,
    budget: Minutes,
    label: &str,
) -> Result<Isochrone, Error> {
    let origin = city.streets.nearest_node(&location)?;
    let subgraph = ego_subgraph(&city.streets, origin, budget)?;
    let bbox = subgraph.bounding_box();
    let amenities = bbox.filter_amenities(&city.amenities);

    debug!(
        "{} of {} amenities inside the {budget} min box of {label}",
        amenities.len(),
        city.amenities.len()
    );

    Ok(Isochrone {
        label: label.to_string(),
        budget,
        location,
        subgraph,
        bbox,
        amenities,
    })
}

/// Geocodes `address`, snaps it to the street graph and computes its isochrone
///
/// # Errors
///
/// Returns an error if the address cannot be geocoded, the graph is empty,
/// or the budget is invalid
pub fn walking_isochrone(
    city: &CityData,
    geocoder: &dyn Geocoder,
    address: &str,
    budget: Minutes,
    label: &str,
) -> Result<Isochrone, Error> {
    let location = geocoder.geocode(address)?;
    isochrone_from_point(city, location, budget, label)
}

/// Isochrones for several `(label, address)` origins
///
/// Addresses are geocoded one at a time, in order, so a rate-limited
/// geocoder such as Nominatim sees at most one request in flight. The
/// isochrones themselves are computed in parallel.
///
/// # Errors
///
/// Fails on the first origin that fails
pub fn bulk_isochrones(
    city: &CityData,
    geocoder: &dyn Geocoder,
    origins: &[(String, String)],
    budget: Minutes,
) -> Result<Vec<Isochrone>, Error> {
    let located = origins
        .iter()
        .map(|(label, address)| geocoder.geocode(address).map(|location| (label, location)))
        .collect::<Result<Vec<_>, Error>>()?;

    located
        .par_iter()
        .map(|(label, location)| isochrone_from_point(city, *location, budget, label))
        .collect()
}
