//! Street graph with a spatial index for snapping coordinates to nodes

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};
use petgraph::Directed;
use petgraph::graph::{DiGraph, Edges};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::{StreetEdge, StreetNode};
use crate::{Error, StreetNodeId};

/// Node position in local meters tagged with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], StreetNodeId>;

const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Equirectangular projection around a reference coordinate.
///
/// Accurate enough for nearest-node lookups over a few kilometers, which is
/// all the walking network ever spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: Coord<f64>,
    meters_per_degree_lon: f64,
}

impl LocalProjection {
    pub fn new(origin: Coord<f64>) -> Self {
        Self {
            origin,
            meters_per_degree_lon: METERS_PER_DEGREE_LAT * origin.y.to_radians().cos(),
        }
    }

    fn from_nodes<'a>(nodes: impl Iterator<Item = &'a StreetNode>) -> Self {
        let points: MultiPoint = nodes.map(|node| node.geometry).collect();
        let origin = points
            .bounding_rect()
            .map_or(Coord { x: 0.0, y: 0.0 }, |rect| rect.center());
        Self::new(origin)
    }

    /// Projects a lon/lat point into meters east and north of the origin
    pub fn project(&self, point: &Point<f64>) -> [f64; 2] {
        [
            (point.x() - self.origin.x) * self.meters_per_degree_lon,
            (point.y() - self.origin.y) * METERS_PER_DEGREE_LAT,
        ]
    }
}

/// Walkable street network
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    projection: LocalProjection,
}

impl StreetGraph {
    pub fn new(graph: DiGraph<StreetNode, StreetEdge>) -> Self {
        let projection = LocalProjection::from_nodes(graph.node_weights());
        let rtree = build_rtree(&graph, &projection);
        Self {
            graph,
            rtree,
            projection,
        }
    }

    pub fn graph(&self) -> &DiGraph<StreetNode, StreetEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, node: StreetNodeId) -> Result<&StreetNode, Error> {
        self.graph.node_weight(node).ok_or(Error::InvalidNodeIndex)
    }

    /// Outgoing edges of a node
    pub fn edges(&self, node: StreetNodeId) -> Edges<'_, StreetEdge, Directed> {
        self.graph.edges(node)
    }

    pub(crate) fn edge_weights_mut(&mut self) -> impl Iterator<Item = &mut StreetEdge> {
        self.graph.edge_weights_mut()
    }

    pub fn projection(&self) -> &LocalProjection {
        &self.projection
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.graph
            .node_weights()
            .map(|node| node.geometry)
            .collect::<MultiPoint>()
            .bounding_rect()
    }

    /// All nodes sharing the minimal distance to `location`, ordered by index.
    ///
    /// Coincident nodes are common in OSM data (e.g. a crossing mapped on
    /// two ways), so more than one candidate can come back.
    pub fn nearest_nodes(&self, location: &Point<f64>) -> Vec<StreetNodeId> {
        let query = self.projection.project(location);
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&query);

        let Some((first, best)) = candidates.next() else {
            return Vec::new();
        };

        let mut nodes: Vec<StreetNodeId> = std::iter::once(first.data)
            .chain(
                candidates
                    .take_while(|(_, distance)| *distance <= best)
                    .map(|(point, _)| point.data),
            )
            .collect();
        nodes.sort_unstable();
        nodes
    }

    /// Single node nearest to `location`; ties resolve to the first candidate.
    pub fn nearest_node(&self, location: &Point<f64>) -> Result<StreetNodeId, Error> {
        self.nearest_nodes(location)
            .first()
            .copied()
            .ok_or(Error::NoPointsFound)
    }
}

fn build_rtree(
    graph: &DiGraph<StreetNode, StreetEdge>,
    projection: &LocalProjection,
) -> RTree<IndexedPoint> {
    let points = graph
        .node_indices()
        .map(|idx| IndexedPoint::new(projection.project(&graph[idx].geometry), idx))
        .collect();
    RTree::bulk_load(points)
}

#[cfg(test)]
mod tests {
    use geo::{LineString, point};

    use super::*;

    fn node(osm_id: i64, lon: f64, lat: f64) -> StreetNode {
        StreetNode {
            osm_id,
            geometry: point!(x: lon, y: lat),
        }
    }

    fn edge() -> StreetEdge {
        StreetEdge {
            length: 10.0,
            time: 0.0,
            geometry: LineString::new(vec![]),
        }
    }

    #[test]
    fn nearest_node_picks_closest() {
        let mut graph = DiGraph::new();
        let a = graph.add_node(node(1, -83.05, 42.33));
        let b = graph.add_node(node(2, -83.04, 42.33));
        graph.add_edge(a, b, edge());
        let streets = StreetGraph::new(graph);

        let found = streets.nearest_node(&point!(x: -83.041, y: 42.331)).unwrap();
        assert_eq!(found, b);
    }

    #[test]
    fn coincident_nodes_resolve_to_single_id() {
        let mut graph = DiGraph::new();
        let a = graph.add_node(node(10, -83.05, 42.33));
        let b = graph.add_node(node(11, -83.05, 42.33));
        graph.add_node(node(12, -83.03, 42.34));
        let streets = StreetGraph::new(graph);
        let location = point!(x: -83.0501, y: 42.3301);

        let candidates = streets.nearest_nodes(&location);
        assert_eq!(candidates, vec![a, b]);
        assert_eq!(streets.nearest_node(&location).unwrap(), a);
    }

    #[test]
    fn empty_graph_has_no_nearest_node() {
        let streets = StreetGraph::new(DiGraph::new());
        assert!(matches!(
            streets.nearest_node(&point!(x: 0.0, y: 0.0)),
            Err(Error::NoPointsFound)
        ));
    }

    #[test]
    fn projection_is_metric_near_origin() {
        let projection = LocalProjection::new(Coord { x: -83.0, y: 42.0 });
        let [x, y] = projection.project(&point!(x: -83.0, y: 42.001));
        assert!(x.abs() < 1e-9);
        assert!((y - 111.32).abs() < 1e-6);
    }
}
