//! Street graph construction from Overpass elements

use geo::{Destination, Distance, Haversine, Intersects, LineString, Point, Rect, coord};
use hashbrown::HashMap;
use log::{debug, info};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;

use super::elements::OsmElement;
use crate::model::{OsmElementType, StreetEdge, StreetGraph, StreetNode};
use crate::Error;

/// Bounding box extending `dist_m` meters north, south, east and west of `center`
pub fn bbox_around(center: Point<f64>, dist_m: f64) -> Rect<f64> {
    let north = Haversine.destination(center, 0.0, dist_m);
    let east = Haversine.destination(center, 90.0, dist_m);
    let south = Haversine.destination(center, 180.0, dist_m);
    let west = Haversine.destination(center, 270.0, dist_m);

    Rect::new(
        coord! { x: west.x(), y: south.y() },
        coord! { x: east.x(), y: north.y() },
    )
}

/// Builds the walking graph from ways and nodes inside `bbox`.
///
/// Every consecutive node pair of a way becomes a segment in both
/// directions. Nodes outside `bbox` are dropped with their segments, and
/// only the largest connected component is kept. Edge times are left at
/// zero for [`annotate_walking_time`](crate::loading::annotate_walking_time).
///
/// # Errors
///
/// Returns an error if no walkable segment remains
pub fn create_street_graph(elements: &[OsmElement], bbox: Rect<f64>) -> Result<StreetGraph, Error> {
    let locations: HashMap<i64, Point<f64>> = elements
        .iter()
        .filter(|e| e.elem_type == OsmElementType::Node)
        .filter_map(|e| e.point().map(|p| (e.id, p)))
        .filter(|(_, p)| bbox.intersects(p))
        .collect();

    debug!("{} street nodes inside the search area", locations.len());

    let mut graph = DiGraph::new();
    let mut osm_to_node: HashMap<i64, NodeIndex> = HashMap::new();
    let mut way_count = 0;

    for way in elements
        .iter()
        .filter(|e| e.elem_type == OsmElementType::Way)
    {
        let Some(node_refs) = &way.nodes else {
            continue;
        };

        for pair in node_refs.windows(2) {
            let (from_id, to_id) = (pair[0], pair[1]);
            if from_id == to_id {
                continue;
            }
            let (Some(&from), Some(&to)) = (locations.get(&from_id), locations.get(&to_id)) else {
                continue;
            };

            let from_idx = *osm_to_node.entry(from_id).or_insert_with(|| {
                graph.add_node(StreetNode {
                    osm_id: from_id,
                    geometry: from,
                })
            });
            let to_idx = *osm_to_node.entry(to_id).or_insert_with(|| {
                graph.add_node(StreetNode {
                    osm_id: to_id,
                    geometry: to,
                })
            });

            let length = Haversine.distance(from, to);
            let forward = StreetEdge {
                length,
                time: 0.0,
                geometry: LineString::from(vec![from, to]),
            };
            let backward = StreetEdge {
                length,
                time: 0.0,
                geometry: LineString::from(vec![to, from]),
            };
            graph.add_edge(from_idx, to_idx, forward);
            graph.add_edge(to_idx, from_idx, backward);
        }
        way_count += 1;
    }

    if graph.edge_count() == 0 {
        return Err(Error::InvalidData(
            "No walkable street segments found in the search area".to_string(),
        ));
    }

    let graph = retain_largest_component(graph);
    info!(
        "Built street graph with {} nodes and {} edges from {way_count} ways",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(StreetGraph::new(graph))
}

/// Drops every node outside the largest weakly connected component
fn retain_largest_component(
    graph: DiGraph<StreetNode, StreetEdge>,
) -> DiGraph<StreetNode, StreetEdge> {
    let mut components = UnionFind::new(graph.node_count());
    for edge in graph.raw_edges() {
        components.union(edge.source().index(), edge.target().index());
    }

    let labels = components.into_labeling();
    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for &label in &labels {
        *sizes.entry(label).or_default() += 1;
    }

    let Some(largest) = sizes
        .iter()
        .max_by_key(|&(label, size)| (*size, std::cmp::Reverse(*label)))
        .map(|(label, _)| *label)
    else {
        return graph;
    };

    if sizes.len() > 1 {
        debug!(
            "Dropping {} disconnected street components",
            sizes.len() - 1
        );
    }

    graph.filter_map(
        |idx, node| (labels[idx.index()] == largest).then(|| node.clone()),
        |_, edge| Some(edge.clone()),
    )
}
