use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::{Minutes, model::StreetGraph};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: Minutes,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over outgoing walking edges.
///
/// Returns every node whose cumulative walking time from `start` is at
/// most `max_cost` (inclusive), mapped to that time in minutes. Without a
/// bound the whole reachable network is returned.
pub fn dijkstra_path_weights(
    graph: &StreetGraph,
    start: NodeIndex,
    max_cost: Option<Minutes>,
) -> HashMap<NodeIndex, Minutes> {
    let mut distances: HashMap<NodeIndex, Minutes> = HashMap::new();
    let mut heap = BinaryHeap::new();

    if graph.graph.node_weight(start).is_none() {
        return distances;
    }

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        // Examine neighbors
        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().walking_time();

            if let Some(max) = max_cost
                && next_cost > max
            {
                continue;
            }

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use geo::{LineString, point};
    use petgraph::graph::DiGraph;

    use super::*;
    use crate::model::{StreetEdge, StreetNode};

    fn edge(time: Minutes) -> StreetEdge {
        StreetEdge {
            length: time * 75.0,
            time,
            geometry: LineString::new(vec![]),
        }
    }

    fn node(osm_id: i64) -> StreetNode {
        StreetNode {
            osm_id,
            geometry: point!(x: osm_id as f64 * 0.001, y: 0.0),
        }
    }

    #[test]
    fn keeps_shortest_time_and_respects_bound() {
        let mut graph = DiGraph::new();
        let a = graph.add_node(node(1));
        let b = graph.add_node(node(2));
        let c = graph.add_node(node(3));
        let d = graph.add_node(node(4));
        graph.add_edge(a, b, edge(4.0));
        graph.add_edge(a, c, edge(1.0));
        graph.add_edge(c, b, edge(1.5));
        graph.add_edge(b, d, edge(3.0));
        let streets = StreetGraph::new(graph);

        let all = dijkstra_path_weights(&streets, a, None);
        assert_eq!(all[&b], 2.5);
        assert_eq!(all[&d], 5.5);

        let bounded = dijkstra_path_weights(&streets, a, Some(5.5));
        assert!(bounded.contains_key(&d));
        let bounded = dijkstra_path_weights(&streets, a, Some(5.0));
        assert!(!bounded.contains_key(&d));
        assert_eq!(bounded.len(), 3);
    }

    #[test]
    fn follows_edge_direction() {
        let mut graph = DiGraph::new();
        let a = graph.add_node(node(1));
        let b = graph.add_node(node(2));
        graph.add_edge(b, a, edge(1.0));
        let streets = StreetGraph::new(graph);

        let reached = dijkstra_path_weights(&streets, a, Some(10.0));
        assert_eq!(reached.len(), 1);
    }

    #[test]
    fn unknown_start_reaches_nothing() {
        let streets = StreetGraph::new(DiGraph::new());
        assert!(dijkstra_path_weights(&streets, NodeIndex::new(3), None).is_empty());
    }
}
