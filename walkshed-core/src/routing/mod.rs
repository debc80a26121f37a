//! Shortest walking times over the street graph

pub mod dijkstra;

pub use dijkstra::dijkstra_path_weights;
