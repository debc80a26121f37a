use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::{LineString, point};
use petgraph::graph::DiGraph;
use walkshed_core::algo::ego_subgraph;
use walkshed_core::model::{StreetEdge, StreetGraph, StreetNode};

/// Square street grid with 80 m blocks around downtown Detroit
fn grid(side: usize) -> StreetGraph {
    let mut graph = DiGraph::new();
    let nodes: Vec<_> = (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            graph.add_node(StreetNode {
                osm_id: i as i64,
                geometry: point!(x: -83.06 + col as f64 * 0.001, y: 42.32 + row as f64 * 0.00072),
            })
        })
        .collect();

    let edge = StreetEdge {
        length: 80.0,
        time: 80.0 / 75.0,
        geometry: LineString::new(vec![]),
    };
    for i in 0..side * side {
        let (row, col) = (i / side, i % side);
        let mut link = |j: usize| {
            graph.add_edge(nodes[i], nodes[j], edge.clone());
            graph.add_edge(nodes[j], nodes[i], edge.clone());
        };
        if col + 1 < side {
            link(i + 1);
        }
        if row + 1 < side {
            link(i + side);
        }
    }

    StreetGraph::new(graph)
}

fn bench_isochrone(c: &mut Criterion) {
    let streets = grid(60);
    let origin = streets
        .nearest_node(&point!(x: -83.03, y: 42.3416))
        .expect("grid is not empty");

    let mut group = c.benchmark_group("ego_subgraph");
    for minutes in [5.0, 15.0] {
        group.bench_function(format!("{minutes} min"), |b| {
            b.iter(|| ego_subgraph(black_box(&streets), origin, black_box(minutes)))
        });
    }
    group.finish();

    c.bench_function("nearest_node", |b| {
        b.iter(|| streets.nearest_node(black_box(&point!(x: -83.041, y: 42.335))))
    });
}

criterion_group!(benches, bench_isochrone);
criterion_main!(benches);
