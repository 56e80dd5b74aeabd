#![no_main]

use hopgraph_core::{Graph, all_pairs_distances, single_source_paths};
use libfuzzer_sys::fuzz_target;

// Byte pairs are edges between up to 16 vertices.
fuzz_target!(|data: &[u8]| {
    let mut graph = Graph::new();
    for pair in data.chunks_exact(2) {
        let (u, v) = (pair[0] % 16, pair[1] % 16);
        graph.add_vertex(u);
        graph.add_vertex(v);
        let _ = graph.add_edge(u, v);
    }

    let matrix = all_pairs_distances(&graph);
    let sources: Vec<u8> = graph.vertices().copied().collect();
    for source in sources {
        let Ok(tree) = single_source_paths(&graph, &source) else {
            continue;
        };
        for target in graph.vertices() {
            assert_eq!(tree.distance(target), matrix.distance(&source, target));
        }
    }
});
