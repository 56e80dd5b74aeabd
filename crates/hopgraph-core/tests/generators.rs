#![allow(dead_code)]

use hopgraph_core::{Graph, Priority};
use proptest::prelude::*;

/// Random directed graph on vertices `0..n`, `n <= max_vertices`, possibly
/// with self-loops and repeated edge requests.
pub fn arb_graph(max_vertices: u32) -> impl Strategy<Value = Graph<u32>> {
    (0..=max_vertices).prop_flat_map(arb_graph_exact)
}

/// Random non-empty graph paired with one of its vertices.
pub fn arb_graph_with_source(max_vertices: u32) -> impl Strategy<Value = (Graph<u32>, u32)> {
    (1..=max_vertices).prop_flat_map(|n| (arb_graph_exact(n), 0..n))
}

fn arb_graph_exact(n: u32) -> impl Strategy<Value = Graph<u32>> {
    // An empty graph draws zero edges, so the placeholder range is never sampled.
    let endpoint = 0..n.max(1);
    let max_edges = n as usize * 3 + 1;
    prop::collection::vec((endpoint.clone(), endpoint), 0..max_edges).prop_map(move |edges| {
        let mut g = Graph::with_capacity(n as usize);
        for v in 0..n {
            g.add_vertex(v);
        }
        for (u, v) in edges {
            g.add_edge(u, v).expect("both endpoints were added");
        }
        g
    })
}

/// One mutation against an `IndexedPriorityQueue<u8>`.
#[derive(Debug, Clone)]
pub enum QueueOp {
    Push(Priority, u8),
    Pop,
    Change(Priority, u8),
}

pub fn arb_queue_op() -> impl Strategy<Value = QueueOp> {
    prop_oneof![
        3 => (0..50_i64, 0..24_u8).prop_map(|(p, e)| QueueOp::Push(p, e)),
        2 => Just(QueueOp::Pop),
        2 => (0..50_i64, 0..24_u8).prop_map(|(p, e)| QueueOp::Change(p, e)),
    ]
}

pub fn arb_queue_ops() -> impl Strategy<Value = Vec<QueueOp>> {
    prop::collection::vec(arb_queue_op(), 0..80)
}
