//! Summary statistics for a [`Graph`].
//!
//! # Statistics Provided
//!
//! - **density**: `edge_count / (vertex_count * (vertex_count - 1))`. A
//!   complete directed graph has density 1.0; graphs with fewer than two
//!   vertices have density 0.0. Self-loops count as edges but not towards
//!   the maximum, so they can push density above 1.0.
//! - **max_degree**: the vertex with the most out-edges (lowest key on ties)
//!   and its degree.
//! - **diameter**: the largest finite shortest-path length over all ordered
//!   pairs.
//! - **average_path_length**: mean shortest-path length over ordered pairs
//!   of distinct vertices that are connected. Unreachable pairs are counted
//!   separately and do not contribute.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use tracing::instrument;

use crate::graph::Graph;
use crate::paths::{DistanceMatrix, all_pairs_distances};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a directed graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats<V> {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// 0.0 with no edges, 1.0 when every ordered pair of distinct vertices
    /// is connected. Self-loops can push it above 1.0.
    pub density: f64,
    /// `(vertex, out-degree)`; `None` only for an empty graph.
    pub max_degree: Option<(V, usize)>,
    /// `None` for an empty graph.
    pub diameter: Option<u32>,
    /// `None` when no two distinct vertices are connected.
    pub average_path_length: Option<f64>,
    /// Ordered pairs `(u, v)`, `u != v`, with a path from `u` to `v`.
    pub reachable_pairs: usize,
    /// Ordered pairs `(u, v)`, `u != v`, with no path from `u` to `v`.
    pub unreachable_pairs: usize,
}

impl<V> GraphStats<V>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    /// Compute statistics, running [`all_pairs_distances`] once.
    #[must_use]
    #[instrument(skip(graph), fields(vertices = graph.num_vertices()))]
    pub fn compute(graph: &Graph<V>) -> Self {
        let matrix = all_pairs_distances(graph);
        Self::from_matrix(graph, &matrix)
    }

    /// Compute statistics from an already computed distance matrix of
    /// `graph`.
    #[must_use]
    pub fn from_matrix(graph: &Graph<V>, matrix: &DistanceMatrix<V>) -> Self {
        let vertex_count = graph.num_vertices();
        let edge_count = graph.num_edges();

        let mut diameter: Option<u32> = None;
        let mut total: u64 = 0;
        let mut reachable_pairs = 0_usize;
        let mut unreachable_pairs = 0_usize;

        for (i, row) in matrix.rows().take(matrix.len()).enumerate() {
            for (j, distance) in row.iter().enumerate() {
                let Some(d) = distance.finite() else {
                    unreachable_pairs += 1;
                    continue;
                };
                diameter = Some(diameter.map_or(d, |best| best.max(d)));
                if i != j {
                    reachable_pairs += 1;
                    total += u64::from(d);
                }
            }
        }

        Self {
            vertex_count,
            edge_count,
            density: compute_density(vertex_count, edge_count),
            max_degree: graph
                .max_degree_entry()
                .map(|(v, degree)| (v.clone(), degree)),
            diameter,
            average_path_length: compute_mean(total, reachable_pairs),
            reachable_pairs,
            unreachable_pairs,
        }
    }

    /// Return `true` if every vertex can reach every other vertex.
    #[must_use]
    pub const fn is_strongly_connected(&self) -> bool {
        self.unreachable_pairs == 0
    }
}

// ---------------------------------------------------------------------------
// Internal helpers (cast precision suppressed at function scope)
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (vertex_count * (vertex_count - 1)) as f64;
    edge_count as f64 / max_edges
}

#[allow(clippy::cast_precision_loss)]
fn compute_mean(total: u64, pairs: usize) -> Option<f64> {
    (pairs > 0).then(|| total as f64 / pairs as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
