//! All-pairs shortest distances by dynamic programming over intermediates.
//!
//! # Algorithm
//!
//! 1. Enumerate the vertices in ascending key order ([`VertexIndex`]).
//! 2. Start from the one-hop matrix: `0` on the diagonal, `1` where an edge
//!    exists, [`Distance::Unreachable`] elsewhere.
//! 3. For every intermediate `k` (outer loop), for every pair `(i, j)`:
//!    if `d[i][k] + d[k][j] < d[i][j]`, replace `d[i][j]`.
//!
//! Complexity: O(V³) time, O(V²) space. Sums involving an unreachable
//! entry stay unreachable, so no sentinel arithmetic can wrap.

use std::fmt;
use std::hash::Hash;

use tracing::{debug, instrument};

use crate::graph::{Graph, VertexIndex};
use crate::paths::distance::Distance;

/// Square matrix of shortest-path lengths, with the vertex enumeration that
/// gives its rows and columns meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix<V: Eq + Hash> {
    index: VertexIndex<V>,
    /// Row-major `n × n` distances.
    cells: Vec<Distance>,
}

impl<V> DistanceMatrix<V>
where
    V: Clone + Eq + Hash,
{
    /// The vertex enumeration used for rows and columns.
    #[must_use]
    pub const fn index(&self) -> &VertexIndex<V> {
        &self.index
    }

    /// Number of vertices (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Distance between the vertices at dense indices `i` and `j`, or `None`
    /// if either index is out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<Distance> {
        let n = self.len();
        (i < n && j < n).then(|| self.cells[i * n + j])
    }

    /// Distance from `from` to `to`. Vertices outside the graph are
    /// unreachable.
    #[must_use]
    pub fn distance(&self, from: &V, to: &V) -> Distance {
        match (self.index.position(from), self.index.position(to)) {
            (Some(i), Some(j)) => self.cells[i * self.len() + j],
            _ => Distance::Unreachable,
        }
    }

    /// Row slices in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> + '_ {
        // `max(1)` keeps `chunks_exact` valid for the empty matrix.
        self.cells.chunks_exact(self.len().max(1))
    }

    /// Every cell as `(from, to, distance)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (&V, &V, Distance)> + '_ {
        let keys = self.index.keys();
        let n = keys.len();
        self.cells
            .iter()
            .enumerate()
            .map(move |(cell, &d)| (&keys[cell / n], &keys[cell % n], d))
    }

    /// Integer matrix with [`INFINITY_SENTINEL`](crate::INFINITY_SENTINEL)
    /// for unreachable pairs.
    #[must_use]
    pub fn to_legacy_matrix(&self) -> Vec<Vec<u32>> {
        self.rows()
            .take(self.len())
            .map(|row| row.iter().map(|d| d.as_legacy()).collect())
            .collect()
    }
}

impl<V> fmt::Display for DistanceMatrix<V>
where
    V: Clone + Eq + Hash + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().take(self.len()).enumerate() {
            if let Some(v) = self.index.vertex(i) {
                write!(f, "{v}:")?;
            }
            for d in row {
                write!(f, " {d}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Compute shortest directed-path lengths between every ordered pair of
/// vertices, treating every edge as one hop.
///
/// Rows and columns follow ascending vertex-key order; use
/// [`DistanceMatrix::index`] or [`DistanceMatrix::distance`] to interpret
/// them.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.num_vertices(), edges = graph.num_edges()))]
pub fn all_pairs_distances<V>(graph: &Graph<V>) -> DistanceMatrix<V>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    let index = VertexIndex::from_graph(graph);
    let adjacency = index.compact_adjacency(graph);
    let n = index.len();

    let mut cells = vec![Distance::Unreachable; n * n];
    for (i, neighbors) in adjacency.iter().enumerate() {
        for &j in neighbors {
            cells[i * n + j] = Distance::ONE;
        }
        cells[i * n + i] = Distance::ZERO;
    }

    for k in 0..n {
        for i in 0..n {
            let through_k = cells[i * n + k];
            if !through_k.is_finite() {
                continue;
            }
            for j in 0..n {
                let candidate = through_k + cells[k * n + j];
                if candidate < cells[i * n + j] {
                    cells[i * n + j] = candidate;
                }
            }
        }
    }

    debug!(
        reachable = cells.iter().filter(|d| d.is_finite()).count(),
        cells = cells.len(),
        "all-pairs distances computed"
    );

    DistanceMatrix { index, cells }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
