//! Single-source shortest paths driven by [`IndexedPriorityQueue`].
//!
//! Every vertex is queued up front at its tentative distance. The closest
//! vertex is popped, its out-neighbors are relaxed in insertion order, and
//! improved neighbors are re-keyed with
//! [`IndexedPriorityQueue::change_priority`]. With unit weights the popped
//! distance is final, so a relaxation never targets a vertex that has
//! already left the queue.

use std::fmt;
use std::hash::Hash;

use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexIndex};
use crate::paths::distance::Distance;
use crate::queue::IndexedPriorityQueue;

/// Distances and predecessor links from one source vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree<V: Eq + Hash> {
    index: VertexIndex<V>,
    source: usize,
    distances: Vec<Distance>,
    previous: Vec<Option<usize>>,
}

impl<V> ShortestPathTree<V>
where
    V: Clone + Eq + Hash,
{
    /// The vertex the tree is rooted at.
    #[must_use]
    pub fn source(&self) -> &V {
        &self.index.keys()[self.source]
    }

    /// The vertex enumeration backing the tree.
    #[must_use]
    pub const fn index(&self) -> &VertexIndex<V> {
        &self.index
    }

    /// Predecessor of `v` on a shortest path from the source.
    ///
    /// `None` for the source itself, for unreached vertices, and for keys
    /// that are not in the graph.
    #[must_use]
    pub fn predecessor(&self, v: &V) -> Option<&V> {
        let slot = self.index.position(v)?;
        self.previous[slot].and_then(|p| self.index.vertex(p))
    }

    /// Shortest distance from the source to `v`. Unknown keys are
    /// unreachable.
    #[must_use]
    pub fn distance(&self, v: &V) -> Distance {
        self.index
            .position(v)
            .map_or(Distance::Unreachable, |slot| self.distances[slot])
    }

    #[must_use]
    pub fn is_reachable(&self, v: &V) -> bool {
        self.distance(v).is_finite()
    }

    /// Vertex sequence of a shortest path from the source to `target`, both
    /// ends included. `None` when `target` is unreached or unknown.
    #[must_use]
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        let mut slot = self.index.position(target)?;
        if !self.distances[slot].is_finite() {
            return None;
        }

        let mut path = vec![self.index.keys()[slot].clone()];
        while slot != self.source {
            slot = self.previous[slot]?;
            path.push(self.index.keys()[slot].clone());
        }
        path.reverse();
        Some(path)
    }

    /// `(vertex, predecessor)` for every vertex, in index order.
    pub fn predecessors(&self) -> impl Iterator<Item = (&V, Option<&V>)> + '_ {
        self.index.entries().map(|(slot, v)| {
            (v, self.previous[slot].and_then(|p| self.index.vertex(p)))
        })
    }

    /// `(vertex, distance)` for every vertex, in index order.
    pub fn distances(&self) -> impl Iterator<Item = (&V, Distance)> + '_ {
        self.index
            .entries()
            .map(|(slot, v)| (v, self.distances[slot]))
    }
}

/// Compute shortest directed-path lengths from `source` to every vertex,
/// treating every edge as one hop.
///
/// # Errors
///
/// Returns [`Error::MissingVertex`] if `source` is not a vertex of `graph`.
#[instrument(skip(graph), fields(vertices = graph.num_vertices()))]
pub fn single_source_paths<V>(graph: &Graph<V>, source: &V) -> Result<ShortestPathTree<V>>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    let index = VertexIndex::from_graph(graph);
    let source_slot = index
        .position(source)
        .ok_or_else(|| Error::missing_vertex(source))?;
    let adjacency = index.compact_adjacency(graph);
    let n = index.len();

    let mut distances = vec![Distance::Unreachable; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    distances[source_slot] = Distance::ZERO;

    let mut queue = IndexedPriorityQueue::with_capacity(n);
    for (slot, distance) in distances.iter().enumerate() {
        queue.push(distance.as_priority(), slot)?;
    }

    let mut settled = 0_usize;
    while !queue.is_empty() {
        let (_, u) = queue.pop()?;
        let through_u = distances[u];
        if !through_u.is_finite() {
            // Everything still queued is unreachable too.
            continue;
        }
        settled += 1;

        let alt = through_u.successor();
        for &v in &adjacency[u] {
            if alt < distances[v] {
                trace!(from = u, to = v, distance = %alt, "relaxed");
                distances[v] = alt;
                previous[v] = Some(u);
                queue.change_priority(alt.as_priority(), &v)?;
            }
        }
    }

    debug!(settled, unreachable = n - settled, "single-source paths computed");

    Ok(ShortestPathTree {
        index,
        source: source_slot,
        distances,
        previous,
    })
}
