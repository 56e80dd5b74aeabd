//! Directed adjacency-list graph over a generic vertex key.
//!
//! Each vertex maps to the ordered list of its out-neighbors. Neighbor order
//! is edge-insertion order. Vertices are never created implicitly: both
//! endpoints of an edge must be added with [`Graph::add_vertex`] first.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// A directed graph with unit-weight edges.
///
/// An edge `u → v` means "v is reachable from u in one hop"; it does not
/// imply `v → u`. Parallel edges are rejected silently (the second insert is
/// a no-op), and the edge counter is maintained incrementally.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    adjacency: HashMap<V, Vec<V>>,
    edge_count: usize,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<V> Graph<V>
where
    V: Eq + Hash + fmt::Debug,
{
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known vertex count.
    #[must_use]
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.edge_count
    }

    /// Remove every vertex and edge, resetting the edge counter.
    pub fn clear(&mut self) {
        debug!(
            vertices = self.adjacency.len(),
            edges = self.edge_count,
            "clearing graph"
        );
        self.adjacency.clear();
        self.edge_count = 0;
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, Vec::new());
        true
    }

    /// Add the directed edge `u → v`.
    ///
    /// Returns `Ok(true)` when the edge was inserted and `Ok(false)` when it
    /// already existed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVertex`] if either endpoint is not a vertex.
    pub fn add_edge(&mut self, u: V, v: V) -> Result<bool> {
        if !self.adjacency.contains_key(&v) {
            return Err(Error::missing_vertex(&v));
        }
        let Some(neighbors) = self.adjacency.get_mut(&u) else {
            return Err(Error::missing_vertex(&u));
        };
        if neighbors.contains(&v) {
            trace!(from = ?u, to = ?v, "edge already present");
            return Ok(false);
        }
        neighbors.push(v);
        self.edge_count += 1;
        Ok(true)
    }

    /// All vertex keys. Iteration order is unspecified; use
    /// [`Graph::sorted_vertices`] when order matters.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Out-neighbors of `v` in edge-insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVertex`] if `v` is not a vertex.
    pub fn neighbors(&self, v: &V) -> Result<&[V]> {
        self.adjacency
            .get(v)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::missing_vertex(v))
    }

    /// Whether `v` is a vertex.
    #[must_use]
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    /// Whether the directed edge `u → v` exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVertex`] if either endpoint is not a vertex.
    pub fn edge_exists(&self, u: &V, v: &V) -> Result<bool> {
        if !self.adjacency.contains_key(v) {
            return Err(Error::missing_vertex(v));
        }
        Ok(self.neighbors(u)?.contains(v))
    }

    /// Out-degree of `v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVertex`] if `v` is not a vertex.
    pub fn degree(&self, v: &V) -> Result<usize> {
        self.neighbors(v).map(<[V]>::len)
    }
}

impl<V> Graph<V>
where
    V: Ord + Hash + fmt::Debug,
{
    /// Vertex keys in ascending order.
    #[must_use]
    pub fn sorted_vertices(&self) -> Vec<&V> {
        let mut keys: Vec<&V> = self.adjacency.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// The vertex with the largest out-degree, or `None` for an empty graph.
    ///
    /// Vertices are scanned in ascending key order and a later vertex only
    /// replaces the current best when its degree is strictly larger, so ties
    /// go to the lowest key.
    #[must_use]
    pub fn max_degree(&self) -> Option<&V> {
        self.max_degree_entry().map(|(v, _)| v)
    }

    /// Like [`Graph::max_degree`], paired with the degree itself.
    #[must_use]
    pub fn max_degree_entry(&self) -> Option<(&V, usize)> {
        let mut best: Option<(&V, usize)> = None;
        for v in self.sorted_vertices() {
            let degree = self.adjacency.get(v).map_or(0, Vec::len);
            match best {
                Some((_, best_degree)) if degree <= best_degree => {}
                _ => best = Some((v, degree)),
            }
        }
        best
    }
}

impl<V> fmt::Display for Graph<V>
where
    V: Ord + Hash + fmt::Debug,
{
    /// Renders `{a: [b, c], b: []}` with vertices in ascending order and
    /// neighbors in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.sorted_vertices().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:?}: {:?}", self.adjacency.get(v).map_or(&[][..], Vec::as_slice))?;
        }
        write!(f, "}}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
