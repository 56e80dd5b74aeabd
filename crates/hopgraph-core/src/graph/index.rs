//! Explicit bijection between vertex keys and dense indices `0..n`.
//!
//! Both shortest-path algorithms work on dense arrays. A [`VertexIndex`] is
//! built once per call and returned with the result, so rows, columns and
//! predecessor slots can always be translated back to vertex keys without
//! depending on hash-map iteration order.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::graph::Graph;

/// Vertex key ↔ dense index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexIndex<V: Eq + Hash> {
    keys: Vec<V>,
    positions: HashMap<V, usize>,
}

impl<V> VertexIndex<V>
where
    V: Clone + Eq + Hash,
{
    /// Build an index that follows the given key order. Repeated keys keep
    /// their first position.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let iter = keys.into_iter();
        let (lower, _) = iter.size_hint();
        let mut index = Self {
            keys: Vec::with_capacity(lower),
            positions: HashMap::with_capacity(lower),
        };
        for key in iter {
            if index.positions.contains_key(&key) {
                continue;
            }
            index.positions.insert(key.clone(), index.keys.len());
            index.keys.push(key);
        }
        index
    }

    /// Dense index of `v`, if it is indexed.
    #[must_use]
    pub fn position(&self, v: &V) -> Option<usize> {
        self.positions.get(v).copied()
    }

    /// Vertex key at dense index `i`.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Option<&V> {
        self.keys.get(i)
    }

    /// Keys in index order.
    #[must_use]
    pub fn keys(&self) -> &[V] {
        &self.keys
    }

    /// `(index, key)` pairs in index order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &V)> + '_ {
        self.keys.iter().enumerate()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<V> VertexIndex<V>
where
    V: Clone + Ord + Hash + fmt::Debug,
{
    /// Index every vertex of `graph` in ascending key order.
    #[must_use]
    pub fn from_graph(graph: &Graph<V>) -> Self {
        Self::from_keys(graph.sorted_vertices().into_iter().cloned())
    }

    /// Out-neighbor lists of `graph` translated to dense indices.
    ///
    /// Row `i` holds the neighbors of `self.vertex(i)` in edge-insertion
    /// order. Neighbors that are not indexed are dropped.
    #[must_use]
    pub fn compact_adjacency(&self, graph: &Graph<V>) -> Vec<Vec<usize>> {
        self.keys
            .iter()
            .map(|v| {
                graph
                    .neighbors(v)
                    .map(|neighbors| {
                        neighbors
                            .iter()
                            .filter_map(|n| self.position(n))
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect()
    }
}
