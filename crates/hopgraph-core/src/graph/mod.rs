//! Directed graph container and vertex indexing.
//!
//! # Overview
//!
//! [`Graph`] is the adjacency-list container every other component reads.
//! Collaborators build it with [`Graph::add_vertex`] / [`Graph::add_edge`]
//! and then hand it to the algorithms in [`crate::paths`].
//!
//! ## Pipeline
//!
//! ```text
//! add_vertex / add_edge
//!        ↓
//! Graph<V>            (HashMap<V, Vec<V>> + edge counter)
//!        ↓  VertexIndex::from_graph()
//! VertexIndex<V>      (sorted keys ↔ 0..n)
//!        ↓  paths::all_pairs_distances() / paths::single_source_paths()
//! DistanceMatrix<V> / ShortestPathTree<V>
//!        ↓  stats::GraphStats::from_matrix()
//! GraphStats<V>       (density, diameter, average path length, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use hopgraph_core::Graph;
//!
//! let mut g = Graph::new();
//! for v in 1..=4 {
//!     g.add_vertex(v);
//! }
//! g.add_edge(1, 2)?;
//! g.add_edge(2, 3)?;
//!
//! assert_eq!(g.num_edges(), 2);
//! assert_eq!(g.neighbors(&1)?, &[2]);
//! # Ok::<(), hopgraph_core::Error>(())
//! ```

pub mod digraph;
pub mod index;

pub use digraph::Graph;
pub use index::VertexIndex;
