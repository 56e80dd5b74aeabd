//! Unit-weight shortest paths over a [`Graph`](crate::Graph).
//!
//! - [`all_pairs_distances`]: every ordered pair, O(V³).
//! - [`single_source_paths`]: one source, with predecessor links, using the
//!   [`IndexedPriorityQueue`](crate::IndexedPriorityQueue).
//!
//! Both enumerate vertices through a [`VertexIndex`](crate::VertexIndex) in
//! ascending key order and return it with the result.
//!
//! ```rust
//! use hopgraph_core::{Graph, paths};
//!
//! let mut g = Graph::new();
//! for v in 1..=3 {
//!     g.add_vertex(v);
//! }
//! g.add_edge(1, 2)?;
//! g.add_edge(2, 3)?;
//!
//! let matrix = paths::all_pairs_distances(&g);
//! let tree = paths::single_source_paths(&g, &1)?;
//! assert_eq!(matrix.distance(&1, &3), tree.distance(&3));
//! assert_eq!(tree.path_to(&3), Some(vec![1, 2, 3]));
//! # Ok::<(), hopgraph_core::Error>(())
//! ```

pub mod all_pairs;
pub mod distance;
pub mod single_source;

pub use all_pairs::{DistanceMatrix, all_pairs_distances};
pub use distance::{Distance, INFINITY_SENTINEL};
pub use single_source::{ShortestPathTree, single_source_paths};
