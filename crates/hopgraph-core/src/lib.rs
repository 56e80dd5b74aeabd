//! hopgraph-core library.
//!
//! A generic directed graph, an indexed binary min-heap, and two unit-weight
//! shortest-path algorithms (all-pairs and single-source) built on them.
//!
//! # Conventions
//!
//! - **Errors**: Precondition violations return [`Result<T>`]; disconnected
//!   vertices are [`Distance::Unreachable`], never an error.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`) and
//!   `#[instrument]` on algorithm entry points.

#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod paths;
pub mod queue;
pub mod stats;

pub use error::{Error, ErrorKind, Result};
pub use graph::{Graph, VertexIndex};
pub use paths::{
    Distance, DistanceMatrix, INFINITY_SENTINEL, ShortestPathTree, all_pairs_distances,
    single_source_paths,
};
pub use queue::{IndexedPriorityQueue, Priority};
pub use stats::GraphStats;
