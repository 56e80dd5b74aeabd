pub mod completions;
pub mod node;
pub mod path;
pub mod stats;

use std::path::Path;

use anyhow::Result;
use hopgraph_core::Graph;
use serde::Serialize;

use crate::adjacency::Adjacency;
use crate::dataset::Dataset;

/// A loaded dataset and the graph built from it.
#[derive(Debug)]
pub struct MovieGraph {
    pub dataset: Dataset,
    pub graph: Graph<u32>,
    pub adjacency: Adjacency,
}

impl MovieGraph {
    /// Read both CSV files and build the graph under `adjacency`.
    pub fn load(ratings: &Path, movies: &Path, adjacency: Adjacency) -> Result<Self> {
        let dataset = Dataset::load(ratings, movies)?;
        let graph = adjacency.build_graph(&dataset)?;
        Ok(Self {
            dataset,
            graph,
            adjacency,
        })
    }

    /// `{id, title}` reference to a movie.
    pub fn movie_ref(&self, id: u32) -> MovieRef {
        MovieRef {
            id,
            title: self.dataset.title(id),
        }
    }
}

/// Movie id with its title, as shown in command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRef {
    pub id: u32,
    pub title: String,
}
