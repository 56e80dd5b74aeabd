//! Rules that decide which movies are adjacent.
//!
//! Every movie id becomes a vertex. Each unordered pair that satisfies the
//! rule is connected in both directions.

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use hopgraph_core::Graph;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::dataset::{Dataset, Movie};

/// Shared-reviewer threshold used when neither flag nor config sets one.
pub const DEFAULT_MIN_SHARED_REVIEWERS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjacencyRule {
    /// At least N users rated both movies, regardless of rating.
    #[default]
    SharedReviewers,
    /// Both movies have the same truncated integer average rating.
    EqualRating,
}

impl fmt::Display for AdjacencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedReviewers => write!(f, "shared-reviewers"),
            Self::EqualRating => write!(f, "equal-rating"),
        }
    }
}

/// A resolved rule with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    pub rule: AdjacencyRule,
    pub min_shared_reviewers: usize,
}

impl Adjacency {
    /// Whether `a` and `b` should be connected.
    pub fn connects(&self, a: &Movie, b: &Movie) -> bool {
        match self.rule {
            AdjacencyRule::SharedReviewers => {
                a.shared_reviewers(b, self.min_shared_reviewers) >= self.min_shared_reviewers
            }
            AdjacencyRule::EqualRating => {
                match (truncated_average(a), truncated_average(b)) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
        }
    }

    /// Build the movie graph for `dataset`.
    #[instrument(skip(self, dataset), fields(rule = %self.rule, movies = dataset.movies.len()))]
    pub fn build_graph(&self, dataset: &Dataset) -> Result<Graph<u32>> {
        let mut graph = Graph::with_capacity(dataset.movies.len());
        for &id in dataset.movies.keys() {
            graph.add_vertex(id);
        }

        let movies: Vec<&Movie> = dataset.movies.values().collect();
        let mut pairs = 0_usize;
        for (i, a) in movies.iter().enumerate() {
            for b in &movies[i + 1..] {
                if self.connects(a, b) {
                    graph.add_edge(a.id, b.id)?;
                    graph.add_edge(b.id, a.id)?;
                    pairs += 1;
                }
            }
            if (i + 1) % 500 == 0 {
                debug!(scanned = i + 1, pairs, "building adjacency");
            }
        }

        info!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            "graph created"
        );
        Ok(graph)
    }
}

/// Integer part of the mean rating. Ratings are non-negative, so truncation
/// and flooring agree.
#[allow(clippy::cast_possible_truncation)]
fn truncated_average(movie: &Movie) -> Option<i64> {
    movie.average_rating().map(|avg| avg.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(movies: &str, ratings: &str) -> Dataset {
        let mut dataset = Dataset::default();
        dataset
            .read_movies(movies.as_bytes(), "movies.csv")
            .expect("valid movies");
        dataset
            .read_ratings(ratings.as_bytes(), "ratings.csv")
            .expect("valid ratings");
        dataset
    }

    /// Users `users` each rate `movie` with `rating`.
    fn ratings_for(movie: u32, users: std::ops::Range<u32>, rating: f64) -> String {
        users
            .map(|u| format!("{u},{movie},{rating},0\n"))
            .collect()
    }

    #[test]
    fn shared_reviewers_threshold() {
        let mut ratings = ratings_for(1, 0..12, 4.0);
        ratings += &ratings_for(2, 0..12, 1.0);
        ratings += &ratings_for(3, 0..11, 3.0);
        let ds = dataset("1,A,Drama\n2,B,Drama\n3,C,Drama\n", &ratings);

        let adjacency = Adjacency {
            rule: AdjacencyRule::SharedReviewers,
            min_shared_reviewers: 12,
        };
        let g = adjacency.build_graph(&ds).expect("graph builds");

        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
        assert!(g.edge_exists(&1, &2).expect("vertices exist"));
        assert!(g.edge_exists(&2, &1).expect("vertices exist"));
        assert!(!g.edge_exists(&1, &3).expect("vertices exist"));
    }

    #[test]
    fn lower_threshold_connects_more() {
        let mut ratings = ratings_for(1, 0..3, 4.0);
        ratings += &ratings_for(2, 2..5, 4.0);
        let ds = dataset("1,A,Drama\n2,B,Drama\n", &ratings);

        let strict = Adjacency {
            rule: AdjacencyRule::SharedReviewers,
            min_shared_reviewers: 2,
        };
        let loose = Adjacency {
            min_shared_reviewers: 1,
            ..strict
        };
        assert_eq!(strict.build_graph(&ds).expect("builds").num_edges(), 0);
        assert_eq!(loose.build_graph(&ds).expect("builds").num_edges(), 2);
    }

    #[test]
    fn equal_rating_truncates_average() {
        // averages: 3.75 → 3, 3.0 → 3, 4.5 → 4, unrated
        let ratings = "1,1,4.0,0\n2,1,3.5,0\n1,2,3.0,0\n1,3,4.5,0\n";
        let ds = dataset("1,A,x\n2,B,x\n3,C,x\n4,D,x\n", ratings);

        let adjacency = Adjacency {
            rule: AdjacencyRule::EqualRating,
            min_shared_reviewers: DEFAULT_MIN_SHARED_REVIEWERS,
        };
        let g = adjacency.build_graph(&ds).expect("graph builds");

        assert_eq!(g.neighbors(&1).expect("vertex"), &[2]);
        assert_eq!(g.neighbors(&2).expect("vertex"), &[1]);
        assert!(g.neighbors(&3).expect("vertex").is_empty());
        assert!(g.neighbors(&4).expect("vertex").is_empty());
    }

    #[test]
    fn rule_names_match_cli_values() {
        assert_eq!(
            AdjacencyRule::from_str("equal-rating", false),
            Ok(AdjacencyRule::EqualRating)
        );
        assert_eq!(AdjacencyRule::SharedReviewers.to_string(), "shared-reviewers");
    }
}
