//! `hopgraph stats` — whole-graph statistics.

use std::io::Write;

use clap::Args;
use hopgraph_core::GraphStats;
use serde::Serialize;

use crate::cmd::{MovieGraph, MovieRef};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `hopgraph stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

#[derive(Debug, Serialize)]
pub struct MaxDegree {
    #[serde(flatten)]
    pub movie: MovieRef,
    pub degree: usize,
}

/// Report payload for `hopgraph stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub adjacency: String,
    pub vertices: usize,
    pub edges: usize,
    pub density: f64,
    pub max_degree: Option<MaxDegree>,
    pub diameter: Option<u32>,
    pub average_path_length: Option<f64>,
    pub reachable_pairs: usize,
    pub unreachable_pairs: usize,
    pub skipped_ratings: usize,
}

impl StatsReport {
    pub fn build(session: &MovieGraph) -> Self {
        let stats = GraphStats::compute(&session.graph);
        Self {
            adjacency: session.adjacency.rule.to_string(),
            vertices: stats.vertex_count,
            edges: stats.edge_count,
            density: stats.density,
            max_degree: stats.max_degree.map(|(id, degree)| MaxDegree {
                movie: session.movie_ref(id),
                degree,
            }),
            diameter: stats.diameter,
            average_path_length: stats.average_path_length,
            reachable_pairs: stats.reachable_pairs,
            unreachable_pairs: stats.unreachable_pairs,
            skipped_ratings: session.dataset.skipped_ratings,
        }
    }
}

/// Execute `hopgraph stats`.
pub fn run_stats(
    _args: &StatsArgs,
    session: &MovieGraph,
    output: OutputMode,
) -> anyhow::Result<()> {
    let report = StatsReport::build(session);
    render_mode(output, &report, render_stats_text, render_stats_pretty)
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn render_stats_text(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "|V| = {} vertices", report.vertices)?;
    writeln!(w, "|E| = {} edges", report.edges)?;
    writeln!(w, "Density = {:.6}", report.density)?;
    match &report.max_degree {
        Some(max) => writeln!(w, "Max. Deg = {} (Node {})", max.degree, max.movie.id)?,
        None => writeln!(w, "Max. Deg = n/a")?,
    }
    writeln!(w, "Diameter = {}", or_na(report.diameter))?;
    writeln!(
        w,
        "Avg path length = {}",
        or_na(report.average_path_length.map(|avg| format!("{avg:.3}")))
    )
}

fn render_stats_pretty(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph statistics")?;
    pretty_kv(w, "Adjacency", &report.adjacency)?;
    pretty_kv(w, "Vertices", report.vertices.to_string())?;
    pretty_kv(w, "Edges", report.edges.to_string())?;
    pretty_kv(w, "Density", format!("{:.6}", report.density))?;
    let max_degree = report.max_degree.as_ref().map(|max| {
        format!("{} ([{}] {})", max.degree, max.movie.id, max.movie.title)
    });
    pretty_kv(w, "Max degree", or_na(max_degree))?;
    pretty_kv(w, "Diameter", or_na(report.diameter))?;
    pretty_kv(
        w,
        "Avg path length",
        or_na(report.average_path_length.map(|avg| format!("{avg:.3}"))),
    )?;
    pretty_kv(
        w,
        "Connected pairs",
        format!(
            "{} of {}",
            report.reachable_pairs,
            report.reachable_pairs + report.unreachable_pairs
        ),
    )?;
    if report.skipped_ratings > 0 {
        pretty_kv(w, "Skipped ratings", report.skipped_ratings.to_string())?;
    }
    Ok(())
}
