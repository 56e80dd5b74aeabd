//! `hopgraph node` — one movie and its neighbors.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use crate::cmd::{MovieGraph, MovieRef};
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `hopgraph node`.
#[derive(Args, Debug)]
pub struct NodeArgs {
    /// Movie id to describe.
    #[arg(value_name = "MOVIE_ID")]
    pub movie_id: u32,
}

/// Report payload for `hopgraph node`.
#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub id: u32,
    pub title: String,
    pub genres: Vec<String>,
    pub rating_count: usize,
    pub average_rating: Option<f64>,
    pub degree: usize,
    pub neighbors: Vec<MovieRef>,
}

/// Execute `hopgraph node`.
pub fn run_node(args: &NodeArgs, session: &MovieGraph, output: OutputMode) -> anyhow::Result<()> {
    let id = args.movie_id;
    let neighbors = match session.graph.neighbors(&id) {
        Ok(neighbors) => neighbors,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(anyhow::Error::new(err).context(format!("movie {id} not found")));
        }
    };

    let movie = session.dataset.get(id);
    let report = NodeReport {
        id,
        title: session.dataset.title(id),
        genres: movie.map(|m| m.genres.clone()).unwrap_or_default(),
        rating_count: movie.map_or(0, |m| m.ratings.len()),
        average_rating: movie.and_then(crate::dataset::Movie::average_rating),
        degree: neighbors.len(),
        neighbors: neighbors.iter().map(|&n| session.movie_ref(n)).collect(),
    };

    render_mode(output, &report, render_node_text, render_node_pretty)
}

fn render_node_text(report: &NodeReport, w: &mut dyn Write) -> std::io::Result<()> {
    write!(w, "[{}] {}", report.id, report.title)?;
    if !report.genres.is_empty() {
        write!(w, " ({})", report.genres.join(", "))?;
    }
    writeln!(w)?;
    writeln!(w, "Neighbors:")?;
    for neighbor in &report.neighbors {
        writeln!(w, "{}", neighbor.title)?;
    }
    Ok(())
}

fn render_node_pretty(report: &NodeReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Movie {}", report.id))?;
    pretty_kv(w, "Title", &report.title)?;
    if !report.genres.is_empty() {
        pretty_kv(w, "Genres", report.genres.join(", "))?;
    }
    pretty_kv(w, "Ratings", report.rating_count.to_string())?;
    if let Some(avg) = report.average_rating {
        pretty_kv(w, "Average rating", format!("{avg:.2}"))?;
    }
    pretty_kv(w, "Degree", report.degree.to_string())?;

    writeln!(w)?;
    pretty_section(w, &format!("Neighbors ({})", report.neighbors.len()))?;
    if report.neighbors.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for neighbor in &report.neighbors {
        writeln!(w, "  [{}] {}", neighbor.id, neighbor.title)?;
    }
    Ok(())
}
