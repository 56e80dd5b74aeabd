//! `hopgraph path` — shortest path between two movies.

use std::io::Write;

use clap::Args;
use hopgraph_core::{Graph, single_source_paths};
use serde::Serialize;
use tracing::debug;

use crate::cmd::{MovieGraph, MovieRef};
use crate::output::{CliError, OutputMode, pretty_section, render_error, render_mode};

/// Arguments for `hopgraph path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Movie id the path starts at.
    #[arg(value_name = "FROM_ID")]
    pub from: u32,

    /// Movie id the path ends at.
    #[arg(value_name = "TO_ID")]
    pub to: u32,
}

/// Report payload for `hopgraph path`.
#[derive(Debug, Serialize)]
pub struct PathReport {
    pub from: MovieRef,
    pub to: MovieRef,
    pub connected: bool,
    /// Number of edges on the path.
    pub hops: Option<u32>,
    /// Movies along the path, both ends included. Empty when not connected.
    pub path: Vec<MovieRef>,
}

/// Execute `hopgraph path`.
pub fn run_path(args: &PathArgs, session: &MovieGraph, output: OutputMode) -> anyhow::Result<()> {
    if let Err(err) = require_vertex(&session.graph, args.to) {
        render_error(output, &CliError::from(&err))?;
        return Err(anyhow::Error::new(err).context(format!("movie {} not found", args.to)));
    }
    let tree = match single_source_paths(&session.graph, &args.from) {
        Ok(tree) => tree,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(anyhow::Error::new(err).context(format!("movie {} not found", args.from)));
        }
    };

    let path = tree.path_to(&args.to).unwrap_or_default();
    debug!(from = args.from, to = args.to, hops = path.len().saturating_sub(1), "path resolved");

    let report = PathReport {
        from: session.movie_ref(args.from),
        to: session.movie_ref(args.to),
        connected: !path.is_empty(),
        hops: tree.distance(&args.to).finite(),
        path: path.into_iter().map(|id| session.movie_ref(id)).collect(),
    };

    render_mode(output, &report, render_path_text, render_path_pretty)
}

/// `Ok` when `id` is a vertex; the core's missing-vertex error otherwise.
fn require_vertex(graph: &Graph<u32>, id: u32) -> hopgraph_core::Result<()> {
    graph.degree(&id).map(|_| ())
}

fn render_path_text(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    if !report.connected {
        return writeln!(w, "Movies are not connected");
    }
    if let [only] = report.path.as_slice() {
        return writeln!(w, "{}", only.title);
    }
    for step in report.path.windows(2) {
        writeln!(w, "{} ===> {}", step[0].title, step[1].title)?;
    }
    Ok(())
}

fn render_path_pretty(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Shortest path {} → {}", report.from.id, report.to.id),
    )?;
    match report.hops {
        None => writeln!(
            w,
            "{} and {} are not connected",
            report.from.title, report.to.title
        ),
        Some(hops) => {
            for (i, step) in report.path.iter().enumerate() {
                let marker = if i == 0 { "   " } else { "==>" };
                writeln!(w, "{marker} [{}] {}", step.id, step.title)?;
            }
            writeln!(w)?;
            writeln!(w, "{hops} hop(s)")
        }
    }
}
