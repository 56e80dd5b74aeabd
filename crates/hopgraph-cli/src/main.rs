#![forbid(unsafe_code)]

mod adjacency;
mod cmd;
mod config;
mod dataset;
mod output;

use adjacency::{Adjacency, AdjacencyRule};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use cmd::MovieGraph;
use config::Config;
use output::OutputMode;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "hopgraph",
    author,
    version,
    about = "hopgraph: shortest paths through movie co-review graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Configuration file (default: ./hopgraph.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ratings CSV (userId,movieId,rating,timestamp).
    #[arg(long, global = true, value_name = "FILE")]
    ratings: Option<PathBuf>,

    /// Movies CSV (movieId,title,genres).
    #[arg(long, global = true, value_name = "FILE")]
    movies: Option<PathBuf>,

    /// Rule deciding which movies are adjacent.
    #[arg(long, global = true, value_enum)]
    adjacency: Option<AdjacencyRule>,

    /// Shared reviewers needed under the shared-reviewers rule.
    #[arg(long, global = true, value_name = "N")]
    min_shared_reviewers: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Flags override the config file.
    fn adjacency(&self, config: &Config) -> Adjacency {
        Adjacency {
            rule: self.adjacency.unwrap_or(config.adjacency.rule),
            min_shared_reviewers: self
                .min_shared_reviewers
                .unwrap_or(config.adjacency.min_shared_reviewers),
        }
    }

    fn dataset_paths(&self) -> Result<(&Path, &Path)> {
        let ratings = self
            .ratings
            .as_deref()
            .context("--ratings FILE is required")?;
        let movies = self
            .movies
            .as_deref()
            .context("--movies FILE is required")?;
        Ok((ratings, movies))
    }

    fn load_graph(&self, config: &Config) -> Result<MovieGraph> {
        let (ratings, movies) = self.dataset_paths()?;
        MovieGraph::load(ratings, movies, self.adjacency(config))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Print graph statistics",
        long_about = "Print vertex and edge counts, density, max degree, diameter and average path length.",
        after_help = "EXAMPLES:\n    # Statistics for the co-review graph\n    hopgraph --ratings ratings.csv --movies movies.csv stats\n\n    # Use the equal-rating rule and emit JSON\n    hopgraph --ratings ratings.csv --movies movies.csv --adjacency equal-rating stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show one movie and its neighbors",
        long_about = "Show a movie's details and the titles of every adjacent movie.",
        after_help = "EXAMPLES:\n    # Describe movie 1\n    hopgraph --ratings ratings.csv --movies movies.csv node 1"
    )]
    Node(cmd::node::NodeArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show the shortest path between two movies",
        long_about = "Print the movies along a shortest path, one hop per line, or report that they are not connected.",
        after_help = "EXAMPLES:\n    # Path from movie 1 to movie 50\n    hopgraph --ratings ratings.csv --movies movies.csv path 1 50\n\n    # Lower the shared-reviewer threshold\n    hopgraph --ratings ratings.csv --movies movies.csv --min-shared-reviewers 5 path 1 50"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    hopgraph completions bash\n\n    # Generate zsh completions\n    hopgraph completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HOPGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "hopgraph=debug,info"
        } else {
            "hopgraph=info,warn"
        })
    });

    let format = env::var("HOPGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command, &mut std::io::stdout());
    }

    let config = config::load_config(cli.config.as_deref())?;
    let output = output::resolve_output_mode(cli.format, cli.json, config.output.format);
    debug!(?output, adjacency = %cli.adjacency(&config).rule, "resolved settings");

    let session = cli.load_graph(&config)?;
    match cli.command {
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &session, output),
        Commands::Node(ref args) => cmd::node::run_node(args, &session, output),
        Commands::Path(ref args) => cmd::path::run_path(args, &session, output),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments parse")
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = parse(&[
            "hopgraph", "stats", "--ratings", "r.csv", "--movies", "m.csv", "--json",
        ]);
        assert!(cli.json);
        assert_eq!(cli.ratings.as_deref(), Some(Path::new("r.csv")));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn format_flag_parses() {
        let cli = parse(&["hopgraph", "--format", "text", "stats"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn path_takes_two_ids() {
        let cli = parse(&["hopgraph", "path", "1", "50"]);
        assert!(matches!(
            cli.command,
            Commands::Path(cmd::path::PathArgs { from: 1, to: 50 })
        ));
        assert!(Cli::try_parse_from(["hopgraph", "path", "1"]).is_err());
        assert!(Cli::try_parse_from(["hopgraph", "path", "one", "2"]).is_err());
    }

    #[test]
    fn node_takes_one_id() {
        let cli = parse(&["hopgraph", "node", "7"]);
        assert!(matches!(
            cli.command,
            Commands::Node(cmd::node::NodeArgs { movie_id: 7 })
        ));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = parse(&["hopgraph", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn flags_override_config() {
        let config = Config::default();
        let cli = parse(&["hopgraph", "--adjacency", "equal-rating", "stats"]);
        let adjacency = cli.adjacency(&config);
        assert_eq!(adjacency.rule, AdjacencyRule::EqualRating);
        assert_eq!(adjacency.min_shared_reviewers, 12);

        let cli = parse(&["hopgraph", "--min-shared-reviewers", "3", "stats"]);
        let adjacency = cli.adjacency(&config);
        assert_eq!(adjacency.rule, AdjacencyRule::SharedReviewers);
        assert_eq!(adjacency.min_shared_reviewers, 3);
    }

    #[test]
    fn missing_dataset_paths_are_reported() {
        let cli = parse(&["hopgraph", "--movies", "m.csv", "stats"]);
        let err = cli.dataset_paths().expect_err("ratings missing");
        assert!(err.to_string().contains("--ratings"));
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
