//! Optional TOML configuration.
//!
//! Lookup order: `--config PATH`, then `./hopgraph.toml`, then
//! `<config_dir>/hopgraph/config.toml`. A missing file means defaults; an
//! explicit `--config` path must exist. Command-line flags override every
//! key.
//!
//! ```toml
//! [adjacency]
//! rule = "shared-reviewers"   # or "equal-rating"
//! min_shared_reviewers = 12
//!
//! [output]
//! format = "pretty"           # or "text", "json"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::adjacency::{AdjacencyRule, DEFAULT_MIN_SHARED_REVIEWERS};
use crate::output::OutputMode;

/// File name looked up in the working directory.
const LOCAL_CONFIG: &str = "hopgraph.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub adjacency: AdjacencyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjacencyConfig {
    #[serde(default)]
    pub rule: AdjacencyRule,
    #[serde(default = "default_min_shared_reviewers")]
    pub min_shared_reviewers: usize,
}

impl Default for AdjacencyConfig {
    fn default() -> Self {
        Self {
            rule: AdjacencyRule::default(),
            min_shared_reviewers: default_min_shared_reviewers(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputMode>,
}

const fn default_min_shared_reviewers() -> usize {
    DEFAULT_MIN_SHARED_REVIEWERS
}

/// Load the effective configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return read_config(&local);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(Config::default());
    };
    let user = config_dir.join("hopgraph/config.toml");
    if user.exists() {
        return read_config(&user);
    }

    debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str::<Config>(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").expect("empty TOML is valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.adjacency.rule, AdjacencyRule::SharedReviewers);
        assert_eq!(config.adjacency.min_shared_reviewers, 12);
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn parses_every_key() {
        let config = parse_config(
            r#"
[adjacency]
rule = "equal-rating"
min_shared_reviewers = 5

[output]
format = "json"
"#,
        )
        .expect("valid config");

        assert_eq!(config.adjacency.rule, AdjacencyRule::EqualRating);
        assert_eq!(config.adjacency.min_shared_reviewers, 5);
        assert_eq!(config.output.format, Some(OutputMode::Json));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse_config("[adjacency]\nmin_shared_reviewers = 3\n").expect("valid config");
        assert_eq!(config.adjacency.rule, AdjacencyRule::SharedReviewers);
        assert_eq!(config.adjacency.min_shared_reviewers, 3);
    }

    #[test]
    fn rejects_unknown_rule() {
        assert!(parse_config("[adjacency]\nrule = \"same-genre\"\n").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_config("[adjacency]\nthreshold = 3\n").is_err());
    }

    #[test]
    fn explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[output]\nformat = \"text\"").expect("write config");

        let config = load_config(Some(file.path())).expect("config loads");
        assert_eq!(config.output.format, Some(OutputMode::Text));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_config(Some(&dir.path().join("nope.toml"))).expect_err("missing file");
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
