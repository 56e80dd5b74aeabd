//! `hopgraph completions` — shell completion scripts.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `hopgraph completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `command` to `out`.
pub fn run_completions(
    args: &CompletionsArgs,
    command: &mut clap::Command,
    out: &mut dyn Write,
) -> Result<()> {
    let bin_name = command
        .get_bin_name()
        .unwrap_or_else(|| command.get_name())
        .to_string();
    generate(args.shell, command, bin_name, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> clap::Command {
        clap::Command::new("hopgraph")
            .subcommand(clap::Command::new("stats"))
            .subcommand(clap::Command::new("path"))
    }

    #[test]
    fn bash_script_names_binary_and_subcommands() {
        let mut buf = Vec::new();
        let args = CompletionsArgs { shell: Shell::Bash };
        run_completions(&args, &mut command(), &mut buf).expect("generate");

        let script = String::from_utf8(buf).expect("utf8");
        assert!(script.contains("hopgraph"));
        assert!(script.contains("stats"));
        assert!(script.contains("path"));
    }

    #[test]
    fn zsh_script_is_generated() {
        let mut buf = Vec::new();
        let args = CompletionsArgs { shell: Shell::Zsh };
        run_completions(&args, &mut command(), &mut buf).expect("generate");
        assert!(String::from_utf8(buf).expect("utf8").contains("#compdef hopgraph"));
    }
}
