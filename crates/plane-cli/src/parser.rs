//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the plane log console.
///
/// Global options configure the console API connection and buffering;
/// subcommands pick what to do with a stream.
#[derive(Parser)]
#[command(name = "plane")]
#[command(about = "Watch worker process logs and send console commands")]
#[command(version)]
pub struct Cli {
    /// Base URL of the console API
    #[arg(
        long = "api-url",
        env = "PLANE_API_URL",
        default_value = "http://127.0.0.1:8080/api",
        global = true
    )]
    pub api_url: String,

    /// Bearer token for the console API
    #[arg(long = "token", env = "PLANE_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout-secs", env = "PLANE_TIMEOUT_SECS", default_value = "10", global = true)]
    pub timeout_secs: u64,

    /// Lines kept per stream in live mode
    #[arg(long = "buffer-lines", env = "PLANE_BUFFER_LINES", default_value = "1000", global = true)]
    pub buffer_lines: usize,

    /// Lines requested from the history source
    #[arg(long = "history-lines", env = "PLANE_HISTORY_LINES", default_value = "1000", global = true)]
    pub history_lines: u32,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "plane",
            "--verbose",
            "--api-url",
            "http://10.0.0.2:9000/api",
            "tail",
            "--id",
            "5",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url, "http://10.0.0.2:9000/api");
        assert_eq!(cli.buffer_lines, 1000);
        assert!(matches!(cli.command, Some(Commands::Tail { .. })));
    }
}
