//! CLI argument parsing definitions

use clap::{Args, Parser, Subcommand};
use shooter_config::{KeyRange, NamingScheme};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fire the configured load at the engine
    Run(RunArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Overrides applied on top of the loaded configuration
#[derive(Args)]
pub struct RunArgs {
    /// Engine base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Main process index range (example: --main-range=1..100)
    #[arg(long, value_name = "RANGE", value_parser = parse_range)]
    pub main_range: Option<KeyRange>,

    /// SHORT subprocess index range per main process
    #[arg(long, value_name = "RANGE", value_parser = parse_range)]
    pub short_range: Option<KeyRange>,

    /// LONG subprocess index range per main process
    #[arg(long, value_name = "RANGE", value_parser = parse_range)]
    pub long_range: Option<KeyRange>,

    /// Delay between dispatches in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Disable inter-request pacing
    #[arg(long)]
    pub no_pacing: bool,

    /// Subprocess key naming scheme: split, unified
    #[arg(long, value_name = "SCHEME", value_parser = parse_scheme)]
    pub naming_scheme: Option<NamingScheme>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a sample configuration file
    Generate,

    /// Validate a configuration file
    Validate {
        /// Path to the file to validate
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },
}

/// Parse `START..END` into an inclusive index range
fn parse_range(s: &str) -> Result<KeyRange, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{}'", s))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid range start: {}", e))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid range end: {}", e))?;
    Ok(KeyRange::new(start, end))
}

fn parse_scheme(s: &str) -> Result<NamingScheme, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("1..100").unwrap(), KeyRange::new(1, 100));
        assert_eq!(parse_range("5 .. 7").unwrap(), KeyRange::new(5, 7));
        assert!(parse_range("100").is_err());
        assert!(parse_range("a..b").is_err());
    }

    #[test]
    fn test_run_args_parsing() {
        let cli = Cli::try_parse_from([
            "shooter",
            "run",
            "--base-url=http://engine:8080",
            "--main-range=1..5",
            "--no-pacing",
            "--naming-scheme=unified",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.base_url.as_deref(), Some("http://engine:8080"));
                assert_eq!(args.main_range, Some(KeyRange::new(1, 5)));
                assert!(args.no_pacing);
                assert_eq!(args.naming_scheme, Some(NamingScheme::Unified));
            }
            _ => panic!("expected run command"),
        }
    }
}
