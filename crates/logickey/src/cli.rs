//! Command-line interface definitions for logickey.

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `logickey` binary.
#[derive(Parser, Debug)]
#[command(
    name = "logickey",
    about = "Route logic keys to trading workflows through the service broker",
    version
)]
pub struct Cli {
    /// Logging controls shared across binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective routing table.
    Routes(RoutesArgs),
    /// Start a scenario and dispatch logic keys through it.
    Run(RunArgs),
}

/// Arguments for the `routes` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Optional configuration file (RON) declaring extra routes.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Logic keys to dispatch, in order. Defaults to the configured click actions.
    #[arg(value_name = "KEY")]
    pub keys: Vec<String>,

    /// Optional configuration file (RON).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Scenario id to launch (overrides the configuration).
    #[arg(long, value_name = "ID")]
    pub scenario: Option<i64>,

    /// Launch a detection-driven scenario (overrides the configuration).
    #[arg(long)]
    pub smart: bool,

    /// Pause between consecutive dispatches.
    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "0s",
        value_name = "DURATION"
    )]
    pub delay: Duration,

    /// How long to wait for the service to become available.
    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "5s",
        value_name = "DURATION"
    )]
    pub ready_timeout: Duration,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_durations() {
        let cli = Cli::try_parse_from([
            "logickey",
            "--debug",
            "run",
            "--scenario",
            "7",
            "--smart",
            "--delay",
            "150ms",
            "/buy1",
            "/sell1",
        ])
        .unwrap();
        assert!(cli.log.debug);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.keys, vec!["/buy1", "/sell1"]);
        assert_eq!(args.scenario, Some(7));
        assert!(args.smart);
        assert_eq!(args.delay, Duration::from_millis(150));
        assert_eq!(args.ready_timeout, Duration::from_secs(5));
    }
}
