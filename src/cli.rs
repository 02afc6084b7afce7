// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mikrotik_status::diagnose::DiagnoseMode;

#[derive(Debug, Parser)]
#[command(name = "mikrotik-status", version, about = "Customer availability monitor for MikroTik routers")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read environment variables from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch netwatch, build the status report and write it out
    Monitor,
    /// Save a snapshot of router resources, interfaces, connections and DHCP
    Collect,
    /// Check API connectivity and login
    Diagnose {
        #[arg(long, value_enum, default_value_t = DiagnoseMode::Basic)]
        mode: DiagnoseMode,
    },
    /// Serve the latest report over HTTP
    Serve {
        /// Listen address, overrides SERVER_ADDR
        #[arg(long)]
        addr: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_diagnose_mode() {
        let cli = Cli::parse_from(["mikrotik-status", "-vv", "diagnose", "--mode", "full"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Diagnose {
                mode: DiagnoseMode::Full
            }
        ));
    }

    #[test]
    fn test_env_file_after_subcommand() {
        let cli = Cli::parse_from(["mikrotik-status", "monitor", "--env-file", "/etc/status.env"]);
        assert_eq!(cli.env_file, Some(PathBuf::from("/etc/status.env")));
        assert!(matches!(cli.command, Command::Monitor));
    }
}
