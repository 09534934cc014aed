// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adpilot - Amazon Sponsored Products campaign optimization backend.
//!
//! Binary entry point: loads configuration, then either serves the API or
//! prints the effective configuration state.

use clap::{Parser, Subcommand};

mod serve;

/// Adpilot - Amazon Sponsored Products campaign optimization backend.
#[derive(Parser, Debug)]
#[command(name = "adpilot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Adpilot API server.
    Serve,
    /// Validate configuration and report which upstreams are usable.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match adpilot_config::load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("adpilot: configuration error: {err}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(err) = serve::run_serve(config).await {
                eprintln!("adpilot serve: {err}");
                std::process::exit(1);
            }
        }
        Some(Commands::CheckConfig) => {
            println!(
                "amazon ads: {}",
                if config.amazon.is_configured() {
                    "configured"
                } else {
                    "not configured (demo data will be served)"
                }
            );
            println!(
                "gemini: {}",
                if config.gemini.is_configured() {
                    "configured"
                } else {
                    "not configured (recommendations unavailable)"
                }
            );
            println!(
                "gateway: {}:{}",
                config.gateway.host, config.gateway.port
            );
            println!("cache ttl: {}s", config.cache.ttl_secs);
            println!(
                "feedback log: {} (max {} entries)",
                config.feedback.path, config.feedback.max_entries
            );
        }
        None => {
            println!("adpilot: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config = adpilot_config::load_config_from_str("").expect("defaults should be valid");
        assert_eq!(config.gateway.port, 8480);
        assert!(!config.amazon.is_configured());
    }
}
