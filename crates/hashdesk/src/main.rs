// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hashdesk - Telegram storefront bot for miner prices and hosting invoices.
//!
//! This is the binary entry point for the Hashdesk bot.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use hashdesk_config::{ConfigError, HashdeskConfig};

mod doctor;
mod serve;

/// Hashdesk - Telegram storefront bot for miner prices and hosting invoices.
#[derive(Parser, Debug)]
#[command(name = "hashdesk", version, about, long_about = None)]
struct Cli {
    /// Path to an explicit config file (default: XDG hierarchy).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Hashdesk bot.
    Serve,
    /// Check connectivity to Telegram, the store, and the billing API.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            hashdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Doctor { plain }) => {
            let failures = doctor::run_doctor(&config, plain).await;
            if failures > 0 {
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("hashdesk: use --help for available commands");
        }
    }
}

fn load(path: Option<&Path>) -> Result<HashdeskConfig, Vec<ConfigError>> {
    match path {
        Some(path) => hashdesk_config::load_and_validate_path(path),
        None => hashdesk_config::load_and_validate(),
    }
}

/// Renders the merged configuration as TOML with credentials redacted.
fn print_config(config: &HashdeskConfig) {
    let mut shown = config.clone();
    shown.telegram.bot_token = redact(&shown.telegram.bot_token);
    shown.woocommerce.consumer_key = redact(&shown.woocommerce.consumer_key);
    shown.woocommerce.consumer_secret = redact(&shown.woocommerce.consumer_secret);
    shown.billing.api_token = redact(&shown.billing.api_token);

    match toml::to_string_pretty(&shown) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => eprintln!("error: failed to render config: {e}"),
    }
}

fn redact(secret: &Option<String>) -> Option<String> {
    secret.as_ref().map(|_| "<redacted>".to_string())
}
