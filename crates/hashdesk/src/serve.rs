// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hashdesk serve` command implementation.
//!
//! Wires the Telegram transport, the WooCommerce catalog, and the billing
//! client into the dispatch loop and runs it until SIGINT/SIGTERM.

use std::sync::Arc;

use tracing::{error, info, warn};

use hashdesk_billing::BillingDesk;
use hashdesk_bot::{BotLoop, CommandTable, Router, shutdown};
use hashdesk_config::HashdeskConfig;
use hashdesk_core::{Adapter, HashdeskError, HealthStatus};
use hashdesk_telegram::TelegramTransport;
use hashdesk_woocommerce::WooCatalog;

/// Runs the `hashdesk serve` command.
///
/// Builds every adapter from configuration, installs the signal handlers,
/// and blocks on the dispatch loop until shutdown.
pub async fn run_serve(config: HashdeskConfig) -> Result<(), HashdeskError> {
    init_tracing(&config.bot.log_level);

    info!(bot = config.bot.name.as_str(), "starting hashdesk serve");

    let transport = TelegramTransport::new(&config.telegram).map_err(|e| {
        error!(error = %e, "failed to initialize the Telegram transport");
        eprintln!(
            "error: Telegram bot token required. Set telegram.bot_token in the config \
             or the HASHDESK_TELEGRAM_BOT_TOKEN environment variable."
        );
        e
    })?;

    // Verify the token up front; a typo'd token would otherwise surface as
    // an endless poll-failure backoff.
    match transport.health_check().await {
        Ok(HealthStatus::Healthy) => info!("Telegram bot token verified"),
        Ok(status) => warn!(?status, "Telegram health check did not pass"),
        Err(e) => warn!(error = %e, "Telegram health check failed"),
    }

    let catalog = WooCatalog::new(&config.woocommerce).map_err(|e| {
        error!(error = %e, "failed to initialize the WooCommerce catalog");
        eprintln!(
            "error: store credentials required. Set woocommerce.base_url, \
             woocommerce.consumer_key, and woocommerce.consumer_secret."
        );
        e
    })?;

    let billing = BillingDesk::new(&config.billing).map_err(|e| {
        error!(error = %e, "failed to initialize the billing client");
        eprintln!(
            "error: billing credentials required. Set billing.base_url, \
             billing.api_token, and billing.location_id."
        );
        e
    })?;

    if config.categories.is_empty() {
        warn!("no categories configured, the price menu will be empty");
    } else {
        info!(categories = config.categories.len(), "command table built");
    }
    let table = CommandTable::build(&config.categories);
    let router = Router::new(Arc::new(catalog), Arc::new(billing), table);

    let cancel = shutdown::install_signal_handler();

    let mut bot = BotLoop::new(Arc::new(transport), router, &config.telegram);
    bot.run(cancel).await;

    info!("hashdesk serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// One directive per workspace crate, everything else at `warn`.
fn default_filter(log_level: &str) -> String {
    const LOG_TARGETS: [&str; 7] = [
        "hashdesk",
        "hashdesk_core",
        "hashdesk_config",
        "hashdesk_telegram",
        "hashdesk_woocommerce",
        "hashdesk_billing",
        "hashdesk_bot",
    ];

    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}
