// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hashdesk doctor` command implementation.
//!
//! Probes every configured upstream (Telegram, the WooCommerce store, the
//! billing API) through the adapters' health checks and reports what a
//! `serve` run would find.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use hashdesk_billing::BillingDesk;
use hashdesk_config::HashdeskConfig;
use hashdesk_core::{Adapter, HashdeskError, HealthStatus};
use hashdesk_telegram::TelegramTransport;
use hashdesk_woocommerce::WooCatalog;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    duration: Duration,
}

/// Runs the `hashdesk doctor` command and returns the number of failed
/// checks. With `--plain`, disables colored output.
pub async fn run_doctor(config: &HashdeskConfig, plain: bool) -> usize {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = Vec::new();

    results.push(check_credentials(config));
    results.push(
        check_adapter(
            "Telegram",
            TelegramTransport::new(&config.telegram).map(adapter),
        )
        .await,
    );
    results.push(check_adapter("Store", WooCatalog::new(&config.woocommerce).map(adapter)).await);
    results.push(check_adapter("Billing", BillingDesk::new(&config.billing).map(adapter)).await);

    println!();
    println!("  hashdesk doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        match result.status {
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", render_line(result, use_color));
    }

    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }

    println!();

    fail_count
}

fn adapter<A: Adapter>(adapter: A) -> Box<dyn Adapter> {
    Box::new(adapter)
}

/// Formats one result line, mirroring the column layout in both modes.
fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();

    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red()),
        };
        format!(
            "    {symbol} {:<14} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<14} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Checks that every credential `serve` needs is present.
fn check_credentials(config: &HashdeskConfig) -> CheckResult {
    let start = Instant::now();
    let missing = missing_credentials(config);

    if missing.is_empty() {
        CheckResult {
            name: "Credentials".to_string(),
            status: CheckStatus::Pass,
            message: "all present".to_string(),
            duration: start.elapsed(),
        }
    } else {
        CheckResult {
            name: "Credentials".to_string(),
            status: CheckStatus::Warn,
            message: format!("missing for serve: {}", missing.join(", ")),
            duration: start.elapsed(),
        }
    }
}

fn missing_credentials(config: &HashdeskConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.telegram.bot_token.is_none() {
        missing.push("telegram.bot_token");
    }
    if config.woocommerce.base_url.is_none() {
        missing.push("woocommerce.base_url");
    }
    if config.woocommerce.consumer_key.is_none() {
        missing.push("woocommerce.consumer_key");
    }
    if config.woocommerce.consumer_secret.is_none() {
        missing.push("woocommerce.consumer_secret");
    }
    if config.billing.base_url.is_none() {
        missing.push("billing.base_url");
    }
    if config.billing.api_token.is_none() {
        missing.push("billing.api_token");
    }
    if config.billing.location_id.is_none() {
        missing.push("billing.location_id");
    }
    missing
}

/// Probes one adapter. An adapter that cannot even be constructed (missing
/// credentials) warns rather than fails, matching the credentials check.
async fn check_adapter(
    display: &str,
    adapter: Result<Box<dyn Adapter>, HashdeskError>,
) -> CheckResult {
    let start = Instant::now();

    let adapter = match adapter {
        Ok(adapter) => adapter,
        Err(e) => {
            return CheckResult {
                name: display.to_string(),
                status: CheckStatus::Warn,
                message: format!("not configured: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    let (status, message) = match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "healthy".to_string()),
        Ok(HealthStatus::Degraded(msg)) => (CheckStatus::Warn, msg),
        Ok(HealthStatus::Unhealthy(msg)) => (CheckStatus::Fail, msg),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };

    CheckResult {
        name: display.to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}
