// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hashdesk bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Hashdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values; credentials default to
/// `None` so `serve` can report exactly which ones are missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HashdeskConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// WooCommerce catalog upstream settings.
    #[serde(default)]
    pub woocommerce: WooCommerceConfig,

    /// Billing upstream settings.
    #[serde(default)]
    pub billing: BillingConfig,

    /// Product categories exposed as bot commands and menu buttons.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "hashdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required for `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Long-poll timeout passed to getUpdates, in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    /// Pause between dispatch cycles, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Discard updates accumulated while the bot was offline instead of
    /// replaying them on startup.
    #[serde(default = "default_flush_on_start")]
    pub flush_on_start: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            poll_timeout_secs: default_poll_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            flush_on_start: default_flush_on_start(),
        }
    }
}

fn default_poll_timeout_secs() -> u64 {
    25
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_flush_on_start() -> bool {
    true
}

/// WooCommerce catalog upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WooCommerceConfig {
    /// Base URL of the store's REST API, e.g.
    /// `https://shop.example.com/wp-json/wc/v3`. Required for `serve`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// REST API consumer key. Required for `serve`.
    #[serde(default)]
    pub consumer_key: Option<String>,

    /// REST API consumer secret. Required for `serve`.
    #[serde(default)]
    pub consumer_secret: Option<String>,

    /// Products requested per page. The API caps this at 100.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for WooCommerceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            consumer_key: None,
            consumer_secret: None,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

/// Billing upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BillingConfig {
    /// Base URL of the billing API. Required for `serve`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token for the billing API. Required for `serve`.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Billing location scoping every invoice query. Required for `serve`.
    #[serde(default)]
    pub location_id: Option<String>,

    /// How many settled invoices an account report shows at most.
    #[serde(default = "default_settled_cap")]
    pub settled_cap: usize,

    /// Trailing window in days for the settled-invoice bucket.
    #[serde(default = "default_settled_window_days")]
    pub settled_window_days: i64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            location_id: None,
            settled_cap: default_settled_cap(),
            settled_window_days: default_settled_window_days(),
        }
    }
}

fn default_settled_cap() -> usize {
    5
}

fn default_settled_window_days() -> i64 {
    180
}

/// One product category exposed to users.
///
/// `token` is the canonical text command, `label` doubles as the button
/// caption and the report header, `id` is the upstream category id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub token: String,
    pub label: String,
    pub id: String,
}
