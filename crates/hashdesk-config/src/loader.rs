// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hashdesk.toml` > `~/.config/hashdesk/hashdesk.toml`
//! > `/etc/hashdesk/hashdesk.toml` with environment variable overrides via the
//! `HASHDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HashdeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hashdesk/hashdesk.toml` (system-wide)
/// 3. `~/.config/hashdesk/hashdesk.toml` (user XDG config)
/// 4. `./hashdesk.toml` (local directory)
/// 5. `HASHDESK_*` environment variables
pub fn load_config() -> Result<HashdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HashdeskConfig::default()))
        .merge(Toml::file("/etc/hashdesk/hashdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hashdesk/hashdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hashdesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HashdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HashdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HashdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HashdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. `HASHDESK_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`. The section prefix is
/// anchored at the start of the key, so the `bot_` inside `telegram_bot_token`
/// is never mistaken for the `[bot]` section.
fn env_provider() -> Env {
    const SECTIONS: &[&str] = &["bot", "telegram", "woocommerce", "billing"];

    Env::prefixed("HASHDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HASHDESK_BILLING_API_TOKEN -> "billing_api_token"
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str.strip_prefix(section) {
                if let Some(rest) = rest.strip_prefix('_') {
                    return format!("{section}.{rest}").into();
                }
            }
        }
        key_str.into()
    })
}
