// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as bounded page sizes, positive poll intervals, and
//! unique category tokens.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::HashdeskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HashdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.telegram.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "telegram.poll_interval_secs must be at least 1".to_string(),
        });
    }

    // Telegram rejects long-poll timeouts above 50 seconds.
    if config.telegram.poll_timeout_secs == 0 || config.telegram.poll_timeout_secs > 50 {
        errors.push(ConfigError::Validation {
            message: format!(
                "telegram.poll_timeout_secs must be in 1..=50, got {}",
                config.telegram.poll_timeout_secs
            ),
        });
    }

    // The WooCommerce API silently clamps per_page above 100, which would
    // break short-page pagination termination. Reject instead.
    if config.woocommerce.page_size == 0 || config.woocommerce.page_size > 100 {
        errors.push(ConfigError::Validation {
            message: format!(
                "woocommerce.page_size must be in 1..=100, got {}",
                config.woocommerce.page_size
            ),
        });
    }

    if config.billing.settled_cap == 0 {
        errors.push(ConfigError::Validation {
            message: "billing.settled_cap must be at least 1".to_string(),
        });
    }

    if config.billing.settled_window_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "billing.settled_window_days must be at least 1, got {}",
                config.billing.settled_window_days
            ),
        });
    }

    // Credentials may be absent (doctor still runs) but never blank.
    for (key, value) in [
        ("telegram.bot_token", &config.telegram.bot_token),
        ("woocommerce.base_url", &config.woocommerce.base_url),
        ("woocommerce.consumer_key", &config.woocommerce.consumer_key),
        (
            "woocommerce.consumer_secret",
            &config.woocommerce.consumer_secret,
        ),
        ("billing.base_url", &config.billing.base_url),
        ("billing.api_token", &config.billing.api_token),
        ("billing.location_id", &config.billing.location_id),
    ] {
        if let Some(v) = value {
            if v.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} must not be empty when set"),
                });
            }
        }
    }

    for (i, category) in config.categories.iter().enumerate() {
        if category.token.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].token must not be empty"),
            });
        }
        if category.label.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].label must not be empty"),
            });
        }
        if category.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].id must not be empty"),
            });
        }
    }

    // Tokens are matched case-insensitively, so uniqueness is too.
    let mut seen_tokens = HashSet::new();
    for category in &config.categories {
        if !seen_tokens.insert(category.token.trim().to_lowercase()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate category token `{}` in [[categories]] array",
                    category.token
                ),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryConfig;

    #[test]
    fn default_config_validates() {
        let config = HashdeskConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_poll_interval_fails_validation() {
        let mut config = HashdeskConfig::default();
        config.telegram.poll_interval_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("poll_interval_secs"))
        ));
    }

    #[test]
    fn oversized_page_size_fails_validation() {
        let mut config = HashdeskConfig::default();
        config.woocommerce.page_size = 250;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("page_size"))
        ));
    }

    #[test]
    fn blank_token_fails_validation() {
        let mut config = HashdeskConfig::default();
        config.telegram.bot_token = Some("   ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("bot_token"))
        ));
    }

    #[test]
    fn duplicate_category_tokens_fail_validation() {
        let mut config = HashdeskConfig::default();
        config.categories = vec![
            CategoryConfig {
                token: "asic miners".to_string(),
                label: "ASIC Miners".to_string(),
                id: "21".to_string(),
            },
            CategoryConfig {
                token: "ASIC Miners".to_string(),
                label: "Miners again".to_string(),
                id: "22".to_string(),
            },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate category token"))
        ));
    }

    #[test]
    fn empty_category_fields_fail_validation() {
        let mut config = HashdeskConfig::default();
        config.categories = vec![CategoryConfig {
            token: "".to_string(),
            label: " ".to_string(),
            id: "".to_string(),
        }];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn collects_all_errors_not_just_first() {
        let mut config = HashdeskConfig::default();
        config.telegram.poll_interval_secs = 0;
        config.woocommerce.page_size = 0;
        config.billing.settled_cap = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = HashdeskConfig::default();
        config.telegram.bot_token = Some("123:abc".to_string());
        config.woocommerce.base_url = Some("https://shop.example.com/wp-json/wc/v3".to_string());
        config.billing.settled_cap = 10;
        config.categories = vec![CategoryConfig {
            token: "asic miners".to_string(),
            label: "ASIC Miners".to_string(),
            id: "21".to_string(),
        }];
        assert!(validate_config(&config).is_ok());
    }
}
