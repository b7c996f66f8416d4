// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the WooCommerce REST API.

use std::time::Duration;

use hashdesk_config::model::WooCommerceConfig;
use hashdesk_core::HashdeskError;
use tracing::debug;

use crate::types::Product;

/// Per-request timeout for store calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Authenticated client for the store's product listing.
#[derive(Debug, Clone)]
pub struct WooClient {
    client: reqwest::Client,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
    page_size: u32,
}

impl WooClient {
    /// Creates a new store client.
    ///
    /// Requires `base_url`, `consumer_key`, and `consumer_secret` to be set.
    pub fn new(config: &WooCommerceConfig) -> Result<Self, HashdeskError> {
        let base_url = require(&config.base_url, "woocommerce.base_url")?;
        let consumer_key = require(&config.consumer_key, "woocommerce.consumer_key")?;
        let consumer_secret = require(&config.consumer_secret, "woocommerce.consumer_secret")?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| HashdeskError::Catalog {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer_key,
            consumer_secret,
            page_size: config.page_size,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Products requested per page.
    pub(crate) fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetches one page of published products for a category, newest first.
    pub(crate) async fn list_page(
        &self,
        category_id: &str,
        page: u32,
    ) -> Result<Vec<Product>, HashdeskError> {
        let url = format!("{}/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .query(&[
                ("category", category_id),
                ("status", "publish"),
                ("orderby", "date"),
                ("order", "desc"),
                ("per_page", &self.page_size.to_string()),
                ("page", &page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| HashdeskError::Catalog {
                message: format!("products request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, category = category_id, page, "product page received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HashdeskError::Catalog {
                message: format!("products returned {status}: {body}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| HashdeskError::Catalog {
            message: format!("failed to parse products response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Cheap reachability probe: one product, page one.
    pub(crate) async fn ping(&self) -> Result<(), HashdeskError> {
        let url = format!("{}/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .query(&[("per_page", "1")])
            .send()
            .await
            .map_err(|e| HashdeskError::Catalog {
                message: format!("store unreachable: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HashdeskError::Catalog {
                message: format!("store returned {status}"),
                source: None,
            });
        }
        Ok(())
    }
}

fn require(value: &Option<String>, key: &str) -> Result<String, HashdeskError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(HashdeskError::Config(format!(
            "{key} is required for the catalog client"
        ))),
    }
}
