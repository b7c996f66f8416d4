// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WooCommerce catalog adapter for the Hashdesk bot.
//!
//! This crate implements [`CatalogService`] against the WooCommerce REST API,
//! walking the paginated product listing for a category and rendering an
//! HTML price report with only purchasable products.

pub mod client;
pub mod report;
pub mod types;

use async_trait::async_trait;
use hashdesk_config::model::WooCommerceConfig;
use hashdesk_core::traits::{Adapter, CatalogService};
use hashdesk_core::{HashdeskError, HealthStatus};
use tracing::{info, warn};

use crate::client::WooClient;

/// WooCommerce-backed catalog implementing [`CatalogService`].
pub struct WooCatalog {
    client: WooClient,
}

impl WooCatalog {
    /// Creates a new catalog adapter from the given configuration.
    ///
    /// Fails when `base_url`, `consumer_key`, or `consumer_secret` is unset.
    pub fn new(config: &WooCommerceConfig) -> Result<Self, HashdeskError> {
        let client = WooClient::new(config)?;
        info!(page_size = config.page_size, "WooCommerce catalog initialized");
        Ok(Self { client })
    }

    /// Creates a catalog with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: WooClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Adapter for WooCatalog {
    fn name(&self) -> &str {
        "woocommerce"
    }

    async fn health_check(&self) -> Result<HealthStatus, HashdeskError> {
        match self.client.ping().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "store probe failed");
                Ok(HealthStatus::Unhealthy(format!("store unreachable: {e}")))
            }
        }
    }
}

#[async_trait]
impl CatalogService for WooCatalog {
    async fn category_report(
        &self,
        category_id: &str,
        label: &str,
    ) -> Result<String, HashdeskError> {
        report::category_report(&self.client, category_id, label).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> WooCommerceConfig {
        WooCommerceConfig {
            base_url: Some("https://shop.example.com/wp-json/wc/v3".into()),
            consumer_key: Some("ck_test".into()),
            consumer_secret: Some("cs_test".into()),
            page_size: 100,
        }
    }

    fn catalog_for(server: &MockServer) -> WooCatalog {
        let client = WooClient::new(&test_config())
            .unwrap()
            .with_base_url(server.uri());
        WooCatalog::with_client(client)
    }

    #[test]
    fn adapter_name() {
        let catalog = WooCatalog::new(&test_config()).unwrap();
        assert_eq!(catalog.name(), "woocommerce");
    }

    #[tokio::test]
    async fn health_check_healthy_when_store_responds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        assert_eq!(catalog.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_unhealthy_on_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let status = catalog.health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)), "got: {status:?}");
    }

    #[tokio::test]
    async fn category_report_renders_through_the_service_trait() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("category", "21"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "name": "Antminer S21",
                    "price": "3200.00",
                    "stock_status": "instock",
                    "stock_quantity": 5,
                    "permalink": "https://shop.example.com/product/antminer-s21"
                }
            ])))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server);
        let service: &dyn CatalogService = &catalog;
        let report = service.category_report("21", "ASIC Miners").await.unwrap();
        assert!(report.starts_with("<b>ASIC Miners</b> price list:"));
        assert!(report.contains("Antminer S21"));
        assert!(report.contains("$3200.00"));
    }
}
