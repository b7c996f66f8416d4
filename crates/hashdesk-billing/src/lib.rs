// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Billing adapter for the Hashdesk bot.
//!
//! This crate implements [`BillingService`] against the hosting billing REST
//! API: it resolves a conversational email (or legacy exact name) to one
//! account, walks that account's invoices, and renders them as outstanding
//! vs. recently settled.

pub mod client;
pub mod report;
pub mod types;

use async_trait::async_trait;
use hashdesk_config::model::BillingConfig;
use hashdesk_core::traits::{Adapter, BillingService};
use hashdesk_core::{HashdeskError, HealthStatus};
use tracing::{info, warn};

use crate::client::BillingClient;

/// REST-backed billing desk implementing [`BillingService`].
pub struct BillingDesk {
    client: BillingClient,
    settled_cap: usize,
    settled_window_days: i64,
}

impl BillingDesk {
    /// Creates a new billing adapter from the given configuration.
    ///
    /// Fails when `base_url`, `api_token`, or `location_id` is unset.
    pub fn new(config: &BillingConfig) -> Result<Self, HashdeskError> {
        let client = BillingClient::new(config)?;
        info!(
            settled_cap = config.settled_cap,
            settled_window_days = config.settled_window_days,
            "billing desk initialized"
        );
        Ok(Self {
            client,
            settled_cap: config.settled_cap,
            settled_window_days: config.settled_window_days,
        })
    }

    /// Creates a billing desk with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: BillingClient, settled_cap: usize, settled_window_days: i64) -> Self {
        Self {
            client,
            settled_cap,
            settled_window_days,
        }
    }
}

#[async_trait]
impl Adapter for BillingDesk {
    fn name(&self) -> &str {
        "billing"
    }

    async fn health_check(&self) -> Result<HealthStatus, HashdeskError> {
        // The search endpoint is the cheapest read; a probe address that
        // matches nothing still proves auth and reachability.
        match self.client.search_by_email("probe@hashdesk.invalid").await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "billing probe failed");
                Ok(HealthStatus::Unhealthy(format!("billing API unreachable: {e}")))
            }
        }
    }
}

#[async_trait]
impl BillingService for BillingDesk {
    async fn report_for_email(&self, email: &str) -> Result<String, HashdeskError> {
        report::report_for_email(&self.client, email, self.settled_cap, self.settled_window_days)
            .await
    }

    async fn report_for_name(&self, name: &str) -> Result<String, HashdeskError> {
        report::report_for_name(&self.client, name, self.settled_cap, self.settled_window_days)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> BillingConfig {
        BillingConfig {
            base_url: Some("https://billing.example.com".into()),
            api_token: Some("tok_test".into()),
            location_id: Some("LOC1".into()),
            settled_cap: 5,
            settled_window_days: 180,
        }
    }

    fn desk_for(server: &MockServer) -> BillingDesk {
        let client = BillingClient::new(&test_config())
            .unwrap()
            .with_base_url(server.uri());
        BillingDesk::with_client(client, 5, 180)
    }

    #[test]
    fn adapter_name() {
        let desk = BillingDesk::new(&test_config()).unwrap();
        assert_eq!(desk.name(), "billing");
    }

    #[tokio::test]
    async fn health_check_healthy_when_search_responds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"accounts": []})),
            )
            .mount(&server)
            .await;

        let desk = desk_for(&server);
        assert_eq!(desk.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_unhealthy_on_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let desk = desk_for(&server);
        let status = desk.health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)), "got: {status:?}");
    }

    #[tokio::test]
    async fn report_for_email_through_the_service_trait() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .and(query_param("email", "jane@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accounts": [{"id": "A1", "name": "Jane Doe", "email": "jane@example.com"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "invoices": [{
                    "invoice_number": "1042",
                    "status": "UNPAID",
                    "amount_money": {"amount": 12000, "currency": "USD"},
                    "updated_at": "2026-08-10T09:30:00Z",
                    "public_url": "https://billing.example.com/pay/1042"
                }]
            })))
            .mount(&server)
            .await;

        let desk = desk_for(&server);
        let service: &dyn BillingService = &desk;
        let report = service.report_for_email("jane@example.com").await.unwrap();
        assert!(report.contains("#1042 - $120.00"));
        assert!(report.contains("pay now"));
    }
}
