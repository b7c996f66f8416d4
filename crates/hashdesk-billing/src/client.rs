// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the billing REST API.

use std::time::Duration;

use hashdesk_config::model::BillingConfig;
use hashdesk_core::HashdeskError;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{Account, AccountSearchResponse, Invoice, InvoiceListResponse};

/// Per-request timeout for billing calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bearer-authenticated client for the billing API.
#[derive(Debug, Clone)]
pub struct BillingClient {
    client: reqwest::Client,
    base_url: String,
    location_id: String,
}

impl BillingClient {
    /// Creates a new billing client.
    ///
    /// Requires `base_url`, `api_token`, and `location_id` to be set.
    pub fn new(config: &BillingConfig) -> Result<Self, HashdeskError> {
        let base_url = require(&config.base_url, "billing.base_url")?;
        let api_token = require(&config.api_token, "billing.api_token")?;
        let location_id = require(&config.location_id, "billing.location_id")?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_token}")).map_err(|e| {
                HashdeskError::Config(format!("invalid billing.api_token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| HashdeskError::Billing {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            location_id,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Searches accounts whose email matches `email` exactly.
    pub(crate) async fn search_by_email(&self, email: &str) -> Result<Vec<Account>, HashdeskError> {
        let response: AccountSearchResponse = self
            .get("/v2/accounts/search", &[("email", email)])
            .await?;
        Ok(response.accounts)
    }

    /// Searches accounts whose name matches `name` exactly.
    pub(crate) async fn search_by_name(&self, name: &str) -> Result<Vec<Account>, HashdeskError> {
        let response: AccountSearchResponse =
            self.get("/v2/accounts/search", &[("name", name)]).await?;
        Ok(response.accounts)
    }

    /// Fetches every invoice for an account at the configured location,
    /// following the response cursor until exhausted.
    pub(crate) async fn list_invoices(
        &self,
        account_id: &str,
    ) -> Result<Vec<Invoice>, HashdeskError> {
        let mut invoices = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![
                ("account_id", account_id),
                ("location_id", self.location_id.as_str()),
            ];
            if let Some(ref c) = cursor {
                query.push(("cursor", c.as_str()));
            }

            let page: InvoiceListResponse = self.get("/v2/invoices", &query).await?;
            debug!(
                account_id,
                invoices = page.invoices.len(),
                more = page.cursor.is_some(),
                "invoice page received"
            );
            invoices.extend(page.invoices);

            match page.cursor {
                Some(next) if !next.is_empty() => {
                    if cursor.as_deref() == Some(next.as_str()) {
                        warn!(account_id, "invoice cursor did not advance, stopping");
                        break;
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        Ok(invoices)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, HashdeskError> {
        let url = format!("{}{endpoint}", self.base_url);
        let response = self.client.get(&url).query(query).send().await.map_err(|e| {
            HashdeskError::Billing {
                message: format!("{endpoint} request failed: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HashdeskError::Billing {
                message: format!("{endpoint} returned {status}: {body}"),
                source: None,
            });
        }

        response.json().await.map_err(|e| HashdeskError::Billing {
            message: format!("failed to parse {endpoint} response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn require(value: &Option<String>, key: &str) -> Result<String, HashdeskError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(HashdeskError::Config(format!(
            "{key} is required for the billing client"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
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

    fn test_client(base_url: &str) -> BillingClient {
        BillingClient::new(&test_config())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn search_sends_bearer_token_and_email() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .and(query_param("email", "jane@example.com"))
            .and(header("authorization", "Bearer tok_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accounts": [{"id": "A1", "name": "Jane Doe", "email": "jane@example.com"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let accounts = client.search_by_email("jane@example.com").await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, "A1");
    }

    #[tokio::test]
    async fn search_by_name_uses_name_param() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .and(query_param("name", "Jane Doe"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"accounts": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let accounts = client.search_by_name("Jane Doe").await.unwrap();
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn list_invoices_follows_cursor() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .and(query_param("account_id", "A1"))
            .and(query_param("location_id", "LOC1"))
            .and(query_param_is_missing("cursor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "invoices": [
                    {
                        "invoice_number": "1",
                        "status": "PAID",
                        "amount_money": {"amount": 100},
                        "updated_at": "2026-08-01T00:00:00Z"
                    },
                    {
                        "invoice_number": "2",
                        "status": "PAID",
                        "amount_money": {"amount": 200},
                        "updated_at": "2026-08-02T00:00:00Z"
                    }
                ],
                "cursor": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "invoices": [
                    {
                        "invoice_number": "3",
                        "status": "UNPAID",
                        "amount_money": {"amount": 300},
                        "updated_at": "2026-08-03T00:00:00Z"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let invoices = client.list_invoices("A1").await.unwrap();
        assert_eq!(invoices.len(), 3);
        assert_eq!(invoices[2].invoice_number, "3");
    }

    #[tokio::test]
    async fn stuck_cursor_terminates_the_walk() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .and(query_param_is_missing("cursor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "invoices": [],
                "cursor": "stuck"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .and(query_param("cursor", "stuck"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "invoices": [],
                "cursor": "stuck"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let invoices = client.list_invoices("A1").await.unwrap();
        assert!(invoices.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "bad token"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.search_by_email("jane@example.com").await.unwrap_err();
        assert!(err.to_string().contains("401"), "got: {err}");
    }

    #[test]
    fn new_requires_credentials() {
        let mut config = test_config();
        config.api_token = None;
        let err = BillingClient::new(&config).unwrap_err();
        assert!(matches!(err, HashdeskError::Config(_)));
    }
}
