// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock catalog and billing services for deterministic testing.
//!
//! Both mocks return a pre-configured report (or a scripted failure) and
//! record every query so router tests can assert what was asked for.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hashdesk_core::traits::{Adapter, BillingService, CatalogService};
use hashdesk_core::{HashdeskError, HealthStatus};

/// A mock catalog that returns one fixed report for every category.
pub struct MockCatalog {
    report: String,
    failing: bool,
    queries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockCatalog {
    /// Create a mock returning `report` for every category.
    pub fn returning(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            failing: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose every call fails with a catalog error.
    pub fn failing() -> Self {
        Self {
            report: String::new(),
            failing: true,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every `(category_id, label)` pair asked for, in call order.
    pub async fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl Adapter for MockCatalog {
    fn name(&self) -> &str {
        "mock-catalog"
    }

    async fn health_check(&self) -> Result<HealthStatus, HashdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn category_report(
        &self,
        category_id: &str,
        label: &str,
    ) -> Result<String, HashdeskError> {
        self.queries
            .lock()
            .await
            .push((category_id.to_string(), label.to_string()));
        if self.failing {
            return Err(HashdeskError::Catalog {
                message: "scripted catalog failure".to_string(),
                source: None,
            });
        }
        Ok(self.report.clone())
    }
}

/// A mock billing desk that returns one fixed report for every lookup.
pub struct MockBilling {
    report: String,
    failing: bool,
    email_queries: Arc<Mutex<Vec<String>>>,
    name_queries: Arc<Mutex<Vec<String>>>,
}

impl MockBilling {
    /// Create a mock returning `report` for every lookup.
    pub fn returning(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            failing: false,
            email_queries: Arc::new(Mutex::new(Vec::new())),
            name_queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose every call fails with a billing error.
    pub fn failing() -> Self {
        Self {
            report: String::new(),
            failing: true,
            email_queries: Arc::new(Mutex::new(Vec::new())),
            name_queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every email looked up, in call order.
    pub async fn email_queries(&self) -> Vec<String> {
        self.email_queries.lock().await.clone()
    }

    /// Every name looked up, in call order.
    pub async fn name_queries(&self) -> Vec<String> {
        self.name_queries.lock().await.clone()
    }

    fn result(&self) -> Result<String, HashdeskError> {
        if self.failing {
            return Err(HashdeskError::Billing {
                message: "scripted billing failure".to_string(),
                source: None,
            });
        }
        Ok(self.report.clone())
    }
}

#[async_trait]
impl Adapter for MockBilling {
    fn name(&self) -> &str {
        "mock-billing"
    }

    async fn health_check(&self) -> Result<HealthStatus, HashdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl BillingService for MockBilling {
    async fn report_for_email(&self, email: &str) -> Result<String, HashdeskError> {
        self.email_queries.lock().await.push(email.to_string());
        self.result()
    }

    async fn report_for_name(&self, name: &str) -> Result<String, HashdeskError> {
        self.name_queries.lock().await.push(name.to_string());
        self.result()
    }
}
