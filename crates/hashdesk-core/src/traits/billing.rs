// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Billing service trait for account invoice reports.

use async_trait::async_trait;

use crate::error::HashdeskError;
use crate::traits::adapter::Adapter;

/// Resolves a conversational identity to an account and reports its
/// invoices.
#[async_trait]
pub trait BillingService: Adapter {
    /// Builds the invoice report for the account matching `email` exactly.
    ///
    /// "No such account" and "account has no invoices" are `Ok` with the
    /// corresponding canned text; `Err` is reserved for upstream failures.
    async fn report_for_email(&self, email: &str) -> Result<String, HashdeskError>;

    /// Legacy variant of [`Self::report_for_email`] keyed on the exact
    /// account name.
    async fn report_for_name(&self, name: &str) -> Result<String, HashdeskError>;
}
