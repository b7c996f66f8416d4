// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog service trait for product price reports.

use async_trait::async_trait;

use crate::error::HashdeskError;
use crate::traits::adapter::Adapter;

/// Produces user-facing price reports from the product catalog.
#[async_trait]
pub trait CatalogService: Adapter {
    /// Builds the full report for one category: every listable product,
    /// already filtered and formatted, or the canned "nothing available"
    /// text when the filtered set is empty.
    ///
    /// `Err` means the upstream could not be read at all; the caller
    /// substitutes its own failure message. Partial reports are never
    /// returned.
    async fn category_report(&self, category_id: &str, label: &str)
    -> Result<String, HashdeskError>;
}
