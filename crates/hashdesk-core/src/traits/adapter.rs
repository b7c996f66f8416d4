// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait shared by all Hashdesk adapters.

use async_trait::async_trait;

use crate::error::HashdeskError;
use crate::types::HealthStatus;

/// The base trait for every external-service adapter.
///
/// Provides identity and a health probe; `hashdesk doctor` walks all wired
/// adapters through this trait.
#[async_trait]
pub trait Adapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, HashdeskError>;
}
