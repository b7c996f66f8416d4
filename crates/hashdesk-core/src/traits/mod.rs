// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Hashdesk service boundaries.
//!
//! All adapters extend the [`Adapter`] base trait and use `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod adapter;
pub mod billing;
pub mod catalog;
pub mod transport;

// Re-export all traits at the traits module level for convenience.
pub use adapter::Adapter;
pub use billing::BillingService;
pub use catalog::CatalogService;
pub use transport::ChannelTransport;
