// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hashdesk integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockTransport`] - Scripted channel transport with poll batches and send capture
//! - [`MockCatalog`] - Catalog service with a fixed report and query recording
//! - [`MockBilling`] - Billing service with a fixed report and query recording

pub mod mock_services;
pub mod mock_transport;

pub use mock_services::{MockBilling, MockCatalog};
pub use mock_transport::MockTransport;
