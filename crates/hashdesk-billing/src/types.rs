// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the billing REST API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use strum::Display;

/// One billing account as returned by the account search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Response envelope for `GET /v2/accounts/search`.
#[derive(Debug, Deserialize)]
pub struct AccountSearchResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// A money amount in integer minor units (cents for USD).
#[derive(Debug, Clone, Deserialize)]
pub struct Money {
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
}

/// Invoice lifecycle status.
///
/// The API sends more statuses than we care about (drafts, canceled,
/// payment-pending); everything unrecognized folds into [`Other`] and is
/// never shown to users.
///
/// [`Other`]: InvoiceStatus::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "lowercase")]
pub enum InvoiceStatus {
    Unpaid,
    Scheduled,
    Paid,
    #[serde(other)]
    #[default]
    Other,
}

/// One invoice as returned by the invoice listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub amount_money: Money,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub public_url: Option<String>,
}

/// Response envelope for `GET /v2/invoices`. A present, non-empty `cursor`
/// means more pages follow.
#[derive(Debug, Deserialize)]
pub struct InvoiceListResponse {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub cursor: Option<String>,
}
