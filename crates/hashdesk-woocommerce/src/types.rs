// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the WooCommerce products endpoint.

use serde::Deserialize;

/// One product as the store returns it.
///
/// WooCommerce serializes `price` as a string and omits or blanks fields
/// freely, so everything except the name is optional and the validity
/// filter decides what is actually presentable.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub permalink: Option<String>,
}

impl Product {
    /// The validity filter: a product is listable when its price parses to
    /// a positive number and it is in stock. Everything else is dropped,
    /// never surfaced.
    pub fn is_listable(&self) -> bool {
        let priced = self
            .price
            .as_deref()
            .and_then(|p| p.parse::<f64>().ok())
            .is_some_and(|p| p > 0.0);
        priced && self.stock_status == StockStatus::InStock
    }
}

/// Stock status values the store emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnBackorder,
    /// Any status this bot does not know. Treated as not in stock.
    #[serde(other)]
    Other,
}

impl Default for StockStatus {
    fn default() -> Self {
        StockStatus::Other
    }
}
