// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paginated catalog fetch and price-report formatting.
//!
//! Pages are requested only while the previous page came back full; a short
//! page (including an empty one) terminates the walk. A failed page aborts
//! the whole report, so users never see a partial price list presented as
//! complete.

use hashdesk_core::{HashdeskError, escape_html};
use tracing::{info, warn};

use crate::client::WooClient;
use crate::types::Product;

/// Hard bound on pages fetched per report. A store that keeps returning
/// full pages beyond this is misbehaving; stop rather than loop forever.
const MAX_PAGES: u32 = 20;

/// Builds the user-facing price report for one category.
pub(crate) async fn category_report(
    client: &WooClient,
    category_id: &str,
    label: &str,
) -> Result<String, HashdeskError> {
    let page_size = client.page_size();
    let mut lines = Vec::new();
    let mut fetched = 0usize;
    let mut page = 1u32;

    loop {
        let products = client.list_page(category_id, page).await?;
        let count = products.len();
        fetched += count;

        for product in &products {
            if product.is_listable() {
                lines.push(format_product_line(product));
            }
        }

        // A short page means the listing is exhausted. An exactly-full
        // final page costs one extra request that returns zero items.
        if (count as u32) < page_size {
            break;
        }
        if page >= MAX_PAGES {
            warn!(page, category = category_id, "page cap reached, stopping catalog walk");
            break;
        }
        page += 1;
    }

    info!(
        fetched,
        listable = lines.len(),
        category = category_id,
        "catalog fetch complete"
    );

    if lines.is_empty() {
        return Ok(format!(
            "Nothing currently available in {}. Check back soon!",
            escape_html(label)
        ));
    }

    let mut report = format!("<b>{}</b> price list:\n", escape_html(label));
    report.push_str(&lines.join("\n"));
    Ok(report)
}

/// One display line: linked name, price, stock count.
fn format_product_line(product: &Product) -> String {
    let name = escape_html(&product.name);
    let price = product.price.as_deref().unwrap_or_default();
    let stock = match product.stock_quantity {
        Some(qty) => format!("{qty} in stock"),
        None => "stock unknown".to_string(),
    };
    match product.permalink.as_deref() {
        Some(url) => format!("• <a href=\"{}\">{name}</a> - ${price} ({stock})", escape_html(url)),
        None => format!("• {name} - ${price} ({stock})"),
    }
}
