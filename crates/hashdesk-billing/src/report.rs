// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invoice partitioning and report formatting.
//!
//! Outstanding invoices (unpaid or scheduled) are always shown, each with a
//! pay link. Settled invoices are trimmed to a trailing window and capped to
//! the most recent few; anything in another lifecycle state (draft, canceled)
//! is never shown.

use chrono::{DateTime, Duration, Utc};
use hashdesk_core::{HashdeskError, escape_html};
use tracing::{debug, info};

use crate::client::BillingClient;
use crate::types::{Account, Invoice, InvoiceStatus};

/// Builds the invoice report for the account matching `email` exactly.
pub(crate) async fn report_for_email(
    client: &BillingClient,
    email: &str,
    settled_cap: usize,
    settled_window_days: i64,
) -> Result<String, HashdeskError> {
    let accounts = client.search_by_email(email).await?;
    build_report(client, accounts, email, settled_cap, settled_window_days).await
}

/// Builds the invoice report for the account matching `name` exactly.
pub(crate) async fn report_for_name(
    client: &BillingClient,
    name: &str,
    settled_cap: usize,
    settled_window_days: i64,
) -> Result<String, HashdeskError> {
    let accounts = client.search_by_name(name).await?;
    build_report(client, accounts, name, settled_cap, settled_window_days).await
}

async fn build_report(
    client: &BillingClient,
    accounts: Vec<Account>,
    queried: &str,
    settled_cap: usize,
    settled_window_days: i64,
) -> Result<String, HashdeskError> {
    let Some(account) = accounts.first() else {
        return Ok(format!(
            "No account found for {}. Please double-check with support.",
            escape_html(queried)
        ));
    };
    if accounts.len() > 1 {
        debug!(
            matches = accounts.len(),
            account_id = %account.id,
            "multiple account matches, using the first"
        );
    }

    let all = client.list_invoices(&account.id).await?;
    info!(account_id = %account.id, invoices = all.len(), "invoice fetch complete");

    let (outstanding, settled) = partition(all, Utc::now(), settled_window_days, settled_cap);
    if outstanding.is_empty() && settled.is_empty() {
        return Ok("No invoices found for your account.".to_string());
    }
    Ok(render_report(account, &outstanding, &settled))
}

/// Splits invoices into the outstanding and settled buckets.
///
/// Settled keeps only payments inside the trailing window, newest first,
/// at most `cap` of them. Unrecognized statuses are dropped.
pub(crate) fn partition(
    invoices: Vec<Invoice>,
    now: DateTime<Utc>,
    window_days: i64,
    cap: usize,
) -> (Vec<Invoice>, Vec<Invoice>) {
    let window_start = now - Duration::days(window_days);
    let mut outstanding = Vec::new();
    let mut settled = Vec::new();

    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Unpaid | InvoiceStatus::Scheduled => outstanding.push(invoice),
            InvoiceStatus::Paid => {
                if invoice.updated_at >= window_start {
                    settled.push(invoice);
                }
            }
            InvoiceStatus::Other => {}
        }
    }

    settled.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    settled.truncate(cap);
    (outstanding, settled)
}

fn render_report(account: &Account, outstanding: &[Invoice], settled: &[Invoice]) -> String {
    let who = if account.name.trim().is_empty() {
        "your account"
    } else {
        account.name.as_str()
    };
    let mut report = format!("<b>Invoices for {}</b>\n", escape_html(who));

    if !outstanding.is_empty() {
        report.push_str("\nOutstanding:\n");
        for invoice in outstanding {
            report.push_str(&outstanding_line(invoice));
            report.push('\n');
        }
    }
    if !settled.is_empty() {
        report.push_str("\nRecently paid:\n");
        for invoice in settled {
            report.push_str(&settled_line(invoice));
            report.push('\n');
        }
    }

    report.trim_end().to_string()
}

fn outstanding_line(invoice: &Invoice) -> String {
    let number = escape_html(&invoice.invoice_number);
    let amount = format_money(invoice.amount_money.amount);
    match invoice.public_url.as_deref() {
        Some(url) => format!(
            "• #{number} - {amount} ({}): <a href=\"{}\">pay now</a>",
            invoice.status,
            escape_html(url)
        ),
        None => format!("• #{number} - {amount} ({})", invoice.status),
    }
}

fn settled_line(invoice: &Invoice) -> String {
    format!(
        "• #{} - {} (paid {})",
        escape_html(&invoice.invoice_number),
        format_money(invoice.amount_money.amount),
        invoice.updated_at.format("%Y-%m-%d")
    )
}

/// Renders integer minor units as dollars, e.g. 12000 -> "$120.00".
/// Negative amounts (refunds, credit memos) carry the sign up front.
fn format_money(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let amount = amount.abs();
    format!("{sign}${}.{:02}", amount / 100, amount % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hashdesk_config::model::BillingConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn invoice(number: &str, status: InvoiceStatus, updated_at: DateTime<Utc>) -> Invoice {
        Invoice {
            invoice_number: number.to_string(),
            status,
            amount_money: crate::types::Money {
                amount: 12000,
                currency: "USD".into(),
            },
            updated_at,
            public_url: Some(format!("https://billing.example.com/pay/{number}")),
        }
    }

    fn test_client(base_url: &str) -> BillingClient {
        BillingClient::new(&BillingConfig {
            base_url: Some("https://billing.example.com".into()),
            api_token: Some("tok_test".into()),
            location_id: Some("LOC1".into()),
            settled_cap: 5,
            settled_window_days: 180,
        })
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    #[test]
    fn partition_buckets_by_status_and_window() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let invoices = vec![
            invoice("1", InvoiceStatus::Unpaid, now - Duration::days(3)),
            invoice("2", InvoiceStatus::Scheduled, now - Duration::days(10)),
            invoice("3", InvoiceStatus::Paid, now - Duration::days(30)),
            invoice("4", InvoiceStatus::Paid, now - Duration::days(200)),
        ];

        let (outstanding, settled) = partition(invoices, now, 180, 5);

        let outstanding_numbers: Vec<&str> =
            outstanding.iter().map(|i| i.invoice_number.as_str()).collect();
        assert_eq!(outstanding_numbers, ["1", "2"]);
        let settled_numbers: Vec<&str> =
            settled.iter().map(|i| i.invoice_number.as_str()).collect();
        assert_eq!(settled_numbers, ["3"]);
    }

    #[test]
    fn partition_drops_unrecognized_statuses() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let invoices = vec![invoice("1", InvoiceStatus::Other, now)];
        let (outstanding, settled) = partition(invoices, now, 180, 5);
        assert!(outstanding.is_empty());
        assert!(settled.is_empty());
    }

    #[test]
    fn settled_is_newest_first_and_capped() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let invoices = vec![
            invoice("old", InvoiceStatus::Paid, now - Duration::days(90)),
            invoice("newest", InvoiceStatus::Paid, now - Duration::days(1)),
            invoice("mid", InvoiceStatus::Paid, now - Duration::days(40)),
        ];

        let (_, settled) = partition(invoices, now, 180, 2);

        let numbers: Vec<&str> = settled.iter().map(|i| i.invoice_number.as_str()).collect();
        assert_eq!(numbers, ["newest", "mid"]);
    }

    #[test]
    fn money_formats_minor_units() {
        assert_eq!(format_money(12000), "$120.00");
        assert_eq!(format_money(8950), "$89.50");
        assert_eq!(format_money(5), "$0.05");
    }

    #[test]
    fn money_formats_credits_with_a_leading_sign() {
        assert_eq!(format_money(-50), "-$0.50");
        assert_eq!(format_money(-12050), "-$120.50");
        assert_eq!(format_money(0), "$0.00");
    }

    #[test]
    fn outstanding_line_has_number_amount_and_pay_link() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let line = outstanding_line(&invoice("1042", InvoiceStatus::Unpaid, now));
        assert!(line.contains("#1042 - $120.00"), "got: {line}");
        assert!(line.contains("(unpaid)"));
        assert!(line.contains("<a href=\"https://billing.example.com/pay/1042\">pay now</a>"));
    }

    #[test]
    fn settled_line_shows_payment_date() {
        let paid_at = Utc.with_ymd_and_hms(2026, 7, 14, 9, 0, 0).unwrap();
        let line = settled_line(&invoice("1017", InvoiceStatus::Paid, paid_at));
        assert!(line.contains("#1017 - $120.00"));
        assert!(line.contains("(paid 2026-07-14)"));
    }

    #[tokio::test]
    async fn unknown_email_reads_as_no_account_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"accounts": []})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let report = report_for_email(&client, "nobody@example.com", 5, 180)
            .await
            .unwrap();
        assert!(report.contains("No account found for nobody@example.com"));
    }

    #[tokio::test]
    async fn multiple_matches_use_the_first_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accounts": [
                    {"id": "A1", "name": "Jane Doe", "email": "jane@example.com"},
                    {"id": "A2", "name": "Jane Doe", "email": "jane@example.com"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .and(query_param("account_id", "A1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"invoices": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let report = report_for_email(&client, "jane@example.com", 5, 180).await.unwrap();
        assert!(report.contains("No invoices found"));
    }

    #[tokio::test]
    async fn report_renders_outstanding_then_settled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accounts": [{"id": "A1", "name": "Jane Doe", "email": "jane@example.com"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "invoices": [
                    {
                        "invoice_number": "1042",
                        "status": "UNPAID",
                        "amount_money": {"amount": 12000, "currency": "USD"},
                        "updated_at": "2026-08-10T09:30:00Z",
                        "public_url": "https://billing.example.com/pay/1042"
                    },
                    {
                        "invoice_number": "1017",
                        "status": "PAID",
                        "amount_money": {"amount": 8950, "currency": "USD"},
                        "updated_at": "2026-07-14T09:30:00Z",
                        "public_url": "https://billing.example.com/pay/1017"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let report = report_for_email(&client, "jane@example.com", 5, 180).await.unwrap();

        assert!(report.starts_with("<b>Invoices for Jane Doe</b>"));
        assert!(report.contains("#1042 - $120.00"));
        assert!(report.contains("pay now"));
        assert!(report.contains("#1017 - $89.50"));
        let outstanding_at = report.find("Outstanding:").unwrap();
        let settled_at = report.find("Recently paid:").unwrap();
        assert!(outstanding_at < settled_at);
    }

    #[tokio::test]
    async fn upstream_failure_mid_report_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accounts": [{"id": "A1", "name": "Jane Doe", "email": "jane@example.com"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/invoices"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = report_for_email(&client, "jane@example.com", 5, 180).await.unwrap_err();
        assert!(matches!(err, HashdeskError::Billing { .. }));
    }
}
