// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Telegram Bot API.
//!
//! Provides [`TelegramClient`] which handles request construction, the
//! `ApiResponse` envelope, and error mapping. Every Bot API method is an
//! HTTP POST with a JSON body against `{base}/{method}`.

use std::time::Duration;

use hashdesk_core::{HashdeskError, OutboundMessage};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{
    ALLOWED_UPDATES, AnswerCallbackQueryRequest, ApiResponse, BotProfile, GetUpdatesRequest,
    ReplyMarkup, SendMessageRequest, Update,
};

/// Margin added to the long-poll timeout to get the HTTP client timeout, so
/// a full-length long poll never trips the client-level deadline.
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

/// HTTP client for Telegram Bot API communication.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// Creates a new Bot API client for the given token.
    ///
    /// `poll_timeout_secs` is the longest getUpdates long poll this client
    /// will be asked to hold open; the HTTP timeout is derived from it.
    pub fn new(bot_token: &str, poll_timeout_secs: u64) -> Result<Self, HashdeskError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(
                poll_timeout_secs + REQUEST_TIMEOUT_MARGIN_SECS,
            ))
            .build()
            .map_err(|e| HashdeskError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: format!("https://api.telegram.org/bot{bot_token}"),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Fetches a batch of updates.
    ///
    /// `offset` is the lowest `update_id` the caller wants; everything below
    /// it is confirmed to Telegram and never re-delivered. `None` lets the
    /// server pick up from the oldest unconfirmed update.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, HashdeskError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        let updates: Vec<Update> = self.call("getUpdates", &request).await?;
        debug!(count = updates.len(), ?offset, "received update batch");
        Ok(updates)
    }

    /// Delivers one message, HTML-formatted, with optional keyboard markup.
    pub async fn send_message(&self, msg: &OutboundMessage) -> Result<(), HashdeskError> {
        let request = SendMessageRequest {
            chat_id: msg.chat.0,
            text: &msg.text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
            reply_markup: msg.keyboard.as_ref().map(ReplyMarkup::from),
        };
        // The response repeats the sent message; nothing in it is needed.
        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    /// Acknowledges a callback query so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), HashdeskError> {
        let request = AnswerCallbackQueryRequest { callback_query_id };
        let _: serde_json::Value = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }

    /// Fetches the bot's own profile. Used as the transport health probe.
    pub async fn get_me(&self) -> Result<BotProfile, HashdeskError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Performs one Bot API call and unwraps the `ApiResponse` envelope.
    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, HashdeskError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HashdeskError::Transport {
                message: format!("{method} request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HashdeskError::Transport {
                message: format!("{method}: failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !status.is_success() {
            return Err(HashdeskError::Transport {
                message: format!("{method} returned {status}: {text}"),
                source: None,
            });
        }

        let envelope: ApiResponse<R> =
            serde_json::from_str(&text).map_err(|e| HashdeskError::Transport {
                message: format!("{method}: failed to parse response: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !envelope.ok {
            return Err(HashdeskError::Transport {
                message: format!(
                    "{method} rejected: {}",
                    envelope.description.unwrap_or_else(|| "no description".into())
                ),
                source: None,
            });
        }

        envelope.result.ok_or_else(|| HashdeskError::Transport {
            message: format!("{method}: ok response without result"),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashdesk_core::{ChatId, InlineButton, Keyboard};
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> TelegramClient {
        TelegramClient::new("123:TEST", 25)
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn updates_body(updates: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"ok": true, "result": updates})
    }

    #[tokio::test]
    async fn get_updates_sends_offset_and_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/getUpdates"))
            .and(body_json(serde_json::json!({
                "offset": 8,
                "timeout": 25,
                "allowed_updates": ["message", "callback_query"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(updates_body(
                serde_json::json!([{
                    "update_id": 8,
                    "message": {
                        "message_id": 1,
                        "chat": {"id": 42},
                        "text": "prices"
                    }
                }]),
            )))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let updates = client.get_updates(Some(8), 25).await.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].update_id, 8);
    }

    #[tokio::test]
    async fn get_updates_omits_offset_on_first_poll() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/getUpdates"))
            .and(body_json(serde_json::json!({
                "timeout": 25,
                "allowed_updates": ["message", "callback_query"]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(updates_body(serde_json::json!([]))),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let updates = client.get_updates(None, 25).await.unwrap();
        assert!(updates.is_empty());
    }

    #[tokio::test]
    async fn api_rejection_surfaces_description() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/getUpdates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "description": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_updates(None, 25).await.unwrap_err();
        assert!(err.to_string().contains("Unauthorized"), "got: {err}");
    }

    #[tokio::test]
    async fn http_error_status_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sendMessage"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let msg = OutboundMessage::text(ChatId(42), "hello");
        let err = client.send_message(&msg).await.unwrap_err();
        assert!(err.to_string().contains("502"), "got: {err}");
    }

    #[tokio::test]
    async fn send_message_uses_html_and_no_preview() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": 42,
                "parse_mode": "HTML",
                "disable_web_page_preview": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 9}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let msg = OutboundMessage::text(ChatId(42), "<b>hi</b>");
        client.send_message(&msg).await.unwrap();
    }

    #[tokio::test]
    async fn send_message_carries_inline_keyboard() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "reply_markup": {
                    "inline_keyboard": [[{"text": "ASIC Miners", "callback_data": "cat:21"}]]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 10}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let msg = OutboundMessage::with_keyboard(
            ChatId(42),
            "Pick a category:",
            Keyboard::Inline {
                rows: vec![vec![InlineButton::new("ASIC Miners", "cat:21")]],
            },
        );
        client.send_message(&msg).await.unwrap();
    }

    #[tokio::test]
    async fn get_me_parses_profile() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"id": 7, "is_bot": true, "first_name": "hashdesk", "username": "hashdesk_bot"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let profile = client.get_me().await.unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.username.as_deref(), Some("hashdesk_bot"));
    }

    #[tokio::test]
    async fn answer_callback_query_posts_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/answerCallbackQuery"))
            .and(body_json(serde_json::json!({"callback_query_id": "cbq-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.answer_callback_query("cbq-1").await.unwrap();
    }
}
