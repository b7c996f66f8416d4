// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Telegram Bot API.
//!
//! Inbound types deserialize leniently (unknown fields ignored, most fields
//! optional) because the API grows fields over time; lowering to
//! [`hashdesk_core::EventKind`] decides what the bot can actually act on.

use hashdesk_core::Keyboard;
use serde::{Deserialize, Serialize};

/// Update kinds the bot subscribes to. Everything else is filtered
/// server-side so it never consumes an `update_id` we would have to skip.
pub const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Envelope every Bot API response arrives in.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One entry of a getUpdates batch.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    /// The message the pressed inline keyboard was attached to. Telegram
    /// omits it for very old messages, in which case the press cannot be
    /// routed to a chat.
    #[serde(default)]
    pub message: Option<Message>,
}

/// getMe result, used by health checks.
#[derive(Debug, Clone, Deserialize)]
pub struct BotProfile {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

/// getUpdates request body.
#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

/// sendMessage request body.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// answerCallbackQuery request body.
#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryRequest<'a> {
    pub callback_query_id: &'a str,
}

/// Either keyboard flavor, serialized as the markup object Telegram expects.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Reply(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

#[derive(Debug, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        match keyboard {
            Keyboard::Reply { rows } => ReplyMarkup::Reply(ReplyKeyboardMarkup {
                keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|text| KeyboardButton { text: text.clone() })
                            .collect()
                    })
                    .collect(),
                resize_keyboard: true,
            }),
            Keyboard::Inline { rows } => ReplyMarkup::Inline(InlineKeyboardMarkup {
                inline_keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|button| InlineKeyboardButton {
                                text: button.label.clone(),
                                callback_data: button.payload.clone(),
                            })
                            .collect()
                    })
                    .collect(),
            }),
        }
    }
}
