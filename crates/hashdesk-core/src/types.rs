// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the transport, router, and dispatch loop.

/// Identifier of one chat (one conversation) on the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user action pulled from the transport.
///
/// The `update_id` is the platform's monotonically increasing sequence
/// number; the dispatch loop uses it to advance its cursor. Events are
/// immutable once received and routed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub update_id: i64,
    pub kind: EventKind,
}

/// What the user actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A typed text message (reply-keyboard presses arrive this way too).
    Text { chat: ChatId, text: String },
    /// An inline-button press carrying a callback payload.
    Callback { chat: ChatId, data: String },
    /// An update the bot cannot act on (sticker, edit, member change,
    /// message without text). Seen by the cursor, never routed.
    Ignored,
}

impl InboundEvent {
    /// Chat the event belongs to, if it carries one.
    pub fn chat(&self) -> Option<ChatId> {
        match &self.kind {
            EventKind::Text { chat, .. } | EventKind::Callback { chat, .. } => Some(*chat),
            EventKind::Ignored => None,
        }
    }
}

/// An outbound message handed to the transport for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat: ChatId,
    /// HTML-formatted body. Interpolated user/upstream text must already be
    /// escaped via [`crate::html::escape_html`].
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl OutboundMessage {
    /// Plain text reply without a keyboard.
    pub fn text(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
            keyboard: None,
        }
    }

    /// Reply carrying a keyboard.
    pub fn with_keyboard(chat: ChatId, text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            chat,
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Rows of plain-text buttons. Presses arrive back as ordinary text,
    /// which is why the router resolves button labels as command synonyms.
    Reply { rows: Vec<Vec<String>> },
    /// Rows of labeled buttons carrying callback payloads.
    Inline { rows: Vec<Vec<InlineButton>> },
}

/// One button of an inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub payload: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}
