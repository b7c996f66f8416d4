// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport adapter for the Hashdesk bot.
//!
//! Implements [`ChannelTransport`] over the raw Bot API: long polling with
//! explicit offsets, message delivery with HTML formatting and keyboard
//! markup, callback-query acknowledgement, and lowering of wire updates
//! into channel-agnostic [`InboundEvent`]s.

pub mod client;
pub mod types;

use async_trait::async_trait;
use hashdesk_config::model::TelegramConfig;
use hashdesk_core::error::HashdeskError;
use hashdesk_core::traits::{Adapter, ChannelTransport};
use hashdesk_core::types::{ChatId, EventKind, HealthStatus, InboundEvent, OutboundMessage};
use tracing::{debug, info, warn};

use crate::client::TelegramClient;
use crate::types::Update;

/// Telegram transport implementing [`ChannelTransport`].
#[derive(Debug)]
pub struct TelegramTransport {
    client: TelegramClient,
    poll_timeout_secs: u64,
}

impl TelegramTransport {
    /// Creates a new Telegram transport.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, HashdeskError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            HashdeskError::Config("telegram.bot_token is required for the Telegram transport".into())
        })?;

        if token.is_empty() {
            return Err(HashdeskError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            client: TelegramClient::new(token, config.poll_timeout_secs)?,
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    #[cfg(test)]
    fn with_client(client: TelegramClient, poll_timeout_secs: u64) -> Self {
        Self {
            client,
            poll_timeout_secs,
        }
    }
}

/// Lowers one wire update into the event the router understands.
///
/// Anything the bot cannot act on becomes [`EventKind::Ignored`]; the
/// dispatch loop still advances its cursor past those, so one odd update
/// never wedges the stream.
fn lower_update(update: Update) -> EventKind {
    if let Some(callback) = update.callback_query {
        let chat = callback.message.as_ref().map(|m| m.chat.id);
        return match (chat, callback.data) {
            (Some(chat), Some(data)) => EventKind::Callback {
                chat: ChatId(chat),
                data,
            },
            _ => EventKind::Ignored,
        };
    }

    if let Some(message) = update.message {
        return match message.text {
            Some(text) => EventKind::Text {
                chat: ChatId(message.chat.id),
                text,
            },
            // Stickers, photos, joins: nothing to route.
            None => EventKind::Ignored,
        };
    }

    EventKind::Ignored
}

#[async_trait]
impl Adapter for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn health_check(&self) -> Result<HealthStatus, HashdeskError> {
        // getMe validates the token without side effects.
        match self.client.get_me().await {
            Ok(profile) => {
                debug!(bot_id = profile.id, username = ?profile.username, "getMe ok");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }
}

#[async_trait]
impl ChannelTransport for TelegramTransport {
    async fn poll_events(&self, after: Option<i64>) -> Result<Vec<InboundEvent>, HashdeskError> {
        // getUpdates wants the first id we have NOT processed.
        let offset = after.map(|id| id + 1);
        let updates = self
            .client
            .get_updates(offset, self.poll_timeout_secs)
            .await?;

        let mut events = Vec::with_capacity(updates.len());
        for update in updates {
            if let Some(callback) = update.callback_query.as_ref() {
                // Best-effort: the spinner should clear even when the press
                // ends up unroutable.
                if let Err(e) = self.client.answer_callback_query(&callback.id).await {
                    warn!(error = %e, update_id = update.update_id, "failed to acknowledge callback query");
                }
            }
            events.push(InboundEvent {
                update_id: update.update_id,
                kind: lower_update(update),
            });
        }
        Ok(events)
    }

    async fn send(&self, msg: OutboundMessage) -> Result<(), HashdeskError> {
        self.client.send_message(&msg).await
    }

    async fn flush_backlog(&self) -> Result<Option<i64>, HashdeskError> {
        // offset = -1 with a zero timeout returns at most the newest pending
        // update and forgets the rest. Seeding the cursor with its id makes
        // the next poll confirm it as well.
        let updates = self.client.get_updates(Some(-1), 0).await?;
        let newest = updates.last().map(|u| u.update_id);
        match newest {
            Some(update_id) => info!(update_id, "flushed offline backlog"),
            None => debug!("no offline backlog to flush"),
        }
        Ok(newest)
    }
}
