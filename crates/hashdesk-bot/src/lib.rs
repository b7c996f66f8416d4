// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch loop, command routing, and conversation state for the
//! Hashdesk bot.
//!
//! The [`BotLoop`] is the single worker that:
//! - Long-polls the transport for new inbound events
//! - Routes each one against per-chat conversation state
//! - Sends the reply, if any, back through the transport
//! - Advances the update cursor so no event is handled twice
//! - Backs off when the platform keeps failing

pub mod commands;
pub mod conversation;
mod menus;
pub mod router;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use hashdesk_config::TelegramConfig;
use hashdesk_core::{ChannelTransport, InboundEvent};

pub use commands::CommandTable;
pub use conversation::ConversationStore;
pub use router::Router;

/// The main dispatch loop coordinating transport, router, and state.
///
/// One instance is the whole bot: it owns the conversation store and the
/// update cursor, so events are processed strictly in order and exactly
/// one routing decision is made per event.
pub struct BotLoop {
    transport: Arc<dyn ChannelTransport>,
    router: Router,
    conversations: ConversationStore,
    /// Highest `update_id` fully processed; `None` until the first event
    /// or backlog flush.
    cursor: Option<i64>,
    poll_interval: Duration,
    flush_on_start: bool,
    consecutive_poll_failures: u32,
}

impl BotLoop {
    pub fn new(
        transport: Arc<dyn ChannelTransport>,
        router: Router,
        config: &TelegramConfig,
    ) -> Self {
        info!(
            poll_interval_secs = config.poll_interval_secs,
            flush_on_start = config.flush_on_start,
            "dispatch loop initialized"
        );

        Self {
            transport,
            router,
            conversations: ConversationStore::new(),
            cursor: None,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            flush_on_start: config.flush_on_start,
            consecutive_poll_failures: 0,
        }
    }

    /// Runs the dispatch loop until the cancellation token is triggered.
    ///
    /// Nothing that happens inside a cycle terminates the loop: poll
    /// failures back off and retry, routing and send failures are logged
    /// and skipped. Only cancellation stops it.
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!("dispatch loop running");

        if self.flush_on_start {
            self.flush_backlog().await;
        }

        loop {
            tokio::select! {
                // Checked first so shutdown never loses the race against
                // an elapsed sleep.
                biased;
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping dispatch loop");
                    break;
                }
                _ = tokio::time::sleep(self.next_delay()) => {
                    self.poll_cycle().await;
                }
            }
        }

        info!("dispatch loop stopped");
    }

    /// Discards updates accumulated while the bot was offline and seeds
    /// the cursor past them.
    async fn flush_backlog(&mut self) {
        match self.transport.flush_backlog().await {
            Ok(Some(newest)) => {
                info!(cursor = newest, "startup backlog flushed");
                self.cursor = Some(newest);
            }
            Ok(None) => debug!("no startup backlog to flush"),
            Err(e) => {
                warn!(error = %e, "backlog flush failed, starting unflushed");
            }
        }
    }

    /// One poll-and-dispatch cycle.
    pub(crate) async fn poll_cycle(&mut self) {
        let batch = match self.transport.poll_events(self.cursor).await {
            Ok(batch) => {
                self.consecutive_poll_failures = 0;
                batch
            }
            Err(e) => {
                self.consecutive_poll_failures += 1;
                warn!(
                    error = %e,
                    failures = self.consecutive_poll_failures,
                    "poll failed, backing off"
                );
                return;
            }
        };

        for event in batch {
            self.handle_event(&event).await;
            // Seen means handled. The cursor moves even when routing or
            // sending failed, so one bad event can never wedge the loop.
            self.cursor = Some(event.update_id);
        }
    }

    async fn handle_event(&mut self, event: &InboundEvent) {
        let reply = self
            .router
            .route(&event.kind, &mut self.conversations)
            .await;
        let Some(reply) = reply else {
            debug!(update_id = event.update_id, "event needs no reply");
            return;
        };

        let chat = reply.chat;
        if let Err(e) = self.transport.send(reply).await {
            error!(error = %e, chat = %chat, "failed to send reply");
        }
    }

    fn next_delay(&self) -> Duration {
        self.poll_interval + backoff_delay(self.consecutive_poll_failures)
    }
}

/// Extra pause added to the poll interval after consecutive poll
/// failures: 2^n seconds, capped at one minute.
fn backoff_delay(failures: u32) -> Duration {
    if failures == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs((1u64 << failures.min(6)).min(60))
    }
}
