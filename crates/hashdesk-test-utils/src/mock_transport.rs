// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel transport for deterministic testing.
//!
//! `MockTransport` implements `ChannelTransport` with scripted poll batches
//! and captured outbound messages for assertion in tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hashdesk_core::traits::{Adapter, ChannelTransport};
use hashdesk_core::{ChatId, HashdeskError, HealthStatus, InboundEvent, OutboundMessage};

/// A scripted transport for testing the dispatch loop and router.
///
/// Poll batches queued via [`script_batch`]/[`script_poll_failure`] are
/// returned by `poll_events` in order; once the script runs out, polls
/// return empty batches. Every `after` offset passed to `poll_events` is
/// recorded, and everything passed to `send` is captured.
///
/// [`script_batch`]: MockTransport::script_batch
/// [`script_poll_failure`]: MockTransport::script_poll_failure
pub struct MockTransport {
    batches: Arc<Mutex<VecDeque<Result<Vec<InboundEvent>, HashdeskError>>>>,
    polled_offsets: Arc<Mutex<Vec<Option<i64>>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    failing_chats: Arc<Mutex<HashSet<ChatId>>>,
    flush_newest: Arc<Mutex<Option<i64>>>,
    flush_calls: Arc<Mutex<usize>>,
}

impl MockTransport {
    /// Create a new mock transport with an empty script.
    pub fn new() -> Self {
        Self {
            batches: Arc::new(Mutex::new(VecDeque::new())),
            polled_offsets: Arc::new(Mutex::new(Vec::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            failing_chats: Arc::new(Mutex::new(HashSet::new())),
            flush_newest: Arc::new(Mutex::new(None)),
            flush_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue one poll batch. The next unconsumed `poll_events` call returns it.
    pub async fn script_batch(&self, events: Vec<InboundEvent>) {
        self.batches.lock().await.push_back(Ok(events));
    }

    /// Queue one failing poll.
    pub async fn script_poll_failure(&self, message: &str) {
        self.batches.lock().await.push_back(Err(HashdeskError::Transport {
            message: message.to_string(),
            source: None,
        }));
    }

    /// Make every send to `chat` fail with a transport error.
    pub async fn fail_sends_to(&self, chat: ChatId) {
        self.failing_chats.lock().await.insert(chat);
    }

    /// Set what `flush_backlog` reports as the newest flushed update.
    pub async fn set_flush_newest(&self, update_id: Option<i64>) {
        *self.flush_newest.lock().await = update_id;
    }

    /// Every `after` offset passed to `poll_events`, in call order.
    pub async fn polled_offsets(&self) -> Vec<Option<i64>> {
        self.polled_offsets.lock().await.clone()
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// How many times `flush_backlog` was called.
    pub async fn flush_calls(&self) -> usize {
        *self.flush_calls.lock().await
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    async fn health_check(&self) -> Result<HealthStatus, HashdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ChannelTransport for MockTransport {
    async fn poll_events(&self, after: Option<i64>) -> Result<Vec<InboundEvent>, HashdeskError> {
        self.polled_offsets.lock().await.push(after);
        match self.batches.lock().await.pop_front() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }

    async fn send(&self, msg: OutboundMessage) -> Result<(), HashdeskError> {
        if self.failing_chats.lock().await.contains(&msg.chat) {
            return Err(HashdeskError::Transport {
                message: format!("scripted send failure for chat {}", msg.chat),
                source: None,
            });
        }
        self.sent.lock().await.push(msg);
        Ok(())
    }

    async fn flush_backlog(&self) -> Result<Option<i64>, HashdeskError> {
        *self.flush_calls.lock().await += 1;
        Ok(*self.flush_newest.lock().await)
    }
}
