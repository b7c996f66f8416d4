// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for the messaging platform the bot lives on.

use async_trait::async_trait;

use crate::error::HashdeskError;
use crate::traits::adapter::Adapter;
use crate::types::{InboundEvent, OutboundMessage};

/// Bidirectional message transport.
///
/// The dispatch loop owns the cursor; the transport only translates between
/// the platform wire format and [`InboundEvent`]/[`OutboundMessage`].
#[async_trait]
pub trait ChannelTransport: Adapter {
    /// Long-polls for the next batch of events.
    ///
    /// With `after = Some(id)`, only events with `update_id > id` are
    /// returned and everything at or below `id` is confirmed to the
    /// platform. With `after = None` (first poll of a fresh process) the
    /// platform decides where the backlog starts. Events are returned in
    /// ascending `update_id` order. An empty vec after the long-poll
    /// timeout is normal.
    async fn poll_events(&self, after: Option<i64>) -> Result<Vec<InboundEvent>, HashdeskError>;

    /// Delivers one message. At-most-once: a failure is reported, never
    /// retried here.
    async fn send(&self, msg: OutboundMessage) -> Result<(), HashdeskError>;

    /// Discards the backlog accumulated while the bot was offline.
    ///
    /// Returns the highest `update_id` that was flushed away, to seed the
    /// dispatch cursor, or `None` when there was no backlog.
    async fn flush_backlog(&self) -> Result<Option<i64>, HashdeskError>;
}
