// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat conversation state for the client intake flow.

use std::collections::HashMap;

use hashdesk_core::ChatId;

/// Where a chat stands in the intake flow.
///
/// The step only ever moves forward; re-sending an intake trigger never
/// regresses it. Only the explicit reset command drops a chat back to
/// [`Idle`].
///
/// [`Idle`]: IntakeStep::Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakeStep {
    /// No intake in progress.
    #[default]
    Idle,
    /// The next text message is taken as the client's name.
    AwaitingName,
    /// The next text message is taken as the client's email.
    AwaitingEmail,
    /// Intake complete; account actions are unlocked.
    Ready,
}

/// Everything the bot remembers about one chat.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub step: IntakeStep,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// All conversation state, keyed by chat.
///
/// Owned by the dispatch loop and mutated only there; the router receives
/// it by `&mut`, so no locking is involved.
#[derive(Debug, Default)]
pub struct ConversationStore {
    states: HashMap<ChatId, ConversationState>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a chat, created fresh on first contact.
    pub fn state_mut(&mut self, chat: ChatId) -> &mut ConversationState {
        self.states.entry(chat).or_default()
    }

    /// Read-only view; `None` when the chat has never been seen.
    pub fn get(&self, chat: ChatId) -> Option<&ConversationState> {
        self.states.get(&chat)
    }

    /// Drops a chat back to a clean slate.
    pub fn reset(&mut self, chat: ChatId) {
        self.states.remove(&chat);
    }
}
