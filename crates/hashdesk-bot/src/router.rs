// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes inbound events to replies.
//!
//! The precedence chain below is load-bearing and evaluated top to
//! bottom, first match wins:
//!
//! 1. reset command: wipe the conversation, show the main menu
//! 2. menu navigation: show the category picker
//! 3. intake trigger: start or resume the intake flow
//! 4. awaiting name: capture the text as the client's name
//! 5. awaiting email: capture the text as the client's email
//! 6. ready + account action: invoice report for the stored email
//! 7. category token: price report for that category
//! 8. anything else: silence
//!
//! Steps 4 and 5 sit above 6 and 7 so a typed name or email is never
//! mistaken for a command; steps 1 to 3 sit above 4 and 5 so a user can
//! always navigate out of a half-finished intake. Button callbacks skip
//! steps 3 to 6 entirely, buttons never carry intake data.

use std::sync::Arc;

use tracing::{debug, error};

use hashdesk_core::{
    BillingService, CatalogService, ChatId, EventKind, OutboundMessage, escape_html,
};

use crate::commands::{Action, CategorySpec, CommandTable};
use crate::conversation::{ConversationStore, IntakeStep};
use crate::menus;

const CATALOG_UNAVAILABLE: &str =
    "Sorry, I couldn't fetch the price list right now. Please try again in a few minutes.";
const BILLING_UNAVAILABLE: &str =
    "Sorry, I couldn't reach the billing system right now. Please try again in a few minutes.";

/// Classifies one inbound event against the conversation state and the
/// command table, and produces the reply, if any.
pub struct Router {
    catalog: Arc<dyn CatalogService>,
    billing: Arc<dyn BillingService>,
    table: CommandTable,
}

impl Router {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        billing: Arc<dyn BillingService>,
        table: CommandTable,
    ) -> Self {
        Self {
            catalog,
            billing,
            table,
        }
    }

    /// Routes one event. `None` means no reply is warranted; the caller
    /// still advances its cursor.
    pub async fn route(
        &self,
        event: &EventKind,
        store: &mut ConversationStore,
    ) -> Option<OutboundMessage> {
        match event {
            EventKind::Text { chat, text } => self.route_text(*chat, text, store).await,
            EventKind::Callback { chat, data } => self.route_callback(*chat, data, store).await,
            EventKind::Ignored => None,
        }
    }

    async fn route_text(
        &self,
        chat: ChatId,
        text: &str,
        store: &mut ConversationStore,
    ) -> Option<OutboundMessage> {
        let action = self.table.resolve_text(text);

        match &action {
            Some(Action::MainMenu) => {
                debug!(chat = %chat, "conversation reset");
                store.reset(chat);
                return Some(menus::main_menu(chat));
            }
            Some(Action::CategoryMenu) => {
                return Some(menus::category_menu(chat, self.table.categories()));
            }
            Some(Action::BeginIntake) => return Some(self.begin_intake(chat, store)),
            _ => {}
        }

        // Absent record reads as Idle; nothing is allocated for chats
        // that never enter the intake flow.
        let step = store.get(chat).map(|s| s.step).unwrap_or_default();
        match step {
            IntakeStep::AwaitingName => return Some(capture_name(chat, text, store)),
            IntakeStep::AwaitingEmail => return Some(capture_email(chat, text, store)),
            IntakeStep::Idle | IntakeStep::Ready => {}
        }

        match action {
            Some(Action::AccountInvoices) if step == IntakeStep::Ready => {
                let email = store.get(chat).and_then(|s| s.email.clone())?;
                Some(self.billing_reply(chat, &email).await)
            }
            Some(Action::Category(spec)) => Some(self.catalog_reply(chat, &spec).await),
            _ => None,
        }
    }

    async fn route_callback(
        &self,
        chat: ChatId,
        data: &str,
        store: &mut ConversationStore,
    ) -> Option<OutboundMessage> {
        match self.table.resolve_callback(data)? {
            Action::MainMenu => {
                debug!(chat = %chat, "conversation reset");
                store.reset(chat);
                Some(menus::main_menu(chat))
            }
            Action::CategoryMenu => Some(menus::category_menu(chat, self.table.categories())),
            Action::Category(spec) => Some(self.catalog_reply(chat, &spec).await),
            // The table never registers these as callbacks.
            Action::BeginIntake | Action::AccountInvoices => None,
        }
    }

    fn begin_intake(&self, chat: ChatId, store: &mut ConversationStore) -> OutboundMessage {
        let state = store.state_mut(chat);
        match state.step {
            IntakeStep::Idle | IntakeStep::AwaitingName => {
                state.step = IntakeStep::AwaitingName;
                OutboundMessage::text(chat, "Happy to get you set up! What's your name?")
            }
            // Re-triggering intake never regresses a conversation.
            IntakeStep::AwaitingEmail => OutboundMessage::text(
                chat,
                "Almost there! What email address is your hosting account under?",
            ),
            IntakeStep::Ready => OutboundMessage::with_keyboard(
                chat,
                "You're already set up! Use the menu below to check on your account.",
                menus::account_keyboard(),
            ),
        }
    }

    async fn catalog_reply(&self, chat: ChatId, spec: &CategorySpec) -> OutboundMessage {
        match self.catalog.category_report(&spec.id, &spec.label).await {
            Ok(report) => OutboundMessage::text(chat, report),
            Err(e) => {
                error!(error = %e, category = %spec.id, "catalog fetch failed");
                OutboundMessage::text(chat, CATALOG_UNAVAILABLE)
            }
        }
    }

    async fn billing_reply(&self, chat: ChatId, email: &str) -> OutboundMessage {
        match self.billing.report_for_email(email).await {
            Ok(report) => OutboundMessage::text(chat, report),
            Err(e) => {
                error!(error = %e, "billing lookup failed");
                OutboundMessage::text(chat, BILLING_UNAVAILABLE)
            }
        }
    }
}

fn capture_name(chat: ChatId, text: &str, store: &mut ConversationStore) -> OutboundMessage {
    let name = text.trim();
    if name.is_empty() {
        return OutboundMessage::text(chat, "Please tell me your name.");
    }
    let reply = format!(
        "Thanks, {}! What email address is your hosting account under?",
        escape_html(name)
    );
    let state = store.state_mut(chat);
    state.name = Some(name.to_string());
    state.step = IntakeStep::AwaitingEmail;
    debug!(chat = %chat, "intake name captured");
    OutboundMessage::text(chat, reply)
}

fn capture_email(chat: ChatId, text: &str, store: &mut ConversationStore) -> OutboundMessage {
    let email = text.trim();
    if email.is_empty() {
        return OutboundMessage::text(chat, "Please send me your account email.");
    }
    let state = store.state_mut(chat);
    state.email = Some(email.to_string());
    state.step = IntakeStep::Ready;
    debug!(chat = %chat, "intake complete");
    OutboundMessage::with_keyboard(
        chat,
        "You're all set! Use the menu below to check on your hosting account.",
        menus::account_keyboard(),
    )
}
