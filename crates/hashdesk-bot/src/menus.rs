// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned menus and the button labels the router matches against.
//!
//! Reply-keyboard presses come back as plain text, so every label defined
//! here doubles as a command synonym in the command table. Keeping the
//! strings in one place stops the two from drifting apart.

use hashdesk_core::{ChatId, InlineButton, Keyboard, OutboundMessage};

use crate::commands::CategorySpec;

pub(crate) const BTN_PRICES: &str = "💰 Miner prices";
pub(crate) const BTN_HOSTING: &str = "🛠 Hosting clients";
pub(crate) const BTN_INVOICES: &str = "📄 My hosting invoices";
pub(crate) const BTN_MAIN_MENU: &str = "⬅️ Main menu";

pub(crate) const CB_MAIN: &str = "menu:main";
pub(crate) const CB_CATEGORIES: &str = "menu:categories";

/// Callback payload for one catalog category button.
pub(crate) fn category_callback(category_id: &str) -> String {
    format!("cat:{category_id}")
}

/// Top-level menu with the persistent reply keyboard.
pub(crate) fn main_menu(chat: ChatId) -> OutboundMessage {
    OutboundMessage::with_keyboard(
        chat,
        "Welcome to Hashdesk! What can I do for you?",
        Keyboard::Reply {
            rows: vec![
                vec![BTN_PRICES.to_string(), BTN_HOSTING.to_string()],
                vec![BTN_INVOICES.to_string()],
            ],
        },
    )
}

/// Inline category picker, one button per configured price list.
pub(crate) fn category_menu(chat: ChatId, categories: &[CategorySpec]) -> OutboundMessage {
    let mut rows: Vec<Vec<InlineButton>> = categories
        .iter()
        .map(|category| {
            vec![InlineButton::new(
                category.label.clone(),
                category_callback(&category.id),
            )]
        })
        .collect();
    rows.push(vec![InlineButton::new(BTN_MAIN_MENU, CB_MAIN)]);

    let text = if categories.is_empty() {
        "No price lists are configured yet."
    } else {
        "Which price list would you like?"
    };
    OutboundMessage::with_keyboard(chat, text, Keyboard::Inline { rows })
}

/// Keyboard offered once intake is complete.
pub(crate) fn account_keyboard() -> Keyboard {
    Keyboard::Reply {
        rows: vec![
            vec![BTN_INVOICES.to_string()],
            vec![BTN_MAIN_MENU.to_string()],
        ],
    }
}
