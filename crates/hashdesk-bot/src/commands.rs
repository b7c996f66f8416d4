// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command table mapping user input to router actions.
//!
//! Three trigger shapes feed the same action set: slash or bare text
//! commands (case-insensitive), reply-button labels (exact match, since
//! presses echo the label back as text), and inline-button callback
//! payloads. Categories come from configuration, so the table is built
//! once at startup rather than hardcoded.

use hashdesk_config::CategoryConfig;

use crate::menus;

/// What the router should do for a recognized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Reset the conversation and show the top-level menu.
    MainMenu,
    /// Show the category picker.
    CategoryMenu,
    /// Start (or resume) the client intake flow.
    BeginIntake,
    /// Report the client's invoices.
    AccountInvoices,
    /// Report prices for one catalog category.
    Category(CategorySpec),
}

/// One configured catalog category as the router sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub id: String,
    pub label: String,
}

/// How a command entry is matched against input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Trigger {
    /// Typed command, matched case-insensitively after trimming.
    Command(String),
    /// Reply-button label, matched exactly after trimming.
    Synonym(String),
    /// Inline-button callback payload, matched exactly.
    Callback(String),
}

#[derive(Debug, Clone)]
struct CommandEntry {
    trigger: Trigger,
    action: Action,
}

/// All recognized inputs and the categories behind them.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
    categories: Vec<CategorySpec>,
}

impl CommandTable {
    pub fn build(configured: &[CategoryConfig]) -> Self {
        let mut entries = vec![
            entry(Trigger::Command("/start".into()), Action::MainMenu),
            entry(Trigger::Synonym(menus::BTN_MAIN_MENU.into()), Action::MainMenu),
            entry(Trigger::Callback(menus::CB_MAIN.into()), Action::MainMenu),
            entry(Trigger::Command("prices".into()), Action::CategoryMenu),
            entry(Trigger::Synonym(menus::BTN_PRICES.into()), Action::CategoryMenu),
            entry(Trigger::Callback(menus::CB_CATEGORIES.into()), Action::CategoryMenu),
            entry(Trigger::Command("hosting clients".into()), Action::BeginIntake),
            entry(Trigger::Synonym(menus::BTN_HOSTING.into()), Action::BeginIntake),
            entry(Trigger::Command("my invoices".into()), Action::AccountInvoices),
            entry(Trigger::Synonym(menus::BTN_INVOICES.into()), Action::AccountInvoices),
        ];

        let mut categories = Vec::with_capacity(configured.len());
        for config in configured {
            let spec = CategorySpec {
                id: config.id.clone(),
                label: config.label.clone(),
            };
            entries.push(entry(
                Trigger::Command(config.token.clone()),
                Action::Category(spec.clone()),
            ));
            entries.push(entry(
                Trigger::Callback(menus::category_callback(&spec.id)),
                Action::Category(spec.clone()),
            ));
            categories.push(spec);
        }

        Self { entries, categories }
    }

    /// Resolves a text message to an action, if it matches anything.
    pub fn resolve_text(&self, text: &str) -> Option<Action> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| match &e.trigger {
                Trigger::Command(cmd) => cmd.eq_ignore_ascii_case(trimmed),
                Trigger::Synonym(label) => label == trimmed,
                Trigger::Callback(_) => false,
            })
            .map(|e| e.action.clone())
    }

    /// Resolves a callback payload to an action, if it matches anything.
    pub fn resolve_callback(&self, data: &str) -> Option<Action> {
        self.entries
            .iter()
            .find(|e| matches!(&e.trigger, Trigger::Callback(payload) if payload == data))
            .map(|e| e.action.clone())
    }

    /// Configured categories, in configuration order.
    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }
}

fn entry(trigger: Trigger, action: Action) -> CommandEntry {
    CommandEntry { trigger, action }
}
