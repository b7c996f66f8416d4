// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hashdesk bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! event/message types used throughout the Hashdesk workspace. The transport,
//! catalog, and billing crates implement traits defined here; the bot crate
//! consumes them as trait objects.

pub mod error;
pub mod html;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HashdeskError;
pub use html::escape_html;
pub use types::{
    ChatId, EventKind, HealthStatus, InboundEvent, InlineButton, Keyboard, OutboundMessage,
};

// Re-export all adapter traits at crate root.
pub use traits::{Adapter, BillingService, CatalogService, ChannelTransport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        // Verify all 5 error variants exist and can be constructed.
        let _config = HashdeskError::Config("test".into());
        let _transport = HashdeskError::Transport {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _catalog = HashdeskError::Catalog {
            message: "test".into(),
            source: None,
        };
        let _billing = HashdeskError::Billing {
            message: "test".into(),
            source: None,
        };
        let _internal = HashdeskError::Internal("test".into());
    }

    #[test]
    fn error_display_includes_message() {
        let err = HashdeskError::Catalog {
            message: "status 500".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "catalog error: status 500");
    }

    #[test]
    fn event_chat_extraction() {
        let text = InboundEvent {
            update_id: 1,
            kind: EventKind::Text {
                chat: ChatId(42),
                text: "hi".into(),
            },
        };
        let callback = InboundEvent {
            update_id: 2,
            kind: EventKind::Callback {
                chat: ChatId(43),
                data: "cat:21".into(),
            },
        };
        let ignored = InboundEvent {
            update_id: 3,
            kind: EventKind::Ignored,
        };

        assert_eq!(text.chat(), Some(ChatId(42)));
        assert_eq!(callback.chat(), Some(ChatId(43)));
        assert_eq!(ignored.chat(), None);
    }

    #[test]
    fn outbound_message_constructors() {
        let plain = OutboundMessage::text(ChatId(1), "hello");
        assert_eq!(plain.keyboard, None);

        let with_kb = OutboundMessage::with_keyboard(
            ChatId(1),
            "pick one",
            Keyboard::Inline {
                rows: vec![vec![InlineButton::new("ASIC Miners", "cat:21")]],
            },
        );
        assert!(matches!(with_kb.keyboard, Some(Keyboard::Inline { .. })));
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
    }

    #[test]
    fn chat_id_display() {
        assert_eq!(ChatId(-1001234).to_string(), "-1001234");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Verifies the trait modules compile and are reachable through the
        // public API.
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_transport<T: ChannelTransport>() {}
        fn _assert_catalog<T: CatalogService>() {}
        fn _assert_billing<T: BillingService>() {}
    }
}
