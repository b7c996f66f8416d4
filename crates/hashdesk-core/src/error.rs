// SPDX-FileCopyrightText: 2026 Hashdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hashdesk bot.

use thiserror::Error;

/// The primary error type used across all Hashdesk adapter traits and core operations.
#[derive(Debug, Error)]
pub enum HashdeskError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport errors talking to the chat platform (poll failure, send failure,
    /// malformed API response).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Catalog upstream errors (HTTP failure, non-success status, bad payload).
    #[error("catalog error: {message}")]
    Catalog {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Billing upstream errors (HTTP failure, non-success status, bad payload).
    #[error("billing error: {message}")]
    Billing {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
