// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error type shared by every runtime operation.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Error::Metadata`] | An entity descriptor cannot be mapped (missing id, wrong id type, ...) |
//! | [`Error::Binding`] | A value cannot be read from or written into an entity |
//! | [`Error::Execution`] | The database rejected a statement |
//! | [`Error::Format`] | JSON text does not match the expected grammar |
//!
//! Operations never retry; the first failure is returned to the caller.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed driver error carried by [`Error::Execution`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Runtime error.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity descriptor is malformed or incomplete for the requested
    /// operation.
    #[error("invalid mapping for `{entity}`: {reason}")]
    Metadata {
        /// Type name of the offending entity.
        entity: String,
        /// Human readable reason.
        reason: String
    },

    /// Field access failed or a value had the wrong type.
    #[error("binding failed: {0}")]
    Binding(String),

    /// The database handle rejected a statement.
    #[error("statement failed: {statement}")]
    Execution {
        /// SQL text that was executed.
        statement: String,
        /// Underlying driver error.
        #[source]
        source:    BoxError
    },

    /// JSON text is malformed.
    #[error("malformed JSON: {0}")]
    Format(String)
}

impl Error {
    /// Build a [`Error::Metadata`] for the given entity type.
    #[must_use]
    pub fn metadata(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Metadata {
            entity: entity.into(),
            reason: reason.into()
        }
    }

    /// Build a [`Error::Binding`].
    #[must_use]
    pub fn binding(reason: impl Into<String>) -> Self {
        Self::Binding(reason.into())
    }

    /// Build a [`Error::Execution`] from a statement and a driver error.
    #[must_use]
    pub fn execution(statement: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Execution {
            statement: statement.into(),
            source:    source.into()
        }
    }

    /// Build a [`Error::Format`].
    #[must_use]
    pub fn format(reason: impl Into<String>) -> Self {
        Self::Format(reason.into())
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
