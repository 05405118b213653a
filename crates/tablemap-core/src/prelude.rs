// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tablemap::prelude::*;
//! ```

pub use crate::{
    Condition, Connection, DialectKind, Entity, EntityManager, Enumerated, Error, Record, Result,
    SqlValue, Value
};
