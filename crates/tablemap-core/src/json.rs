// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity graph notation.
//!
//! A JSON subset shaped by the entity descriptors. Decoding parses the text
//! with `serde_json` and then walks the members against the descriptor, so
//! any valid JSON layout is accepted as long as its shape fits the entity.
//!
//! ```text
//! object  = "{" [ member { "," member } ] "}"
//! member  = string ":" value
//! value   = "null" | number | "true" | "false" | string
//!         | object                       many-to-one
//!         | "[" [ object { "," object } ] "]"   one-to-many
//! ```
//!
//! | Field | Encoded as |
//! |-------|------------|
//! | numbers | literal |
//! | bool | `true` / `false` |
//! | char, text | quoted, JSON escapes |
//! | enumerated | ordinal |
//! | date | `"YYYY-MM-DD"` |
//! | time | `"HH:MM:SS[.fff]"` |
//! | timestamp | RFC 3339 in UTC, `"...Z"` |
//! | large object | `"data:image/png;base64,..."`, `""` when empty |
//! | unset value | `null` |
//!
//! Large objects keep their bytes as-is; the media type in the data URL is
//! a fixed label, no image transcoding takes place.
//!
//! # Module Structure
//!
//! ```text
//! json/
//! ├── encode.rs - entity and row rendering
//! └── decode.rs - typed parsing into fresh instances
//! ```

mod decode;
mod encode;

pub use decode::{decode, decode_record};
pub use encode::{encode, encode_rows};

/// Prefix of an encoded large object.
///
/// The label is fixed: bytes are written unchanged, never transcoded to PNG,
/// so a stored JPEG is still labelled `image/png`. Decoding accepts any
/// base64 data URL and keeps the bytes, which keeps load and decode results
/// byte-equal to what was persisted.
pub const LOB_PREFIX: &str = "data:image/png;base64,";
