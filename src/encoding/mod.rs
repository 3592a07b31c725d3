// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Quoted-scalar JSON encoding/decoding.
//!
//! This module provides:
//! - [`tokenizer`] - Token stream with one-token lookahead
//! - [`decoder`] - Descriptor-driven recursive-descent decoder
//! - [`encoder`] - Writer for the same dialect
//! - [`registry`] - Scalar converter registry

pub mod decoder;
pub mod encoder;
pub mod registry;
pub mod tokenizer;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use registry::{builtin_parser, date_parser, global_registry, ScalarParser, ScalarRegistry};
pub use tokenizer::{Token, TokenKind, Tokenizer};
