// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout quotejson.
//!
//! This module provides the foundational types for the library:
//! - [`DecodeError`] - Terminal error kinds for tokenizing, decoding, encoding
//! - [`Value`] - Dynamic decoded value
//! - [`Instance`] - Ordered field map produced for object types

pub mod error;
pub mod value;

pub use error::{DecodeError, Result, END_OF_INPUT};
pub use value::{format_date, Instance, Value};
