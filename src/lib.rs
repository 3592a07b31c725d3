// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Quotejson
//!
//! Schema-directed decoder for a JSON dialect in which every scalar is a
//! quoted string.
//!
//! Input such as `{"id":"5","tags":["a","b"]}` carries no type information
//! of its own: the caller supplies a [`TypeDescriptor`] and each quoted
//! literal is converted according to the type declared at its position.
//! Bare tokens (`5`, `true`, `null`) are rejected.
//!
//! ## Architecture
//!
//! - `core/` - Error kinds and the dynamic [`Value`]
//! - `schema/` - Type descriptors, TOML schema files, typed targets
//! - `encoding/` - Tokenizer, decoder, encoder, scalar registry
//! - `config` - Decoder settings
//!
//! ## Example: Decoding against a descriptor
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use quotejson::{FieldType, ScalarKind, TypeDescriptor, Value};
//!
//! let descriptor = TypeDescriptor::new(FieldType::array_of(FieldType::Scalar(ScalarKind::Int32)));
//! let value = quotejson::parse_value(r#"["1", "2", "3"]"#, &descriptor)?;
//! assert_eq!(
//!     value,
//!     Value::Array(vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)])
//! );
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use crate::core::{DecodeError, Instance, Result, Value};

// Decoder settings
pub mod config;

pub use config::DecoderConfig;

// Encoding/decoding
pub mod encoding;

pub use encoding::{JsonDecoder, JsonEncoder};

// Type descriptors
pub mod schema;

pub use schema::{expect_object, field_type, Decodable, FieldType, ScalarKind, TypeDescriptor};

/// Decode `json` into `T` using the default decoder.
pub fn parse<T: Decodable>(json: &str) -> Result<T> {
    let value = JsonDecoder::new().parse(json, &T::descriptor())?;
    T::from_value(value)
}

/// Decode `json` against `descriptor` using the default decoder.
pub fn parse_value(json: &str, descriptor: &TypeDescriptor) -> Result<Value> {
    JsonDecoder::new().parse(json, descriptor)
}

/// Encode `value` against `descriptor` using the default encoder.
pub fn encode(value: &Value, descriptor: &TypeDescriptor) -> Result<String> {
    JsonEncoder::new().encode(value, descriptor)
}
