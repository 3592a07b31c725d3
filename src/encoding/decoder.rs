// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Quoted-scalar JSON decoder
//!
//! Recursive-descent decoder driven by a [`TypeDescriptor`]. Dispatch per
//! value, in order:
//! 1. scalar type: one quoted token through the scalar converter
//! 2. array type: `[` elements separated by `,` `]`
//! 3. object type: `{` `"key" : value` pairs separated by `,` `}`
//!
//! A field that declares a date format gets a converter built for that
//! field alone; it is passed down the recursion and never registered
//! globally.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use quotejson::encoding::JsonDecoder;
//! use quotejson::schema::{FieldDescriptor, FieldType, ObjectType, ScalarKind, TypeDescriptor};
//!
//! let descriptor = TypeDescriptor::object(
//!     ObjectType::new("Person")
//!         .with_field(FieldDescriptor::new("id", FieldType::Scalar(ScalarKind::Int32)))
//!         .with_field(FieldDescriptor::new("name", FieldType::Scalar(ScalarKind::String))),
//! );
//!
//! let decoder = JsonDecoder::new();
//! let value = decoder.parse(r#"{"id":"5","name":"Ann"}"#, &descriptor)?;
//! let person = value.as_object().unwrap();
//! assert_eq!(person.get("id").and_then(|v| v.as_i64()), Some(5));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::DecoderConfig;
use crate::core::{DecodeError, Result, Value, END_OF_INPUT};
use crate::schema::{FieldDescriptor, FieldType, ObjectType, ScalarKind, TypeDescriptor};

use super::registry::{date_parser, global_registry, ScalarParser, ScalarRegistry};
use super::tokenizer::{Token, TokenKind, Tokenizer};

/// Position in the object grammar.
#[derive(Debug, Clone, Copy)]
enum ObjectState<'d> {
    ExpectOpenBrace,
    ExpectFieldNameOrClose,
    ExpectFieldName,
    ExpectColon(&'d FieldDescriptor),
    ExpectValue(&'d FieldDescriptor),
    ExpectCommaOrClose,
    Done,
}

/// Position in the array grammar.
#[derive(Debug, Clone, Copy)]
enum ArrayState {
    ExpectOpenBracket,
    ExpectValueOrClose,
    ExpectValue,
    ExpectCommaOrClose,
    Done,
}

/// State of a single decode call.
struct DecodeContext<'t, 'd> {
    tokens: Tokenizer<'t>,
    descriptor: &'d TypeDescriptor,
    depth: usize,
}

impl<'t, 'd> DecodeContext<'t, 'd> {
    /// Consume the next token, failing at end of input.
    fn next_token(&mut self, expected: &str) -> Result<Token<'t>> {
        match self.tokens.next() {
            Some(token) => Ok(token),
            None => Err(DecodeError::unexpected(
                expected,
                END_OF_INPUT,
                self.tokens.end_offset(),
            )),
        }
    }

    /// Consume the next token and require it to be `expected`.
    fn expect(&mut self, expected: &str) -> Result<()> {
        let token = self.next_token(expected)?;
        if token.text != expected {
            return Err(DecodeError::unexpected(expected, token.text, token.offset));
        }
        Ok(())
    }

    fn enter(&mut self, max_depth: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > max_depth {
            return Err(DecodeError::DepthExceeded { max_depth });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Converter override for one field's scalar leaves.
#[derive(Clone)]
struct FormatOverride {
    parser: ScalarParser,
    format: String,
}

/// Decoder for the quoted-scalar JSON dialect.
pub struct JsonDecoder {
    registry: Arc<ScalarRegistry>,
    config: DecoderConfig,
    date_override: Option<FormatOverride>,
}

impl JsonDecoder {
    /// Create a decoder using the global registry and default config.
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a decoder using the global registry.
    ///
    /// A `date_format` different from the built-in one replaces the
    /// registry's date converter for this decoder only.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self::with_registry(global_registry(), config)
    }

    /// Create a decoder with its own registry.
    pub fn with_registry(registry: Arc<ScalarRegistry>, config: DecoderConfig) -> Self {
        let date_override = config.overrides_date_format().then(|| FormatOverride {
            parser: date_parser(&config.date_format),
            format: config.date_format.clone(),
        });
        Self {
            registry,
            config,
            date_override,
        }
    }

    /// Get the decoder's config.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `json` as the descriptor's root type.
    ///
    /// All or nothing: any error aborts the whole decode.
    ///
    /// # Errors
    ///
    /// - `InvalidSchema` / `UnknownType` if the descriptor is inconsistent
    /// - `MalformedInput` if the text cannot be tokenized
    /// - `UnexpectedToken`, `InvalidScalarToken`, `ScalarConversionError`,
    ///   `UnknownField`, `DepthExceeded` while decoding
    /// - `TrailingData` if tokens remain after the root value
    pub fn parse(&self, json: &str, descriptor: &TypeDescriptor) -> Result<Value> {
        descriptor.validate()?;

        let mut ctx = DecodeContext {
            tokens: Tokenizer::new(json)?,
            descriptor,
            depth: 0,
        };

        tracing::debug!(
            root = %descriptor.root,
            tokens = ctx.tokens.remaining(),
            "decoding"
        );

        let value = self.parse_value(&mut ctx, &descriptor.root, None)?;

        if let Some(token) = ctx.tokens.peek() {
            return Err(DecodeError::trailing(token.text, token.offset));
        }

        Ok(value)
    }

    /// Decode UTF-8 bytes.
    pub fn decode_bytes(&self, data: &[u8], descriptor: &TypeDescriptor) -> Result<Value> {
        let json = std::str::from_utf8(data)
            .map_err(|e| DecodeError::malformed(e.valid_up_to(), "input is not valid UTF-8"))?;
        self.parse(json, descriptor)
    }

    fn parse_value(
        &self,
        ctx: &mut DecodeContext<'_, '_>,
        field_type: &FieldType,
        format: Option<&FormatOverride>,
    ) -> Result<Value> {
        match field_type {
            FieldType::Scalar(kind) => self.parse_scalar(ctx, *kind, format),
            FieldType::Array { base_type } => self.parse_array(ctx, base_type, format),
            FieldType::Object(name) => {
                let descriptor = ctx.descriptor;
                self.parse_object(ctx, descriptor.get_type(name)?)
            }
        }
    }

    fn parse_scalar(
        &self,
        ctx: &mut DecodeContext<'_, '_>,
        kind: ScalarKind,
        format: Option<&FormatOverride>,
    ) -> Result<Value> {
        let token = ctx.next_token(kind.as_str())?;
        let content = token
            .unquoted()
            .ok_or_else(|| DecodeError::invalid_scalar(token.text, token.offset))?;

        let date_override = match kind {
            ScalarKind::Date => format.or(self.date_override.as_ref()),
            _ => None,
        };

        let (parser, target) = match date_override {
            Some(o) => (o.parser.clone(), format!("date({})", o.format)),
            None => {
                let parser = self
                    .registry
                    .get(kind)
                    .ok_or_else(|| DecodeError::unknown_type(kind.as_str()))?;
                (parser, kind.as_str().to_string())
            }
        };

        parser(content).map_err(|cause| DecodeError::conversion(content, target, cause))
    }

    fn parse_array(
        &self,
        ctx: &mut DecodeContext<'_, '_>,
        element_type: &FieldType,
        format: Option<&FormatOverride>,
    ) -> Result<Value> {
        ctx.enter(self.config.max_depth)?;

        let mut items = Vec::new();
        let mut state = ArrayState::ExpectOpenBracket;

        loop {
            state = match state {
                ArrayState::ExpectOpenBracket => {
                    ctx.expect("[")?;
                    ArrayState::ExpectValueOrClose
                }
                ArrayState::ExpectValueOrClose => match ctx.tokens.peek() {
                    Some(token) if token.kind() == TokenKind::CloseBracket => {
                        ctx.tokens.next();
                        ArrayState::Done
                    }
                    _ => ArrayState::ExpectValue,
                },
                ArrayState::ExpectValue => {
                    if let Some(token) = ctx.tokens.peek() {
                        if token.kind() == TokenKind::CloseBracket {
                            return Err(DecodeError::unexpected("value", token.text, token.offset));
                        }
                    }
                    items.push(self.parse_value(ctx, element_type, format)?);
                    ArrayState::ExpectCommaOrClose
                }
                ArrayState::ExpectCommaOrClose => {
                    let token = ctx.next_token(", or ]")?;
                    match token.kind() {
                        TokenKind::Comma => ArrayState::ExpectValue,
                        TokenKind::CloseBracket => ArrayState::Done,
                        _ => return Err(DecodeError::unexpected(", or ]", token.text, token.offset)),
                    }
                }
                ArrayState::Done => break,
            };
        }

        ctx.leave();
        Ok(Value::Array(items))
    }

    fn parse_object<'d>(
        &self,
        ctx: &mut DecodeContext<'_, 'd>,
        object_type: &'d ObjectType,
    ) -> Result<Value> {
        ctx.enter(self.config.max_depth)?;

        let mut instance = object_type.zero_instance();
        let mut state = ObjectState::ExpectOpenBrace;

        loop {
            state = match state {
                ObjectState::ExpectOpenBrace => {
                    ctx.expect("{")?;
                    ObjectState::ExpectFieldNameOrClose
                }
                ObjectState::ExpectFieldNameOrClose => match ctx.tokens.peek() {
                    Some(token) if token.kind() == TokenKind::CloseBrace => {
                        ctx.tokens.next();
                        ObjectState::Done
                    }
                    _ => ObjectState::ExpectFieldName,
                },
                ObjectState::ExpectFieldName => {
                    let token = ctx.next_token("field name")?;
                    let wire_name = token.unquoted().ok_or_else(|| {
                        DecodeError::unexpected("field name", token.text, token.offset)
                    })?;
                    let field = object_type
                        .resolve_wire_name(wire_name)
                        .ok_or_else(|| DecodeError::unknown_field(wire_name, &object_type.name))?;
                    ObjectState::ExpectColon(field)
                }
                ObjectState::ExpectColon(field) => {
                    ctx.expect(":")?;
                    ObjectState::ExpectValue(field)
                }
                ObjectState::ExpectValue(field) => {
                    let value = self.parse_field_value(ctx, field)?;
                    instance.set(field.name.as_str(), value);
                    ObjectState::ExpectCommaOrClose
                }
                ObjectState::ExpectCommaOrClose => {
                    let token = ctx.next_token(", or }")?;
                    match token.kind() {
                        TokenKind::Comma => ObjectState::ExpectFieldName,
                        TokenKind::CloseBrace => ObjectState::Done,
                        _ => return Err(DecodeError::unexpected(", or }", token.text, token.offset)),
                    }
                }
                ObjectState::Done => break,
            };
        }

        ctx.leave();
        Ok(Value::Object(instance))
    }

    fn parse_field_value(
        &self,
        ctx: &mut DecodeContext<'_, '_>,
        field: &FieldDescriptor,
    ) -> Result<Value> {
        tracing::trace!(field = %field.name, ty = %field.type_name, "decoding field");

        let format = field.format.as_ref().map(|f| FormatOverride {
            parser: date_parser(f),
            format: f.clone(),
        });
        self.parse_value(ctx, &field.type_name, format.as_ref())
    }
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}
