// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoder for the quoted-scalar JSON dialect.
//!
//! Writes a [`Value`] back out under the guidance of the same
//! [`TypeDescriptor`] used to decode it: every scalar is quoted, fields are
//! written under their wire names in declaration order, and dates use the
//! field's own format when it declares one. Fields still holding
//! [`Value::Null`] are omitted, so decoding the output yields the input value.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::DecoderConfig;
use crate::core::{format_date, DecodeError, Instance, Result, Value};
use crate::schema::{check_date_format, FieldType, ObjectType, ScalarKind, TypeDescriptor};

/// Content that stays a single literal once wrapped in quotes.
fn literal_regex() -> &'static Regex {
    static LITERAL_RE: OnceLock<Regex> = OnceLock::new();
    LITERAL_RE
        .get_or_init(|| Regex::new(r#"^(?s)(?:[^"\\]|\\.)*$"#).expect("literal pattern is valid"))
}

/// Require `text` to read back as one quoted literal.
fn check_literal<'a>(text: &'a str, what: &str) -> Result<&'a str> {
    if !literal_regex().is_match(text) {
        return Err(DecodeError::encode(format!(
            "{what} {text:?} has an unescaped quote or a dangling backslash"
        )));
    }
    Ok(text)
}

/// Encoder for the quoted-scalar JSON dialect.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    date_format: String,
}

impl JsonEncoder {
    /// Create an encoder using the default date format.
    pub fn new() -> Self {
        Self::with_config(&DecoderConfig::default())
    }

    /// Create an encoder matching a decoder config.
    pub fn with_config(config: &DecoderConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
        }
    }

    /// Encode `value` as the descriptor's root type.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if the value does not fit the descriptor or a
    /// string cannot be written as a single quoted literal.
    pub fn encode(&self, value: &Value, descriptor: &TypeDescriptor) -> Result<String> {
        descriptor.validate()?;
        check_date_format(&self.date_format)?;

        let mut out = String::new();
        self.write_value(&mut out, value, &descriptor.root, descriptor, None)?;
        Ok(out)
    }

    fn write_value(
        &self,
        out: &mut String,
        value: &Value,
        field_type: &FieldType,
        descriptor: &TypeDescriptor,
        format: Option<&str>,
    ) -> Result<()> {
        match (field_type, value) {
            (FieldType::Scalar(kind), _) => {
                let text = self.scalar_text(*kind, value, format)?;
                out.push('"');
                out.push_str(&text);
                out.push('"');
            }
            (FieldType::Array { base_type }, Value::Array(items)) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item, base_type, descriptor, format)?;
                }
                out.push(']');
            }
            (FieldType::Object(name), Value::Object(obj)) => {
                self.write_object(out, obj, descriptor.get_type(name)?, descriptor)?;
            }
            (expected, found) => {
                return Err(DecodeError::encode(format!(
                    "expected {expected}, found {}",
                    found.type_name()
                )));
            }
        }
        Ok(())
    }

    fn write_object(
        &self,
        out: &mut String,
        obj: &Instance,
        object_type: &ObjectType,
        descriptor: &TypeDescriptor,
    ) -> Result<()> {
        if let Some((name, _)) = obj.iter().find(|(name, _)| object_type.field(name).is_none()) {
            return Err(DecodeError::encode(format!(
                "field '{name}' is not declared by type '{}'",
                object_type.name
            )));
        }

        out.push('{');
        let mut first = true;
        for field in &object_type.fields {
            let value = match obj.get(&field.name) {
                Some(Value::Null) | None => continue,
                Some(value) => value,
            };
            if !first {
                out.push(',');
            }
            first = false;

            out.push('"');
            out.push_str(check_literal(field.wire_name(), "field name")?);
            out.push_str("\":");
            self.write_value(
                out,
                value,
                &field.type_name,
                descriptor,
                field.format.as_deref(),
            )?;
        }
        out.push('}');
        Ok(())
    }

    fn scalar_text(&self, kind: ScalarKind, value: &Value, format: Option<&str>) -> Result<String> {
        let text = match (kind, value) {
            (ScalarKind::Bool, Value::Bool(v)) => v.to_string(),
            (ScalarKind::Int8, Value::Int8(v)) => v.to_string(),
            (ScalarKind::Int16, Value::Int16(v)) => v.to_string(),
            (ScalarKind::Int32, Value::Int32(v)) => v.to_string(),
            (ScalarKind::Int64, Value::Int64(v)) => v.to_string(),
            (ScalarKind::UInt8, Value::UInt8(v)) => v.to_string(),
            (ScalarKind::UInt16, Value::UInt16(v)) => v.to_string(),
            (ScalarKind::UInt32, Value::UInt32(v)) => v.to_string(),
            (ScalarKind::UInt64, Value::UInt64(v)) => v.to_string(),
            (ScalarKind::Float32, Value::Float32(v)) => v.to_string(),
            (ScalarKind::Float64, Value::Float64(v)) => v.to_string(),
            (ScalarKind::Date, Value::Date(d)) => {
                let text = format_date(*d, format.unwrap_or(&self.date_format))?;
                check_literal(&text, "date")?;
                text
            }
            (ScalarKind::String, Value::String(s)) => check_literal(s, "string")?.to_string(),
            (kind, other) => {
                return Err(DecodeError::encode(format!(
                    "expected {kind}, found {}",
                    other.type_name()
                )));
            }
        };
        Ok(text)
    }

    /// Convert a standard JSON document into a value of the descriptor's
    /// root type.
    ///
    /// Numbers and booleans may be given unquoted; every scalar may also be
    /// given as a string, which goes through the same text conversion the
    /// decoder applies. Object keys are target field names.
    pub fn value_from_json(
        &self,
        json: &serde_json::Value,
        descriptor: &TypeDescriptor,
    ) -> Result<Value> {
        descriptor.validate()?;
        self.json_to_value(json, &descriptor.root, descriptor, None)
    }

    fn json_to_value(
        &self,
        json: &serde_json::Value,
        field_type: &FieldType,
        descriptor: &TypeDescriptor,
        format: Option<&str>,
    ) -> Result<Value> {
        use serde_json::Value as Json;

        match (field_type, json) {
            (FieldType::Scalar(kind), _) => self.scalar_from_json(*kind, json, format),
            (FieldType::Array { base_type }, Json::Array(items)) => items
                .iter()
                .map(|item| self.json_to_value(item, base_type, descriptor, format))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            (FieldType::Object(name), Json::Object(map)) => {
                let object_type = descriptor.get_type(name)?;
                let mut instance = object_type.zero_instance();
                for (key, item) in map {
                    let field = object_type
                        .field(key)
                        .ok_or_else(|| DecodeError::unknown_field(key, &object_type.name))?;
                    let value =
                        self.json_to_value(item, &field.type_name, descriptor, field.format.as_deref())?;
                    instance.set(key.as_str(), value);
                }
                Ok(Value::Object(instance))
            }
            (expected, found) => Err(DecodeError::encode(format!(
                "expected {expected}, found JSON {found}"
            ))),
        }
    }

    fn scalar_from_json(
        &self,
        kind: ScalarKind,
        json: &serde_json::Value,
        format: Option<&str>,
    ) -> Result<Value> {
        use serde_json::Value as Json;

        let text = match json {
            Json::String(s) => s.clone(),
            Json::Number(n) => n.to_string(),
            Json::Bool(b) => b.to_string(),
            other => {
                return Err(DecodeError::encode(format!(
                    "expected {kind}, found JSON {other}"
                )))
            }
        };

        let parser = match (kind, format) {
            (ScalarKind::Date, Some(f)) => super::registry::date_parser(f),
            (ScalarKind::Date, None) => super::registry::date_parser(&self.date_format),
            _ => super::registry::builtin_parser(kind),
        };
        parser(&text).map_err(|cause| DecodeError::conversion(text.as_str(), kind.as_str(), cause))
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}
