// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded value type system.
//!
//! [`Value`] is the dynamic output of a type-directed decode. Objects decode
//! into an [`Instance`], an ordered field map seeded with every declared
//! field's zero value before any input is read.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::error::{DecodeError, Result};

/// Unified value type for decoded documents.
///
/// Every scalar variant corresponds to one [`ScalarKind`](crate::ScalarKind);
/// `Array` and `Object` mirror the descriptor's container shapes. `Null` is
/// only ever produced as the zero value of a field that was absent from the
/// input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8, escapes kept verbatim)
    String(String),

    // Calendar date
    Date(NaiveDate),

    // Array of values
    Array(Vec<Value>),

    // Nested object
    Object(Instance),

    // Absent field
    Null,
}

impl Value {
    /// Name of the value's variant, used in mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::UInt8(_) => "uint8",
            Value::UInt16(_) => "uint16",
            Value::UInt32(_) => "uint32",
            Value::UInt64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Null => "null",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a scalar (not a container and not null).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_) | Value::Null)
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(*v as i64),
            Value::Int16(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            Value::UInt8(v) => Some(*v as i64),
            Value::UInt16(v) => Some(*v as i64),
            Value::UInt32(v) => Some(*v as i64),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Try to get the inner bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get the inner array elements.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the inner object.
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Convert to a standard JSON value (numbers and booleans unquoted).
    ///
    /// Dates render with `date_format`. Non-finite floats become `null`
    /// since standard JSON cannot represent them.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if `date_format` cannot render a date.
    pub fn to_json(&self, date_format: &str) -> Result<serde_json::Value> {
        use serde_json::Value as Json;

        let json = match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int8(v) => Json::from(*v),
            Value::Int16(v) => Json::from(*v),
            Value::Int32(v) => Json::from(*v),
            Value::Int64(v) => Json::from(*v),
            Value::UInt8(v) => Json::from(*v),
            Value::UInt16(v) => Json::from(*v),
            Value::UInt32(v) => Json::from(*v),
            Value::UInt64(v) => Json::from(*v),
            Value::Float32(v) => serde_json::Number::from_f64(*v as f64)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Float64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(format_date(*d, date_format)?),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(|v| v.to_json(date_format))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(obj) => {
                let mut map = serde_json::Map::new();
                for (name, value) in obj.iter() {
                    map.insert(name.to_string(), value.to_json(date_format)?);
                }
                Json::Object(map)
            }
        };
        Ok(json)
    }
}

/// Render `date` with a strftime pattern.
///
/// Patterns asking for fields a date does not carry (`%H`, `%S`, `%z`, ...)
/// fail with `EncodeError` rather than panicking.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| {
        DecodeError::encode(format!("date format '{format}' cannot render a date"))
    })?;
    Ok(out)
}

/// A decoded object: field name -> value, in declaration order.
///
/// Field names are the target names, never wire names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    fields: Vec<(String, Value)>,
}

impl Instance {
    /// Create an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Set a field, replacing any earlier value and keeping its position.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Remove a field and return its value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Check if a field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the instance has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Instance {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut instance = Instance::new();
        for (name, value) in iter {
            instance.set(name, value);
        }
        instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_set_keeps_position() {
        let mut obj = Instance::new();
        obj.set("id", Value::Int32(0));
        obj.set("name", Value::Null);
        obj.set("id", Value::Int32(5));

        let names: Vec<&str> = obj.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(obj.get("id"), Some(&Value::Int32(5)));
    }

    #[test]
    fn test_instance_take() {
        let mut obj: Instance = vec![("a".to_string(), Value::Bool(true))]
            .into_iter()
            .collect();
        assert_eq!(obj.take("a"), Some(Value::Bool(true)));
        assert!(obj.is_empty());
        assert_eq!(obj.take("a"), None);
    }

    #[test]
    fn test_as_i64_rejects_overflowing_u64() {
        assert_eq!(Value::UInt64(7).as_i64(), Some(7));
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Value::String("7".into()).as_i64(), None);
    }

    #[test]
    fn test_to_json_object() {
        let date = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
        let obj: Instance = vec![
            ("id".to_string(), Value::Int32(5)),
            ("born".to_string(), Value::Date(date)),
            (
                "tags".to_string(),
                Value::Array(vec![Value::String("x".into())]),
            ),
        ]
        .into_iter()
        .collect();

        let json = Value::Object(obj).to_json("%d/%m/%Y").unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["born"], "03/02/2001");
        assert_eq!(json["tags"][0], "x");
    }

    #[test]
    fn test_to_json_non_finite_float() {
        assert_eq!(
            Value::Float64(f64::NAN).to_json("%Y").unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_to_json_time_pattern_fails() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        let err = Value::Array(vec![Value::Date(date)])
            .to_json("%d/%m/%Y %H:%M")
            .unwrap_err();
        assert!(matches!(err, DecodeError::EncodeError { .. }));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "2020-02-01");
        assert!(format_date(date, "%H").is_err());
        assert!(format_date(date, "%z").is_err());
    }
}
