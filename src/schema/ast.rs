// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AST types describing decode targets.

use std::fmt;

use crate::core::{DecodeError, Instance, Result, Value};

/// Scalar types decoded from a single quoted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// String, escapes kept verbatim
    String,
    /// Calendar date
    Date,
}

impl ScalarKind {
    /// All scalar kinds, in registry order.
    pub const ALL: [ScalarKind; 13] = [
        ScalarKind::Bool,
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::UInt8,
        ScalarKind::UInt16,
        ScalarKind::UInt32,
        ScalarKind::UInt64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::String,
        ScalarKind::Date,
    ];

    /// Parse a scalar kind from a type name.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" | "boolean" => Some(ScalarKind::Bool),
            "int8" | "byte" => Some(ScalarKind::Int8),
            "int16" | "short" => Some(ScalarKind::Int16),
            "int32" | "int" => Some(ScalarKind::Int32),
            "int64" | "long" => Some(ScalarKind::Int64),
            "uint8" => Some(ScalarKind::UInt8),
            "uint16" => Some(ScalarKind::UInt16),
            "uint32" => Some(ScalarKind::UInt32),
            "uint64" => Some(ScalarKind::UInt64),
            "float32" | "float" => Some(ScalarKind::Float32),
            "float64" | "double" => Some(ScalarKind::Float64),
            "string" => Some(ScalarKind::String),
            "date" => Some(ScalarKind::Date),
            _ => None,
        }
    }

    /// Canonical type name.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::UInt8 => "uint8",
            ScalarKind::UInt16 => "uint16",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::UInt64 => "uint64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
        }
    }

    /// Value a field of this kind holds before the input assigns it.
    pub fn zero_value(self) -> Value {
        match self {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::Int8 => Value::Int8(0),
            ScalarKind::Int16 => Value::Int16(0),
            ScalarKind::Int32 => Value::Int32(0),
            ScalarKind::Int64 => Value::Int64(0),
            ScalarKind::UInt8 => Value::UInt8(0),
            ScalarKind::UInt16 => Value::UInt16(0),
            ScalarKind::UInt32 => Value::UInt32(0),
            ScalarKind::UInt64 => Value::UInt64(0),
            ScalarKind::Float32 => Value::Float32(0.0),
            ScalarKind::Float64 => Value::Float64(0.0),
            ScalarKind::String | ScalarKind::Date => Value::Null,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field type - can be scalar, array, or a named object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Scalar type
    Scalar(ScalarKind),
    /// Array type
    Array {
        /// Base type (element type)
        base_type: Box<FieldType>,
    },
    /// Object type, resolved by name in the owning descriptor
    Object(String),
}

impl FieldType {
    /// Create an array type with the given element type.
    pub fn array_of(base_type: FieldType) -> Self {
        FieldType::Array {
            base_type: Box::new(base_type),
        }
    }

    /// Parse a type expression: a scalar name, an object type name, or `T[]`.
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        if let Some(inner) = expr.strip_suffix("[]") {
            return Ok(FieldType::array_of(FieldType::parse(inner)?));
        }
        if let Some(kind) = ScalarKind::try_from_str(expr) {
            return Ok(FieldType::Scalar(kind));
        }
        if is_type_name(expr) {
            return Ok(FieldType::Object(expr.to_string()));
        }
        Err(DecodeError::invalid_schema(format!(
            "invalid type expression '{expr}'"
        )))
    }

    /// Scalar kind at the bottom of any array nesting, if there is one.
    pub fn leaf_scalar(&self) -> Option<ScalarKind> {
        match self {
            FieldType::Scalar(kind) => Some(*kind),
            FieldType::Array { base_type } => base_type.leaf_scalar(),
            FieldType::Object(_) => None,
        }
    }

    /// Value a field of this type holds before the input assigns it.
    pub fn zero_value(&self) -> Value {
        match self {
            FieldType::Scalar(kind) => kind.zero_value(),
            FieldType::Array { .. } | FieldType::Object(_) => Value::Null,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(kind) => write!(f, "{kind}"),
            FieldType::Array { base_type } => write!(f, "{base_type}[]"),
            FieldType::Object(name) => f.write_str(name),
        }
    }
}

fn is_type_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '/')
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Target field name
    pub name: String,
    /// Key used in the input when it differs from `name`
    pub wire_name: Option<String>,
    /// Declared field type
    pub type_name: FieldType,
    /// strftime pattern overriding the date converter for this field
    pub format: Option<String>,
}

impl FieldDescriptor {
    /// Create a field with no overrides.
    pub fn new(name: impl Into<String>, type_name: FieldType) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            type_name,
            format: None,
        }
    }

    /// Read this field from a different input key.
    pub fn rename(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Decode this field's dates with a custom strftime pattern.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Key this field is read from.
    pub fn wire_name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }
}

/// An object type definition with its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// Type name
    pub name: String,
    /// Ordered list of fields
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectType {
    /// Create an object type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field.
    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.add_field(field);
        self
    }

    /// Look up a field by target name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve an input key to the field it populates.
    ///
    /// A renamed field answers only to its wire name; other fields answer
    /// to their own name.
    pub fn resolve_wire_name(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name() == wire_name)
    }

    /// Fresh instance holding every field's zero value.
    pub fn zero_instance(&self) -> Instance {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.type_name.zero_value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_aliases() {
        assert_eq!(ScalarKind::try_from_str("int"), Some(ScalarKind::Int32));
        assert_eq!(ScalarKind::try_from_str("long"), Some(ScalarKind::Int64));
        assert_eq!(ScalarKind::try_from_str("double"), Some(ScalarKind::Float64));
        assert_eq!(ScalarKind::try_from_str("boolean"), Some(ScalarKind::Bool));
        assert_eq!(ScalarKind::try_from_str("Person"), None);
    }

    #[test]
    fn test_parse_type_expressions() {
        assert_eq!(
            FieldType::parse("int32").unwrap(),
            FieldType::Scalar(ScalarKind::Int32)
        );
        assert_eq!(
            FieldType::parse("Person[][]").unwrap(),
            FieldType::array_of(FieldType::array_of(FieldType::Object("Person".into())))
        );
        assert!(FieldType::parse("9lives").is_err());
        assert!(FieldType::parse("").is_err());
    }

    #[test]
    fn test_field_type_display_round_trips() {
        let ty = FieldType::array_of(FieldType::Scalar(ScalarKind::Date));
        assert_eq!(ty.to_string(), "date[]");
        assert_eq!(FieldType::parse(&ty.to_string()).unwrap(), ty);
    }

    #[test]
    fn test_leaf_scalar() {
        let ty = FieldType::array_of(FieldType::Scalar(ScalarKind::Date));
        assert_eq!(ty.leaf_scalar(), Some(ScalarKind::Date));
        assert_eq!(FieldType::Object("A".into()).leaf_scalar(), None);
    }

    #[test]
    fn test_resolve_wire_name() {
        let ty = ObjectType::new("Person")
            .with_field(FieldDescriptor::new("id", FieldType::Scalar(ScalarKind::Int32)))
            .with_field(
                FieldDescriptor::new("name", FieldType::Scalar(ScalarKind::String)).rename("nm"),
            );

        assert_eq!(ty.resolve_wire_name("nm").unwrap().name, "name");
        assert_eq!(ty.resolve_wire_name("id").unwrap().name, "id");
        assert!(ty.resolve_wire_name("name").is_none());
    }

    #[test]
    fn test_zero_instance() {
        let ty = ObjectType::new("T")
            .with_field(FieldDescriptor::new("n", FieldType::Scalar(ScalarKind::Int64)))
            .with_field(FieldDescriptor::new("ok", FieldType::Scalar(ScalarKind::Bool)))
            .with_field(FieldDescriptor::new("s", FieldType::Scalar(ScalarKind::String)))
            .with_field(FieldDescriptor::new(
                "xs",
                FieldType::array_of(FieldType::Scalar(ScalarKind::Int8)),
            ));

        let obj = ty.zero_instance();
        assert_eq!(obj.get("n"), Some(&Value::Int64(0)));
        assert_eq!(obj.get("ok"), Some(&Value::Bool(false)));
        assert_eq!(obj.get("s"), Some(&Value::Null));
        assert_eq!(obj.get("xs"), Some(&Value::Null));
    }
}
