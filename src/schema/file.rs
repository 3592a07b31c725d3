// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema files: type descriptors written in TOML.
//!
//! ```toml
//! root = "Person[]"
//!
//! [[types.Person.fields]]
//! name = "id"
//! type = "int32"
//!
//! [[types.Person.fields]]
//! name = "born"
//! type = "date"
//! rename = "dob"
//! format = "%Y-%m-%d"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::core::{DecodeError, Result};
use crate::schema::ast::{FieldDescriptor, FieldType, ObjectType};
use crate::schema::descriptor::TypeDescriptor;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    root: String,
    #[serde(default)]
    types: BTreeMap<String, TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeEntry {
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldEntry {
    name: String,
    #[serde(rename = "type")]
    type_expr: String,
    rename: Option<String>,
    format: Option<String>,
}

/// Parse a schema from TOML text and validate it.
pub fn parse_schema_toml(text: &str) -> Result<TypeDescriptor> {
    let file: SchemaFile =
        toml::from_str(text).map_err(|e| DecodeError::invalid_schema(e.to_string()))?;

    let mut descriptor = TypeDescriptor::new(FieldType::parse(&file.root)?);
    for (type_name, entry) in file.types {
        let mut object_type = ObjectType::new(type_name);
        for field in entry.fields {
            let mut descriptor_field =
                FieldDescriptor::new(field.name, FieldType::parse(&field.type_expr)?);
            descriptor_field.wire_name = field.rename;
            descriptor_field.format = field.format;
            object_type.add_field(descriptor_field);
        }
        descriptor.register(object_type);
    }

    descriptor.validate()?;
    Ok(descriptor)
}

/// Load and validate a schema file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<TypeDescriptor> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        DecodeError::invalid_schema(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_schema_toml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ast::ScalarKind;

    const PERSON_SCHEMA: &str = r#"
root = "Person[]"

[[types.Person.fields]]
name = "id"
type = "int"

[[types.Person.fields]]
name = "born"
type = "date"
rename = "dob"
format = "%Y-%m-%d"
"#;

    #[test]
    fn test_parse_schema() {
        let descriptor = parse_schema_toml(PERSON_SCHEMA).unwrap();
        assert_eq!(
            descriptor.root,
            FieldType::array_of(FieldType::Object("Person".into()))
        );

        let person = descriptor.get_type("Person").unwrap();
        assert_eq!(person.fields.len(), 2);
        assert_eq!(person.fields[0].type_name, FieldType::Scalar(ScalarKind::Int32));
        assert_eq!(person.fields[1].wire_name(), "dob");
        assert_eq!(person.fields[1].format.as_deref(), Some("%Y-%m-%d"));
    }

    #[test]
    fn test_scalar_root_without_types() {
        let descriptor = parse_schema_toml("root = \"float64[]\"").unwrap();
        assert!(descriptor.types.is_empty());
    }

    #[test]
    fn test_undefined_reference() {
        let err = parse_schema_toml("root = \"Missing\"").unwrap_err();
        assert_eq!(err, DecodeError::unknown_type("Missing"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let text = "root = \"int32\"\nversion = 2\n";
        assert!(matches!(
            parse_schema_toml(text),
            Err(DecodeError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_schema("/nonexistent/schema.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
