// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type descriptors for decode targets.
//!
//! A [`TypeDescriptor`] pairs a root [`FieldType`] with the object types it
//! references by name. Descriptors are built once (by hand, from a
//! [`Decodable`](crate::Decodable) impl, or from a schema file) and are only
//! read while decoding.

use std::collections::HashMap;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::core::{format_date, DecodeError, Result};
use crate::schema::ast::{FieldType, ObjectType, ScalarKind};

/// Static description of a decode target.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type of the top-level value
    pub root: FieldType,
    /// Object types referenced by name from `root` or from other fields
    pub types: HashMap<String, ObjectType>,
}

impl TypeDescriptor {
    /// Create a descriptor with no object types.
    pub fn new(root: FieldType) -> Self {
        Self {
            root,
            types: HashMap::new(),
        }
    }

    /// Descriptor for a single scalar.
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::new(FieldType::Scalar(kind))
    }

    /// Descriptor for an object type, which becomes the root.
    pub fn object(object_type: ObjectType) -> Self {
        let mut descriptor = Self::new(FieldType::Object(object_type.name.clone()));
        descriptor.register(object_type);
        descriptor
    }

    /// Wrap the root in an array, keeping the referenced types.
    pub fn into_array(self) -> Self {
        Self {
            root: FieldType::array_of(self.root),
            types: self.types,
        }
    }

    /// Add or replace an object type definition.
    pub fn register(&mut self, object_type: ObjectType) {
        self.types.insert(object_type.name.clone(), object_type);
    }

    /// Add an object type definition, builder style.
    pub fn with_type(mut self, object_type: ObjectType) -> Self {
        self.register(object_type);
        self
    }

    /// Take over every object type `other` defines. Its root is ignored.
    pub fn merge(&mut self, other: TypeDescriptor) {
        self.types.extend(other.types);
    }

    /// Look up an object type by name.
    pub fn get_type(&self, name: &str) -> Result<&ObjectType> {
        self.types
            .get(name)
            .ok_or_else(|| DecodeError::unknown_type(name))
    }

    /// Check that every referenced type exists and every format is usable.
    ///
    /// A custom format is only valid on a field whose leaf scalar is a date,
    /// and must be a strftime pattern chrono can compile.
    pub fn validate(&self) -> Result<()> {
        self.check_references(&self.root)?;

        for object_type in self.types.values() {
            for field in &object_type.fields {
                self.check_references(&field.type_name)?;

                if let Some(format) = &field.format {
                    if field.type_name.leaf_scalar() != Some(ScalarKind::Date) {
                        return Err(DecodeError::invalid_schema(format!(
                            "field '{}.{}' declares a format but its type is {}",
                            object_type.name, field.name, field.type_name
                        )));
                    }
                    check_date_format(format)?;
                }
            }

            let mut seen = std::collections::HashSet::new();
            for field in &object_type.fields {
                if !seen.insert(field.wire_name()) {
                    return Err(DecodeError::invalid_schema(format!(
                        "type '{}' maps key '{}' to more than one field",
                        object_type.name,
                        field.wire_name()
                    )));
                }
            }
        }

        Ok(())
    }

    fn check_references(&self, field_type: &FieldType) -> Result<()> {
        match field_type {
            FieldType::Scalar(_) => Ok(()),
            FieldType::Array { base_type } => self.check_references(base_type),
            FieldType::Object(name) => self.get_type(name).map(|_| ()),
        }
    }
}

/// Reject strftime patterns chrono cannot compile, and patterns that need
/// time or offset fields a date cannot supply.
pub fn check_date_format(format: &str) -> Result<()> {
    let invalid = || DecodeError::invalid_schema(format!("invalid date format '{format}'"));

    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    format_date(NaiveDate::default(), format).map_err(|_| invalid())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ast::FieldDescriptor;

    fn person() -> ObjectType {
        ObjectType::new("Person")
            .with_field(FieldDescriptor::new("id", FieldType::Scalar(ScalarKind::Int32)))
            .with_field(FieldDescriptor::new("name", FieldType::Scalar(ScalarKind::String)))
    }

    #[test]
    fn test_object_descriptor() {
        let descriptor = TypeDescriptor::object(person());
        assert_eq!(descriptor.root, FieldType::Object("Person".into()));
        assert!(descriptor.get_type("Person").is_ok());
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_unknown_type() {
        let descriptor = TypeDescriptor::new(FieldType::Object("Missing".into()));
        assert_eq!(
            descriptor.validate().unwrap_err(),
            DecodeError::unknown_type("Missing")
        );
    }

    #[test]
    fn test_into_array_keeps_types() {
        let descriptor = TypeDescriptor::object(person()).into_array();
        assert_eq!(
            descriptor.root,
            FieldType::array_of(FieldType::Object("Person".into()))
        );
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_format_on_non_date_field_rejected() {
        let ty = ObjectType::new("T").with_field(
            FieldDescriptor::new("n", FieldType::Scalar(ScalarKind::Int32)).with_format("%Y"),
        );
        let err = TypeDescriptor::object(ty).validate().unwrap_err();
        assert!(matches!(err, DecodeError::InvalidSchema { .. }));
    }

    #[test]
    fn test_format_on_date_array_accepted() {
        let ty = ObjectType::new("T").with_field(
            FieldDescriptor::new(
                "days",
                FieldType::array_of(FieldType::Scalar(ScalarKind::Date)),
            )
            .with_format("%Y-%m-%d"),
        );
        assert!(TypeDescriptor::object(ty).validate().is_ok());
    }

    #[test]
    fn test_bad_date_format_rejected() {
        assert!(check_date_format("%Y-%m-%d").is_ok());
        assert!(check_date_format("%Q").is_err());
        assert!(check_date_format("").is_err());
    }

    #[test]
    fn test_time_date_format_rejected() {
        assert!(check_date_format("%d/%m/%Y %H:%M").is_err());
        assert!(check_date_format("%Y-%m-%dT%S").is_err());
        assert!(check_date_format("%Y %z").is_err());

        let ty = ObjectType::new("Stamp").with_field(
            FieldDescriptor::new("at", FieldType::Scalar(ScalarKind::Date))
                .with_format("%d/%m/%Y %H:%M"),
        );
        let err = TypeDescriptor::object(ty).validate().unwrap_err();
        assert!(matches!(err, DecodeError::InvalidSchema { .. }));
    }

    #[test]
    fn test_duplicate_wire_name_rejected() {
        let ty = person().with_field(
            FieldDescriptor::new("alias", FieldType::Scalar(ScalarKind::String)).rename("name"),
        );
        assert!(TypeDescriptor::object(ty).validate().is_err());
    }
}
