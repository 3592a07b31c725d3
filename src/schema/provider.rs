// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed decode targets.
//!
//! [`Decodable`] is the bridge between Rust types and the decoder: a type
//! describes its own shape once and converts the decoded [`Value`] back into
//! itself. Scalars, `String`, `NaiveDate`, `Vec<T>` and `Option<T>` are
//! covered here; structs implement it by explicit registration.
//!
//! # Example
//!
//! ```
//! use quotejson::schema::{FieldDescriptor, ObjectType, TypeDescriptor};
//! use quotejson::{field_type, Decodable, Result, Value};
//!
//! struct Person {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl Decodable for Person {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::object(
//!             ObjectType::new("Person")
//!                 .with_field(FieldDescriptor::new("id", field_type::<i32>()))
//!                 .with_field(FieldDescriptor::new("name", field_type::<String>()).rename("nm")),
//!         )
//!     }
//!
//!     fn from_value(value: Value) -> Result<Self> {
//!         let mut obj = quotejson::expect_object(value)?;
//!         Ok(Person {
//!             id: obj.take_as("id")?,
//!             name: obj.take_as("name")?,
//!         })
//!     }
//! }
//!
//! let person: Person = quotejson::parse(r#"{"id":"5","nm":"Ann"}"#)?;
//! assert_eq!(person.id, 5);
//! assert_eq!(person.name, "Ann");
//! # Ok::<(), quotejson::DecodeError>(())
//! ```

use chrono::NaiveDate;

use crate::core::{DecodeError, Instance, Result, Value};
use crate::schema::ast::{FieldType, ScalarKind};
use crate::schema::descriptor::TypeDescriptor;

/// A Rust type the decoder can populate.
pub trait Decodable: Sized {
    /// Describe this type's shape, including every object type it reaches.
    fn descriptor() -> TypeDescriptor;

    /// Convert a value decoded against [`Decodable::descriptor`].
    fn from_value(value: Value) -> Result<Self>;
}

/// Root field type of `T`, for use in another type's field list.
///
/// Object types `T` reaches still have to be merged into the outer
/// descriptor, see [`TypeDescriptor::merge`].
pub fn field_type<T: Decodable>() -> FieldType {
    T::descriptor().root
}

/// Unwrap an object value, failing on any other shape.
pub fn expect_object(value: Value) -> Result<Instance> {
    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(DecodeError::type_mismatch("object", other.type_name())),
    }
}

impl Instance {
    /// Remove a field and convert it to `T`. A missing field converts from
    /// [`Value::Null`].
    pub fn take_as<T: Decodable>(&mut self, name: &str) -> Result<T> {
        T::from_value(self.take(name).unwrap_or(Value::Null))
    }
}

macro_rules! impl_decodable_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Decodable for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar(ScalarKind::$kind)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$kind(v) => Ok(v),
                        other => Err(DecodeError::type_mismatch(
                            ScalarKind::$kind.as_str(),
                            other.type_name(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_decodable_scalar! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    NaiveDate => Date,
}

impl Decodable for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar(ScalarKind::String)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(DecodeError::type_mismatch("string", other.type_name())),
        }
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().into_array()
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(DecodeError::type_mismatch("array", other.type_name())),
        }
    }
}

/// `None` only when the value is [`Value::Null`].
///
/// Objects are seeded with zero values before any input is read, and only
/// string, date, array and object fields start as `Null`. An absent numeric
/// or bool field therefore converts to `Some(0)` or `Some(false)`, never
/// `None`.
impl<T: Decodable> Decodable for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ast::{FieldDescriptor, ObjectType};

    #[test]
    fn test_scalar_descriptors() {
        assert_eq!(i32::descriptor().root, FieldType::Scalar(ScalarKind::Int32));
        assert_eq!(
            NaiveDate::descriptor().root,
            FieldType::Scalar(ScalarKind::Date)
        );
        assert_eq!(
            Vec::<Vec<u8>>::descriptor().root,
            FieldType::array_of(FieldType::array_of(FieldType::Scalar(ScalarKind::UInt8)))
        );
    }

    #[test]
    fn test_scalar_from_value() {
        assert_eq!(i64::from_value(Value::Int64(-3)).unwrap(), -3);
        assert_eq!(
            i64::from_value(Value::Int32(3)).unwrap_err(),
            DecodeError::type_mismatch("int64", "int32")
        );
    }

    #[test]
    fn test_null_conversions() {
        assert_eq!(String::from_value(Value::Null).unwrap(), "");
        assert!(Vec::<i32>::from_value(Value::Null).unwrap().is_empty());
        assert_eq!(Option::<NaiveDate>::from_value(Value::Null).unwrap(), None);
        assert!(NaiveDate::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_option_of_zero_seeded_scalar() {
        let ty = ObjectType::new("T")
            .with_field(FieldDescriptor::new("n", field_type::<i64>()))
            .with_field(FieldDescriptor::new("on", field_type::<bool>()))
            .with_field(FieldDescriptor::new("s", field_type::<String>()));
        let mut obj = ty.zero_instance();

        assert_eq!(obj.take_as::<Option<i64>>("n").unwrap(), Some(0));
        assert_eq!(obj.take_as::<Option<bool>>("on").unwrap(), Some(false));
        assert_eq!(obj.take_as::<Option<String>>("s").unwrap(), None);
    }

    #[test]
    fn test_take_as_missing_field() {
        let mut obj = Instance::new();
        obj.set("n", Value::UInt16(9));
        assert_eq!(obj.take_as::<u16>("n").unwrap(), 9);
        assert_eq!(obj.take_as::<Option<u16>>("n").unwrap(), None);
    }

    #[test]
    fn test_expect_object() {
        assert!(expect_object(Value::Object(Instance::new())).is_ok());
        assert_eq!(
            expect_object(Value::Bool(true)).unwrap_err(),
            DecodeError::type_mismatch("object", "bool")
        );
    }
}
