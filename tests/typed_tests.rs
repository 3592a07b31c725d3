// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed decoding integration tests.
//!
//! User structs describe themselves through `Decodable` and are decoded with
//! `quotejson::parse`.

use chrono::NaiveDate;
use quotejson::schema::{FieldDescriptor, ObjectType};
use quotejson::{expect_object, field_type, Decodable, DecodeError, Result, TypeDescriptor, Value};

#[derive(Debug, PartialEq)]
struct Address {
    city: String,
    zip: u32,
}

impl Decodable for Address {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::object(
            ObjectType::new("Address")
                .with_field(FieldDescriptor::new("city", field_type::<String>()))
                .with_field(FieldDescriptor::new("zip", field_type::<u32>()).rename("postcode")),
        )
    }

    fn from_value(value: Value) -> Result<Self> {
        let mut obj = expect_object(value)?;
        Ok(Address {
            city: obj.take_as("city")?,
            zip: obj.take_as("zip")?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Person {
    id: i64,
    name: String,
    active: bool,
    born: Option<NaiveDate>,
    scores: Vec<f64>,
    home: Option<Address>,
}

impl Decodable for Person {
    fn descriptor() -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::object(
            ObjectType::new("Person")
                .with_field(FieldDescriptor::new("id", field_type::<i64>()))
                .with_field(FieldDescriptor::new("name", field_type::<String>()))
                .with_field(FieldDescriptor::new("active", field_type::<bool>()))
                .with_field(
                    FieldDescriptor::new("born", field_type::<NaiveDate>())
                        .with_format("%Y-%m-%d"),
                )
                .with_field(FieldDescriptor::new("scores", field_type::<Vec<f64>>()))
                .with_field(FieldDescriptor::new("home", field_type::<Address>())),
        );
        descriptor.merge(Address::descriptor());
        descriptor
    }

    fn from_value(value: Value) -> Result<Self> {
        let mut obj = expect_object(value)?;
        Ok(Person {
            id: obj.take_as("id")?,
            name: obj.take_as("name")?,
            active: obj.take_as("active")?,
            born: obj.take_as("born")?,
            scores: obj.take_as("scores")?,
            home: obj.take_as("home")?,
        })
    }
}

#[test]
fn test_parse_full_struct() {
    let json = r#"{
        "id": "42",
        "name": "Ann",
        "active": "True",
        "born": "1988-11-30",
        "scores": ["1.5", "2.25"],
        "home": {"city": "Bergen", "postcode": "5003"}
    }"#;

    let person: Person = quotejson::parse(json).unwrap();
    assert_eq!(
        person,
        Person {
            id: 42,
            name: "Ann".to_string(),
            active: true,
            born: NaiveDate::from_ymd_opt(1988, 11, 30),
            scores: vec![1.5, 2.25],
            home: Some(Address {
                city: "Bergen".to_string(),
                zip: 5003,
            }),
        }
    );
}

#[test]
fn test_parse_sparse_struct_uses_zero_values() {
    let person: Person = quotejson::parse(r#"{"name":"Bo"}"#).unwrap();
    assert_eq!(person.id, 0);
    assert!(!person.active);
    assert_eq!(person.born, None);
    assert!(person.scores.is_empty());
    assert_eq!(person.home, None);
}

#[test]
fn test_parse_vec_of_structs() {
    let people: Vec<Address> =
        quotejson::parse(r#"[{"city":"A","postcode":"1"},{"city":"B"}]"#).unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[1].zip, 0);
}

#[test]
fn test_parse_renamed_field_by_target_name_fails() {
    let err = quotejson::parse::<Address>(r#"{"zip":"1"}"#).unwrap_err();
    assert_eq!(err, DecodeError::unknown_field("zip", "Address"));
}

#[test]
fn test_parse_scalar_targets() {
    let n: u8 = quotejson::parse(r#""255""#).unwrap();
    assert_eq!(n, 255);

    let err = quotejson::parse::<u8>(r#""256""#).unwrap_err();
    assert!(matches!(err, DecodeError::ScalarConversionError { ref target, .. } if target == "uint8"));

    let dates: Vec<NaiveDate> = quotejson::parse(r#"["01/02/2003"]"#).unwrap();
    assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2003, 2, 1).unwrap()]);
}

#[test]
fn test_missing_required_nested_object() {
    #[derive(Debug)]
    struct Wrapper {
        _address: Address,
    }

    impl Decodable for Wrapper {
        fn descriptor() -> TypeDescriptor {
            let mut descriptor = TypeDescriptor::object(
                ObjectType::new("Wrapper")
                    .with_field(FieldDescriptor::new("address", field_type::<Address>())),
            );
            descriptor.merge(Address::descriptor());
            descriptor
        }

        fn from_value(value: Value) -> Result<Self> {
            let mut obj = expect_object(value)?;
            Ok(Wrapper {
                _address: obj.take_as("address")?,
            })
        }
    }

    let err = quotejson::parse::<Wrapper>("{}").unwrap_err();
    assert_eq!(err, DecodeError::type_mismatch("object", "null"));
}
