// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type descriptors that drive decoding.
//!
//! This module provides:
//! - [`ast`] - Scalar kinds, field types, field and object descriptors
//! - [`descriptor`] - The [`TypeDescriptor`] handed to the decoder
//! - [`provider`] - The [`Decodable`] trait for typed targets
//! - [`file`] - TOML schema files

pub mod ast;
pub mod descriptor;
pub mod file;
pub mod provider;

pub use ast::{FieldDescriptor, FieldType, ObjectType, ScalarKind};
pub use descriptor::{check_date_format, TypeDescriptor};
pub use file::{load_schema, parse_schema_toml};
pub use provider::{expect_object, field_type, Decodable};
