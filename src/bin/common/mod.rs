// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use quotejson::schema::load_schema;
use quotejson::{DecoderConfig, TypeDescriptor};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Read a whole input file as text.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Load a schema file.
pub fn open_schema(path: &Path) -> Result<TypeDescriptor> {
    load_schema(path).with_context(|| format!("loading schema {}", path.display()))
}

/// Load a config file, or the defaults when none is given.
pub fn open_config(path: Option<&Path>) -> Result<DecoderConfig> {
    match path {
        Some(path) => {
            DecoderConfig::load(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(DecoderConfig::default()),
    }
}
