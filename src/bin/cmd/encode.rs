// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - convert standard JSON to the quoted dialect.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use quotejson::JsonEncoder;

use crate::common::{open_config, open_schema, read_input, Result};

/// Read standard JSON matching the schema and print it with quoted scalars.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Schema file (TOML)
    #[arg(short, long, value_name = "SCHEMA")]
    schema: PathBuf,

    /// Decoder config file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Input file (standard JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let descriptor = open_schema(&self.schema)?;
        let config = open_config(self.config.as_deref())?;
        let encoder = JsonEncoder::with_config(&config);

        let text = read_input(&self.input)?;
        let json: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", self.input.display()))?;

        let value = encoder.value_from_json(&json, &descriptor)?;
        println!("{}", encoder.encode(&value, &descriptor)?);
        Ok(())
    }
}
