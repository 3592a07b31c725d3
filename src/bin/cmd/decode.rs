// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - decode files against a schema.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use quotejson::JsonDecoder;
use rayon::prelude::*;

use crate::common::{open_config, open_schema, read_input, Result};

/// Decode files and print each as standard JSON, in argument order.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Schema file (TOML)
    #[arg(short, long, value_name = "SCHEMA")]
    schema: PathBuf,

    /// Decoder config file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Input files
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let descriptor = open_schema(&self.schema)?;
        let config = open_config(self.config.as_deref())?;
        let date_format = config.date_format.clone();
        let decoder = JsonDecoder::with_config(config);

        tracing::debug!(files = self.inputs.len(), "decoding");

        let outputs: Vec<Result<String>> = self
            .inputs
            .par_iter()
            .map(|path| -> Result<String> {
                let text = read_input(path)?;
                let value = decoder
                    .parse(&text, &descriptor)
                    .with_context(|| format!("decoding {}", path.display()))?;
                let json = value
                    .to_json(&date_format)
                    .with_context(|| format!("rendering {}", path.display()))?;
                let rendered = if self.pretty {
                    serde_json::to_string_pretty(&json)?
                } else {
                    serde_json::to_string(&json)?
                };
                Ok(rendered)
            })
            .collect();

        for output in outputs {
            println!("{}", output?);
        }
        Ok(())
    }
}
