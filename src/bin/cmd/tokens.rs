// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tokens command - print the token stream of a file.

use std::path::PathBuf;

use clap::Args;
use quotejson::encoding::{TokenKind, Tokenizer};

use crate::common::{read_input, Result};

/// Print one token per line with its byte offset.
#[derive(Args, Clone, Debug)]
pub struct TokensCmd {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

impl TokensCmd {
    pub fn run(self) -> Result<()> {
        let text = read_input(&self.input)?;
        let tokenizer = Tokenizer::new(&text)?;

        for token in tokenizer.tokens() {
            let marker = match token.kind() {
                TokenKind::Bare => "  (bare)",
                _ => "",
            };
            println!("{:>8}  {}{}", token.offset, token.text, marker);
        }
        Ok(())
    }
}
