// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Quotejson CLI
//!
//! Command-line front end for the quoted-scalar JSON decoder.
//!
//! ## Usage
//!
//! ```sh
//! # Show the token stream
//! quotejson tokens input.json
//!
//! # Decode files against a schema, print standard JSON
//! quotejson decode --schema people.toml a.json b.json
//!
//! # Write standard JSON in the quoted dialect
//! quotejson encode --schema people.toml plain.json
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, TokensCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// Quotejson - decoder for JSON where every scalar is quoted
///
/// Values are typed by a TOML schema rather than by the JSON itself.
#[derive(Parser, Clone)]
#[command(name = "quotejson")]
#[command(about = "Schema-directed decoder for quoted-scalar JSON", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Print the token stream of a file
    Tokens(TokensCmd),

    /// Decode files against a schema and print them as standard JSON
    Decode(DecodeCmd),

    /// Read standard JSON and print it in the quoted dialect
    Encode(EncodeCmd),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tokens(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
        Commands::Encode(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
