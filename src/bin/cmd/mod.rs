// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod decode;
mod encode;
mod tokens;

pub use decode::DecodeCmd;
pub use encode::EncodeCmd;
pub use tokens::TokensCmd;
