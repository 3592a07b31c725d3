// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tokenizer for the quoted-scalar JSON dialect.
//!
//! Splits text into an ordered token sequence:
//! - each of `{ } [ ] : ,` is a single-character token
//! - a quoted literal is one token, quotes included; a backslash keeps the
//!   next character inside the literal, escapes are not decoded
//! - any other run of non-whitespace characters is a bare token, which the
//!   decoder rejects wherever it appears
//! - whitespace outside quotes is discarded
//!
//! Tokenization is eager: an unterminated quote fails before decoding starts.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{DecodeError, Result};

/// Classification of a token by its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `"..."`
    Quoted,
    /// Anything else, e.g. an unquoted number
    Bare,
}

/// A token borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text, quotes included
    pub text: &'a str,
    /// Byte offset of the token in the input
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Classify this token.
    pub fn kind(&self) -> TokenKind {
        match self.text {
            "{" => TokenKind::OpenBrace,
            "}" => TokenKind::CloseBrace,
            "[" => TokenKind::OpenBracket,
            "]" => TokenKind::CloseBracket,
            ":" => TokenKind::Colon,
            "," => TokenKind::Comma,
            t if is_quoted(t) => TokenKind::Quoted,
            _ => TokenKind::Bare,
        }
    }

    /// Content between the quotes, or `None` if the token is not quoted.
    pub fn unquoted(&self) -> Option<&'a str> {
        if is_quoted(self.text) {
            Some(&self.text[1..self.text.len() - 1])
        } else {
            None
        }
    }
}

fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

/// Alternatives are tried in order; a lone quote only matches when no
/// complete literal starts at that position.
const TOKEN_PATTERN: &str = r#"(?s)[{}\[\]:,]|"(?:[^"\\]|\\.)*"|"|[^\s{}\[\]:,"]+"#;

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Replayable token sequence with one-token lookahead.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
    input_len: usize,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `text`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if a quoted literal is not closed.
    pub fn new(text: &'a str) -> Result<Self> {
        let mut tokens = Vec::new();
        for m in token_regex().find_iter(text) {
            if m.as_str() == "\"" {
                return Err(DecodeError::malformed(
                    m.start(),
                    "unterminated string literal",
                ));
            }
            tokens.push(Token {
                text: m.as_str(),
                offset: m.start(),
            });
        }

        tracing::trace!(count = tokens.len(), "tokenized input");

        Ok(Self {
            tokens,
            position: 0,
            input_len: text.len(),
        })
    }

    /// Look at the next token without consuming it.
    pub fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    /// Consume the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    /// Check if tokens remain.
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Rewind to the first token.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// All tokens, consumed or not.
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Byte offset just past the input, reported when the input runs out.
    pub fn end_offset(&self) -> usize {
        self.input_len
    }
}
