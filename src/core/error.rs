// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for quotejson.
//!
//! Every variant is terminal: decoding is deterministic, so there is no
//! retry or recovery path inside the decoder. Errors carry the offending
//! token and the expected token or type so callers can diagnose input.

use std::fmt;

/// Rendering used for a missing token when the input runs out.
pub const END_OF_INPUT: &str = "<end of input>";

/// Errors that can occur while tokenizing, decoding, or encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Text cannot be tokenized
    MalformedInput {
        /// Byte offset of the malformed region
        offset: usize,
        /// What went wrong
        reason: String,
    },

    /// A structural token does not match the grammar position
    UnexpectedToken {
        /// Token the grammar required
        expected: String,
        /// Token actually found
        found: String,
        /// Byte offset of the found token
        offset: usize,
    },

    /// A scalar value is not a quoted literal
    InvalidScalarToken {
        /// The unquoted token
        token: String,
        /// Byte offset of the token
        offset: usize,
    },

    /// Quoted content cannot convert to the declared type
    ScalarConversionError {
        /// De-quoted token content
        token: String,
        /// Target scalar type
        target: String,
        /// Converter message
        cause: String,
    },

    /// An input key does not resolve to any declared field
    UnknownField {
        /// Wire name found in the input
        field: String,
        /// Object type being decoded
        type_name: String,
    },

    /// Input contains tokens after the top-level value completes
    TrailingData {
        /// First excess token
        token: String,
        /// Byte offset of the excess token
        offset: usize,
    },

    /// Object type name is not defined in the descriptor
    UnknownType {
        /// Type name that was not found
        type_name: String,
    },

    /// Nesting exceeds the configured limit
    DepthExceeded {
        /// Configured maximum depth
        max_depth: usize,
    },

    /// Decoded value does not have the shape a typed target requires
    TypeMismatch {
        /// Expected value kind
        expected: String,
        /// Actual value kind
        found: String,
    },

    /// Schema definition or type expression is invalid
    InvalidSchema {
        /// Validation error message
        reason: String,
    },

    /// Decoder configuration is invalid
    InvalidConfig {
        /// Validation error message
        reason: String,
    },

    /// Value cannot be written in the quoted dialect
    EncodeError {
        /// Error message
        message: String,
    },
}

impl DecodeError {
    /// Create a malformed input error.
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        DecodeError::MalformedInput {
            offset,
            reason: reason.into(),
        }
    }

    /// Create an unexpected token error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, offset: usize) -> Self {
        DecodeError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            offset,
        }
    }

    /// Create an invalid scalar token error.
    pub fn invalid_scalar(token: impl Into<String>, offset: usize) -> Self {
        DecodeError::InvalidScalarToken {
            token: token.into(),
            offset,
        }
    }

    /// Create a scalar conversion error.
    pub fn conversion(
        token: impl Into<String>,
        target: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        DecodeError::ScalarConversionError {
            token: token.into(),
            target: target.into(),
            cause: cause.into(),
        }
    }

    /// Create an unknown field error.
    pub fn unknown_field(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        DecodeError::UnknownField {
            field: field.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a trailing data error.
    pub fn trailing(token: impl Into<String>, offset: usize) -> Self {
        DecodeError::TrailingData {
            token: token.into(),
            offset,
        }
    }

    /// Create an "unknown type" error.
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        DecodeError::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        DecodeError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        DecodeError::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        DecodeError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        DecodeError::EncodeError {
            message: message.into(),
        }
    }

    /// Short stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::MalformedInput { .. } => "MalformedInput",
            DecodeError::UnexpectedToken { .. } => "UnexpectedToken",
            DecodeError::InvalidScalarToken { .. } => "InvalidScalarToken",
            DecodeError::ScalarConversionError { .. } => "ScalarConversionError",
            DecodeError::UnknownField { .. } => "UnknownField",
            DecodeError::TrailingData { .. } => "TrailingData",
            DecodeError::UnknownType { .. } => "UnknownType",
            DecodeError::DepthExceeded { .. } => "DepthExceeded",
            DecodeError::TypeMismatch { .. } => "TypeMismatch",
            DecodeError::InvalidSchema { .. } => "InvalidSchema",
            DecodeError::InvalidConfig { .. } => "InvalidConfig",
            DecodeError::EncodeError { .. } => "EncodeError",
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            DecodeError::MalformedInput { offset, reason } => {
                vec![("offset", offset.to_string()), ("reason", reason.clone())]
            }
            DecodeError::UnexpectedToken {
                expected,
                found,
                offset,
            } => vec![
                ("expected", expected.clone()),
                ("found", found.clone()),
                ("offset", offset.to_string()),
            ],
            DecodeError::InvalidScalarToken { token, offset } => {
                vec![("token", token.clone()), ("offset", offset.to_string())]
            }
            DecodeError::ScalarConversionError {
                token,
                target,
                cause,
            } => vec![
                ("token", token.clone()),
                ("target", target.clone()),
                ("cause", cause.clone()),
            ],
            DecodeError::UnknownField { field, type_name } => {
                vec![("field", field.clone()), ("type", type_name.clone())]
            }
            DecodeError::TrailingData { token, offset } => {
                vec![("token", token.clone()), ("offset", offset.to_string())]
            }
            DecodeError::UnknownType { type_name } => vec![("type", type_name.clone())],
            DecodeError::DepthExceeded { max_depth } => {
                vec![("max_depth", max_depth.to_string())]
            }
            DecodeError::TypeMismatch { expected, found } => {
                vec![("expected", expected.clone()), ("found", found.clone())]
            }
            DecodeError::InvalidSchema { reason } | DecodeError::InvalidConfig { reason } => {
                vec![("reason", reason.clone())]
            }
            DecodeError::EncodeError { message } => vec![("message", message.clone())],
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedInput { offset, reason } => {
                write!(f, "Malformed input at offset {offset}: {reason}")
            }
            DecodeError::UnexpectedToken {
                expected,
                found,
                offset,
            } => write!(
                f,
                "Unexpected token {found} at offset {offset} instead of {expected}"
            ),
            DecodeError::InvalidScalarToken { token, offset } => write!(
                f,
                "Invalid token instead of quoted string at offset {offset}: {token}"
            ),
            DecodeError::ScalarConversionError {
                token,
                target,
                cause,
            } => write!(f, "Cannot convert \"{token}\" to {target}: {cause}"),
            DecodeError::UnknownField { field, type_name } => {
                write!(f, "Unknown field '{field}' for type '{type_name}'")
            }
            DecodeError::TrailingData { token, offset } => {
                write!(f, "Trailing data at offset {offset}: {token}")
            }
            DecodeError::UnknownType { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            DecodeError::DepthExceeded { max_depth } => {
                write!(f, "Nesting depth exceeds limit of {max_depth}")
            }
            DecodeError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {expected}, found {found}")
            }
            DecodeError::InvalidSchema { reason } => write!(f, "Invalid schema: {reason}"),
            DecodeError::InvalidConfig { reason } => write!(f, "Invalid config: {reason}"),
            DecodeError::EncodeError { message } => write!(f, "Encode error: {message}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for quotejson operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
