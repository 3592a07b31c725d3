// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar parser registry.
//!
//! Maps each [`ScalarKind`] to the converter that turns a de-quoted token
//! into a [`Value`]. The process-wide registry is populated with the
//! built-in converters on first use and may be extended or overridden with
//! [`ScalarRegistry::register`].
//!
//! Per-field date formats never go through the registry: the decoder builds
//! a field-local converter with [`date_parser`] and passes it down the
//! recursion, so concurrent decodes cannot observe each other's formats.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use quotejson::encoding::ScalarRegistry;
//! use quotejson::{ScalarKind, Value};
//!
//! let registry = ScalarRegistry::with_builtins();
//! registry.register(
//!     ScalarKind::Bool,
//!     Arc::new(|s: &str| -> Result<Value, String> {
//!         Ok(Value::Bool(matches!(s, "yes" | "true")))
//!     }),
//! );
//! let parser = registry.get(ScalarKind::Bool).unwrap();
//! assert_eq!(parser("yes"), Ok(Value::Bool(true)));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use chrono::NaiveDate;

use crate::config::DEFAULT_DATE_FORMAT;
use crate::core::Value;
use crate::schema::ScalarKind;

/// Converter from de-quoted token content to a value.
///
/// The error string becomes the `cause` of a
/// [`ScalarConversionError`](crate::DecodeError::ScalarConversionError).
pub type ScalarParser = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Registry of scalar converters.
///
/// Uses RwLock for concurrent read access with exclusive write access.
#[derive(Default)]
pub struct ScalarRegistry {
    parsers: RwLock<HashMap<ScalarKind, ScalarParser>>,
}

impl ScalarRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in converters.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for kind in ScalarKind::ALL {
            registry.register(kind, builtin_parser(kind));
        }
        registry
    }

    /// Register a converter, replacing any earlier one for `kind`.
    pub fn register(&self, kind: ScalarKind, parser: ScalarParser) {
        let mut parsers = self.parsers.write().unwrap_or_else(PoisonError::into_inner);
        if parsers.insert(kind, parser).is_some() {
            tracing::debug!(kind = %kind, "replaced scalar converter");
        }
    }

    /// Remove the converter for `kind`.
    ///
    /// Returns `true` if a converter was removed.
    pub fn unregister(&self, kind: ScalarKind) -> bool {
        let mut parsers = self.parsers.write().unwrap_or_else(PoisonError::into_inner);
        parsers.remove(&kind).is_some()
    }

    /// Get the converter for `kind`.
    pub fn get(&self, kind: ScalarKind) -> Option<ScalarParser> {
        let parsers = self.parsers.read().unwrap_or_else(PoisonError::into_inner);
        parsers.get(&kind).cloned()
    }

    /// Check if a converter is registered for `kind`.
    pub fn contains(&self, kind: ScalarKind) -> bool {
        let parsers = self.parsers.read().unwrap_or_else(PoisonError::into_inner);
        parsers.contains_key(&kind)
    }

    /// Get all registered kinds, sorted.
    pub fn kinds(&self) -> Vec<ScalarKind> {
        let parsers = self.parsers.read().unwrap_or_else(PoisonError::into_inner);
        let mut kinds: Vec<ScalarKind> = parsers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Get the number of registered converters.
    pub fn len(&self) -> usize {
        let parsers = self.parsers.read().unwrap_or_else(PoisonError::into_inner);
        parsers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ScalarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Build a date converter for a strftime pattern.
pub fn date_parser(format: &str) -> ScalarParser {
    let format = format.to_string();
    Arc::new(move |s: &str| {
        NaiveDate::parse_from_str(s, &format)
            .map(Value::Date)
            .map_err(|e| e.to_string())
    })
}

fn parse_with<T, F>(wrap: F) -> ScalarParser
where
    T: std::str::FromStr + 'static,
    T::Err: std::fmt::Display,
    F: Fn(T) -> Value + Send + Sync + 'static,
{
    Arc::new(move |s: &str| s.parse::<T>().map(&wrap).map_err(|e| e.to_string()))
}

/// The built-in converter for `kind`.
///
/// Booleans are lenient: `"true"` in any case is true, anything else false.
pub fn builtin_parser(kind: ScalarKind) -> ScalarParser {
    match kind {
        ScalarKind::Bool => Arc::new(|s: &str| -> Result<Value, String> {
            Ok(Value::Bool(s.eq_ignore_ascii_case("true")))
        }),
        ScalarKind::Int8 => parse_with(Value::Int8),
        ScalarKind::Int16 => parse_with(Value::Int16),
        ScalarKind::Int32 => parse_with(Value::Int32),
        ScalarKind::Int64 => parse_with(Value::Int64),
        ScalarKind::UInt8 => parse_with(Value::UInt8),
        ScalarKind::UInt16 => parse_with(Value::UInt16),
        ScalarKind::UInt32 => parse_with(Value::UInt32),
        ScalarKind::UInt64 => parse_with(Value::UInt64),
        ScalarKind::Float32 => parse_with(Value::Float32),
        ScalarKind::Float64 => parse_with(Value::Float64),
        ScalarKind::String => Arc::new(|s: &str| -> Result<Value, String> {
            Ok(Value::String(s.to_string()))
        }),
        ScalarKind::Date => date_parser(DEFAULT_DATE_FORMAT),
    }
}

/// Global scalar registry.
static GLOBAL_REGISTRY: OnceLock<Arc<ScalarRegistry>> = OnceLock::new();

/// Get the process-wide registry, populated with the built-in converters.
pub fn global_registry() -> Arc<ScalarRegistry> {
    GLOBAL_REGISTRY
        .get_or_init(|| Arc::new(ScalarRegistry::with_builtins()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(kind: ScalarKind, s: &str) -> Result<Value, String> {
        builtin_parser(kind)(s)
    }

    #[test]
    fn test_builtins_cover_every_kind() {
        let registry = ScalarRegistry::with_builtins();
        assert_eq!(registry.len(), ScalarKind::ALL.len());
        assert_eq!(registry.kinds(), ScalarKind::ALL.to_vec());
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(convert(ScalarKind::Int8, "-128"), Ok(Value::Int8(-128)));
        assert!(convert(ScalarKind::Int8, "128").is_err());
        assert_eq!(convert(ScalarKind::Int32, "+5"), Ok(Value::Int32(5)));
        assert_eq!(
            convert(ScalarKind::UInt64, "18446744073709551615"),
            Ok(Value::UInt64(u64::MAX))
        );
        assert!(convert(ScalarKind::UInt16, "-1").is_err());
        assert!(convert(ScalarKind::Int64, "abc").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(convert(ScalarKind::Float64, "2.5"), Ok(Value::Float64(2.5)));
        assert_eq!(convert(ScalarKind::Float32, "1e3"), Ok(Value::Float32(1000.0)));
        assert!(convert(ScalarKind::Float64, "two").is_err());
    }

    #[test]
    fn test_bool_is_lenient() {
        assert_eq!(convert(ScalarKind::Bool, "TRUE"), Ok(Value::Bool(true)));
        assert_eq!(convert(ScalarKind::Bool, "yes"), Ok(Value::Bool(false)));
        assert_eq!(convert(ScalarKind::Bool, ""), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_string_identity() {
        assert_eq!(
            convert(ScalarKind::String, "a \\\"b\\\""),
            Ok(Value::String("a \\\"b\\\"".to_string()))
        );
    }

    #[test]
    fn test_default_date_format() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(convert(ScalarKind::Date, "31/12/1999"), Ok(Value::Date(date)));
        assert!(convert(ScalarKind::Date, "1999-12-31").is_err());
    }

    #[test]
    fn test_custom_date_parser() {
        let parser = date_parser("%Y-%m-%d");
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(parser("1999-12-31"), Ok(Value::Date(date)));
    }

    #[test]
    fn test_register_and_unregister() {
        let registry = ScalarRegistry::new();
        assert!(registry.is_empty());

        registry.register(ScalarKind::String, builtin_parser(ScalarKind::String));
        assert!(registry.contains(ScalarKind::String));
        assert!(registry.get(ScalarKind::Int32).is_none());

        assert!(registry.unregister(ScalarKind::String));
        assert!(!registry.unregister(ScalarKind::String));
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = global_registry();
        let b = global_registry();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.contains(ScalarKind::Date));
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let registry = Arc::new(ScalarRegistry::with_builtins());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        let parser = registry.get(ScalarKind::Int32).unwrap();
                        assert_eq!(parser("7"), Ok(Value::Int32(7)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(registry.contains(ScalarKind::Int32));
    }
}
