//! Structured logging context for key-value fields
//!
//! `LogContext` maps string keys to [`ContextValue`], a closed sum type so
//! redaction and serialization can be handled exhaustively. Insertion order
//! is preserved for display.

use crate::redaction::SensitiveValue;
use serde::Serialize;
use std::fmt;

/// Value type for structured logging fields.
///
/// Closed set of shapes a context entry may take: primitives, a sensitive
/// wrapper, a captured error, or nested maps/sequences.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// A value that renders only as its placeholder.
    Sensitive(SensitiveValue<String>),
    /// A captured error; `stack` is stripped by the dispatcher unless
    /// stack-trace inclusion is configured.
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    Map(Vec<(String, ContextValue)>),
    List(Vec<ContextValue>),
}

impl ContextValue {
    /// Capture an error value with an optional backtrace-like string.
    pub fn error(message: impl Into<String>, stack: Option<String>) -> Self {
        ContextValue::Error {
            message: message.into(),
            stack,
        }
    }

    /// Capture any `std::error::Error` as a context value.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        let stack = err.source().map(|s| s.to_string());
        ContextValue::Error {
            message: err.to_string(),
            stack,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::String(s) => write!(f, "{}", s),
            ContextValue::Int(i) => write!(f, "{}", i),
            ContextValue::Float(fl) => write!(f, "{}", fl),
            ContextValue::Bool(b) => write!(f, "{}", b),
            ContextValue::Null => write!(f, "null"),
            ContextValue::Sensitive(s) => write!(f, "{}", s.placeholder()),
            ContextValue::Error { message, .. } => write!(f, "{}", message),
            ContextValue::Map(_) => write!(f, "{{..}}"),
            ContextValue::List(items) => write!(f, "[{} items]", items.len()),
        }
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::String(s)
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::String(s.to_string())
    }
}

impl From<i64> for ContextValue {
    fn from(i: i64) -> Self {
        ContextValue::Int(i)
    }
}

impl From<i32> for ContextValue {
    fn from(i: i32) -> Self {
        ContextValue::Int(i as i64)
    }
}

impl From<u64> for ContextValue {
    fn from(i: u64) -> Self {
        ContextValue::Int(i as i64)
    }
}

impl From<f64> for ContextValue {
    fn from(f: f64) -> Self {
        ContextValue::Float(f)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        ContextValue::Bool(b)
    }
}

impl From<SensitiveValue<String>> for ContextValue {
    fn from(s: SensitiveValue<String>) -> Self {
        ContextValue::Sensitive(s)
    }
}

impl<V: Into<ContextValue>> From<Vec<(String, V)>> for ContextValue {
    fn from(entries: Vec<(String, V)>) -> Self {
        ContextValue::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Context for structured logging with key-value fields.
///
/// Keys keep insertion order; inserting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogContext {
    fields: Vec<(String, ContextValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// All fields in insertion order
    pub fn fields(&self) -> &[(String, ContextValue)] {
        &self.fields
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Drop the `stack` component from every error value, at any depth.
    pub(crate) fn strip_error_stacks(&mut self) {
        fn strip(value: &mut ContextValue) {
            match value {
                ContextValue::Error { stack, .. } => *stack = None,
                ContextValue::Map(entries) => {
                    for (_, v) in entries.iter_mut() {
                        strip(v);
                    }
                }
                ContextValue::List(items) => {
                    for v in items.iter_mut() {
                        strip(v);
                    }
                }
                _ => {}
            }
        }
        for (_, v) in self.fields.iter_mut() {
            strip(v);
        }
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = LogContext::new();
        for (k, v) in iter {
            ctx.add_field(k, v);
        }
        ctx
    }
}
