//! Typed wrapper for values that must never reach log output

use serde::{Serialize, Serializer};
use std::fmt;

/// Default placeholder emitted in place of a wrapped value.
pub const DEFAULT_PLACEHOLDER: &str = "[REDACTED]";

/// Owns exactly one value and a redaction placeholder.
///
/// Every serialized form (`Display`, `Debug`, `Serialize`) emits only the
/// placeholder; [`SensitiveValue::reveal`] is the single accessor for the
/// wrapped value. Construct these before a value is ever handed to a log
/// call — the logging core never creates them.
///
/// # Example
///
/// ```
/// use logcore::redaction::SensitiveValue;
///
/// let token = SensitiveValue::new("sk-live-abc123");
/// assert_eq!(format!("{}", token), "[REDACTED]");
/// assert_eq!(*token.reveal(), "sk-live-abc123");
/// ```
#[derive(Clone)]
pub struct SensitiveValue<T> {
    value: T,
    placeholder: String,
}

impl<T> SensitiveValue<T> {
    /// Wrap a value with the default placeholder.
    pub fn new(value: T) -> Self {
        Self {
            value,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Wrap a value with a custom placeholder.
    pub fn with_placeholder(value: T, placeholder: impl Into<String>) -> Self {
        Self {
            value,
            placeholder: placeholder.into(),
        }
    }

    /// Explicitly access the wrapped value.
    pub fn reveal(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper, yielding the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The placeholder rendered in place of the value.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl<T> fmt::Display for SensitiveValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placeholder)
    }
}

impl<T> fmt::Debug for SensitiveValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensitiveValue({})", self.placeholder)
    }
}

impl<T> Serialize for SensitiveValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.placeholder)
    }
}

impl<T> From<T> for SensitiveValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_placeholder() {
        let secret = SensitiveValue::new("hunter2".to_string());
        assert_eq!(secret.to_string(), "[REDACTED]");
        assert_eq!(format!("{:?}", secret), "SensitiveValue([REDACTED])");
    }

    #[test]
    fn test_custom_placeholder() {
        let secret = SensitiveValue::with_placeholder("hunter2".to_string(), "[HIDDEN]");
        assert_eq!(secret.to_string(), "[HIDDEN]");
        assert_eq!(secret.placeholder(), "[HIDDEN]");
    }

    #[test]
    fn test_reveal() {
        let secret = SensitiveValue::new(42_i64);
        assert_eq!(*secret.reveal(), 42);
        assert_eq!(secret.into_inner(), 42);
    }

    #[test]
    fn test_serialize_is_placeholder() {
        let secret = SensitiveValue::new("hunter2".to_string());
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"[REDACTED]\"");
        assert!(!json.contains("hunter2"));
    }
}
