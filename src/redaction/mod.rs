//! Sensitive-data protection: typed wrappers and pattern-based redaction

pub mod redactor;
pub mod sensitive;

pub use redactor::{Redactor, DEPTH_MARKER};
pub use sensitive::{SensitiveValue, DEFAULT_PLACEHOLDER};
