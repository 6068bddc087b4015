//! Approval record for the explicit sensitive-data logging path

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization metadata required by
/// [`crate::core::Logger::log_with_sensitive_data`].
///
/// Valid only when `reason` and `approved_by` are both non-empty and
/// `expires_at` is absent or in the future.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitiveApproval {
    /// Why the sensitive payload needs to be logged.
    pub reason: String,
    /// Who signed off on logging it.
    pub approved_by: String,
    /// Optional expiry; a past instant invalidates the approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SensitiveApproval {
    pub fn new(reason: impl Into<String>, approved_by: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            approved_by: approved_by.into(),
            expires_at: None,
        }
    }

    #[must_use]
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Validate this approval, returning the rejection reason if invalid.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.reason.trim().is_empty() {
            return Err("approval reason is empty");
        }
        if self.approved_by.trim().is_empty() {
            return Err("approver is empty");
        }
        if let Some(expires_at) = self.expires_at {
            if expires_at <= Utc::now() {
                return Err("approval has expired");
            }
        }
        Ok(())
    }
}
