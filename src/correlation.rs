//! Correlation-context propagation
//!
//! A per-operation store `{id, start_time}` scoped to the dynamic extent of
//! [`run_with_context`]. Nested scopes shadow the outer store and the outer
//! store resumes when the inner closure returns, so the active store behaves
//! like a stack, not a global singleton. An externally supplied identifier
//! (for example an inbound request header) seeds the scope's id; otherwise a
//! fresh uuid-v4 is generated.

use chrono::Utc;
use std::cell::RefCell;
use uuid::Uuid;

/// Fallback id returned by [`current_id`] outside any scope.
pub const UNKNOWN_ID: &str = "unknown";

/// The store active for one logical operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationStore {
    /// Identifier grouping every log entry of this operation.
    pub id: String,
    /// Scope entry time, milliseconds since epoch.
    pub start_time: i64,
}

impl CorrelationStore {
    fn new(existing_id: Option<&str>) -> Self {
        Self {
            id: existing_id
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            start_time: Utc::now().timestamp_millis(),
        }
    }
}

thread_local! {
    static SCOPES: RefCell<Vec<CorrelationStore>> = const { RefCell::new(Vec::new()) };
}

/// Pops the scope on drop, so unwinding restores the outer store too.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| {
            scopes.borrow_mut().pop();
        });
    }
}

/// Run `f` with a fresh correlation store active for its dynamic extent.
///
/// `existing_id` seeds the scope when a caller already carries an id (for
/// example from a request header); otherwise a new unique id is generated.
///
/// # Example
///
/// ```
/// use logcore::correlation;
///
/// let id = correlation::run_with_context(Some("req-42"), || {
///     correlation::current_id()
/// });
/// assert_eq!(id, "req-42");
/// assert_eq!(correlation::current_id(), "unknown");
/// ```
pub fn run_with_context<F, R>(existing_id: Option<&str>, f: F) -> R
where
    F: FnOnce() -> R,
{
    SCOPES.with(|scopes| {
        scopes.borrow_mut().push(CorrelationStore::new(existing_id));
    });
    let _guard = ScopeGuard;
    f()
}

/// The active store, or `None` outside any scope.
pub fn current_store() -> Option<CorrelationStore> {
    SCOPES.with(|scopes| scopes.borrow().last().cloned())
}

/// The active correlation id, falling back to `"unknown"` outside a scope.
///
/// The fallback is a usable value, not an error; callers must tolerate it.
pub fn current_id() -> String {
    current_store()
        .map(|s| s.id)
        .unwrap_or_else(|| UNKNOWN_ID.to_string())
}

/// The active scope's start time, falling back to the current time.
pub fn current_start_time() -> i64 {
    current_store()
        .map(|s| s.start_time)
        .unwrap_or_else(|| Utc::now().timestamp_millis())
}
