//! Transport trait for log output destinations

use super::{entry::LogEntry, error::Result};

/// A sink that renders and delivers one log entry.
///
/// `log` is synchronous from the dispatcher's perspective; transports that
/// need asynchrony (such as the file transport's write queue) manage it
/// internally. The lifecycle hooks default to no-ops.
pub trait Transport: Send + Sync {
    fn name(&self) -> &str;

    fn log(&mut self, entry: &LogEntry) -> Result<()>;

    /// Acquire resources (directories, streams). Called before first use.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flush pending output and release resources.
    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}
