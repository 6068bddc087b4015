//! Transport implementations

pub mod console;
pub mod file;

pub use console::ConsoleTransport;
pub use file::{DrainState, FileSink, FileTransport, LineSink, SinkStatus};

// Re-export the trait next to its implementations
pub use crate::core::Transport;
