//! Durable file transport with a FIFO write queue and backpressure
//!
//! `log()` never writes synchronously: each entry is formatted and pushed
//! onto an unbounded FIFO channel drained by a single worker thread. The
//! worker tracks an explicit state machine (Idle, Draining, WaitingForDrain):
//! when the sink reports write-buffer pressure the worker blocks in
//! `await_drain` and resumes afterwards. The queue may grow while the sink
//! is pressured, but no entry is ever silently dropped and per-transport
//! submission order is preserved.

use crate::core::{LogEntry, LoggerError, Result, Transport};
use crate::format::{Formatter, LineFormatter};
use crate::redaction::Redactor;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Flow-control signal from a sink after accepting a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    /// The sink can accept more data immediately.
    Ready,
    /// The line was accepted but the write buffer is full; the caller must
    /// wait for a drain before writing more.
    Pressured,
}

/// Destination for rendered log lines.
///
/// The seam between the drain loop and the underlying stream, so
/// backpressure behavior is testable without a real file.
pub trait LineSink: Send {
    /// Append one line. Returns the sink's flow-control state.
    fn write_line(&mut self, line: &str) -> io::Result<SinkStatus>;

    /// Block until the sink can accept more data.
    fn await_drain(&mut self) -> io::Result<()>;

    /// Flush everything accepted so far to the underlying stream.
    fn flush(&mut self) -> io::Result<()>;
}

/// Append-mode file sink with a high-watermark on buffered bytes.
pub struct FileSink {
    writer: BufWriter<File>,
    high_watermark: usize,
    buffered: usize,
}

impl FileSink {
    /// Default high-watermark on buffered bytes (64 KB)
    pub const DEFAULT_HIGH_WATERMARK: usize = 64 * 1024;

    pub fn open(path: &Path) -> io::Result<Self> {
        Self::with_high_watermark(path, Self::DEFAULT_HIGH_WATERMARK)
    }

    pub fn with_high_watermark(path: &Path, high_watermark: usize) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            high_watermark,
            buffered: 0,
        })
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<SinkStatus> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.buffered += line.len() + 1;

        if self.buffered >= self.high_watermark {
            Ok(SinkStatus::Pressured)
        } else {
            Ok(SinkStatus::Ready)
        }
    }

    fn await_drain(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.buffered = 0;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.buffered = 0;
        Ok(())
    }
}

/// Drain-loop state, observable for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainState {
    Idle,
    Draining,
    WaitingForDrain,
}

/// Durable sink writing formatted entries through a queued drain worker.
pub struct FileTransport {
    path: PathBuf,
    formatter: Arc<dyn Formatter>,
    redactor: Arc<Redactor>,
    sender: Option<Sender<String>>,
    worker: Option<thread::JoinHandle<()>>,
    state: Arc<Mutex<DrainState>>,
    failed: Arc<AtomicBool>,
}

impl FileTransport {
    /// Create an uninitialized transport for `path`. Call
    /// [`Transport::initialize`] before logging.
    pub fn new(path: impl Into<PathBuf>, redactor: Arc<Redactor>) -> Self {
        Self {
            path: path.into(),
            formatter: Arc::new(LineFormatter::new()),
            redactor,
            sender: None,
            worker: None,
            state: Arc::new(Mutex::new(DrainState::Idle)),
            failed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the formatter (file output defaults to single-line entries).
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// The target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current drain-loop state.
    pub fn drain_state(&self) -> DrainState {
        *self.state.lock()
    }

    /// Entries queued but not yet handed to the sink.
    pub fn pending(&self) -> usize {
        self.sender.as_ref().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether the worker halted on a write failure; re-initialize to
    /// recover.
    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    /// Start the drain worker over a caller-supplied sink.
    ///
    /// Used by tests to exercise backpressure without a real file; normal
    /// callers use [`Transport::initialize`].
    pub fn start_with_sink(&mut self, sink: Box<dyn LineSink>) {
        self.stop_worker();
        self.failed.store(false, Ordering::Relaxed);

        let (sender, receiver) = unbounded();
        let state = Arc::clone(&self.state);
        let failed = Arc::clone(&self.failed);

        let handle = thread::spawn(move || {
            Self::drain_loop(receiver, sink, state, failed);
        });

        self.sender = Some(sender);
        self.worker = Some(handle);
    }

    /// The single drain loop: one runs per transport at a time.
    fn drain_loop(
        receiver: Receiver<String>,
        mut sink: Box<dyn LineSink>,
        state: Arc<Mutex<DrainState>>,
        failed: Arc<AtomicBool>,
    ) {
        // recv() fails only once the channel is closed and empty, so every
        // queued entry is written before the final flush
        while let Ok(line) = receiver.recv() {
            *state.lock() = DrainState::Draining;

            match sink.write_line(&line) {
                Ok(SinkStatus::Ready) => {}
                Ok(SinkStatus::Pressured) => {
                    *state.lock() = DrainState::WaitingForDrain;
                    if let Err(e) = sink.await_drain() {
                        eprintln!("[LOGGER ERROR] File transport drain failed: {}", e);
                        failed.store(true, Ordering::Relaxed);
                        *state.lock() = DrainState::Idle;
                        return;
                    }
                    *state.lock() = DrainState::Draining;
                }
                Err(e) => {
                    eprintln!("[LOGGER ERROR] File transport write failed: {}", e);
                    failed.store(true, Ordering::Relaxed);
                    *state.lock() = DrainState::Idle;
                    return;
                }
            }

            if receiver.is_empty() {
                *state.lock() = DrainState::Idle;
            }
        }

        if let Err(e) = sink.flush() {
            eprintln!("[LOGGER ERROR] File transport flush failed: {}", e);
            failed.store(true, Ordering::Relaxed);
        }
        *state.lock() = DrainState::Idle;
    }

    fn stop_worker(&mut self) {
        drop(self.sender.take());
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                eprintln!("[LOGGER ERROR] File transport worker panicked");
            }
        }
    }
}

impl Transport for FileTransport {
    fn name(&self) -> &str {
        "file"
    }

    /// Ensure the target directory exists, open the append stream and start
    /// the drain worker. On failure the transport stays unusable until
    /// re-initialized; the error is reported, never thrown past the logger.
    fn initialize(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        parent.display().to_string(),
                        e,
                    )
                })?;
            }
        }

        let sink = FileSink::open(&self.path).map_err(|e| {
            LoggerError::io_operation("opening log file", self.path.display().to_string(), e)
        })?;

        self.start_with_sink(Box::new(sink));
        Ok(())
    }

    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        if self.is_failed() {
            return Err(LoggerError::transport(
                "file",
                "worker halted after write failure; re-initialize to recover",
            ));
        }

        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| LoggerError::not_initialized("file"))?;

        let line = self.formatter.format(entry, &self.redactor);
        sender
            .send(line)
            .map_err(|_| LoggerError::ChannelSendError)?;
        Ok(())
    }

    /// Drain every queued entry, flush and close the stream. Guarantees no
    /// loss on an orderly shutdown; abrupt process termination may still
    /// lose queued entries.
    fn cleanup(&mut self) -> Result<()> {
        self.stop_worker();
        if self.is_failed() {
            return Err(LoggerError::transport(
                "file",
                "write failure during shutdown flush",
            ));
        }
        Ok(())
    }
}

impl Drop for FileTransport {
    fn drop(&mut self) {
        self.stop_worker();
    }
}
