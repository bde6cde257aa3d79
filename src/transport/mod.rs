//! Transport module - byte-oriented links to the acquisition hardware.
//!
//! [`Transport`] is the capability interface the capture session drives:
//! write the trigger, poll for buffered bytes, drain them, and discard stale
//! input. Closing is dropping - the session owns its transport and releases
//! it on every exit path.
//!
//! Implementations:
//! - [`SerialTransport`] - a physical serial link
//! - [`ScriptedTransport`] - deterministic chunk playback for tests

mod scripted;
mod serial;

pub use scripted::ScriptedTransport;
pub use serial::SerialTransport;

use crate::error::Result;

/// Byte-oriented link carrying the acquisition stream.
pub trait Transport {
    /// Write all of `bytes` to the link.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of received bytes currently buffered, readable without blocking.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read up to `count` buffered bytes.
    ///
    /// Callers size `count` from [`bytes_available`](Self::bytes_available),
    /// so this never waits on bytes the link has not already received.
    fn read(&mut self, count: usize) -> Result<Vec<u8>>;

    /// Discard any bytes already buffered on the receive side.
    fn flush_input(&mut self) -> Result<()>;
}
