//! Scripted transport for deterministic tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::Transport;
use crate::error::Result;

#[derive(Debug, Default)]
struct Inner {
    /// Bytes currently visible to `bytes_available`/`read`.
    pending: Vec<u8>,
    /// Chunks not yet revealed; one becomes pending per empty poll.
    chunks: VecDeque<Vec<u8>>,
    /// Chunk replayed forever once `chunks` runs dry.
    repeat: Option<Vec<u8>>,
    /// Everything the session wrote (the trigger, in practice).
    written: Vec<u8>,
    /// Number of `flush_input` calls.
    flushes: usize,
}

/// Transport that plays back a fixed schedule of byte chunks.
///
/// Each poll of `bytes_available` reveals the next scheduled chunk, which
/// stays readable until drained - modelling a device that streams in bursts.
/// Writes and input flushes are recorded so tests can assert the handshake.
/// Clones share state, so a test can keep a handle while the session owns
/// the transport.
///
/// # Example
///
/// ```
/// use safewire::transport::{ScriptedTransport, Transport};
///
/// let mut link = ScriptedTransport::new([vec![0x81, 0x02]]);
/// assert_eq!(link.bytes_available().unwrap(), 2);
/// assert_eq!(link.read(2).unwrap(), vec![0x81, 0x02]);
/// assert_eq!(link.bytes_available().unwrap(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    inner: Rc<RefCell<Inner>>,
}

impl ScriptedTransport {
    /// Transport that serves `chunks` one per poll, then reports no data.
    pub fn new(chunks: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let inner = Inner {
            chunks: chunks.into_iter().collect(),
            ..Inner::default()
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Transport that serves `chunk` again on every poll, forever.
    ///
    /// Models a device that streams indefinitely without ever sending the
    /// end-of-stream marker.
    pub fn endless(chunk: Vec<u8>) -> Self {
        let inner = Inner {
            repeat: Some(chunk),
            ..Inner::default()
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Preload bytes as already buffered before the session starts, as stale
    /// data from before the trigger would be.
    pub fn with_stale(self, stale: Vec<u8>) -> Self {
        self.inner.borrow_mut().pending = stale;
        self
    }

    /// Bytes written by the session so far.
    pub fn written(&self) -> Vec<u8> {
        self.inner.borrow().written.clone()
    }

    /// Number of times the input buffer was flushed.
    pub fn flushes(&self) -> usize {
        self.inner.borrow().flushes
    }
}

impl Transport for ScriptedTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.borrow_mut().written.extend_from_slice(bytes);
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let mut inner = self.inner.borrow_mut();
        if inner.pending.is_empty() {
            if let Some(chunk) = inner.chunks.pop_front() {
                inner.pending = chunk;
            } else if let Some(chunk) = inner.repeat.clone() {
                inner.pending = chunk;
            }
        }
        Ok(inner.pending.len())
    }

    fn read(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut inner = self.inner.borrow_mut();
        let n = count.min(inner.pending.len());
        Ok(inner.pending.drain(..n).collect())
    }

    fn flush_input(&mut self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.pending.clear();
        inner.flushes += 1;
        Ok(())
    }
}
