//! Capture session orchestration.
//!
//! [`CaptureSession`] drives a [`Transport`] through the acquisition
//! lifecycle and decodes the accumulated buffer in one shot at the end:
//!
//! ```text
//! Idle ──open──► Handshaking ──trigger──► Streaming ──marker/timeout──► Terminated
//! ```
//!
//! The loop is single-threaded cooperative polling. The only suspension
//! points are the settle delay after opening the port and a short backoff
//! sleep when the link has nothing buffered; both go through the injected
//! [`Clock`] so tests run without real delays.
//!
//! Nothing in a session aborts the process: an unopenable port, a transport
//! lost mid-stream, and a timeout all produce a well-formed
//! [`CaptureResult`] whose reason says what happened, with whatever bytes
//! were collected decoded normally.

use bytes::BytesMut;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::CaptureConfig;
use crate::protocol::{decode, ends_with_marker, ADC_MAX, END_MARKER, TRIGGER_BYTE};
use crate::transport::{SerialTransport, Transport};

/// Lifecycle state of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created; transport not yet acquired.
    Idle,
    /// Transport open; settling, flushing stale input, sending the trigger.
    Handshaking,
    /// Accumulating bytes until the end marker or the time budget runs out.
    Streaming,
    /// Transport released and buffer decoded.
    Terminated,
}

/// Why the streaming phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The remote side appended the end-of-stream marker.
    Marker,
    /// The global time budget (nominal duration × 1.5) ran out.
    Timeout,
    /// The transport could not be opened, or failed mid-session.
    TransportFailed,
}

/// Outcome of a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    /// Decoded samples, in order of arrival.
    pub samples: Vec<u16>,
    /// Why streaming stopped.
    pub reason: TerminationReason,
    /// Raw bytes received, end marker excluded.
    pub bytes_received: usize,
}

impl CaptureResult {
    fn empty(reason: TerminationReason) -> Self {
        Self {
            samples: Vec::new(),
            reason,
            bytes_received: 0,
        }
    }

    /// Number of decoded samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the capture produced no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Orchestrates one capture: handshake, polling loop, decode.
///
/// # Example
///
/// ```no_run
/// use safewire::{CaptureConfig, CaptureSession};
///
/// let mut session = CaptureSession::new(CaptureConfig::new("/dev/ttyUSB0"));
/// let result = session.capture();
/// println!("{} samples ({:?})", result.len(), result.reason);
/// ```
pub struct CaptureSession<C: Clock = SystemClock> {
    config: CaptureConfig,
    clock: C,
    state: SessionState,
}

impl CaptureSession<SystemClock> {
    /// Create a session using the wall clock.
    pub fn new(config: CaptureConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CaptureSession<C> {
    /// Create a session with an injected clock.
    pub fn with_clock(config: CaptureConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The configuration this session runs with.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Run a capture against the configured serial port.
    ///
    /// A port that cannot be opened is reported and yields an empty result
    /// with reason [`TerminationReason::TransportFailed`]; it is never fatal.
    pub fn capture(&mut self) -> CaptureResult {
        match SerialTransport::open(&self.config) {
            Ok(transport) => self.capture_with(transport),
            Err(err) => {
                warn!(%err, "transport unavailable, yielding empty capture");
                self.set_state(SessionState::Terminated);
                CaptureResult::empty(TerminationReason::TransportFailed)
            }
        }
    }

    /// Run a capture over an already-open transport.
    ///
    /// The session takes ownership of the transport and releases it on every
    /// exit path before decoding.
    pub fn capture_with<T: Transport>(&mut self, mut transport: T) -> CaptureResult {
        self.set_state(SessionState::Handshaking);
        if let Err(err) = self.handshake(&mut transport) {
            warn!(%err, "handshake failed, yielding empty capture");
            self.set_state(SessionState::Terminated);
            return CaptureResult::empty(TerminationReason::TransportFailed);
        }

        self.set_state(SessionState::Streaming);
        let (buffer, reason) = self.stream(&mut transport);

        drop(transport);
        self.set_state(SessionState::Terminated);

        let samples = decode(&buffer);
        debug!(
            bytes = buffer.len(),
            samples = samples.len(),
            ?reason,
            "capture complete"
        );

        let over_range = samples.iter().filter(|&&s| s > ADC_MAX).count();
        if over_range > 0 {
            warn!(
                count = over_range,
                "decoded samples above 10-bit full scale; check wiring and baud rate"
            );
        }

        CaptureResult {
            samples,
            reason,
            bytes_received: buffer.len(),
        }
    }

    /// Settle, discard stale input, then fire the trigger byte.
    fn handshake<T: Transport>(&self, transport: &mut T) -> crate::Result<()> {
        debug!(settle = ?self.config.settle_delay, "settling before trigger");
        self.clock.sleep(self.config.settle_delay);
        transport.flush_input()?;
        transport.write_all(&[TRIGGER_BYTE])?;
        info!(duration = ?self.config.duration, "capture triggered");
        Ok(())
    }

    /// Poll the transport until the end marker, the time budget, or a
    /// transport failure ends the stream. Returns the accumulated buffer
    /// (marker stripped) and the reason.
    fn stream<T: Transport>(&self, transport: &mut T) -> (BytesMut, TerminationReason) {
        let mut buffer = BytesMut::new();
        let budget = self.config.max_capture_time();
        let start = self.clock.now();

        loop {
            if self.clock.now().duration_since(start) > budget {
                info!(?budget, bytes = buffer.len(), "session time budget exhausted");
                return (buffer, TerminationReason::Timeout);
            }

            let available = match transport.bytes_available() {
                Ok(n) => n,
                Err(err) => {
                    warn!(%err, bytes = buffer.len(), "transport lost while polling");
                    return (buffer, TerminationReason::TransportFailed);
                }
            };

            if available == 0 {
                self.clock.sleep(self.config.poll_backoff);
                continue;
            }

            let chunk = match transport.read(available) {
                Ok(chunk) => chunk,
                Err(err) => {
                    warn!(%err, bytes = buffer.len(), "transport lost while reading");
                    return (buffer, TerminationReason::TransportFailed);
                }
            };

            buffer.extend_from_slice(&chunk);

            if ends_with_marker(&buffer) {
                buffer.truncate(buffer.len() - END_MARKER.len());
                info!(bytes = buffer.len(), "end marker received");
                return (buffer, TerminationReason::Marker);
            }
        }
    }

    fn set_state(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }
}
