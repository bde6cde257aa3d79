//! # safewire
//!
//! Capture client for the "Safe Protocol" - a 7-bit byte-pair framing used
//! to stream ADC samples off a serial link.
//!
//! ## Architecture
//!
//! - **Protocol** ([`protocol`]): two bytes per sample - header `0b1aaaaaaa`,
//!   data `0b0bbbbbbb`, value `(a << 7) | b`. Corruption is recovered in-band
//!   by dropping single bytes until a valid pair realigns.
//! - **Transport** ([`transport`]): the byte-oriented link behind a small
//!   capability trait, so sessions run identically against real hardware and
//!   scripted fakes.
//! - **Session** ([`session`]): handshake (settle, flush stale input, trigger
//!   `'S'`), polling accumulation, termination on the `0xFF 0xFF` end marker
//!   or a global time budget.
//!
//! The decoded sample sequence is handed to the caller as-is; time-axis
//! reconstruction, unit scaling, and persistence are downstream concerns.
//!
//! ## Example
//!
//! ```no_run
//! use safewire::{CaptureConfig, CaptureSession};
//!
//! let config = CaptureConfig::new("/dev/ttyUSB0");
//! let mut session = CaptureSession::new(config);
//! let result = session.capture();
//! println!("{} samples ({:?})", result.len(), result.reason);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

pub use config::CaptureConfig;
pub use error::{Result, SafewireError};
pub use session::{CaptureResult, CaptureSession, SessionState, TerminationReason};
