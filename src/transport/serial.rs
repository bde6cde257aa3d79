//! Physical serial link.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort, SerialPortInfo};
use tracing::debug;

use super::Transport;
use crate::config::CaptureConfig;
use crate::error::{Result, SafewireError};

/// Read timeout on the underlying port. Polling is driven by
/// `bytes_available`, so reads only ever touch bytes the driver has already
/// reported; this bound just keeps a misbehaving driver from hanging us.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// A live serial connection to the acquisition hardware.
///
/// Opened from a [`CaptureConfig`]; the OS handle is released on drop.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open the port named by `config` at the configured baud rate.
    pub fn open(config: &CaptureConfig) -> Result<Self> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| SafewireError::TransportOpen {
                port: config.port.clone(),
                source,
            })?;
        debug!(port = %config.port, baud = config.baud_rate, "serial port open");
        Ok(Self { port })
    }

    /// List the serial ports present on this system.
    pub fn available_ports() -> Result<Vec<SerialPortInfo>> {
        Ok(serialport::available_ports()?)
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        let n = self.port.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    fn flush_input(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }
}
