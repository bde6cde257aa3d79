//! List the serial ports visible on this system.
//!
//! # Usage
//!
//! ```text
//! cargo run --example list_ports
//! ```

use safewire::transport::SerialTransport;

fn main() -> safewire::Result<()> {
    let ports = SerialTransport::available_ports()?;
    if ports.is_empty() {
        println!("no serial ports found");
        return Ok(());
    }

    for port in ports {
        println!("{}  ({:?})", port.port_name, port.port_type);
    }
    Ok(())
}
