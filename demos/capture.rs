//! Capture demo - trigger an acquisition and print a summary.
//!
//! Streams one capture off the named serial port, then reports the decoded
//! sample count and value range. What to do with the samples (scaling,
//! persistence) is up to the consumer.
//!
//! # Usage
//!
//! ```text
//! cargo run --example capture -- /dev/ttyUSB0 [duration-secs]
//! ```

use std::time::Duration;

use safewire::{CaptureConfig, CaptureSession};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safewire=debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let port = match args.next() {
        Some(port) => port,
        None => {
            eprintln!("usage: capture <port> [duration-secs]");
            std::process::exit(2);
        }
    };

    let mut config = CaptureConfig::new(port);
    if let Some(secs) = args.next().and_then(|s| s.parse::<f64>().ok()) {
        config = config.with_duration(Duration::from_secs_f64(secs));
    }

    let mut session = CaptureSession::new(config);
    let result = session.capture();

    println!("termination: {:?}", result.reason);
    println!("bytes received: {}", result.bytes_received);
    println!("samples decoded: {}", result.len());
    if let (Some(min), Some(max)) = (
        result.samples.iter().min(),
        result.samples.iter().max(),
    ) {
        println!("value range: {min}..={max}");
    }
}
