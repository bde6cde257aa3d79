//! Integration tests for safewire.
//!
//! These drive full capture sessions through the public API, over scripted
//! transports and a manual clock - no hardware, no real time.

use std::time::Duration;

use safewire::clock::ManualClock;
use safewire::protocol::{decode, encode_sample, END_MARKER, SAMPLE_MAX, TRIGGER_BYTE};
use safewire::transport::ScriptedTransport;
use safewire::{CaptureConfig, CaptureSession, SessionState, TerminationReason};

fn test_config() -> CaptureConfig {
    CaptureConfig::new("scripted")
        .with_duration(Duration::from_secs(10))
        .with_settle_delay(Duration::ZERO)
        .with_poll_backoff(Duration::from_millis(2))
}

/// Encode a sample sequence as a contiguous Safe Protocol byte stream.
fn stream_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|&v| encode_sample(v)).collect()
}

#[test]
fn full_capture_round_trip() {
    let first = [0u16, 1, 130, 512, 1023];
    let second = [77u16, 88, 99];

    let mut tail = stream_bytes(&second);
    tail.extend_from_slice(&END_MARKER);
    let link = ScriptedTransport::new([stream_bytes(&first), tail]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    let mut expected: Vec<u16> = first.to_vec();
    expected.extend_from_slice(&second);

    assert_eq!(result.reason, TerminationReason::Marker);
    assert_eq!(result.samples, expected);
    assert_eq!(result.bytes_received, expected.len() * 2);
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn marker_immediately_after_trigger() {
    let link = ScriptedTransport::new([END_MARKER.to_vec()]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(result.reason, TerminationReason::Marker);
    assert!(result.is_empty());
    assert_eq!(result.bytes_received, 0);
}

#[test]
fn marker_split_across_bursts() {
    let link = ScriptedTransport::new([stream_bytes(&[321]), vec![0xFF], vec![0xFF]]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(result.reason, TerminationReason::Marker);
    assert_eq!(result.samples, vec![321]);
}

#[test]
fn stray_bytes_between_bursts_resync() {
    let mut middle = vec![0x05]; // line noise, sync flag clear
    middle.extend_from_slice(&stream_bytes(&[600]));
    middle.push(0xD5); // line noise, sync flag set

    let mut tail = stream_bytes(&[601, 602]);
    tail.extend_from_slice(&END_MARKER);

    let link = ScriptedTransport::new([stream_bytes(&[599]), middle, tail]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(result.reason, TerminationReason::Marker);
    assert_eq!(result.samples, vec![599, 600, 601, 602]);
}

#[test]
fn endless_stream_times_out_within_tolerance() {
    let config = test_config();
    let budget = config.max_capture_time();

    let link = ScriptedTransport::endless(stream_bytes(&[512]));
    let clock = ManualClock::with_tick(config.poll_backoff);

    let mut session = CaptureSession::with_clock(config.clone(), clock.clone());
    let result = session.capture_with(link);

    assert_eq!(result.reason, TerminationReason::Timeout);
    // Bytes collected up to the timeout are still decoded.
    assert!(!result.is_empty());
    assert!(result.samples.iter().all(|&s| s == 512));
    // The session stopped at the budget, give or take a poll interval.
    assert!(clock.elapsed() >= budget);
    assert!(clock.elapsed() <= budget + 2 * config.poll_backoff);
}

#[test]
fn silent_link_times_out_with_empty_result() {
    let link = ScriptedTransport::new([]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(result.reason, TerminationReason::Timeout);
    assert!(result.is_empty());
    assert_eq!(result.bytes_received, 0);
}

#[test]
fn unopenable_port_yields_empty_result() {
    let config = CaptureConfig::new("/definitely/not/a/serial/port");
    let mut session = CaptureSession::new(config);

    let result = session.capture();

    assert_eq!(result.reason, TerminationReason::TransportFailed);
    assert!(result.is_empty());
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn handshake_order_is_settle_flush_trigger() {
    // Stale bytes buffered before the session must be flushed, not decoded.
    let mut data = stream_bytes(&[42]);
    data.extend_from_slice(&END_MARKER);
    let observer = ScriptedTransport::new([data]).with_stale(vec![0x81, 0x01, 0x82, 0x02]);
    let link = observer.clone();

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(observer.flushes(), 1);
    assert_eq!(observer.written(), vec![TRIGGER_BYTE]);
    assert_eq!(result.samples, vec![42]);
}

#[test]
fn out_of_range_samples_pass_through_the_whole_stack() {
    // 14-bit protocol values above the 10-bit physical range are neither
    // clamped nor rejected anywhere between the wire and the result.
    let values = [1024u16, 2048, SAMPLE_MAX];
    let mut data = stream_bytes(&values);
    data.extend_from_slice(&END_MARKER);
    let link = ScriptedTransport::new([data]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(result.samples, values);
}

#[test]
fn decoder_agrees_with_session_on_the_same_bytes() {
    let raw = stream_bytes(&[9, 8, 7]);

    let mut data = raw.clone();
    data.extend_from_slice(&END_MARKER);
    let link = ScriptedTransport::new([data]);

    let mut session = CaptureSession::with_clock(test_config(), ManualClock::new());
    let result = session.capture_with(link);

    assert_eq!(result.samples, decode(&raw));
}
