//! Protocol module - Safe Protocol wire format and decoding.
//!
//! This module implements the byte-pair framing of the acquisition stream:
//! - bit-exact framing constants and the two-byte sample codec
//! - the resynchronizing decoder that turns a capture buffer into samples

mod decoder;
mod wire_format;

pub use decoder::decode;
pub use wire_format::{
    decode_pair, encode_sample, ends_with_marker, is_data, is_header, ADC_MAX, END_MARKER,
    PAYLOAD_MASK, SAMPLE_MAX, SYNC_FLAG, TRIGGER_BYTE,
};
