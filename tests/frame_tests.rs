//! Tests for wire framing
//!
//! Outbound counter encoding and inbound report decoding, including the
//! explicit little-endian protocol layout.

use nodelink_firmware::frame::{
    decode_report, encode_counter, FrameError, COUNTER_FRAME_LEN, REPORT_FRAME_LEN,
};
use nodelink_firmware::types::SessionCounter;

// ============================================================================
// Counter Encoding Tests
// ============================================================================

#[test]
fn test_encode_counter_is_two_bytes() {
    let frame = encode_counter(SessionCounter::new());
    assert_eq!(frame.len(), COUNTER_FRAME_LEN);
}

#[test]
fn test_encode_counter_little_endian() {
    let frame = encode_counter(SessionCounter::from_value(42).unwrap());
    assert_eq!(frame, [0x2A, 0x00]);
}

#[test]
fn test_encode_counter_ceiling() {
    // 500 = 0x01F4, low byte first
    let frame = encode_counter(SessionCounter::from_value(500).unwrap());
    assert_eq!(frame, [0xF4, 0x01]);
}

#[test]
fn test_encode_counter_zero_before_first_success() {
    let frame = encode_counter(SessionCounter::new());
    assert_eq!(frame, [0x00, 0x00]);
}

// ============================================================================
// Report Decoding Tests
// ============================================================================

#[test]
fn test_decode_report_little_endian_pairs() {
    let report = decode_report(&[0x01, 0x00, 0x07, 0x00]).unwrap();
    assert_eq!(report.node_id, 1);
    assert_eq!(report.echoed_count, 7);
}

#[test]
fn test_decode_report_multibyte_values() {
    // node 258 = 0x0102, count 500 = 0x01F4
    let report = decode_report(&[0x02, 0x01, 0xF4, 0x01]).unwrap();
    assert_eq!(report.node_id, 258);
    assert_eq!(report.echoed_count, 500);
}

#[test]
fn test_decode_report_rejects_short_payload() {
    let err = decode_report(&[0x01, 0x00]).unwrap_err();
    assert_eq!(
        err,
        FrameError::Length {
            expected: REPORT_FRAME_LEN,
            actual: 2
        }
    );
}

#[test]
fn test_decode_report_rejects_empty_payload() {
    assert!(decode_report(&[]).is_err());
}

#[test]
fn test_decode_report_rejects_long_payload() {
    let payload = [0u8; 32];
    let err = decode_report(&payload).unwrap_err();
    assert_eq!(
        err,
        FrameError::Length {
            expected: REPORT_FRAME_LEN,
            actual: 32
        }
    );
}

#[test]
fn test_frame_error_display() {
    let err = FrameError::Length {
        expected: 4,
        actual: 6,
    };
    assert_eq!(err.to_string(), "payload length 6, expected 4");
}
