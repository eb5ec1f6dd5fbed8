use super::*;
use crate::canned::PONG_FRAME;

fn pong_envelope() -> Envelope {
    Envelope {
        source_id: DEFAULT_RECEIVER_ID.to_owned(),
        destination_id: DEFAULT_SENDER_ID.to_owned(),
        namespace: Namespace::Heartbeat,
        payload: Payload::Text("{\"type\":\"PONG\"}".to_owned()),
    }
}

#[test]
fn test_encode_matches_capture() {
    // The captured PONG frame uses the same field order this encoder
    // emits, so encoding the logical message reproduces it byte for byte.
    assert_eq!(pong_envelope().encode(), PONG_FRAME);
}

#[test]
fn test_roundtrip_text() {
    let envelope = Envelope {
        source_id: "sender-1".to_owned(),
        destination_id: DEFAULT_RECEIVER_ID.to_owned(),
        namespace: Namespace::Receiver,
        payload: Payload::Text("{\"type\":\"GET_STATUS\",\"requestId\":7}".to_owned()),
    };
    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&envelope.encode());
    let decoded = decoder.next_frame().unwrap().unwrap();
    assert_eq!(decoded, envelope);
    assert!(decoder.is_empty());
}

#[test]
fn test_roundtrip_binary() {
    let envelope = Envelope {
        source_id: DEFAULT_SENDER_ID.to_owned(),
        destination_id: DEFAULT_RECEIVER_ID.to_owned(),
        namespace: Namespace::DeviceAuth,
        payload: Payload::Binary(vec![0x08, 0x01, 0xFF, 0x00]),
    };
    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&envelope.encode());
    assert_eq!(decoder.next_frame().unwrap().unwrap(), envelope);
}

#[test]
fn test_decode_pong_capture() {
    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(PONG_FRAME);
    let envelope = decoder.next_frame().unwrap().unwrap();
    assert_eq!(envelope, pong_envelope());
    assert!(!envelope.is_from_portal_receiver());
    assert!(!envelope.is_for_sender_session());
}

#[test]
fn test_session_id_classification() {
    let mut envelope = pong_envelope();
    envelope.source_id = "web-7".to_owned();
    envelope.destination_id = "sender-app".to_owned();
    assert!(envelope.is_from_portal_receiver());
    assert!(envelope.is_for_sender_session());
}

#[test]
fn test_incomplete_frame_does_not_advance() {
    let mut decoder = FrameDecoder::new();

    // Less than a length prefix.
    decoder.extend_from_slice(&PONG_FRAME[..3]);
    assert!(decoder.next_frame().unwrap().is_none());
    assert_eq!(decoder.buffered_len(), 3);

    // Prefix present but the body short by one byte.
    decoder.extend_from_slice(&PONG_FRAME[3..PONG_FRAME.len() - 1]);
    assert!(decoder.next_frame().unwrap().is_none());
    assert_eq!(decoder.buffered_len(), PONG_FRAME.len() - 1);

    // The last byte completes it.
    decoder.extend_from_slice(&PONG_FRAME[PONG_FRAME.len() - 1..]);
    assert!(decoder.next_frame().unwrap().is_some());
    assert!(decoder.is_empty());
}

#[test]
fn test_two_frames_in_one_chunk() {
    let mut decoder = FrameDecoder::new();
    let mut chunk = PONG_FRAME.to_vec();
    chunk.extend_from_slice(PONG_FRAME);
    decoder.extend_from_slice(&chunk);
    assert!(decoder.next_frame().unwrap().is_some());
    assert!(decoder.next_frame().unwrap().is_some());
    assert!(decoder.next_frame().unwrap().is_none());
}

// Wrap a raw protobuf body in a length prefix.
fn frame_of(body: &[u8]) -> Vec<u8> {
    let mut framed = (body.len() as u32).to_be_bytes().to_vec();
    framed.extend_from_slice(body);
    framed
}

#[test]
fn test_malformed_frame_is_dropped_and_decoding_resumes() {
    let mut decoder = FrameDecoder::new();
    // Field 9 does not exist in the envelope.
    decoder.extend_from_slice(&frame_of(&[0x48, 0x00]));
    decoder.extend_from_slice(PONG_FRAME);

    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFrameMalformed
    );
    assert_eq!(decoder.next_frame().unwrap().unwrap(), pong_envelope());
}

#[test]
fn test_group_wire_types_rejected() {
    let mut decoder = FrameDecoder::new();
    // Field 1 with wire type 3 (start group).
    decoder.extend_from_slice(&frame_of(&[0x0B]));
    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFrameMalformed
    );
}

#[test]
fn test_wrong_version_rejected() {
    let mut body = pong_envelope().encode()[4..].to_vec();
    assert_eq!(body[0], 0x08);
    body[1] = 0x01; // protocol_version = 1
    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&frame_of(&body));
    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFrameVersion
    );
}

#[test]
fn test_unknown_namespace_rejected() {
    let mut encoded = pong_envelope().encode();
    // Corrupt one byte of the namespace URN.
    let pos = encoded
        .windows(9)
        .position(|w| w == b"heartbeat")
        .unwrap();
    encoded[pos] = b'x';
    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&encoded);
    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFrameNamespace
    );
}

#[test]
fn test_payload_tag_type_mismatch_rejected() {
    // payload_type says binary but the payload arrives on the text tag.
    let mut body = Vec::new();
    body.extend_from_slice(&[0x08, 0x00]); // version 0
    body.extend_from_slice(&[0x12, 0x0A]);
    body.extend_from_slice(b"receiver-0");
    body.extend_from_slice(&[0x1A, 0x08]);
    body.extend_from_slice(b"sender-0");
    let ns = Namespace::Heartbeat.uri().as_bytes();
    body.extend_from_slice(&[0x22, ns.len() as u8]);
    body.extend_from_slice(ns);
    body.extend_from_slice(&[0x28, 0x01]); // payload_type BINARY
    body.extend_from_slice(&[0x32, 0x02, b'{', b'}']); // field 6

    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&frame_of(&body));
    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFramePayloadMismatch
    );
}

#[test]
fn test_missing_payload_rejected() {
    let mut body = Vec::new();
    body.extend_from_slice(&[0x08, 0x00]);
    body.extend_from_slice(&[0x12, 0x0A]);
    body.extend_from_slice(b"receiver-0");
    body.extend_from_slice(&[0x1A, 0x08]);
    body.extend_from_slice(b"sender-0");
    let ns = Namespace::Heartbeat.uri().as_bytes();
    body.extend_from_slice(&[0x22, ns.len() as u8]);
    body.extend_from_slice(ns);
    body.extend_from_slice(&[0x28, 0x00]);

    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&frame_of(&body));
    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFrameMissingField
    );
}

#[test]
fn test_field_crossing_frame_boundary_rejected() {
    // A length-delimited field claiming more bytes than the frame holds.
    let mut decoder = FrameDecoder::new();
    decoder.extend_from_slice(&frame_of(&[0x12, 0x7F, b'x']));
    assert_eq!(
        decoder.next_frame().unwrap_err(),
        shared::error::Error::ErrFrameMalformed
    );
    assert!(decoder.is_empty());
}
