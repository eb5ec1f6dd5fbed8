//! Integration tests for castlink-device
//!
//! A scripted transport stands in for a device, so the full connection
//! lifecycle (connect, heartbeat, availability, close) runs without a
//! network or TLS peer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use castlink_device::canned::{APP_AVAILABLE_FRAME, APP_UNAVAILABLE_FRAME, PONG_FRAME};
use castlink_device::{
    CastConnection, Envelope, FrameDecoder, Namespace, Payload, ScriptedTransport, SessionConfig,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_config() -> SessionConfig {
    SessionConfig::default().with_message_timeout(Duration::from_millis(50))
}

fn connect_scripted(
    frames: &[&[u8]],
) -> (CastConnection, Arc<Mutex<Vec<Vec<u8>>>>) {
    let mut transport = ScriptedTransport::new();
    for frame in frames {
        transport.push_inbound(frame);
    }
    let sent = transport.sent_log();
    let connection = CastConnection::with_transport(Box::new(transport), test_config()).unwrap();
    (connection, sent)
}

fn decode_sent(sent: &Arc<Mutex<Vec<Vec<u8>>>>) -> Vec<Envelope> {
    let mut decoder = FrameDecoder::new();
    for frame in sent.lock().unwrap().iter() {
        decoder.extend_from_slice(frame);
    }
    let mut envelopes = Vec::new();
    while let Some(envelope) = decoder.next_frame().unwrap() {
        envelopes.push(envelope);
    }
    envelopes
}

fn payload_json(envelope: &Envelope) -> serde_json::Value {
    match &envelope.payload {
        Payload::Text(text) => serde_json::from_str(text).unwrap(),
        Payload::Binary(_) => panic!("expected a text payload"),
    }
}

#[test]
fn test_connect_issues_connect_message() {
    init_logging();
    let (_connection, sent) = connect_scripted(&[]);

    let envelopes = decode_sent(&sent);
    assert_eq!(envelopes.len(), 1);
    let connect = &envelopes[0];
    assert_eq!(connect.source_id, "sender-0");
    assert_eq!(connect.destination_id, "receiver-0");
    assert_eq!(connect.namespace, Namespace::Connection);
    assert_eq!(payload_json(connect), serde_json::json!({"type": "CONNECT"}));
}

#[test]
fn test_ping_pong_exchange() {
    init_logging();
    let (mut connection, sent) = connect_scripted(&[PONG_FRAME]);

    assert!(connection.ping().unwrap());

    let envelopes = decode_sent(&sent);
    assert_eq!(envelopes.len(), 2);
    let ping = &envelopes[1];
    assert_eq!(ping.namespace, Namespace::Heartbeat);
    assert_eq!(payload_json(ping), serde_json::json!({"type": "PING"}));
}

#[test]
fn test_ping_without_response_fails() {
    init_logging();
    let (mut connection, _sent) = connect_scripted(&[]);
    assert!(!connection.ping().unwrap());
}

#[test]
fn test_app_available() {
    init_logging();
    let (mut connection, sent) = connect_scripted(&[APP_AVAILABLE_FRAME]);

    assert!(connection.app_available().unwrap());

    let envelopes = decode_sent(&sent);
    let request = payload_json(&envelopes[1]);
    assert_eq!(
        request,
        serde_json::json!({
            "type": "GET_APP_AVAILABILITY",
            "appId": ["02834648"],
            "requestId": 1,
        })
    );
}

#[test]
fn test_app_unavailable() {
    init_logging();
    let (mut connection, _sent) = connect_scripted(&[APP_UNAVAILABLE_FRAME]);
    assert!(!connection.app_available().unwrap());
}

#[test]
fn test_request_ids_strictly_increase() {
    init_logging();
    // Only the first request gets an answer; the second runs into its
    // timeout because the capture answers requestId 1.
    let (mut connection, sent) = connect_scripted(&[APP_AVAILABLE_FRAME]);

    assert!(connection.app_available().unwrap());
    assert!(!connection.app_available().unwrap());

    let envelopes = decode_sent(&sent);
    assert_eq!(envelopes.len(), 3);
    let first = payload_json(&envelopes[1]);
    let second = payload_json(&envelopes[2]);
    assert_eq!(first["requestId"], 1);
    assert_eq!(second["requestId"], 2);
}

#[test]
fn test_close_sends_close_message() {
    init_logging();
    let (connection, sent) = connect_scripted(&[]);

    assert!(connection.close());

    let envelopes = decode_sent(&sent);
    assert_eq!(envelopes.len(), 2);
    let close = &envelopes[1];
    assert_eq!(close.namespace, Namespace::Connection);
    assert_eq!(payload_json(close), serde_json::json!({"type": "CLOSE"}));
}

#[test]
fn test_heartbeat_ignores_unrelated_traffic() {
    init_logging();
    // An availability response arriving first must not satisfy the ping.
    let (mut connection, _sent) = connect_scripted(&[APP_AVAILABLE_FRAME, PONG_FRAME]);
    assert!(connection.ping().unwrap());
}
