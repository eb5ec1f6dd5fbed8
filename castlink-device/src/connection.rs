//! Typed protocol exchanges on a device connection.

use serde_json::json;
use shared::error::Result;

use crate::channel::{Channel, InboundPayload, MatchOutcome, ResponseFilter};
use crate::config::SessionConfig;
use crate::frame::Payload;
use crate::namespace::Namespace;
use crate::transport::{TlsTransport, Transport};

/// A live message channel to one Cast device.
///
/// Owns the transport, the rolling read buffer and the request counter.
/// All exchanges issue from `sender-0` to `receiver-0`. The handle is
/// single-threaded; run one connection per thread of control.
pub struct CastConnection {
    channel: Channel,
    request_id: u32,
}

impl CastConnection {
    /// Connect to a device, usually at an address produced by discovery,
    /// and issue the initial `CONNECT` exchange.
    pub fn connect(host: &str, port: u16, config: SessionConfig) -> Result<Self> {
        let transport = TlsTransport::connect(host, port)?;
        Self::with_transport(Box::new(transport), config)
    }

    /// Build a connection over an already-established transport.
    ///
    /// This is the injection point for scripted transports; the `CONNECT`
    /// message is issued here either way.
    pub fn with_transport(transport: Box<dyn Transport>, config: SessionConfig) -> Result<Self> {
        let mut connection = Self {
            channel: Channel::new(transport, config),
            request_id: 0,
        };
        connection.channel.send(
            false,
            false,
            Namespace::Connection,
            Payload::Text(json!({"type": "CONNECT"}).to_string()),
        )?;
        // The device does not answer the connect message.
        Ok(connection)
    }

    /// Exchange a heartbeat: send `PING`, await a `PONG`.
    pub fn ping(&mut self) -> Result<bool> {
        self.channel.send(
            false,
            false,
            Namespace::Heartbeat,
            Payload::Text(json!({"type": "PING"}).to_string()),
        )?;

        let filter = ResponseFilter::new()
            .for_sender_session(false)
            .from_portal_receiver(false)
            .namespace(Namespace::Heartbeat)
            .expect_json(true);
        let answered = self.channel.receive(&filter, |payload| {
            let InboundPayload::Json(value) = payload else {
                return MatchOutcome::Skip;
            };
            match value.get("type").and_then(serde_json::Value::as_str) {
                Some("PONG") => MatchOutcome::Accept(()),
                Some(_) => MatchOutcome::Skip,
                None => MatchOutcome::Reject,
            }
        })?;

        if answered.is_none() {
            log::warn!("no PONG response to PING");
        }
        Ok(answered.is_some())
    }

    /// Ask the device whether the configured application is available.
    ///
    /// The response is matched by request id; an `APP_UNAVAILABLE` verdict
    /// yields `false` with a warning, as does no verdict at all.
    pub fn app_available(&mut self) -> Result<bool> {
        let request_id = self.next_request_id();
        let app_id = self.channel.config().application_id.clone();
        self.channel.send(
            false,
            false,
            Namespace::Receiver,
            Payload::Text(
                json!({
                    "type": "GET_APP_AVAILABILITY",
                    "appId": [app_id],
                    "requestId": request_id,
                })
                .to_string(),
            ),
        )?;

        let filter = ResponseFilter::new()
            .for_sender_session(false)
            .from_portal_receiver(false)
            .namespace(Namespace::Receiver)
            .expect_json(true)
            .request_id(request_id);
        let app_id = self.channel.config().application_id.clone();
        let verdict = self.channel.receive(&filter, |payload| {
            let InboundPayload::Json(value) = payload else {
                return MatchOutcome::Skip;
            };
            match value.get("responseType").and_then(serde_json::Value::as_str) {
                Some("GET_APP_AVAILABILITY") => {}
                _ => {
                    log::warn!("response matched request id but not the request type");
                    return MatchOutcome::Reject;
                }
            }
            let status = value
                .get("availability")
                .and_then(|availability| availability.get(app_id.as_str()))
                .and_then(serde_json::Value::as_str);
            match status {
                Some("APP_AVAILABLE") => MatchOutcome::Accept(true),
                Some("APP_UNAVAILABLE") => MatchOutcome::Accept(false),
                Some(other) => {
                    log::warn!("invalid application availability status: {other}");
                    MatchOutcome::Reject
                }
                None => {
                    log::warn!("missing availability record for application {app_id}");
                    MatchOutcome::Reject
                }
            }
        })?;

        match verdict {
            Some(true) => Ok(true),
            Some(false) => {
                log::warn!("application {app_id} is not available on the device");
                Ok(false)
            }
            None => {
                log::warn!("unable to obtain an availability response");
                Ok(false)
            }
        }
    }

    /// Tear the connection down, sending a best-effort `CLOSE` first.
    ///
    /// Consumes the handle; socket and TLS resources are released when it
    /// drops. Returns whether the close message went out.
    pub fn close(mut self) -> bool {
        let sent = self
            .channel
            .send(
                false,
                false,
                Namespace::Connection,
                Payload::Text(json!({"type": "CLOSE"}).to_string()),
            )
            .is_ok();
        if !sent {
            log::debug!("CLOSE message was not delivered during teardown");
        }
        sent
    }

    // Assigned immediately before each request goes out; strictly
    // increasing for the lifetime of the connection.
    fn next_request_id(&mut self) -> u32 {
        self.request_id += 1;
        self.request_id
    }
}
