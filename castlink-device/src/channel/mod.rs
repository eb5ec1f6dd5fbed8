//! Send/receive loop with filtered dispatch.
//!
//! [`Channel::receive`] reads frames off the transport until one passes
//! the caller's [`ResponseFilter`] and its matcher accepts it, or the
//! wall-clock budget runs out. Frames that fail the filter are skipped
//! silently; malformed frames and unparsable JSON are dropped with a
//! warning and the loop keeps reading.


use std::time::Instant;

use shared::error::Result;
use shared::util::hex_dump;

use crate::config::{SessionConfig, READ_CHUNK_SIZE};
use crate::frame::{Envelope, FrameDecoder, Payload, DEFAULT_RECEIVER_ID, DEFAULT_SENDER_ID};
use crate::namespace::Namespace;
use crate::transport::Transport;

/// What a matcher decided about one delivered payload.
pub enum MatchOutcome<T> {
    /// Not the awaited response; keep reading.
    Skip,
    /// Recognizably the awaited response but invalid; stop without a
    /// result. The failure is absorbed, not propagated.
    Reject,
    /// The awaited response; stop and hand the value to the caller.
    Accept(T),
}

/// Borrowed view of a matched frame's payload.
pub enum InboundPayload<'a> {
    /// Parsed JSON of a text payload.
    Json(&'a serde_json::Value),
    /// Raw bytes of a binary payload.
    Binary(&'a [u8]),
}

/// Tri-valued response filters; `None` accepts either way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResponseFilter {
    /// Expect the destination to be (not be) a session sender.
    pub for_sender_session: Option<bool>,
    /// Expect the source to be (not be) a portal receiver.
    pub from_portal_receiver: Option<bool>,
    /// Exact namespace, or any.
    pub namespace: Option<Namespace>,
    /// Expect a JSON (text) payload, or a binary one, or either.
    pub expect_json: Option<bool>,
    /// For JSON responses: require `requestId` to equal this value.
    /// Ignored when zero.
    pub request_id: Option<u32>,
}

impl ResponseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_sender_session(mut self, want: bool) -> Self {
        self.for_sender_session = Some(want);
        self
    }

    pub fn from_portal_receiver(mut self, want: bool) -> Self {
        self.from_portal_receiver = Some(want);
        self
    }

    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn expect_json(mut self, want: bool) -> Self {
        self.expect_json = Some(want);
        self
    }

    pub fn request_id(mut self, request_id: u32) -> Self {
        self.request_id = Some(request_id);
        self
    }

    fn matches(&self, envelope: &Envelope) -> bool {
        if let Some(want) = self.for_sender_session {
            if envelope.is_for_sender_session() != want {
                return false;
            }
        }
        if let Some(want) = self.from_portal_receiver {
            if envelope.is_from_portal_receiver() != want {
                return false;
            }
        }
        if let Some(namespace) = self.namespace {
            if envelope.namespace != namespace {
                return false;
            }
        }
        if let Some(want_json) = self.expect_json {
            if envelope.payload.is_text() != want_json {
                return false;
            }
        }
        true
    }
}

/// The framed message channel over one transport.
pub struct Channel {
    transport: Box<dyn Transport>,
    decoder: FrameDecoder,
    config: SessionConfig,
}

impl Channel {
    pub fn new(transport: Box<dyn Transport>, config: SessionConfig) -> Self {
        Self {
            transport,
            decoder: FrameDecoder::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Encode and write one message.
    ///
    /// `from_sender_session` and `to_portal_receiver` select between the
    /// global endpoint ids and the configured session ids.
    pub fn send(
        &mut self,
        from_sender_session: bool,
        to_portal_receiver: bool,
        namespace: Namespace,
        payload: Payload,
    ) -> Result<()> {
        let source_id = if from_sender_session {
            self.config.session_sender_id.clone()
        } else {
            DEFAULT_SENDER_ID.to_owned()
        };
        let destination_id = if to_portal_receiver {
            self.config.session_receiver_id.clone()
        } else {
            DEFAULT_RECEIVER_ID.to_owned()
        };

        let envelope = Envelope {
            source_id,
            destination_id,
            namespace,
            payload,
        };
        let frame = envelope.encode();
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("outbound frame:\n{}", hex_dump(&frame));
        }
        self.transport.send(&frame)
    }

    /// Read until a frame passes `filter` and `matcher` settles it, or the
    /// configured message timeout runs out.
    ///
    /// Returns `Ok(None)` when the budget expires, the matcher rejects, or
    /// the script of inbound frames never matches: "no response" is an
    /// outcome, not an error. Transport failures are fatal; the rolling
    /// buffer is flushed and only close remains safe.
    pub fn receive<T, F>(&mut self, filter: &ResponseFilter, mut matcher: F) -> Result<Option<T>>
    where
        F: FnMut(&InboundPayload<'_>) -> MatchOutcome<T>,
    {
        let deadline = Instant::now() + self.config.message_timeout;
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            // Drain every complete frame already buffered.
            loop {
                match self.decoder.next_frame() {
                    Ok(Some(envelope)) => {
                        match Self::settle(filter, &mut matcher, &envelope) {
                            Settled::KeepReading => continue,
                            Settled::NoMatch => return Ok(None),
                            Settled::Matched(value) => return Ok(Some(value)),
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        log::warn!("discarding invalid frame: {err}");
                        continue;
                    }
                }
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                log::debug!("receive window exhausted without a match");
                return Ok(None);
            }
            match self.transport.recv(&mut chunk, remaining) {
                Ok(0) => continue,
                Ok(n) => self.decoder.extend_from_slice(&chunk[..n]),
                Err(err) => {
                    self.decoder.clear();
                    return Err(err);
                }
            }
        }
    }

    fn settle<T, F>(filter: &ResponseFilter, matcher: &mut F, envelope: &Envelope) -> Settled<T>
    where
        F: FnMut(&InboundPayload<'_>) -> MatchOutcome<T>,
    {
        if !filter.matches(envelope) {
            return Settled::KeepReading;
        }

        let outcome = match &envelope.payload {
            Payload::Text(text) => {
                let value: serde_json::Value = match serde_json::from_str(text) {
                    Ok(value) => value,
                    Err(err) => {
                        log::warn!("dropping frame with invalid JSON payload: {err}");
                        return Settled::KeepReading;
                    }
                };
                if let Some(want) = filter.request_id {
                    if want > 0
                        && value.get("requestId").and_then(serde_json::Value::as_u64)
                            != Some(u64::from(want))
                    {
                        return Settled::KeepReading;
                    }
                }
                matcher(&InboundPayload::Json(&value))
            }
            Payload::Binary(data) => matcher(&InboundPayload::Binary(data)),
        };

        match outcome {
            MatchOutcome::Skip => Settled::KeepReading,
            MatchOutcome::Reject => {
                log::warn!("matched response failed validation");
                Settled::NoMatch
            }
            MatchOutcome::Accept(value) => Settled::Matched(value),
        }
    }
}

enum Settled<T> {
    KeepReading,
    NoMatch,
    Matched(T),
}
