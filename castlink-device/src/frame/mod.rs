//! The Cast frame codec.
//!
//! One frame on the TLS stream is a 32-bit big-endian length prefix
//! followed by a protobuf-encoded `CastMessage`:
//!
//! | field            | tag | wire type        |
//! |------------------|-----|------------------|
//! | protocol_version | 1   | varint (must be 0) |
//! | source_id        | 2   | length-delimited |
//! | destination_id   | 3   | length-delimited |
//! | namespace        | 4   | length-delimited |
//! | payload_type     | 5   | varint (0 text, 1 binary) |
//! | payload_utf8     | 6   | length-delimited |
//! | payload_binary   | 7   | length-delimited |
//!
//! The decoder parses tag by tag until the length-prefixed region is
//! consumed exactly. Group wire types and unknown field indices are
//! malformed input; a malformed frame is dropped whole so parsing can
//! resume at the next length prefix.

use shared::PacketBuffer;
use shared::error::{Error, Result};

use crate::namespace::Namespace;

/// Canonical id of the global device-level sender endpoint.
pub const DEFAULT_SENDER_ID: &str = "sender-0";

/// Canonical id of the global device-level receiver endpoint.
pub const DEFAULT_RECEIVER_ID: &str = "receiver-0";

// The only protocol version in existence (CASTV2_1_0).
const PROTOCOL_VERSION: u32 = 0;

// Protobuf wire types used by the envelope.
const WIRE_VARINT: u32 = 0;
const WIRE_FIXED64: u32 = 1;
const WIRE_LEN_DELIMITED: u32 = 2;
const WIRE_FIXED32: u32 = 5;

const fn tag(field: u32, wire: u32) -> u32 {
    (field << 3) | wire
}

/// Payload carried by an envelope. Text payloads are JSON by convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }

    // payload_type on the wire.
    fn type_id(&self) -> u32 {
        match self {
            Payload::Text(_) => 0,
            Payload::Binary(_) => 1,
        }
    }
}

/// One decoded Cast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub source_id: String,
    pub destination_id: String,
    pub namespace: Namespace,
    pub payload: Payload,
}

impl Envelope {
    /// Whether the message came from a portal application session rather
    /// than the global device receiver. Classification is exact-string:
    /// anything other than `receiver-0` is a session id.
    pub fn is_from_portal_receiver(&self) -> bool {
        self.source_id != DEFAULT_RECEIVER_ID
    }

    /// Whether the message is addressed to a controller session rather
    /// than the global sender.
    pub fn is_for_sender_session(&self) -> bool {
        self.destination_id != DEFAULT_SENDER_ID
    }

    /// Encode as a length-prefixed frame ready for the wire.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = PacketBuffer::with_capacity(128);

        body.put_varint(tag(1, WIRE_VARINT));
        body.put_varint(PROTOCOL_VERSION);
        body.put_varint(tag(2, WIRE_LEN_DELIMITED));
        body.put_len_prefixed_bytes(self.source_id.as_bytes());
        body.put_varint(tag(3, WIRE_LEN_DELIMITED));
        body.put_len_prefixed_bytes(self.destination_id.as_bytes());
        body.put_varint(tag(4, WIRE_LEN_DELIMITED));
        body.put_len_prefixed_bytes(self.namespace.uri().as_bytes());
        body.put_varint(tag(5, WIRE_VARINT));
        body.put_varint(self.payload.type_id());
        match &self.payload {
            Payload::Text(text) => {
                body.put_varint(tag(6, WIRE_LEN_DELIMITED));
                body.put_len_prefixed_bytes(text.as_bytes());
            }
            Payload::Binary(data) => {
                body.put_varint(tag(7, WIRE_LEN_DELIMITED));
                body.put_len_prefixed_bytes(data);
            }
        }

        let mut frame = PacketBuffer::with_capacity(body.len() + 4);
        frame.put_u32(body.len() as u32);
        frame.put_bytes(body.bytes());
        frame.into_vec()
    }
}

/// Reassembles the inbound byte stream into validated envelopes.
///
/// Feed raw chunks with [`extend_from_slice`](Self::extend_from_slice) and
/// drain frames with [`next_frame`](Self::next_frame). A frame whose
/// length prefix exceeds the buffered bytes stays put until more data
/// arrives; a malformed frame is consumed and reported as an error so the
/// caller can log it and keep going.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: PacketBuffer,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buffer: PacketBuffer::with_capacity(crate::config::READ_CHUNK_SIZE),
        }
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.buffer.append(data);
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop everything buffered, used when the transport turns fatal.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Extract the next complete frame.
    ///
    /// `Ok(None)` means more bytes are needed; the buffer is untouched.
    /// `Err` means the frame was present but invalid; it has been removed
    /// from the buffer.
    pub fn next_frame(&mut self) -> Result<Option<Envelope>> {
        if self.buffer.len() < 4 {
            return Ok(None);
        }
        let bytes = self.buffer.bytes();
        let frame_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let total = frame_len + 4;
        if self.buffer.len() < total {
            return Ok(None);
        }

        let result = parse_envelope(&self.buffer.bytes()[4..total]);
        self.buffer.consume(total);
        result.map(Some)
    }
}

fn parse_envelope(body: &[u8]) -> Result<Envelope> {
    let mut buf = PacketBuffer::from_slice(body);

    let mut version: Option<u32> = None;
    let mut source_id: Option<String> = None;
    let mut destination_id: Option<String> = None;
    let mut namespace_uri: Option<String> = None;
    let mut payload_type: Option<u32> = None;
    let mut payload: Option<(u32, Vec<u8>)> = None;

    while buf.offset() < buf.len() {
        let key = buf.get_varint().map_err(|_| Error::ErrFrameMalformed)?;
        let field = key >> 3;
        let wire = key & 0x07;

        // Read past the field per its wire type; any read crossing the
        // frame boundary makes the whole frame malformed.
        let mut varint_value = 0u32;
        let data_len = match wire {
            WIRE_VARINT => {
                varint_value = buf.get_varint().map_err(|_| Error::ErrFrameMalformed)?;
                0
            }
            WIRE_FIXED64 => 8,
            WIRE_LEN_DELIMITED => {
                buf.get_varint().map_err(|_| Error::ErrFrameMalformed)? as usize
            }
            WIRE_FIXED32 => 4,
            // Deprecated group markers (3, 4) and anything else.
            _ => return Err(Error::ErrFrameMalformed),
        };
        let data = buf
            .get_bytes(data_len)
            .map_err(|_| Error::ErrFrameMalformed)?;

        match field {
            1 => {
                if wire != WIRE_VARINT {
                    return Err(Error::ErrFrameMalformed);
                }
                version = Some(varint_value);
            }
            2 => source_id = Some(String::from_utf8_lossy(data).into_owned()),
            3 => destination_id = Some(String::from_utf8_lossy(data).into_owned()),
            4 => namespace_uri = Some(String::from_utf8_lossy(data).into_owned()),
            5 => {
                if wire != WIRE_VARINT || varint_value > 1 {
                    return Err(Error::ErrFrameMalformed);
                }
                payload_type = Some(varint_value);
            }
            6 | 7 => payload = Some((field, data.to_vec())),
            _ => return Err(Error::ErrFrameMalformed),
        }
    }

    if version != Some(PROTOCOL_VERSION) {
        return Err(Error::ErrFrameVersion);
    }
    let namespace = match namespace_uri {
        None => return Err(Error::ErrFrameMissingField),
        Some(uri) => Namespace::from_uri(&uri).ok_or(Error::ErrFrameNamespace)?,
    };
    let (source_id, destination_id) = match (source_id, destination_id) {
        (Some(s), Some(d)) => (s, d),
        _ => return Err(Error::ErrFrameMissingField),
    };
    let (payload_tag, payload_data) = payload.ok_or(Error::ErrFrameMissingField)?;
    let payload = match payload_type {
        None => return Err(Error::ErrFrameMissingField),
        Some(0) if payload_tag == 6 => {
            Payload::Text(String::from_utf8_lossy(&payload_data).into_owned())
        }
        Some(1) if payload_tag == 7 => Payload::Binary(payload_data),
        _ => return Err(Error::ErrFramePayloadMismatch),
    };

    Ok(Envelope {
        source_id,
        destination_id,
        namespace,
        payload,
    })
}

#[cfg(test)]
mod frame_test;
