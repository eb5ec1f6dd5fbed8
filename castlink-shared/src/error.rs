use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("buffer: short")]
    ErrBufferShort,
    #[error("varint: too long")]
    ErrVarintTooLong,
    #[error("i/o timeout")]
    ErrTimeout,
    #[error("connection closed")]
    ErrConnectionClosed,
    #[error("dns: truncated header")]
    ErrDnsHeaderShort,
    #[error("dns: not a matching response")]
    ErrDnsNotResponse,
    #[error("dns: name invalid or unterminated")]
    ErrDnsNameInvalid,
    #[error("dns: compression pointer loop")]
    ErrDnsPointerLoop,
    #[error("dns: record crosses rdata boundary")]
    ErrDnsRecordBounds,
    #[error("dns: unexpected answer record")]
    ErrDnsAnswerMismatch,
    #[error("frame: malformed protobuf content")]
    ErrFrameMalformed,
    #[error("frame: unsupported protocol version")]
    ErrFrameVersion,
    #[error("frame: unknown namespace")]
    ErrFrameNamespace,
    #[error("frame: missing required field")]
    ErrFrameMissingField,
    #[error("frame: payload type and payload tag disagree")]
    ErrFramePayloadMismatch,
    #[error("tls: {0}")]
    Tls(String),
    #[error("json: {0}")]
    Json(String),
    #[error("utf8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("{0}")]
    Io(#[source] IoError),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
