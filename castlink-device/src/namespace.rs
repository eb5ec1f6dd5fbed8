//! The closed set of Cast namespaces this library speaks.

use std::fmt;

/// Logical sub-channel of a device connection.
///
/// Every envelope carries exactly one of these; a frame naming any other
/// namespace fails validation. Filters that accept any namespace use
/// `Option<Namespace>` with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Connection,
    DeviceAuth,
    Heartbeat,
    Receiver,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Connection,
        Namespace::DeviceAuth,
        Namespace::Heartbeat,
        Namespace::Receiver,
    ];

    /// The canonical URN written on the wire.
    pub fn uri(&self) -> &'static str {
        match self {
            Namespace::Connection => "urn:x-cast:com.google.cast.tp.connection",
            Namespace::DeviceAuth => "urn:x-cast:com.google.cast.tp.deviceauth",
            Namespace::Heartbeat => "urn:x-cast:com.google.cast.tp.heartbeat",
            Namespace::Receiver => "urn:x-cast:com.google.cast.receiver",
        }
    }

    /// Map a wire URN back to the namespace; unknown URNs are `None`.
    pub fn from_uri(uri: &str) -> Option<Namespace> {
        Namespace::ALL.into_iter().find(|ns| ns.uri() == uri)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}
