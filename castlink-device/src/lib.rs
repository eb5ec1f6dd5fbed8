//! # castlink-device
//!
//! The Cast device session: a TLS-protected, long-lived, multiplexed
//! message channel carrying length-prefixed protobuf envelopes across the
//! well-known Cast namespaces.
//!
//! [`CastConnection`] is the entry point. `connect` performs the TCP and
//! TLS handshakes and issues the initial `CONNECT` exchange; after that the
//! typed operations drive the channel:
//!
//! ```no_run
//! use castlink_device::{CastConnection, SessionConfig};
//!
//! # fn main() -> shared::error::Result<()> {
//! let mut conn = CastConnection::connect("10.11.12.13", 8009, SessionConfig::default())?;
//! if conn.ping()? {
//!     println!("device is alive");
//! }
//! if conn.app_available()? {
//!     println!("application is installed");
//! }
//! conn.close();
//! # Ok(())
//! # }
//! ```
//!
//! The lower layers are public for callers that need their own exchanges:
//! [`Channel`] sends and receives filtered envelopes, [`frame`] holds the
//! wire codec, and [`Transport`] abstracts the byte stream so scripted
//! transports can stand in for a device (see [`canned`]).
//!
//! Everything here is blocking with bounded-timeout waits; one connection
//! belongs to one thread of control.

#![warn(rust_2018_idioms)]

pub mod canned;
pub mod channel;
pub mod config;
pub mod connection;
pub mod frame;
pub mod namespace;
pub mod transport;

pub use channel::{Channel, InboundPayload, MatchOutcome, ResponseFilter};
pub use config::SessionConfig;
pub use connection::CastConnection;
pub use frame::{Envelope, FrameDecoder, Payload, DEFAULT_RECEIVER_ID, DEFAULT_SENDER_ID};
pub use namespace::Namespace;
pub use transport::{ScriptedTransport, TlsTransport, Transport};
