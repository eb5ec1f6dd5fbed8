//! # castlink-mdns
//!
//! Discovery of Google Cast devices via Multicast DNS.
//!
//! A discovery pass sends one PTR query for `_googlecast._tcp.local` per
//! selected address family and collects the authoritative responses that
//! arrive within the wait window. Each validated response yields one
//! [`CastDevice`] record assembled from the answer's PTR, TXT, SRV and
//! address records, with the device's network address taken from the
//! datagram source.
//!
//! ```no_run
//! use castlink_mdns::{discover, IpMode};
//! use std::time::Duration;
//!
//! for device in discover(IpMode::ALL, Duration::from_secs(3)) {
//!     println!("{} ({}) at {}:{}", device.name, device.model, device.ip_addr, device.port);
//! }
//! ```
//!
//! Discovery is a blocking call; the sockets underneath run with bounded
//! read timeouts so the wait window is honored without a background task.
//!
//! The [`DatagramSource`] trait decouples response collection from the
//! multicast sockets. The [`canned`] module provides fixed captured
//! responses so the full decode path can be exercised without a network.

#![warn(rust_2018_idioms)]

pub mod canned;
pub mod config;
pub mod device;
pub mod discover;
pub(crate) mod message;
pub mod socket;

pub use config::{DiscoverConfig, IpMode};
pub use device::{CastDevice, DEFAULT_CAST_PORT};
pub use discover::{discover, discover_canned, DatagramSource, Discoverer};
pub use socket::MulticastSocket;
