//! Captured discovery responses, for exercising the decode path and the
//! discovery engine without a network or a device.
//!
//! The two datagrams are real `_googlecast._tcp.local` responses (one per
//! address family) paired with the source addresses they arrived from.
//! Replayed through a [`CannedSource`] they decode into the fixed device
//! records the integration tests assert on.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use shared::error::Result;

use crate::discover::DatagramSource;

/// Source address the IPv4 capture arrived from.
pub const IPV4_SOURCE: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 11, 12, 13));

/// Source address the IPv6 capture arrived from.
pub const IPV6_SOURCE: IpAddr = IpAddr::V6(Ipv6Addr::new(
    0x2016, 0x0cd8, 0x4567, 0x2cd0, 0, 0, 0, 0x12,
));

/// IPv4 response: PTR + TXT (`fn=Den TV`, `md=Chromecast`) + SRV (8009) + A.
pub const IPV4_RESPONSE: &[u8] = &[
    0xfe, 0xed, 0x84, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x03, 0x0b, 0x5f, 0x67, 0x6f,
    0x6f, 0x67, 0x6c, 0x65, 0x63, 0x61, 0x73, 0x74,
    0x04, 0x5f, 0x74, 0x63, 0x70, 0x05, 0x6c, 0x6f,
    0x63, 0x61, 0x6c, 0x00, 0x00, 0x0c, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x78, 0x00, 0x2e, 0x2b, 0x43,
    0x68, 0x72, 0x6f, 0x6d, 0x65, 0x63, 0x61, 0x73,
    0x74, 0x2d, 0x32, 0x62, 0x36, 0x33, 0x39, 0x37,
    0x30, 0x68, 0x62, 0x63, 0x32, 0x32, 0x68, 0x32,
    0x36, 0x62, 0x36, 0x62, 0x32, 0x61, 0x30, 0x34,
    0x39, 0x32, 0x38, 0x32, 0x35, 0x64, 0x62, 0x38,
    0x64, 0x32, 0xc0, 0x0c, 0xc0, 0x2e, 0x00, 0x10,
    0x80, 0x01, 0x00, 0x00, 0x11, 0x94, 0x00, 0xb3,
    0x23, 0x69, 0x64, 0x3d, 0x36, 0x33, 0x39, 0x37,
    0x30, 0x68, 0x62, 0x63, 0x32, 0x32, 0x68, 0x32,
    0x36, 0x62, 0x36, 0x62, 0x32, 0x61, 0x30, 0x34,
    0x39, 0x32, 0x38, 0x32, 0x35, 0x64, 0x62, 0x38,
    0x64, 0x32, 0x66, 0x34, 0x23, 0x63, 0x64, 0x3d,
    0x43, 0x42, 0x33, 0x30, 0x31, 0x31, 0x41, 0x35,
    0x34, 0x46, 0x46, 0x46, 0x46, 0x34, 0x46, 0x36,
    0x41, 0x45, 0x41, 0x30, 0x44, 0x37, 0x43, 0x39,
    0x43, 0x36, 0x42, 0x46, 0x44, 0x41, 0x37, 0x44,
    0x13, 0x72, 0x6d, 0x3d, 0x46, 0x38, 0x43, 0x41,
    0x46, 0x42, 0x39, 0x37, 0x41, 0x46, 0x41, 0x33,
    0x36, 0x31, 0x30, 0x46, 0x05, 0x76, 0x65, 0x3d,
    0x30, 0x35, 0x0d, 0x6d, 0x64, 0x3d, 0x43, 0x68,
    0x72, 0x6f, 0x6d, 0x65, 0x63, 0x61, 0x73, 0x74,
    0x12, 0x69, 0x63, 0x3d, 0x2f, 0x73, 0x65, 0x74,
    0x75, 0x70, 0x2f, 0x69, 0x63, 0x6f, 0x6e, 0x2e,
    0x70, 0x6e, 0x67, 0x09, 0x66, 0x6e, 0x3d, 0x44,
    0x65, 0x6e, 0x20, 0x54, 0x56, 0x07, 0x63, 0x61,
    0x3d, 0x34, 0x31, 0x30, 0x31, 0x04, 0x73, 0x74,
    0x3d, 0x30, 0x0f, 0x62, 0x73, 0x3d, 0x46, 0x41,
    0x38, 0x46, 0x43, 0x41, 0x39, 0x32, 0x31, 0x30,
    0x41, 0x32, 0x04, 0x6e, 0x66, 0x3d, 0x31, 0x03,
    0x72, 0x73, 0x3d, 0xc0, 0x2e, 0x00, 0x21, 0x80,
    0x01, 0x00, 0x00, 0x00, 0x78, 0x00, 0x2d, 0x00,
    0x00, 0x00, 0x00, 0x1f, 0x49, 0x24, 0x30, 0x35,
    0x34, 0x32, 0x37, 0x39, 0x30, 0x66, 0x2d, 0x61,
    0x66, 0x30, 0x36, 0x2d, 0x66, 0x38, 0x36, 0x61,
    0x2d, 0x31, 0x66, 0x31, 0x62, 0x2d, 0x36, 0x34,
    0x38, 0x39, 0x38, 0x30, 0x39, 0x30, 0x66, 0x39,
    0x66, 0x34, 0xc0, 0x1d, 0xc1, 0x2d, 0x00, 0x01,
    0x80, 0x01, 0x00, 0x00, 0x00, 0x78, 0x00, 0x04,
    0x0a, 0x0c, 0x01, 0x8d,
];

/// IPv6 response: PTR + TXT (`fn=TST Chrome Panel`, `md=Chromecast Ultra`)
/// + SRV (8009) + A + AAAA.
pub const IPV6_RESPONSE: &[u8] = &[
    0xfe, 0xed, 0x84, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x04, 0x0b, 0x5f, 0x67, 0x6f,
    0x6f, 0x67, 0x6c, 0x65, 0x63, 0x61, 0x73, 0x74,
    0x04, 0x5f, 0x74, 0x63, 0x70, 0x05, 0x6c, 0x6f,
    0x63, 0x61, 0x6c, 0x00, 0x00, 0x0c, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x78, 0x00, 0x2e, 0x2b, 0x43,
    0x68, 0x72, 0x6f, 0x6d, 0x65, 0x63, 0x61, 0x73,
    0x74, 0x2d, 0x36, 0x62, 0x30, 0x68, 0x33, 0x62,
    0x32, 0x36, 0x30, 0x32, 0x33, 0x64, 0x32, 0x33,
    0x32, 0x65, 0x30, 0x37, 0x32, 0x61, 0x32, 0x62,
    0x65, 0x32, 0x38, 0x61, 0x32, 0x34, 0x62, 0x37,
    0x62, 0x37, 0xc0, 0x0c, 0xc0, 0x2e, 0x00, 0x10,
    0x80, 0x01, 0x00, 0x00, 0x11, 0x94, 0x00, 0xc3,
    0x23, 0x69, 0x64, 0x3d, 0x36, 0x62, 0x30, 0x68,
    0x33, 0x62, 0x32, 0x36, 0x30, 0x32, 0x33, 0x64,
    0x32, 0x33, 0x32, 0x65, 0x30, 0x37, 0x32, 0x61,
    0x32, 0x62, 0x65, 0x32, 0x38, 0x61, 0x32, 0x34,
    0x62, 0x37, 0x62, 0x37, 0x23, 0x63, 0x64, 0x3d,
    0x43, 0x34, 0x45, 0x32, 0x41, 0x41, 0x37, 0x42,
    0x41, 0x43, 0x33, 0x44, 0x41, 0x30, 0x41, 0x30,
    0x39, 0x37, 0x38, 0x37, 0x44, 0x34, 0x45, 0x44,
    0x36, 0x32, 0x30, 0x35, 0x35, 0x44, 0x44, 0x37,
    0x13, 0x72, 0x6d, 0x3d, 0x37, 0x32, 0x32, 0x45,
    0x34, 0x31, 0x41, 0x36, 0x35, 0x30, 0x33, 0x36,
    0x34, 0x36, 0x43, 0x45, 0x05, 0x76, 0x65, 0x3d,
    0x30, 0x35, 0x13, 0x6d, 0x64, 0x3d, 0x43, 0x68,
    0x72, 0x6f, 0x6d, 0x65, 0x63, 0x61, 0x73, 0x74,
    0x20, 0x55, 0x6c, 0x74, 0x72, 0x61, 0x12, 0x69,
    0x63, 0x3d, 0x2f, 0x73, 0x65, 0x74, 0x75, 0x70,
    0x2f, 0x69, 0x63, 0x6f, 0x6e, 0x2e, 0x70, 0x6e,
    0x67, 0x13, 0x66, 0x6e, 0x3d, 0x54, 0x53, 0x54,
    0x20, 0x43, 0x68, 0x72, 0x6f, 0x6d, 0x65, 0x20,
    0x50, 0x61, 0x6e, 0x65, 0x6c, 0x07, 0x63, 0x61,
    0x3d, 0x34, 0x31, 0x30, 0x31, 0x04, 0x73, 0x74,
    0x3d, 0x30, 0x0f, 0x62, 0x73, 0x3d, 0x46, 0x41,
    0x38, 0x46, 0x43, 0x41, 0x37, 0x38, 0x34, 0x35,
    0x41, 0x32, 0x04, 0x6e, 0x66, 0x3d, 0x31, 0x03,
    0x72, 0x73, 0x3d, 0xc0, 0x2e, 0x00, 0x21, 0x80,
    0x01, 0x00, 0x00, 0x00, 0x78, 0x00, 0x2d, 0x00,
    0x00, 0x00, 0x00, 0x1f, 0x49, 0x24, 0x38, 0x32,
    0x32, 0x66, 0x36, 0x61, 0x34, 0x30, 0x2d, 0x34,
    0x32, 0x39, 0x38, 0x2d, 0x32, 0x32, 0x37, 0x63,
    0x2d, 0x32, 0x39, 0x39, 0x63, 0x2d, 0x30, 0x64,
    0x37, 0x34, 0x39, 0x33, 0x38, 0x32, 0x66, 0x39,
    0x64, 0x39, 0xc0, 0x1d, 0xc1, 0x37, 0x00, 0x01,
    0x80, 0x01, 0x00, 0x00, 0x00, 0x78, 0x00, 0x04,
    0x0a, 0x0c, 0x01, 0x74, 0xc1, 0x37, 0x00, 0x1c,
    0x80, 0x01, 0x00, 0x00, 0x00, 0x78, 0x00, 0x10,
    0x20, 0x16, 0x0c, 0xd8, 0x45, 0x67, 0x2c, 0xd0,
    0x00, 0x00, 0x00, 0x12, 0x00, 0x00, 0x00, 0x00,
];

/// A [`DatagramSource`] that replays a fixed sequence of datagrams.
pub struct CannedSource {
    queue: VecDeque<(Vec<u8>, IpAddr)>,
}

impl CannedSource {
    pub fn new(datagrams: Vec<(Vec<u8>, IpAddr)>) -> Self {
        Self {
            queue: datagrams.into(),
        }
    }

    /// The captured IPv4 response, once.
    pub fn ipv4() -> Self {
        Self::new(vec![(IPV4_RESPONSE.to_vec(), IPV4_SOURCE)])
    }

    /// The captured IPv6 response, once.
    pub fn ipv6() -> Self {
        Self::new(vec![(IPV6_RESPONSE.to_vec(), IPV6_SOURCE)])
    }
}

impl DatagramSource for CannedSource {
    fn recv(&mut self, _timeout: Duration) -> Result<Option<(Vec<u8>, IpAddr)>> {
        Ok(self.queue.pop_front())
    }
}
