//! Socket construction for mDNS discovery.
//!
//! Discovery sockets are plain UDP client sockets bound to an ephemeral
//! port: the query carries the QU bit, so devices answer us unicast. The
//! socket still joins the multicast group on the default interface so
//! group-addressed answers are delivered too.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

/// The mDNS IPv4 multicast group (224.0.0.251).
pub const MDNS_GROUP_V4: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);

/// The mDNS IPv6 multicast group (ff02::fb).
pub const MDNS_GROUP_V6: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb);

/// The standard mDNS port (5353).
pub const MDNS_PORT: u16 = 5353;

/// A builder for UDP sockets configured for one discovery pass.
///
/// The resulting socket is bound to an ephemeral port, has multicast
/// TTL/hops of 1 and loopback enabled, and is joined to the mDNS group on
/// the default interface.
///
/// ```rust,ignore
/// use castlink_mdns::MulticastSocket;
///
/// let socket = MulticastSocket::v4().open()?;
/// socket.send_to(&query, MulticastSocket::v4().group_addr())?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulticastSocket {
    ipv6: bool,
}

impl MulticastSocket {
    pub fn v4() -> Self {
        Self { ipv6: false }
    }

    pub fn v6() -> Self {
        Self { ipv6: true }
    }

    /// The group address queries are sent to.
    pub fn group_addr(&self) -> SocketAddr {
        if self.ipv6 {
            SocketAddr::new(IpAddr::V6(MDNS_GROUP_V6), MDNS_PORT)
        } else {
            SocketAddr::new(IpAddr::V4(MDNS_GROUP_V4), MDNS_PORT)
        }
    }

    /// Create, configure and bind the socket.
    pub fn open(&self) -> io::Result<UdpSocket> {
        let domain = if self.ipv6 { Domain::IPV6 } else { Domain::IPV4 };
        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

        socket.set_reuse_address(true)?;
        #[cfg(all(unix, not(target_os = "solaris"), not(target_os = "illumos")))]
        socket.set_reuse_port(true)?;

        if self.ipv6 {
            socket.set_only_v6(true)?;
            // Answers should come from the local network only.
            socket.set_multicast_hops_v6(1)?;
            socket.set_multicast_loop_v6(true)?;
            let bind_addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0);
            socket.bind(&bind_addr.into())?;
            socket.join_multicast_v6(&MDNS_GROUP_V6, 0)?;
        } else {
            socket.set_multicast_ttl_v4(1)?;
            socket.set_multicast_loop_v4(true)?;
            let bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
            socket.bind(&bind_addr.into())?;
            socket.join_multicast_v4(&MDNS_GROUP_V4, &Ipv4Addr::UNSPECIFIED)?;
        }

        Ok(socket.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_addresses() {
        assert_eq!(
            MulticastSocket::v4().group_addr().to_string(),
            "224.0.0.251:5353"
        );
        assert_eq!(
            MulticastSocket::v6().group_addr().to_string(),
            "[ff02::fb]:5353"
        );
    }
}
