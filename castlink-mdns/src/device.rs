//! Discovered device records.

use std::fmt;

/// TCP port a Cast device listens on unless its SRV record says otherwise.
pub const DEFAULT_CAST_PORT: u16 = 8009;

/// One Cast device as advertised in an mDNS response.
///
/// Produced once per device per discovery pass and immutable afterwards.
/// The `ip_addr` is the source address of the response datagram; the `id`,
/// `name` and `model` come from the advertised TXT attributes with the
/// PTR instance name and `"Chromecast"` as fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastDevice {
    /// Opaque device identity (TXT `id=`), empty when not advertised.
    pub id: String,
    /// Human-readable name (TXT `fn=`, else the PTR instance label).
    pub name: String,
    /// Model string (TXT `md=`, else `"Chromecast"`).
    pub model: String,
    /// Textual network address of the responding device.
    pub ip_addr: String,
    /// Message-channel TCP port (SRV, else 8009).
    pub port: u16,
}

impl fmt::Display for CastDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}:{}",
            self.name, self.model, self.ip_addr, self.port
        )
    }
}
