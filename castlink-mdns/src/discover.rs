//! The discovery engine: drive the query/response codec over multicast
//! sockets and aggregate responses into device records.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use shared::error::Result;

use crate::config::{DiscoverConfig, IpMode, MAX_DATAGRAM_SIZE};
use crate::device::{CastDevice, DEFAULT_CAST_PORT};
use crate::message::{self, ServiceRecord};
use crate::socket::MulticastSocket;

/// Something that yields response datagrams with their source address.
///
/// The real implementation reads a multicast socket; the canned
/// implementation replays captured responses. Injecting the source here is
/// what lets the whole decode-and-aggregate path run without a network.
pub trait DatagramSource {
    /// Receive one datagram, waiting at most `timeout`.
    ///
    /// `Ok(None)` means nothing arrived in time and the caller's wait
    /// window decides what happens next.
    fn recv(&mut self, timeout: Duration) -> Result<Option<(Vec<u8>, IpAddr)>>;
}

struct MulticastSource {
    socket: std::net::UdpSocket,
}

impl MulticastSource {
    /// Open a discovery socket for the family and send the service query.
    fn open(builder: MulticastSocket) -> Result<Self> {
        let socket = builder.open()?;
        let query = message::encode_query();
        socket.send_to(&query, builder.group_addr())?;
        Ok(Self { socket })
    }
}

impl DatagramSource for MulticastSource {
    fn recv(&mut self, timeout: Duration) -> Result<Option<(Vec<u8>, IpAddr)>> {
        self.socket
            .set_read_timeout(Some(timeout.max(Duration::from_millis(1))))?;
        let mut buf = [0u8; MAX_DATAGRAM_SIZE];
        match self.socket.recv_from(&mut buf) {
            Ok((len, src)) => Ok(Some((buf[..len].to_vec(), src.ip()))),
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Run one discovery pass with the default configuration.
///
/// `wait` is the window per address family; zero means the configured
/// default. An empty `ip_mode` returns an empty list without any I/O.
pub fn discover(ip_mode: IpMode, wait: Duration) -> Vec<CastDevice> {
    Discoverer::new(DiscoverConfig::default()).run(ip_mode, wait)
}

/// Run a discovery pass over the canned captures instead of the network,
/// yielding the two fixed records (one per selected family).
pub fn discover_canned(ip_mode: IpMode) -> Vec<CastDevice> {
    let discoverer = Discoverer::new(DiscoverConfig::default());
    let mut devices = Vec::new();
    if ip_mode.contains(IpMode::V4) {
        discoverer.collect(
            &mut crate::canned::CannedSource::ipv4(),
            Duration::from_millis(1),
            &mut devices,
        );
    }
    if ip_mode.contains(IpMode::V6) {
        discoverer.collect(
            &mut crate::canned::CannedSource::ipv6(),
            Duration::from_millis(1),
            &mut devices,
        );
    }
    devices
}

/// Drives discovery passes; holds the configured default wait window.
pub struct Discoverer {
    config: DiscoverConfig,
}

impl Discoverer {
    pub fn new(config: DiscoverConfig) -> Self {
        Self { config }
    }

    /// Query the selected families and collect responses until each
    /// family's wait window closes.
    ///
    /// A family whose socket cannot be opened, configured or joined is
    /// skipped with a warning; the other family still runs. Returns
    /// whatever records were produced, possibly none.
    pub fn run(&self, ip_mode: IpMode, wait: Duration) -> Vec<CastDevice> {
        let window = if wait.is_zero() {
            self.config.timeout
        } else {
            wait
        };

        let mut devices = Vec::new();
        for (mode, builder) in [
            (IpMode::V4, MulticastSocket::v4()),
            (IpMode::V6, MulticastSocket::v6()),
        ] {
            if !ip_mode.contains(mode) {
                continue;
            }
            match MulticastSource::open(builder) {
                Ok(mut source) => self.collect(&mut source, window, &mut devices),
                Err(err) => {
                    log::warn!(
                        "skipping discovery on {}: {err}",
                        builder.group_addr()
                    );
                }
            }
        }
        devices
    }

    /// Collect and decode responses from an injected source until the
    /// window closes. Malformed datagrams are dropped with a warning.
    pub fn collect(
        &self,
        source: &mut dyn DatagramSource,
        window: Duration,
        devices: &mut Vec<CastDevice>,
    ) {
        let deadline = Instant::now() + window;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match source.recv(remaining) {
                Ok(Some((datagram, src))) => match message::decode_response(&datagram) {
                    Ok(record) => {
                        log::debug!("discovered {:?} from {src}", record);
                        devices.push(assemble(record, src));
                    }
                    Err(err) => {
                        log::warn!("discarding mDNS response from {src}: {err}");
                    }
                },
                Ok(None) => break,
                Err(err) => {
                    log::warn!("discovery receive failed: {err}");
                    break;
                }
            }
        }
    }
}

fn assemble(record: ServiceRecord, src: IpAddr) -> CastDevice {
    let ServiceRecord {
        instance,
        id,
        friendly_name,
        model,
        port,
        address,
    } = record;
    if let Some(advertised) = address {
        log::debug!("device advertises address {advertised}");
    }
    CastDevice {
        id: id.unwrap_or_default(),
        name: friendly_name.unwrap_or(instance),
        model: model.unwrap_or_else(|| "Chromecast".to_owned()),
        ip_addr: src.to_string(),
        port: port.unwrap_or(DEFAULT_CAST_PORT),
    }
}
