//! Wire codec for the `_googlecast._tcp.local` mDNS exchange.
//!
//! The query side emits a single PTR question with the QU (unicast
//! response) bit set; the response side validates the authoritative answer
//! and walks the additional records for the TXT attributes, SRV port and
//! advertised addresses. Anything that fails validation discards the whole
//! datagram — the input is untrusted network data.


pub(crate) mod name;

use std::fmt::Write;

use name::Name;
use shared::PacketBuffer;
use shared::error::{Error, Result};

// Transaction id stamped on every query; responses must echo it.
pub(crate) const MDNS_TXID: u16 = 0xFEED;

// Standard authoritative response, no error.
const RESPONSE_FLAGS: u16 = 0x8400;

// IN class with the top (QU / cache-flush) bit set.
const QCLASS_UNICAST_IN: u16 = 0x8001;

const SERVICE_LABELS: [&str; 3] = ["_googlecast", "_tcp", "local"];

// A Type is a type of DNS record this codec dispatches on.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DnsType {
    A = 1,
    Ptr = 12,
    Txt = 16,
    Aaaa = 28,
    Srv = 33,

    #[default]
    Unsupported = 0,
}

impl From<u16> for DnsType {
    fn from(v: u16) -> Self {
        match v {
            1 => DnsType::A,
            12 => DnsType::Ptr,
            16 => DnsType::Txt,
            28 => DnsType::Aaaa,
            33 => DnsType::Srv,
            _ => DnsType::Unsupported,
        }
    }
}

/// The fields of one validated discovery response.
///
/// `address` is the formatted content of an advertised A/AAAA record; the
/// device's reachable address is decided by the discovery engine from the
/// datagram source, so this is diagnostic only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ServiceRecord {
    pub(crate) instance: String,
    pub(crate) id: Option<String>,
    pub(crate) friendly_name: Option<String>,
    pub(crate) model: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) address: Option<String>,
}

/// Encode the single-question PTR query for the Cast service.
pub(crate) fn encode_query() -> Vec<u8> {
    let mut buf = PacketBuffer::with_capacity(48);

    // Header: txid, flags, QD, AN, NS, AR counts.
    buf.put_u16(MDNS_TXID);
    buf.put_u16(0);
    buf.put_u16(1);
    buf.put_u16(0);
    buf.put_u16(0);
    buf.put_u16(0);

    for label in SERVICE_LABELS {
        buf.put_u8(label.len() as u8);
        buf.put_bytes(label.as_bytes());
    }
    buf.put_u8(0);
    buf.put_u16(DnsType::Ptr as u16);
    buf.put_u16(QCLASS_UNICAST_IN);

    buf.into_vec()
}

/// Decode and validate one response datagram.
///
/// Only direct answers to our query pass: txid `0xFEED`, authoritative
/// response flags, zero questions, exactly one answer, and that answer a
/// PTR record owned by `_googlecast._tcp.local`. Record boundaries are
/// enforced throughout; any violation rejects the datagram.
pub(crate) fn decode_response(msg: &[u8]) -> Result<ServiceRecord> {
    let mut buf = PacketBuffer::from_slice(msg);

    let txid = header_u16(&mut buf)?;
    let flags = header_u16(&mut buf)?;
    let questions = header_u16(&mut buf)?;
    let answers = header_u16(&mut buf)?;
    let authorities = header_u16(&mut buf)?;
    let additionals = header_u16(&mut buf)?;

    if txid != MDNS_TXID || flags != RESPONSE_FLAGS || questions != 0 || answers != 1 {
        return Err(Error::ErrDnsNotResponse);
    }

    // The answer must be the PTR record for the queried service name.
    let (owner, off) = Name::unpack(msg, buf.offset(), None)?;
    buf.set_offset(off);
    let rtype = buf.get_u16()?;
    let rclass = buf.get_u16()?;
    let _ttl = buf.get_u32()?;
    let rdlen = usize::from(buf.get_u16()?);
    if DnsType::from(rtype) != DnsType::Ptr || rclass & 0x7FFF != 1 {
        return Err(Error::ErrDnsAnswerMismatch);
    }
    if owner.labels != SERVICE_LABELS {
        return Err(Error::ErrDnsAnswerMismatch);
    }
    if buf.offset() + rdlen > msg.len() {
        return Err(Error::ErrDnsRecordBounds);
    }

    let mut record = ServiceRecord::default();

    // The PTR data is the instance fqname; its first label is the default
    // display name.
    let (instance, _) = Name::unpack(msg, buf.offset(), Some(rdlen))?;
    if let Some(label) = instance.first_label() {
        record.instance = label.to_owned();
    }
    buf.skip(rdlen)?;

    // Authority records carry nothing of interest here.
    for _ in 0..authorities {
        skip_record(msg, &mut buf)?;
    }

    for _ in 0..additionals {
        let off = Name::skip(msg, buf.offset())?;
        buf.set_offset(off);
        let rtype = buf.get_u16()?;
        let _rclass = buf.get_u16()?;
        let _ttl = buf.get_u32()?;
        let rdlen = usize::from(buf.get_u16()?);
        let rdata = buf.get_bytes(rdlen).map_err(|_| Error::ErrDnsRecordBounds)?;

        match DnsType::from(rtype) {
            DnsType::A if rdlen == 4 => {
                record.address = Some(format_ipv4(rdata));
            }
            DnsType::Aaaa if rdlen == 16 => {
                record.address = Some(format_ipv6(rdata));
            }
            DnsType::Txt => parse_txt(rdata, &mut record),
            DnsType::Srv if rdlen >= 6 => {
                // priority and weight precede the port.
                record.port = Some(u16::from_be_bytes([rdata[4], rdata[5]]));
            }
            _ => {}
        }
    }

    Ok(record)
}

fn header_u16(buf: &mut PacketBuffer) -> Result<u16> {
    buf.get_u16().map_err(|_| Error::ErrDnsHeaderShort)
}

fn skip_record(msg: &[u8], buf: &mut PacketBuffer) -> Result<()> {
    let off = Name::skip(msg, buf.offset())?;
    buf.set_offset(off);
    let _rtype = buf.get_u16()?;
    let _rclass = buf.get_u16()?;
    let _ttl = buf.get_u32()?;
    let rdlen = usize::from(buf.get_u16()?);
    buf.skip(rdlen).map_err(|_| Error::ErrDnsRecordBounds)
}

// TXT rdata is a sequence of <len><bytes> character strings. A segment
// whose declared length reaches past the remaining rdata aborts this
// record only; attributes parsed before it are kept.
fn parse_txt(rdata: &[u8], record: &mut ServiceRecord) {
    let mut pos = 0usize;
    while pos < rdata.len() {
        let len = usize::from(rdata[pos]);
        if len >= rdata.len() - pos {
            break;
        }
        let segment = &rdata[pos + 1..pos + 1 + len];
        if let Some(value) = attribute(segment, b"id=") {
            record.id = Some(value);
        } else if let Some(value) = attribute(segment, b"fn=") {
            record.friendly_name = Some(value);
        } else if let Some(value) = attribute(segment, b"md=") {
            record.model = Some(value);
        }
        pos += len + 1;
    }
}

fn attribute(segment: &[u8], key: &[u8]) -> Option<String> {
    segment
        .strip_prefix(key)
        .map(|v| String::from_utf8_lossy(v).into_owned())
}

fn format_ipv4(data: &[u8]) -> String {
    format!("{}.{}.{}.{}", data[0], data[1], data[2], data[3])
}

// Per-hextet formatting: leading zeros suppressed within a hextet, zero
// hextets rendered empty between the separators.
fn format_ipv6(data: &[u8]) -> String {
    let mut out = String::new();
    for i in 0..8 {
        if i != 0 {
            out.push(':');
        }
        let hextet = u16::from_be_bytes([data[2 * i], data[2 * i + 1]]);
        if hextet != 0 {
            let _ = write!(out, "{hextet:x}");
        }
    }
    out
}
