//! DNS name decoding with RFC 1035 pointer compression.

use shared::error::{Error, Result};

// RFC 1035 limits: 255 bytes per assembled name, 63 bytes per label.
const MAX_NAME_LEN: usize = 255;

// A length byte with both top bits set redirects decoding to a 14-bit
// absolute offset within the message.
const POINTER_MASK: u8 = 0xC0;

/// An ordered sequence of decoded labels.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Name {
    pub(crate) labels: Vec<String>,
}

impl Name {
    /// Decode a possibly compressed name starting at `off`.
    ///
    /// `bound` limits the readable region before the first pointer is
    /// followed (an rdata window); a pointer unlocks the full message but
    /// never advances the returned cursor past the pointer itself.
    ///
    /// Returns the name and the offset just past its in-place encoding.
    /// Decoding terminates for every input: pointer follows are capped at
    /// the message length and the assembled name at 255 bytes.
    pub(crate) fn unpack(msg: &[u8], off: usize, bound: Option<usize>) -> Result<(Name, usize)> {
        let limit = bound
            .map(|b| off.saturating_add(b))
            .unwrap_or(msg.len())
            .min(msg.len());

        let mut labels = Vec::new();
        let mut pos = off;
        let mut end_off = off;
        let mut redirected = false;
        let mut jumps = 0usize;
        let mut assembled = 0usize;

        loop {
            let region_end = if redirected { msg.len() } else { limit };
            if pos >= region_end {
                return Err(Error::ErrDnsNameInvalid);
            }
            let len = msg[pos];

            if len & POINTER_MASK == POINTER_MASK {
                if pos + 1 >= region_end {
                    return Err(Error::ErrDnsNameInvalid);
                }
                let target = usize::from(len & 0x3F) << 8 | usize::from(msg[pos + 1]);
                if !redirected {
                    end_off = pos + 2;
                    redirected = true;
                }
                jumps += 1;
                if jumps > msg.len() {
                    return Err(Error::ErrDnsPointerLoop);
                }
                if target >= msg.len() {
                    return Err(Error::ErrDnsNameInvalid);
                }
                pos = target;
                continue;
            }
            if len & POINTER_MASK != 0 {
                // 01/10 prefixes are reserved label types.
                return Err(Error::ErrDnsNameInvalid);
            }

            pos += 1;
            if len == 0 {
                if !redirected {
                    end_off = pos;
                }
                break;
            }

            let label_end = pos + usize::from(len);
            if label_end > region_end {
                return Err(Error::ErrDnsNameInvalid);
            }
            assembled += usize::from(len) + 1;
            if assembled > MAX_NAME_LEN {
                return Err(Error::ErrDnsNameInvalid);
            }
            labels.push(String::from_utf8_lossy(&msg[pos..label_end]).into_owned());
            pos = label_end;
            if !redirected {
                end_off = pos;
            }
        }

        Ok((Name { labels }, end_off))
    }

    /// Step over a name without materializing it. A pointer ends the
    /// in-place encoding immediately.
    pub(crate) fn skip(msg: &[u8], off: usize) -> Result<usize> {
        let mut pos = off;
        while pos < msg.len() {
            let len = msg[pos];
            if len & POINTER_MASK == POINTER_MASK {
                if pos + 2 > msg.len() {
                    return Err(Error::ErrDnsNameInvalid);
                }
                return Ok(pos + 2);
            }
            if len & POINTER_MASK != 0 {
                return Err(Error::ErrDnsNameInvalid);
            }
            pos += 1;
            if len == 0 {
                return Ok(pos);
            }
            pos += usize::from(len);
        }
        Err(Error::ErrDnsNameInvalid)
    }

    pub(crate) fn first_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}
