//! Byte-stream transports underneath the message channel.
//!
//! The channel frames and unframes messages over a [`Transport`]; the real
//! implementation is [`TlsTransport`], and [`ScriptedTransport`] stands in
//! for a device when exercising the stack offline.

pub(crate) mod tls;

pub use tls::TlsTransport;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shared::error::Result;

/// A bidirectional byte stream with bounded-timeout reads.
pub trait Transport {
    /// Write the whole buffer, blocking until it is accepted.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `buf.len()` bytes, waiting at most `timeout`.
    ///
    /// `Ok(0)` means nothing arrived within the timeout and the caller
    /// should retry while its own budget lasts. A peer that closed the
    /// stream surfaces as an error, never as a silent zero.
    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

/// A transport that records writes and replays scripted inbound bytes.
///
/// Each scripted chunk is delivered as one read, mimicking how a device
/// delivers whole frames in single TLS records. Reads past the script
/// return `Ok(0)` so receive loops run into their timeout naturally.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    inbound: VecDeque<Vec<u8>>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes the next reads will deliver.
    pub fn push_inbound(&mut self, data: &[u8]) {
        self.inbound.push_back(data.to_vec());
    }

    /// Handle onto everything sent through this transport, usable after
    /// the transport itself has been moved into a connection.
    pub fn sent_log(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        Arc::clone(&self.sent)
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let Some(mut chunk) = self.inbound.pop_front() else {
            // A quiet socket would block until the timeout.
            std::thread::sleep(timeout);
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            chunk.drain(..n);
            self.inbound.push_front(chunk);
        }
        Ok(n)
    }
}
