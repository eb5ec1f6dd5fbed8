//! Configuration for device sessions.

use std::time::Duration;

pub(crate) const DEFAULT_APPLICATION_ID: &str = "02834648";

pub(crate) const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_millis(500);

/// Initial size of the rolling read buffer; it grows on demand.
pub(crate) const READ_CHUNK_SIZE: usize = 1024;

/// Tunables for a [`CastConnection`](crate::CastConnection).
///
/// ```rust
/// use castlink_device::SessionConfig;
/// use std::time::Duration;
///
/// let config = SessionConfig::default()
///     .with_application_id("CC1AD845")
///     .with_message_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Application checked by the availability exchange.
    ///
    /// Default: `"02834648"`
    pub application_id: String,

    /// Wall-clock budget for each receiving operation.
    ///
    /// Default: 500 ms
    pub message_timeout: Duration,

    /// Sender id used when a message originates from the controller
    /// session rather than the global sender.
    pub session_sender_id: String,

    /// Receiver id used when a message is addressed to the portal
    /// application rather than the global receiver.
    pub session_receiver_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            application_id: DEFAULT_APPLICATION_ID.to_owned(),
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
            session_sender_id: "sender-1".to_owned(),
            session_receiver_id: "receiver-1".to_owned(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = application_id.into();
        self
    }

    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    pub fn with_session_ids(
        mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        self.session_sender_id = sender.into();
        self.session_receiver_id = receiver.into();
        self
    }
}
