use std::time::Duration;

/// Configuration for a device session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for an announced vector payload to arrive before
    /// failing with `VectorTransferTimeout`.
    pub vector_transfer_timeout: Duration,
    /// How long to sleep between availability checks while waiting for a
    /// vector payload.
    pub vector_poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vector_transfer_timeout: Duration::from_secs(1),
            vector_poll_interval: Duration::from_millis(1),
        }
    }
}
