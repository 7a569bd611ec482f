use std::sync::Arc;
use std::time::Duration;

use acremote_core::{command_line, AcState};
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::config::ControllerConfig;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("controller on {port} is unreachable")]
    Unreachable { port: String },
    #[error("controller on {port} did not acknowledge within {waited:?}")]
    NotAcknowledged { port: String, waited: Duration },
}

/// Outcome of one forwarded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub line: String,
    pub waited: Duration,
}

/// Link to the AC controller board.
///
/// Serial I/O is simulated: a command is "written" by tracing its line, and
/// the acknowledgment is a fixed wait on the caller's task. Cloning is cheap
/// and clones share the same config.
#[derive(Debug, Clone)]
pub struct ControllerLink {
    config: Arc<ControllerConfig>,
}

impl ControllerLink {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    pub async fn forward(&self, state: &AcState) -> Result<Ack, TransportError> {
        let line = command_line(state);
        debug!(port = %self.config.port, baud = self.config.baud_rate, line = line.trim_end(), "Writing command line");
        info!("Simulating command sent to controller");

        let started = Instant::now();
        sleep(self.config.ack_delay).await;
        let waited = started.elapsed();

        info!(waited_ms = waited.as_millis() as u64, "Command acknowledged by simulated controller");
        Ok(Ack { line, waited })
    }
}
