use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Serial device the controller would be attached to.
    pub port: String,
    pub baud_rate: u32,
    /// How long the controller takes to acknowledge a command.
    pub ack_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            ack_delay: Duration::from_secs(1),
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = ControllerConfig::default();

        if let Some(v) = lookup("CONTROLLER_PORT") {
            if !v.is_empty() {
                cfg.port = v;
            }
        }
        if let Some(v) = lookup("CONTROLLER_BAUD_RATE") {
            if let Ok(b) = v.parse::<u32>() {
                cfg.baud_rate = b;
            }
        }
        if let Some(v) = lookup("CONTROLLER_ACK_DELAY_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                cfg.ack_delay = Duration::from_millis(ms);
            }
        }

        cfg
    }
}
