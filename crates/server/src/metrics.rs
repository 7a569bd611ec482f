use std::sync::Arc;

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

/// Command counters, registered on a registry owned by the app instance.
pub struct Metrics {
    registry: Registry,
    pub commands_received: IntCounter,
    pub commands_rejected: IntCounter,
    pub commands_acknowledged: IntCounter,
    pub commands_in_flight: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let commands_received = IntCounter::new("acremote_commands_received_total", "Total set-state requests received")?;
        let commands_rejected = IntCounter::new("acremote_commands_rejected_total", "Set-state requests rejected by validation")?;
        let commands_acknowledged = IntCounter::new("acremote_commands_acknowledged_total", "Commands acknowledged by the controller")?;
        let commands_in_flight = IntGauge::new("acremote_commands_in_flight", "Commands waiting for controller acknowledgment")?;

        let registry = Registry::new();
        registry.register(Box::new(commands_received.clone()))?;
        registry.register(Box::new(commands_rejected.clone()))?;
        registry.register(Box::new(commands_acknowledged.clone()))?;
        registry.register(Box::new(commands_in_flight.clone()))?;

        Ok(Arc::new(Self { registry, commands_received, commands_rejected, commands_acknowledged, commands_in_flight }))
    }

    /// Text exposition format, with its content type.
    pub fn encode(&self) -> Result<(String, Vec<u8>), prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;
        Ok((encoder.format_type().to_string(), buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instances_do_not_share_counters() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.commands_received.inc();
        assert_eq!(a.commands_received.get(), 1);
        assert_eq!(b.commands_received.get(), 0);

        let (content_type, body) = a.encode().unwrap();
        assert!(content_type.starts_with("text/plain"));
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("acremote_commands_received_total 1"));
    }
}
