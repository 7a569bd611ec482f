use std::sync::Arc;

use acremote_controller::ControllerLink;
use acremote_core::{AcState, StatusResponse};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct CommandService {
    link: ControllerLink,
    metrics: Arc<Metrics>,
}

impl CommandService {
    pub fn new(link: ControllerLink, metrics: Arc<Metrics>) -> Self {
        Self { link, metrics }
    }

    /// Validate a raw set-state body and forward it to the controller.
    ///
    /// Rejections return before anything reaches the link. Once accepted, the
    /// forward runs on its own task and finishes even if the caller goes away.
    pub async fn set_state(&self, body: &[u8]) -> Result<StatusResponse, ApiError> {
        self.metrics.commands_received.inc();

        let state = match AcState::from_body(body) {
            Ok(state) => state,
            Err(err) => {
                self.metrics.commands_rejected.inc();
                warn!(error = %err, "Rejected AC state");
                return Err(err.into());
            }
        };

        let command_id = Uuid::new_v4();
        let span = info_span!("set_state", %command_id);
        span.in_scope(|| {
            info!(
                power = state.power_label(),
                temperature_c = %state.temperature,
                mode = %state.mode,
                fan_speed = %state.fan_speed,
                "Received command from web app"
            );
        });

        let link = self.link.clone();
        let metrics = self.metrics.clone();
        let forward = async move {
            metrics.commands_in_flight.inc();
            let result = link.forward(&state).await;
            metrics.commands_in_flight.dec();
            if result.is_ok() {
                metrics.commands_acknowledged.inc();
            }
            result
        };

        match tokio::spawn(forward.instrument(span)).await {
            Ok(Ok(_ack)) => Ok(StatusResponse::ok()),
            Ok(Err(err)) => Err(err.into()),
            Err(err) => Err(ApiError::Internal(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acremote_controller::ControllerConfig;
    use std::time::Duration;

    fn service() -> (CommandService, Arc<Metrics>) {
        let metrics = Metrics::new().unwrap();
        let cfg = ControllerConfig { ack_delay: Duration::from_millis(200), ..ControllerConfig::default() };
        (CommandService::new(ControllerLink::new(cfg), metrics.clone()), metrics)
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_command_is_acknowledged() {
        let (svc, metrics) = service();
        let body = br#"{"isOn": false, "temperature": 19, "mode": "fan", "fanSpeed": "low"}"#;
        let resp = svc.set_state(body).await.unwrap();
        assert_eq!(resp, StatusResponse::ok());
        assert_eq!(metrics.commands_received.get(), 1);
        assert_eq!(metrics.commands_acknowledged.get(), 1);
        assert_eq!(metrics.commands_in_flight.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_command_never_reaches_link() {
        let (svc, metrics) = service();
        let started = tokio::time::Instant::now();
        let err = svc.set_state(br#"{"isOn": true}"#).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(started.elapsed() < Duration::from_millis(200));
        assert_eq!(metrics.commands_rejected.get(), 1);
        assert_eq!(metrics.commands_acknowledged.get(), 0);
    }
}
