use serde::{Deserialize, Serialize};

// HTTP paths served by acremote-server
pub const SET_STATE_PATH: &str = "/api/set-state";
pub const HEALTH_PATH: &str = "/healthz";
pub const VERSION_PATH: &str = "/version";
pub const METRICS_PATH: &str = "/metrics";

pub const SET_STATE_OK_MESSAGE: &str = "AC state updated successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { message: SET_STATE_OK_MESSAGE.to_string(), status: "ok".to_string() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: "error".to_string() }
    }
}
