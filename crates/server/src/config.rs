use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use acremote_controller::ControllerConfig;
use anyhow::Context;

/// Everything the server needs at startup, resolved once and handed to the
/// router builder.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    /// `None` allows every origin.
    pub cors_origins: Option<Vec<String>>,
    /// Built front-end to serve under `/app`.
    pub app_dir: Option<PathBuf>,
    pub controller: ControllerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors_origins: None,
            app_dir: None,
            controller: ControllerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = AppConfig::default();

        if let Some(v) = lookup("ACREMOTE_HTTP_ADDR") {
            if !v.is_empty() {
                cfg.http_addr = v
                    .parse()
                    .with_context(|| format!("Invalid ACREMOTE_HTTP_ADDR: {}", v))?;
            }
        }
        if let Some(v) = lookup("ACREMOTE_CORS_ORIGINS") {
            let origins: Vec<String> = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty() && *o != "*")
                .map(str::to_string)
                .collect();
            if !origins.is_empty() {
                cfg.cors_origins = Some(origins);
            }
        }
        if let Some(v) = lookup("ACREMOTE_APP_DIR") {
            if !v.is_empty() {
                cfg.app_dir = Some(PathBuf::from(v));
            }
        }
        cfg.controller = ControllerConfig::from_lookup(&lookup);

        Ok(cfg)
    }
}
