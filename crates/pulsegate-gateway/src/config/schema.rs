use std::net::SocketAddr;

use pulsegate_core::error::{PulseGateError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub observability: ObservabilitySection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PulseGateError::Config("config version must be 1".into()));
        }

        self.server.validate()?;
        self.app.validate()?;
        self.observability.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            PulseGateError::Config("server.listen must be a valid socket address".into())
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_env")]
    pub env: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_app_env(),
        }
    }
}

impl AppSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PulseGateError::Config("app.name must not be empty".into()));
        }
        Ok(())
    }
}

fn default_app_name() -> String {
    "myapp".into()
}
fn default_app_env() -> String {
    "prod".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilitySection {
    /// Path serving the exposition endpoint; excluded from instrumentation.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ObservabilitySection {
    fn default() -> Self {
        Self {
            metrics_path: default_metrics_path(),
        }
    }
}

impl ObservabilitySection {
    pub fn validate(&self) -> Result<()> {
        if !self.metrics_path.starts_with('/') {
            return Err(PulseGateError::Config(
                "observability.metrics_path must start with '/'".into(),
            ));
        }
        Ok(())
    }
}

fn default_metrics_path() -> String {
    "/metrics".into()
}
