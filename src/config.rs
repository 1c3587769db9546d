use serde::{Deserialize, Serialize};

use crate::schedule::types::{Configuration, SlotConstraint};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Scheduling settings as stored in a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub config: Configuration,
    pub constraints: Vec<SlotConstraint>,
}

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl ServerConfig {
    /// Port from the command line wins over `PORT`; address from `BIND_ADDRESS`
    pub fn from_env(port_arg: Option<&str>) -> Self {
        Self::resolve(
            port_arg,
            std::env::var("PORT").ok().as_deref(),
            std::env::var("BIND_ADDRESS").ok().as_deref(),
        )
    }

    fn resolve(port_arg: Option<&str>, port_env: Option<&str>, bind_env: Option<&str>) -> Self {
        let port = port_arg
            .and_then(|p| p.parse::<u16>().ok())
            .or_else(|| port_env.and_then(|p| p.parse::<u16>().ok()))
            .unwrap_or(DEFAULT_PORT);
        let bind_address = bind_env
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
            .to_string();
        ServerConfig { bind_address, port }
    }
}
