use std::{
    collections::HashMap,
    fs::{self, File},
    io::prelude::*,
    net::SocketAddr,
    path::Path,
    time::Duration,
};

use log::warn;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the server, loaded from a TOML file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to bind to, e.g. "0.0.0.0:25565".
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Maximum concurrent connections.
    #[serde(default = "default_max_conn")]
    pub max_conn: u32,

    /// New connections allowed per second from one IP.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    /// Minimum back-off (seconds) once an IP is rate limited.
    #[serde(default = "default_cooldown")]
    pub cooldown: u64,

    /// Version name shown in the server list.
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Message of the day.
    #[serde(default = "default_motd")]
    pub motd: String,

    #[serde(default = "default_max_players")]
    pub max_players: u32,

    /// Refuse logins once `max_players` are online. When false the status
    /// listing grows its max to match the online count instead.
    #[serde(default)]
    pub restricted: bool,

    /// Supported protocol versions; the first one is advertised to
    /// incompatible clients.
    #[serde(default = "default_compatible_versions")]
    pub compatible_versions: Vec<i32>,

    /// Seconds between keepalive probes in play state. 0 disables them.
    #[serde(default = "default_keepalive_interval")]
    pub keepalive_interval: u64,

    /// Seconds a session may stay silent before reaching play state.
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout: u64,

    #[serde(flatten)]
    pub other_fields: HashMap<String, toml::Value>,
}

fn default_bind() -> String {
    "0.0.0.0:25565".to_string()
}

fn default_max_conn() -> u32 {
    65535
}

fn default_rate_limit() -> u32 {
    10
}

fn default_cooldown() -> u64 {
    3
}

fn default_server_name() -> String {
    "Typhoon".to_string()
}

fn default_motd() -> String {
    "A Typhoon server".to_string()
}

fn default_max_players() -> u32 {
    20
}

fn default_compatible_versions() -> Vec<i32> {
    vec![404]
}

fn default_keepalive_interval() -> u64 {
    15
}

fn default_handshake_timeout() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_conn: default_max_conn(),
            rate_limit: default_rate_limit(),
            cooldown: default_cooldown(),
            server_name: default_server_name(),
            motd: default_motd(),
            max_players: default_max_players(),
            restricted: false,
            compatible_versions: default_compatible_versions(),
            keepalive_interval: default_keepalive_interval(),
            handshake_timeout: default_handshake_timeout(),
            other_fields: HashMap::new(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parses and validates. Unknown keys are reported, not rejected.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(raw)?;

        for (key, value) in &config.other_fields {
            warn!("Unknown configuration '{}' with value {:?}", key, value);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let config_str = toml::to_string(&self)?;
        let mut file = File::create(path)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.compatible_versions.is_empty() {
            return Err(ConfigLoadError::Invalid(
                "compatible_versions must list at least one protocol version".into(),
            ));
        }
        if self.rate_limit == 0 {
            return Err(ConfigLoadError::Invalid("rate_limit must be nonzero".into()));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigLoadError> {
        self.bind
            .parse()
            .map_err(|err| ConfigLoadError::Invalid(format!("bind '{}': {err}", self.bind)))
    }

    pub fn keepalive_interval(&self) -> Option<Duration> {
        (self.keepalive_interval > 0).then(|| Duration::from_secs(self.keepalive_interval))
    }

    pub fn handshake_timeout(&self) -> Option<Duration> {
        (self.handshake_timeout > 0).then(|| Duration::from_secs(self.handshake_timeout))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Could not open config")]
    Io(#[from] std::io::Error),
    #[error("Could not parse")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
