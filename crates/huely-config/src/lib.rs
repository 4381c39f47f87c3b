//! Configuration and credential storage for huely front-ends.
//!
//! TOML config with `HUELY_*` environment overrides, translation to
//! `huely_core::HubConfig`, and the keyring-backed credential store.

mod keyring_store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use huely_core::{
    BridgeAddress, ConnectionSettings, DiscoveryMethod, HubConfig, Scheme, TlsVerification,
};

pub use keyring_store::{KEYRING_SERVICE, KeyringCredentialStore};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Fixed bridge address ("192.168.1.20" or "host:port"). Skips discovery.
    pub bridge: Option<String>,

    /// Discovery method when no bridge address is set: "cloud" or "mdns".
    #[serde(default)]
    pub discovery: DiscoveryMethod,

    /// Cloud discovery endpoint.
    #[serde(default = "default_discovery_url")]
    pub discovery_url: String,

    /// Talk to the bridge over HTTPS instead of HTTP.
    #[serde(default)]
    pub https: bool,

    /// Accept any TLS certificate, even when `ca_cert` is set.
    #[serde(default)]
    pub insecure: bool,

    /// CA certificate for verifying the bridge over HTTPS.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// mDNS browse window in seconds.
    #[serde(default = "default_mdns_timeout")]
    pub mdns_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bridge: None,
            discovery: DiscoveryMethod::default(),
            discovery_url: default_discovery_url(),
            https: false,
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
            mdns_timeout: default_mdns_timeout(),
        }
    }
}

fn default_discovery_url() -> String {
    "https://discovery.meethue.com/".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_mdns_timeout() -> u64 {
    5
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "huely", "huely").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("huely");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from the canonical path, layered with `HUELY_*` env vars.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, layered with `HUELY_*` env vars.
/// A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HUELY_"))
        .extract()?;
    Ok(config)
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Build the core runtime configuration.
    pub fn to_hub_config(&self) -> Result<HubConfig, ConfigError> {
        let bridge = self
            .bridge
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .map(BridgeAddress::new)
            .transpose()
            .map_err(|e| ConfigError::Validation {
                field: "bridge".into(),
                reason: e.to_string(),
            })?;

        let discovery_url: url::Url =
            self.discovery_url
                .parse()
                .map_err(|_| ConfigError::Validation {
                    field: "discovery_url".into(),
                    reason: format!("invalid URL: {}", self.discovery_url),
                })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::DangerAcceptInvalid // bridges present self-signed certificates
        };

        Ok(HubConfig {
            bridge,
            discovery: self.discovery,
            discovery_url,
            mdns_timeout: Duration::from_secs(self.mdns_timeout),
            connection: ConnectionSettings {
                scheme: if self.https { Scheme::Https } else { Scheme::Http },
                tls,
                timeout: Duration::from_secs(self.timeout),
            },
        })
    }
}
