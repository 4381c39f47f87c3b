// ── Runtime connection configuration ──
//
// These types describe *how* to find and talk to the bridge. They never
// touch disk; huely-config (or any embedder) builds a `HubConfig` and
// hands it in.

use std::path::PathBuf;
use std::time::Duration;

use huely_api::{Scheme, TlsMode, TransportConfig};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::model::BridgeAddress;

/// How the bridge address is resolved on each session request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMethod {
    /// Vendor cloud endpoint (N-UPnP).
    #[default]
    Cloud,
    /// Local multicast DNS browse.
    Mdns,
}

/// TLS verification strategy for HTTPS bridge connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Custom CA certificate file (e.g. the vendor's bridge root CA).
    CustomCa(PathBuf),
    /// Skip verification. Bridges ship self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

/// Settings shared by every HTTP client talking to the bridge.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub scheme: Scheme,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ConnectionSettings {
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

/// Everything needed to build a [`Hub`](crate::Hub), minus the credential store.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Fixed bridge address. When set, discovery is skipped entirely.
    pub bridge: Option<BridgeAddress>,
    pub discovery: DiscoveryMethod,
    pub discovery_url: Url,
    /// How long an mDNS browse waits for the first answer.
    pub mdns_timeout: Duration,
    pub connection: ConnectionSettings,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            bridge: None,
            discovery: DiscoveryMethod::default(),
            discovery_url: default_discovery_url(),
            mdns_timeout: Duration::from_secs(5),
            connection: ConnectionSettings::default(),
        }
    }
}

fn default_discovery_url() -> Url {
    // Constant input; parsing cannot fail.
    Url::parse(huely_api::DEFAULT_DISCOVERY_URL).unwrap_or_else(|_| unreachable!())
}
