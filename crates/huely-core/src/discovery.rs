// ── Bridge discovery ──
//
// Resolves the address of the one bridge huely talks to. When a source
// reports several bridges, the first one in response order wins.

use std::future::Future;
use std::time::Duration;

use huely_api::{DiscoveredBridge, DiscoveryClient};
use tracing::{debug, info};

use crate::config::{DiscoveryMethod, HubConfig};
use crate::error::CoreError;
use crate::model::BridgeAddress;

/// A source of bridge addresses.
pub trait Discovery: Send + Sync {
    /// Resolve the bridge address. Fails with
    /// [`CoreError::NoBridgeFound`] when the source reports nothing.
    fn discover(&self) -> impl Future<Output = Result<BridgeAddress, CoreError>> + Send;
}

/// Pick the first reported bridge.
pub fn first_bridge(bridges: Vec<DiscoveredBridge>) -> Result<BridgeAddress, CoreError> {
    let Some(first) = bridges.into_iter().next() else {
        return Err(CoreError::NoBridgeFound);
    };
    debug!(id = %first.id, ip = %first.internal_ip_address, "selected bridge");
    BridgeAddress::new(first.internal_ip_address).map_err(|_| CoreError::Discovery {
        message: format!("bridge {} reported an empty address", first.id),
    })
}

// ── Cloud ────────────────────────────────────────────────────────

/// Discovery through the vendor's cloud endpoint.
#[derive(Debug, Clone)]
pub struct CloudDiscovery {
    client: DiscoveryClient,
}

impl CloudDiscovery {
    pub fn new(client: DiscoveryClient) -> Self {
        Self { client }
    }
}

impl Discovery for CloudDiscovery {
    async fn discover(&self) -> Result<BridgeAddress, CoreError> {
        let bridges = self.client.search().await.map_err(|e| CoreError::Discovery {
            message: format!("{} did not answer: {e}", self.client.url()),
        })?;
        let address = first_bridge(bridges)?;
        info!(%address, "discovered bridge via cloud endpoint");
        Ok(address)
    }
}

// ── mDNS ─────────────────────────────────────────────────────────

/// Discovery by browsing `_hue._tcp.local.` on the LAN.
#[derive(Debug, Clone, Copy)]
pub struct MdnsDiscovery {
    window: Duration,
}

impl MdnsDiscovery {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }
}

impl Discovery for MdnsDiscovery {
    async fn discover(&self) -> Result<BridgeAddress, CoreError> {
        let bridges = huely_api::browse_mdns(self.window).await?;
        let address = first_bridge(bridges)?;
        info!(%address, "discovered bridge via mDNS");
        Ok(address)
    }
}

// ── Static ───────────────────────────────────────────────────────

/// A fixed, configured address. No network traffic.
#[derive(Debug, Clone)]
pub struct StaticDiscovery {
    address: BridgeAddress,
}

impl StaticDiscovery {
    pub fn new(address: BridgeAddress) -> Self {
        Self { address }
    }
}

impl Discovery for StaticDiscovery {
    async fn discover(&self) -> Result<BridgeAddress, CoreError> {
        Ok(self.address.clone())
    }
}

// ── Config-driven locator ────────────────────────────────────────

/// The discovery strategy chosen by configuration.
#[derive(Debug, Clone)]
pub enum BridgeLocator {
    Static(StaticDiscovery),
    Cloud(CloudDiscovery),
    Mdns(MdnsDiscovery),
}

impl BridgeLocator {
    /// A configured bridge address takes precedence over `discovery`.
    pub fn from_config(config: &HubConfig) -> Result<Self, CoreError> {
        if let Some(ref address) = config.bridge {
            return Ok(Self::Static(StaticDiscovery::new(address.clone())));
        }
        Ok(match config.discovery {
            DiscoveryMethod::Cloud => {
                let client = DiscoveryClient::new(
                    config.discovery_url.clone(),
                    &config.connection.transport(),
                )?;
                Self::Cloud(CloudDiscovery::new(client))
            }
            DiscoveryMethod::Mdns => Self::Mdns(MdnsDiscovery::new(config.mdns_timeout)),
        })
    }
}

impl Discovery for BridgeLocator {
    async fn discover(&self) -> Result<BridgeAddress, CoreError> {
        match self {
            Self::Static(d) => d.discover().await,
            Self::Cloud(d) => d.discover().await,
            Self::Mdns(d) => d.discover().await,
        }
    }
}
