//! Bridge discovery: the vendor's cloud N-UPnP endpoint and local mDNS.
//!
//! Both return candidates in the order they were reported. Picking one
//! is the caller's business.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default cloud discovery endpoint.
pub const DEFAULT_DISCOVERY_URL: &str = "https://discovery.meethue.com/";

/// mDNS service type advertised by bridges.
pub const HUE_SERVICE_TYPE: &str = "_hue._tcp.local.";

/// A bridge reported by a discovery source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveredBridge {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "internalipaddress")]
    pub internal_ip_address: String,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Client for the cloud discovery endpoint.
///
/// The endpoint returns the bridges that most recently phoned home from
/// the caller's public IP:
/// `[{"id": "001788fffe100491", "internalipaddress": "192.168.2.23", "port": 443}]`
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    url: Url,
}

impl DiscoveryClient {
    pub fn new(url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        // The cloud endpoint has a real certificate; never skip verification for it.
        let transport = TransportConfig {
            tls: crate::transport::TlsMode::System,
            timeout: transport.timeout,
        };
        Ok(Self {
            http: transport.build_client()?,
            url,
        })
    }

    /// Create a discovery client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Query the endpoint. An empty list is a valid answer, not an error.
    pub async fn search(&self) -> Result<Vec<DiscoveredBridge>, Error> {
        debug!("GET {}", self.url);
        let resp = self.http.get(self.url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Browse the LAN for `_hue._tcp` services for at most `window`.
///
/// Stops at the first resolved bridge, so the result holds zero or one
/// entry. Runs the blocking mDNS receive loop on tokio's blocking pool.
pub async fn browse_mdns(window: Duration) -> Result<Vec<DiscoveredBridge>, Error> {
    tokio::task::spawn_blocking(move || browse_mdns_blocking(window))
        .await
        .map_err(|e| Error::Mdns(format!("browse task failed: {e}")))?
}

fn browse_mdns_blocking(window: Duration) -> Result<Vec<DiscoveredBridge>, Error> {
    let daemon = ServiceDaemon::new().map_err(|e| Error::Mdns(e.to_string()))?;
    let receiver = daemon
        .browse(HUE_SERVICE_TYPE)
        .map_err(|e| Error::Mdns(e.to_string()))?;

    debug!(window_ms = window.as_millis(), "browsing for {HUE_SERVICE_TYPE}");

    let deadline = Instant::now() + window;
    let mut found = Vec::new();
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match receiver.recv_timeout(remaining) {
            Ok(ServiceEvent::ServiceResolved(info)) => {
                if let Some(bridge) = bridge_from_service(&info) {
                    found.push(bridge);
                    break;
                }
            }
            Ok(event) => trace!(?event, "ignoring mDNS event"),
            Err(_) => break,
        }
    }

    if let Err(e) = daemon.shutdown() {
        debug!("mDNS daemon shutdown failed: {e}");
    }
    Ok(found)
}

fn bridge_from_service(info: &ServiceInfo) -> Option<DiscoveredBridge> {
    // Prefer IPv4; the set is unordered, so take the lowest for stability.
    let addresses = info.get_addresses();
    let ip: IpAddr = addresses
        .iter()
        .filter(|ip| ip.is_ipv4())
        .min()
        .or_else(|| addresses.iter().min())
        .copied()?;

    let id = info
        .get_property_val_str("bridgeid")
        .map_or_else(|| info.get_fullname().to_owned(), str::to_owned);

    Some(DiscoveredBridge {
        id,
        internal_ip_address: ip.to_string(),
        port: Some(info.get_port()),
    })
}
