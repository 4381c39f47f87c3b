// huely-api: Async Rust client for the Hue bridge local REST API (v1) and bridge discovery

pub mod bridge;
pub mod discovery;
pub mod error;
pub mod transport;

pub use bridge::BridgeClient;
pub use bridge::models::{BridgeConfig, CreatedUser, Light, LightMap, LightState};
pub use discovery::{
    DEFAULT_DISCOVERY_URL, DiscoveredBridge, DiscoveryClient, HUE_SERVICE_TYPE, browse_mdns,
};
pub use error::{Error, error_type};
pub use transport::{Scheme, TlsMode, TransportConfig};
